use super::color::Palette;
use super::geom::CellPos;
use super::metrics::GlyphMetrics;
use super::surface::Surface;
use super::view::{View, ViewId, ViewKind};
use crate::error::{CoreError, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Geometry and flags of a view as requested by `make-view`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSpec {
    pub id: ViewId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub use_modeline: bool,
    pub kind: ViewKind,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    view: View,
}

/// Owns every live view. A view enters through [`ViewRegistry::create`] and
/// leaves through [`ViewRegistry::destroy`]; referencing any other id fails.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: FxHashMap<ViewId, Entry>,
    next_seq: u64,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        spec: ViewSpec,
        metrics: &Arc<GlyphMetrics>,
        palette: &Palette,
    ) -> Result<&mut View> {
        if self.views.contains_key(&spec.id) {
            return Err(CoreError::DuplicateView(spec.id));
        }
        let view = View::new(
            spec.id,
            spec.kind,
            CellPos::new(spec.x, spec.y),
            spec.width,
            spec.height,
            spec.use_modeline,
            metrics,
            palette,
        )?;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let entry = self.views.entry(spec.id).or_insert(Entry { seq, view });
        Ok(&mut entry.view)
    }

    pub fn get(&self, id: ViewId) -> Result<&View> {
        self.views
            .get(&id)
            .map(|e| &e.view)
            .ok_or(CoreError::UnknownView(id))
    }

    pub fn get_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.views
            .get_mut(&id)
            .map(|e| &mut e.view)
            .ok_or(CoreError::UnknownView(id))
    }

    pub fn destroy(&mut self, id: ViewId) -> Result<()> {
        let entry = self.views.remove(&id).ok_or(CoreError::UnknownView(id))?;
        entry.view.delete();
        Ok(())
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.values().map(|e| &e.view)
    }

    /// All surfaces bottom to top: by z-index, then by view creation order.
    pub fn layers(&self) -> Vec<&Surface> {
        let mut layers: Vec<(i32, u64, &Surface)> = self
            .views
            .values()
            .flat_map(|e| e.view.surfaces().map(move |s| (s.z_index(), e.seq, s)))
            .collect();
        layers.sort_by_key(|&(z, seq, _)| (z, seq));
        layers.into_iter().map(|(_, _, s)| s).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/registry.rs"]
mod tests;
