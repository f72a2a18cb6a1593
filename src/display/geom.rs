/// A cell coordinate. Signed because the editor core may address cells left of
/// or above a surface; drawing clips instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// A rectangle in cell units. Width or height may be zero or negative; such a
/// rectangle covers nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CellRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: CellPos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// A rectangle in device pixels, already clipped to some buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        !self.is_empty() && x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Clip a signed pixel span to `0..width` x `0..height`.
    pub fn clipped(x: i64, y: i64, w: i64, h: i64, width: u32, height: u32) -> Self {
        let x0 = x.clamp(0, width as i64);
        let y0 = y.clamp(0, height as i64);
        let x1 = x.saturating_add(w.max(0)).clamp(0, width as i64);
        let y1 = y.saturating_add(h.max(0)).clamp(0, height as i64);
        Self::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0).max(0) as u32,
            (y1 - y0).max(0) as u32,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/geom.rs"]
mod tests;
