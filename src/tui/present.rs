//! Terminal presentation of the composited screen.
//!
//! Each terminal cell shows one editor cell. The widget only reads front
//! buffers, then paints the caret and the composition overlay on top without
//! touching any surface.

use crate::display::{FontMeasure, Rgb, Screen, SidePane, Surface};
use crate::input::CompositionOverlay;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

/// Pixel size the terminal host assigns to one cell.
pub const CELL_PX: (u32, u32) = (8, 16);

/// Terminal cells have a fixed geometry no matter which font the core asks
/// for; the terminal emulator owns the real font.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalCells;

impl FontMeasure for TerminalCells {
    fn cell_size(&self, _family: &str, _size: f32) -> (f32, f32) {
        (CELL_PX.0 as f32, CELL_PX.1 as f32)
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct ScreenWidget<'a> {
    screen: &'a Screen,
    overlay: Option<&'a CompositionOverlay>,
}

impl<'a> ScreenWidget<'a> {
    pub fn new(screen: &'a Screen, overlay: Option<&'a CompositionOverlay>) -> Self {
        Self { screen, overlay }
    }

    fn editor_area(&self, area: Rect) -> Rect {
        let width = self.screen.editor_width(area.width as u32) as u16;
        Rect::new(area.x, area.y, width, area.height)
    }
}

impl Widget for ScreenWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let editor = self.editor_area(area);
        let palette = self.screen.palette();
        buf.set_style(
            editor,
            Style::default()
                .fg(color(palette.foreground))
                .bg(color(palette.background)),
        );

        for surface in self.screen.registry().layers() {
            paint_surface(surface, editor, buf);
        }

        match self.overlay {
            Some(overlay) => paint_overlay(overlay, editor, buf),
            None => {
                if let Some((pos, caret)) = self.screen.caret() {
                    if let Some(cell) = cell_at(editor, pos.x, pos.y).and_then(|p| buf.cell_mut(p)) {
                        cell.set_bg(color(caret));
                        cell.set_fg(color(palette.background));
                    }
                }
            }
        }

        if let Some(pane) = self.screen.pane() {
            let pane_area = Rect::new(
                editor.right(),
                area.y,
                area.width.saturating_sub(editor.width),
                area.height,
            );
            paint_pane(pane, pane_area, buf);
        }
    }
}

/// Terminal position of editor cell `(x, y)`, if it lies inside `area`.
fn cell_at(area: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    if x < 0 || y < 0 || x >= area.width as i32 || y >= area.height as i32 {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}

fn paint_surface(surface: &Surface, area: Rect, buf: &mut Buffer) {
    let front = surface.front();
    let metrics = surface.metrics();
    let (cw, ch) = (metrics.cell_width_px, metrics.cell_height_px);
    let origin = surface.position();

    for cy in 0..surface.height() {
        let mut covered = 0u8;
        for cx in 0..surface.width() {
            let Some(pos) = cell_at(area, origin.x + cx, origin.y + cy) else {
                continue;
            };
            let (px, py) = (cx as u32 * cw, cy as u32 * ch);
            // Sampled mid-cell: block fills spill one pixel into the next cell.
            let Some(bg) = front.pixel(px + cw / 2, py + ch / 2) else {
                continue;
            };
            let glyph = front.glyph_at(px, py);
            let underline_row = ((cy as u32 + 1) * ch).checked_sub(3);
            let underlined = underline_row
                .and_then(|row| front.pixel(px, row))
                .is_some_and(|c| c != bg);

            let Some(cell) = buf.cell_mut(pos) else {
                continue;
            };
            cell.set_bg(color(bg));
            match glyph {
                Some(glyph) => {
                    cell.set_symbol(&glyph.text);
                    cell.set_fg(color(glyph.color));
                    let mut modifier = Modifier::empty();
                    if glyph.bold {
                        modifier |= Modifier::BOLD;
                    }
                    if underlined {
                        modifier |= Modifier::UNDERLINED;
                    }
                    cell.modifier = modifier;
                    covered = glyph.cells.saturating_sub(1);
                }
                None if covered > 0 => {
                    // Right half of a wide glyph.
                    cell.set_symbol("");
                    covered -= 1;
                }
                None => {
                    cell.set_symbol(" ");
                    cell.modifier = if underlined {
                        Modifier::UNDERLINED
                    } else {
                        Modifier::empty()
                    };
                }
            }
        }
    }
}

fn paint_overlay(overlay: &CompositionOverlay, area: Rect, buf: &mut Buffer) {
    let style = Style::default()
        .fg(color(overlay.foreground))
        .bg(color(overlay.background))
        .add_modifier(Modifier::UNDERLINED);
    let mut x = overlay.anchor.x;
    for (grapheme, width) in overlay.segments() {
        if width == 0 {
            continue;
        }
        let Some(cell) = cell_at(area, x, overlay.anchor.y).and_then(|p| buf.cell_mut(p)) else {
            break;
        };
        cell.set_symbol(grapheme);
        cell.set_style(style);
        for i in 1..width as i32 {
            if let Some(cell) = cell_at(area, x + i, overlay.anchor.y).and_then(|p| buf.cell_mut(p)) {
                cell.set_symbol("");
                cell.set_style(style);
            }
        }
        x += width as i32;
    }
}

fn paint_pane(pane: &SidePane, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let block = Block::default().borders(Borders::LEFT);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut y = inner.y;
    for (html, rows) in pane.entries().iter().zip(pane.entry_rows(inner.height)) {
        if rows == 0 {
            continue;
        }
        let rect = Rect::new(inner.x, y, inner.width, rows);
        Paragraph::new(SidePane::plain_text(html))
            .wrap(Wrap { trim: true })
            .render(rect, buf);
        y += rows;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/present.rs"]
mod tests;
