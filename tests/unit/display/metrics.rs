use super::*;

struct Exact(f32, f32);

impl FontMeasure for Exact {
    fn cell_size(&self, _family: &str, _size: f32) -> (f32, f32) {
        (self.0, self.1)
    }
}

#[test]
fn estimate_rounds_cells_up_to_whole_pixels() {
    let m = GlyphMetrics::measure("mono", 14.0, &MonospaceEstimate::default()).unwrap();
    assert_eq!(m.cell_width_px, 9);
    assert_eq!(m.cell_height_px, 16);
    assert_eq!(m.family, "mono");
}

#[test]
fn measure_rejects_unusable_sizes() {
    let est = MonospaceEstimate::default();
    assert!(GlyphMetrics::measure("mono", 0.0, &est).is_none());
    assert!(GlyphMetrics::measure("mono", -3.0, &est).is_none());
    assert!(GlyphMetrics::measure("mono", f32::NAN, &est).is_none());
    assert!(GlyphMetrics::measure("mono", 12.0, &Exact(f32::INFINITY, 1.0)).is_none());
}

#[test]
fn cells_never_collapse_to_zero_pixels() {
    let m = GlyphMetrics::measure("mono", 1.0, &Exact(0.0, 0.0)).unwrap();
    assert_eq!((m.cell_width_px, m.cell_height_px), (1, 1));
}

#[test]
fn cell_counts_floor_and_subtract_the_tweak() {
    let m = GlyphMetrics::fixed("mono", 14.0, 8, 16);
    let tweak = CellTweak { cols: 1, rows: 1 };
    assert_eq!(m.cols_for_px(647, tweak), 79);
    assert_eq!(m.rows_for_px(400, tweak), 24);
    assert_eq!(m.cols_for_px(647, CellTweak::NONE), 80);
}

#[test]
fn cell_counts_saturate_for_tiny_windows() {
    let m = GlyphMetrics::fixed("mono", 14.0, 8, 16);
    let tweak = CellTweak { cols: 2, rows: 3 };
    assert_eq!(m.cols_for_px(10, tweak), 0);
    assert_eq!(m.rows_for_px(0, tweak), 0);
}

#[test]
fn float_noise_in_the_advance_does_not_add_a_pixel() {
    let est = MonospaceEstimate::default();
    let m = GlyphMetrics::measure("mono", 20.0, &est).unwrap();
    assert_eq!((m.cell_width_px, m.cell_height_px), (12, 22));
    let m = GlyphMetrics::measure("mono", 12.1, &Exact(7.01, 15.0)).unwrap();
    assert_eq!(m.cell_width_px, 8);
}
