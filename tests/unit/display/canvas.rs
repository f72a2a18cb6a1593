use super::*;

const BG: Rgb = Rgb(0, 0, 0);
const RED: Rgb = Rgb(0xff, 0, 0);

fn glyph(text: &str) -> GlyphStamp {
    GlyphStamp {
        text: text.into(),
        color: Rgb::WHITE,
        bold: false,
        cells: 1,
    }
}

#[test]
fn new_buffer_is_filled() {
    let buf = PixelBuffer::new(4, 3, RED).unwrap();
    assert_eq!(buf.pixel(0, 0), Some(RED));
    assert_eq!(buf.pixel(3, 2), Some(RED));
    assert_eq!(buf.pixel(4, 0), None);
}

#[test]
fn oversized_buffer_is_a_rendering_error() {
    let err = PixelBuffer::new(1 << 14, 1 << 14, BG).unwrap_err();
    assert_eq!(err.kind(), "rendering");
}

#[test]
fn fill_clips_and_occludes_glyphs() {
    let mut buf = PixelBuffer::new(4, 4, BG).unwrap();
    buf.stamp(1, 1, glyph("a"));
    buf.stamp(3, 3, glyph("b"));
    buf.fill(PixelRect::new(0, 0, 2, 100), RED);
    assert_eq!(buf.pixel(1, 3), Some(RED));
    assert_eq!(buf.pixel(2, 0), Some(BG));
    assert!(buf.glyph_at(1, 1).is_none());
    assert_eq!(buf.glyph_at(3, 3).unwrap().text, "b");
}

#[test]
fn hline_is_clipped_to_width() {
    let mut buf = PixelBuffer::new(4, 2, BG).unwrap();
    buf.hline(2, 1, 10, RED);
    assert_eq!(buf.pixel(1, 1), Some(BG));
    assert_eq!(buf.pixel(2, 1), Some(RED));
    assert_eq!(buf.pixel(3, 1), Some(RED));
    buf.hline(0, 5, 3, RED);
}

#[test]
fn stamps_outside_the_buffer_are_dropped() {
    let mut buf = PixelBuffer::new(2, 2, BG).unwrap();
    buf.stamp(2, 0, glyph("x"));
    assert_eq!(buf.glyph_count(), 0);
}

#[test]
fn copy_from_moves_only_the_region() {
    let mut back = PixelBuffer::new(4, 4, BG).unwrap();
    let mut front = PixelBuffer::new(4, 4, BG).unwrap();
    back.fill(PixelRect::new(0, 0, 4, 4), RED);
    back.stamp(0, 0, glyph("in"));
    back.stamp(3, 3, glyph("out"));
    front.stamp(1, 1, glyph("stale"));

    front.copy_from(&back, PixelRect::new(0, 0, 2, 2));

    assert_eq!(front.pixel(1, 1), Some(RED));
    assert_eq!(front.pixel(2, 2), Some(BG));
    assert_eq!(front.glyph_at(0, 0).unwrap().text, "in");
    assert!(front.glyph_at(1, 1).is_none());
    assert!(front.glyph_at(3, 3).is_none());
}

#[test]
fn shift_rows_up_leaves_the_tail_stale() {
    let mut buf = PixelBuffer::new(2, 4, BG).unwrap();
    for y in 0..4 {
        buf.fill(PixelRect::new(0, y, 2, 1), Rgb(y as u8, 0, 0));
    }
    buf.stamp(0, 3, glyph("last"));

    buf.shift_rows(1, 0, 3);

    assert_eq!(buf.pixel(0, 0), Some(Rgb(1, 0, 0)));
    assert_eq!(buf.pixel(0, 2), Some(Rgb(3, 0, 0)));
    assert_eq!(buf.pixel(0, 3), Some(Rgb(3, 0, 0)));
    assert_eq!(buf.glyph_at(0, 2).unwrap().text, "last");
    assert_eq!(buf.glyph_at(0, 3).unwrap().text, "last");
}

#[test]
fn shift_rows_down_clamps_to_height() {
    let mut buf = PixelBuffer::new(1, 3, BG).unwrap();
    buf.fill(PixelRect::new(0, 0, 1, 1), RED);
    buf.shift_rows(0, 2, 3);
    assert_eq!(buf.pixel(0, 2), Some(RED));
    assert_eq!(buf.pixel(0, 1), Some(BG));
}

#[test]
fn paint_leaves_glyphs_in_place() {
    let mut buf = PixelBuffer::new(4, 2, BG).unwrap();
    buf.stamp(2, 0, glyph("k"));
    buf.paint(PixelRect::new(0, 0, 4, 2), RED);
    assert_eq!(buf.pixel(3, 1), Some(RED));
    assert_eq!(buf.glyph_at(2, 0).unwrap().text, "k");
}

#[test]
fn fill_drops_only_glyphs_in_its_columns_and_rows() {
    let mut buf = PixelBuffer::new(8, 4, BG).unwrap();
    for x in 0..8 {
        buf.stamp(x, 1, glyph("r"));
    }
    buf.stamp(3, 2, glyph("below"));
    buf.fill(PixelRect::new(2, 1, 3, 1), RED);
    let kept: Vec<u32> = (0..8).filter(|&x| buf.glyph_at(x, 1).is_some()).collect();
    assert_eq!(kept, vec![0, 1, 5, 6, 7]);
    assert_eq!(buf.glyph_at(3, 2).unwrap().text, "below");
    assert_eq!(buf.glyph_count(), 6);
}
