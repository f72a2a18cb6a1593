use super::*;

const FG: Rgb = Rgb(0xee, 0xee, 0xee);
const BG: Rgb = Rgb(0x11, 0x11, 0x11);

fn palette() -> Palette {
    Palette {
        foreground: FG,
        background: BG,
    }
}

fn metrics() -> Arc<GlyphMetrics> {
    Arc::new(GlyphMetrics::fixed("mono", 14.0, 8, 16))
}

fn surface(w: i32, h: i32) -> Surface {
    Surface::new(CellPos::new(0, 0), w, h, 0, metrics(), BG).unwrap()
}

fn row_color(r: i32) -> Rgb {
    Rgb(r as u8, 0x40, 0x40)
}

#[test]
fn draws_stay_invisible_until_flush() {
    let mut s = surface(10, 3);
    s.put(0, 0, &[GlyphRun::new(1, "x")], None, &palette());
    assert_eq!(s.front().glyph_count(), 0);
    assert_eq!(s.back().glyph_at(0, 0).unwrap().text, "x");

    s.flush();
    assert_eq!(s.front().glyph_at(0, 0).unwrap().text, "x");
    assert!(s.dirty_regions().is_empty());
}

#[test]
fn flush_updates_only_the_union_of_dirty_regions() {
    let mut s = surface(10, 3);
    let red = Rgb(0xff, 0, 0);
    s.put(2, 1, &[GlyphRun::new(1, "a"), GlyphRun::new(1, "b")], None, &palette());
    s.draw_block(CellRect::new(0, 2, 10, 1), red);
    s.flush();

    // Inside the union the front mirrors the back.
    for x in 16..32 {
        for y in 16..32 {
            assert_eq!(s.front().pixel(x, y), s.back().pixel(x, y));
        }
    }
    assert_eq!(s.front().pixel(0, 40), Some(red));
    assert_eq!(s.front().glyph_at(24, 16).unwrap().text, "b");

    // Outside it the front keeps its previous content.
    assert_eq!(s.front().pixel(0, 0), Some(BG));
    assert_eq!(s.front().pixel(79, 15), Some(BG));
}

#[test]
fn consecutive_flushes_only_apply_new_regions() {
    let mut s = surface(4, 1);
    let red = Rgb(0xff, 0, 0);
    s.draw_block(CellRect::new(0, 0, 1, 1), red);
    s.flush();
    s.draw_block(CellRect::new(2, 0, 1, 1), red);
    assert_eq!(s.front().pixel(16, 0), Some(BG));
    s.flush();
    assert_eq!(s.front().pixel(16, 0), Some(red));
    assert_eq!(s.front().pixel(0, 0), Some(red));
}

#[test]
fn block_fill_is_one_pixel_wider_than_its_dirty_region() {
    let mut s = surface(4, 1);
    let red = Rgb(0xff, 0, 0);
    s.draw_block(CellRect::new(0, 0, 1, 1), red);
    assert_eq!(s.dirty_regions(), &[CellRect::new(0, 0, 1, 1)]);
    assert_eq!(s.back().pixel(8, 0), Some(red));
    assert_eq!(s.back().pixel(9, 0), Some(BG));

    s.flush();
    assert_eq!(s.front().pixel(7, 0), Some(red));
    assert_eq!(s.front().pixel(8, 0), Some(BG));
}

#[test]
fn zero_area_regions_are_skipped_on_flush() {
    let mut s = surface(4, 2);
    s.draw_block(CellRect::new(1, 0, 0, 2), Rgb::WHITE);
    s.draw_block(CellRect::new(1, 0, 2, -1), Rgb::WHITE);
    assert_eq!(s.dirty_regions().len(), 2);
    s.flush();
    assert!(s.dirty_regions().is_empty());
    assert_eq!(s.front().pixel(8, 0), Some(BG));
    assert_eq!(s.back().pixel(8, 0), Some(BG));
}

#[test]
fn resize_then_flush_shows_a_blank_surface() {
    let mut s = surface(4, 2);
    s.put(0, 0, &[GlyphRun::new(1, "q")], None, &palette());
    s.draw_block(CellRect::new(0, 1, 4, 1), Rgb::WHITE);
    s.flush();

    s.resize(6, 3, metrics(), BG).unwrap();
    s.flush();

    assert_eq!((s.width(), s.height()), (6, 3));
    assert_eq!(s.front().width(), 48);
    assert_eq!(s.front().height(), 48);
    assert_eq!(s.front().glyph_count(), 0);
    for y in 0..48 {
        for x in 0..48 {
            assert_eq!(s.front().pixel(x, y), Some(BG));
        }
    }
}

#[test]
fn resize_adopts_new_metrics() {
    let mut s = surface(2, 2);
    let bigger = Arc::new(GlyphMetrics::fixed("mono", 20.0, 12, 22));
    s.resize(2, 2, bigger, BG).unwrap();
    assert_eq!(s.metrics().cell_width_px, 12);
    assert_eq!(s.back().width(), 24);
    assert_eq!(s.back().height(), 44);
}

#[test]
fn failed_resize_leaves_the_surface_intact() {
    let mut s = surface(3, 2);
    s.draw_block(CellRect::new(0, 0, 1, 1), Rgb::WHITE);
    let err = s.resize(1 << 20, 1 << 20, metrics(), BG).unwrap_err();
    assert_eq!(err.kind(), "rendering");
    assert_eq!((s.width(), s.height()), (3, 2));
    assert_eq!(s.dirty_regions().len(), 1);
}

#[test]
fn scroll_up_moves_surviving_rows_and_leaves_the_tail_stale() {
    let mut s = surface(2, 24);
    for r in 0..24 {
        s.draw_block(CellRect::new(0, r, 2, 1), row_color(r));
    }
    s.flush();

    s.scroll(3, BG);

    for r in 0..=20 {
        assert_eq!(s.back().pixel(0, r as u32 * 16), Some(row_color(r + 3)), "row {}", r);
    }
    for r in 21..24 {
        assert_eq!(s.back().pixel(0, r as u32 * 16), Some(row_color(r)), "row {}", r);
    }
    assert_eq!(s.dirty_regions(), &[CellRect::new(0, 0, 2, 21)]);
}

#[test]
fn scroll_down_shifts_content_and_clears_the_top_band() {
    let mut s = surface(2, 5);
    for r in 0..5 {
        s.draw_block(CellRect::new(0, r, 2, 1), row_color(r));
    }
    s.put(0, 0, &[GlyphRun::new(1, "t")], None, &palette());
    s.flush();

    s.scroll(-2, BG);

    assert_eq!(s.back().pixel(0, 0), Some(BG));
    assert_eq!(s.back().pixel(0, 16), Some(BG));
    assert_eq!(s.back().pixel(12, 32), Some(row_color(0)));
    assert_eq!(s.back().pixel(0, 64), Some(row_color(2)));
    assert!(s.back().glyph_at(0, 0).is_none());
    assert_eq!(s.back().glyph_at(0, 32).unwrap().text, "t");
    assert_eq!(s.dirty_regions(), &[CellRect::new(0, 0, 2, 5)]);
}

#[test]
fn scroll_beyond_height_is_a_no_op() {
    let mut s = surface(2, 4);
    s.draw_block(CellRect::new(0, 0, 2, 1), Rgb::WHITE);
    s.flush();
    s.scroll(4, BG);
    s.scroll(-9, BG);
    s.scroll(0, BG);
    assert!(s.dirty_regions().is_empty());
    assert_eq!(s.back().pixel(0, 0), Some(Rgb::WHITE));
}

#[test]
fn reverse_put_swaps_colors_and_advances_by_run_width() {
    let mut s = surface(10, 1);
    let attr = Attribute {
        reverse: true,
        ..Default::default()
    };
    let runs = [GlyphRun::new(1, "A"), GlyphRun::new(2, "漢")];

    let end = s.put(0, 0, &runs, Some(&attr), &palette());

    assert_eq!(end, 3);
    assert_eq!(s.back().pixel(0, 0), Some(FG));
    assert_eq!(s.back().pixel(23, 15), Some(FG));
    assert_eq!(s.back().pixel(25, 0), Some(BG));
    let a = s.back().glyph_at(0, 0).unwrap();
    assert_eq!((a.text.as_str(), a.color), ("A", BG));
    let kanji = s.back().glyph_at(8, 0).unwrap();
    assert_eq!((kanji.text.as_str(), kanji.cells), ("漢", 2));
    assert!(s.back().glyph_at(16, 0).is_none());
    assert_eq!(
        s.dirty_regions(),
        &[CellRect::new(0, 0, 3, 1), CellRect::new(0, 0, 3, 1)]
    );
}

#[test]
fn bold_and_colored_attributes_resolve_against_the_palette() {
    let mut s = surface(4, 1);
    let red = Rgb(0xff, 0, 0);
    let attr = Attribute {
        foreground: Some(red),
        bold: true,
        ..Default::default()
    };
    s.put(1, 0, &[GlyphRun::new(1, "b")], Some(&attr), &palette());
    let g = s.back().glyph_at(8, 0).unwrap();
    assert!(g.bold);
    assert_eq!(g.color, red);
    assert_eq!(s.back().pixel(8, 0), Some(BG));
}

#[test]
fn underline_is_drawn_three_pixels_above_the_cell_bottom() {
    let mut s = surface(4, 2);
    let attr = Attribute {
        underline: Underline::Foreground,
        ..Default::default()
    };
    s.put(1, 1, &[GlyphRun::new(2, "漢")], Some(&attr), &palette());

    assert_eq!(s.back().pixel(8, 16 + 13), Some(FG));
    assert_eq!(s.back().pixel(23, 16 + 13), Some(FG));
    assert_eq!(s.back().pixel(24, 16 + 13), Some(BG));
    assert_eq!(s.back().pixel(8, 16 + 12), Some(BG));
    assert_eq!(s.dirty_regions().len(), 3);
    assert_eq!(s.dirty_regions()[2], CellRect::new(1, 1, 2, 1));
}

#[test]
fn zero_width_runs_combine_with_the_previous_glyph() {
    let mut s = surface(4, 1);
    let runs = [GlyphRun::new(1, "e"), GlyphRun::new(0, "\u{301}"), GlyphRun::new(1, "x")];
    let end = s.draw_text(0, 0, &runs, FontFace::REGULAR, FG);
    assert_eq!(end, 2);
    assert_eq!(s.back().glyph_at(0, 0).unwrap().text, "e\u{301}");
    assert_eq!(s.back().glyph_at(8, 0).unwrap().text, "x");
}

#[test]
fn drawing_off_surface_clips_instead_of_failing() {
    let mut s = surface(2, 2);
    s.put(-1, 0, &[GlyphRun::new(1, "a"), GlyphRun::new(1, "b")], None, &palette());
    s.put(5, 5, &[GlyphRun::new(1, "c")], None, &palette());
    s.flush();
    assert_eq!(s.front().glyph_at(0, 0).unwrap().text, "b");
    assert_eq!(s.front().glyph_count(), 1);
}

#[test]
fn move_changes_only_the_position() {
    let mut s = surface(2, 2);
    s.draw_block(CellRect::new(0, 0, 1, 1), Rgb::WHITE);
    s.move_to(3, 4);
    assert_eq!(s.position(), CellPos::new(3, 4));
    assert_eq!(s.pixel_origin(), (24, 64));
    assert_eq!(s.back().pixel(0, 0), Some(Rgb::WHITE));
    assert_eq!(s.dirty_regions().len(), 1);
}

#[test]
fn glyph_runs_decode_from_flat_byte_arrays() {
    let runs: Vec<GlyphRun> = serde_json::from_str("[[1, 65], [2, 230, 188, 162]]").unwrap();
    assert_eq!(runs, vec![GlyphRun::new(1, "A"), GlyphRun::new(2, "漢")]);
    assert!(serde_json::from_str::<GlyphRun>("[]").is_err());
    assert!(serde_json::from_str::<GlyphRun>("[1, 300]").is_err());
}

#[test]
fn attributes_decode_with_inherit_defaults() {
    let attr: Attribute = serde_json::from_str(
        r##"{"foreground": "#ff0000", "background": null, "bold": null, "reverse": true, "underline": "#00ff00"}"##,
    )
    .unwrap();
    assert_eq!(attr.foreground, Some(Rgb(0xff, 0, 0)));
    assert_eq!(attr.background, None);
    assert!(!attr.bold);
    assert!(attr.reverse);
    assert_eq!(attr.underline, Underline::Color(Rgb(0, 0xff, 0)));

    let empty: Attribute = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Attribute::default());

    let unknown: Attribute =
        serde_json::from_str(r#"{"foreground": "chocolate1", "underline": "octarine"}"#).unwrap();
    assert_eq!(unknown.foreground, None);
    assert_eq!(unknown.underline, Underline::Foreground);
}

#[test]
fn unknown_attribute_colors_still_draw_the_text() {
    let mut s = surface(10, 1);
    let attr: Attribute = serde_json::from_str(r#"{"foreground": "chocolate1"}"#).unwrap();
    s.put(0, 0, &[GlyphRun::new(1, "c")], Some(&attr), &palette());
    s.flush();
    let glyph = s.front().glyph_at(0, 0).unwrap();
    assert_eq!(glyph.text, "c");
    assert_eq!(glyph.color, FG);
}

#[test]
fn redrawing_a_cell_keeps_the_glyph_to_its_right() {
    let mut s = surface(10, 3);
    s.put(1, 0, &[GlyphRun::new(1, "B")], None, &palette());
    s.put(0, 0, &[GlyphRun::new(1, "A")], None, &palette());
    s.flush();
    assert_eq!(s.back().glyph_at(8, 0).unwrap().text, "B");
    assert_eq!(s.front().glyph_at(0, 0).unwrap().text, "A");
    assert_eq!(s.front().glyph_at(8, 0).unwrap().text, "B");
}

#[test]
fn block_fill_seam_paints_but_keeps_the_next_glyph() {
    let mut s = surface(4, 1);
    let red = Rgb(0xff, 0, 0);
    s.put(1, 0, &[GlyphRun::new(1, "n")], None, &palette());
    s.draw_block(CellRect::new(0, 0, 1, 1), red);
    assert_eq!(s.back().pixel(8, 0), Some(red));
    assert_eq!(s.back().glyph_at(8, 0).unwrap().text, "n");

    s.draw_block(CellRect::new(1, 0, 1, 1), red);
    assert!(s.back().glyph_at(8, 0).is_none());
}
