use super::*;

fn palette() -> Palette {
    Palette {
        foreground: Rgb(0xee, 0xee, 0xee),
        background: Rgb(0x11, 0x11, 0x11),
    }
}

fn metrics() -> Arc<GlyphMetrics> {
    Arc::new(GlyphMetrics::fixed("mono", 14.0, 8, 16))
}

fn view(w: i32, h: i32, modeline: bool) -> View {
    View::new(
        ViewId(1),
        ViewKind::Plain,
        CellPos::new(0, 0),
        w,
        h,
        modeline,
        &metrics(),
        &palette(),
    )
    .unwrap()
}

fn assert_modeline_locked(v: &View) {
    let edit = v.edit_surface();
    let modeline = v.modeline_surface().unwrap();
    assert_eq!(modeline.position().x, edit.position().x);
    assert_eq!(modeline.position().y, edit.position().y + edit.height());
    assert_eq!(modeline.width(), edit.width());
    assert_eq!(modeline.height(), 1);
}

#[test]
fn clear_eob_covers_rest_of_row_then_full_rows_below() {
    let mut v = view(80, 24, false);
    v.clear_to_end_of_buffer(10, 5, &palette());
    assert_eq!(
        v.edit_surface().dirty_regions(),
        &[CellRect::new(10, 5, 70, 1), CellRect::new(0, 6, 80, 18)]
    );
}

#[test]
fn clear_eob_leaves_the_start_of_the_row_untouched() {
    let mut v = view(80, 24, false);
    let marker = [GlyphRun::new(1, "m")];
    v.put(9, 5, &marker, None, &palette());
    v.touch();
    v.clear_to_end_of_buffer(10, 5, &palette());
    v.touch();
    let front = v.edit_surface().front();
    assert_eq!(front.glyph_at(9 * 8, 5 * 16).unwrap().text, "m");
}

#[test]
fn clear_eol_and_clear_cover_the_expected_cells() {
    let mut v = view(20, 4, false);
    v.clear_to_end_of_line(3, 2, &palette());
    v.clear(&palette());
    assert_eq!(
        v.edit_surface().dirty_regions(),
        &[CellRect::new(3, 2, 17, 1), CellRect::new(0, 0, 20, 4)]
    );
}

#[test]
fn modeline_starts_one_row_below_the_edit_surface() {
    let v = View::new(
        ViewId(7),
        ViewKind::Plain,
        CellPos::new(2, 3),
        10,
        5,
        true,
        &metrics(),
        &palette(),
    )
    .unwrap();
    assert_eq!(v.modeline_surface().unwrap().position(), CellPos::new(2, 8));
    assert_eq!(v.modeline_surface().unwrap().z_index(), MODELINE_Z);
    assert_modeline_locked(&v);
}

#[test]
fn move_and_resize_keep_the_modeline_locked() {
    let mut v = view(10, 5, true);
    v.move_to(4, 1);
    assert_modeline_locked(&v);
    v.resize(30, 12, &metrics(), &palette()).unwrap();
    assert_modeline_locked(&v);
    assert_eq!(v.modeline_surface().unwrap().position(), CellPos::new(4, 13));
    v.move_to(0, 0);
    assert_modeline_locked(&v);
}

#[test]
fn modeline_put_without_modeline_is_a_no_op() {
    let mut v = view(10, 2, false);
    v.modeline_put(0, &[GlyphRun::new(1, "x")], None, &palette());
    assert!(v.edit_surface().dirty_regions().is_empty());
    assert_eq!(v.surfaces().count(), 1);
}

#[test]
fn modeline_put_draws_on_row_zero_of_the_modeline() {
    let mut v = view(10, 2, true);
    v.modeline_put(3, &[GlyphRun::new(1, "L")], None, &palette());
    v.touch();
    let modeline = v.modeline_surface().unwrap();
    assert_eq!(modeline.front().glyph_at(24, 0).unwrap().text, "L");
    assert!(v.edit_surface().front().glyph_at(24, 0).is_none());
}

#[test]
fn touch_flushes_both_surfaces() {
    let mut v = view(10, 2, true);
    v.put(0, 0, &[GlyphRun::new(1, "e")], None, &palette());
    v.modeline_put(0, &[GlyphRun::new(1, "m")], None, &palette());
    v.touch();
    assert!(v.surfaces().all(|s| s.dirty_regions().is_empty()));
    assert!(v.surfaces().all(|s| s.front().glyph_count() == 1));
}

#[test]
fn set_cursor_records_state_without_drawing() {
    let mut v = view(10, 2, false);
    assert!(v.cursor().is_none());
    v.set_cursor(4, 1);
    assert_eq!(
        v.cursor(),
        Some(Cursor {
            x: 4,
            y: 1,
            color: palette().foreground
        })
    );
    assert!(v.edit_surface().dirty_regions().is_empty());
    v.move_to(5, 5);
    assert_eq!(v.cursor_screen_pos(), Some(CellPos::new(9, 6)));
}

#[test]
fn view_kinds_map_to_stacking_order() {
    assert_eq!(ViewKind::from_name("popup").z_index(), 2);
    assert_eq!(ViewKind::from_name("minibuffer").z_index(), 0);
    assert_eq!(ViewKind::from_name("tooltip"), ViewKind::Plain);
    let kind: ViewKind = serde_json::from_str("null").unwrap();
    assert_eq!(kind, ViewKind::Plain);
    let kind: ViewKind = serde_json::from_str("\"popup\"").unwrap();
    assert_eq!(kind, ViewKind::Popup);
}

#[test]
fn negative_sizes_are_clamped() {
    let v = view(-3, -1, true);
    assert_eq!((v.width(), v.height()), (0, 0));
    assert_modeline_locked(&v);
}
