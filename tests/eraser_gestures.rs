use ink_canvas::{InkEngine, Stroke, StrokeRef, eraser};
use egui::{Color32, Pos2};

fn pos(x: f32, y: f32) -> Pos2 {
    Pos2::new(x, y)
}

fn horizontal_line(xs: impl IntoIterator<Item = f32>) -> Vec<Pos2> {
    xs.into_iter().map(|x| pos(x, 0.0)).collect()
}

fn add_line(engine: &mut InkEngine, points: Vec<Pos2>) {
    engine.add_path(Stroke::from_points(points, Color32::BLACK, 2.0).unwrap());
}

// Run an eraser gesture that samples every given point
fn erase(engine: &mut InkEngine, points: &[Pos2], width: f32) {
    engine.start_eraser(points[0], width);
    for &point in points {
        engine.gesture_update(point);
    }
    engine.gesture_end();
}

#[test]
fn test_erasing_far_away_leaves_strokes_untouched() {
    // A spans x in [0, 100], B spans x in [200, 300]
    let a_points: Vec<Pos2> = (0..20).map(|i| pos(i as f32 * 100.0 / 19.0, 0.0)).collect();
    let b_points = horizontal_line((0..=10).map(|i| 200.0 + i as f32 * 10.0));

    let mut engine = InkEngine::new();
    add_line(&mut engine, a_points.clone());
    add_line(&mut engine, b_points.clone());
    let a_before = engine.get_paths()[0].clone();
    let b_id = engine.get_paths()[1].id();

    erase(&mut engine, &[pos(250.0, 0.0)], 10.0);

    let paths = engine.get_paths();
    assert_eq!(paths[0], a_before);
    assert!(paths.iter().all(|stroke| stroke.id() != b_id));

    // B loses 240, 250 and 260 and splits into two pieces
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[1].points(), &b_points[..4]);
    assert_eq!(paths[2].points(), &b_points[7..]);
}

#[test]
fn test_full_cover_removes_stroke_and_undo_restores_it() {
    let mut engine = InkEngine::new();
    add_line(&mut engine, horizontal_line([0.0, 5.0, 10.0]));
    let original = engine.get_paths();

    // Width 30 gives a radius of 27, enough to swallow the whole stroke
    erase(&mut engine, &[pos(5.0, 0.0)], 30.0);
    assert!(engine.get_paths().is_empty());

    engine.undo();
    assert_eq!(engine.get_paths(), original);
}

#[test]
fn test_middle_clip_leaves_two_strokes() {
    let points = horizontal_line((0..10).map(|i| i as f32 * 10.0));
    let mut engine = InkEngine::new();
    add_line(&mut engine, points.clone());
    let original = engine.get_paths()[0].clone();

    erase(&mut engine, &[pos(45.0, 0.0)], 10.0);

    let paths = engine.get_paths();
    assert_eq!(paths.len(), 2);

    let joined: Vec<Pos2> = paths.iter().flat_map(|s| s.points().iter().copied()).collect();
    let expected: Vec<Pos2> = points.iter().copied().filter(|p| p.x != 40.0 && p.x != 50.0).collect();
    assert_eq!(joined, expected);

    for piece in &paths {
        assert_ne!(piece.id(), original.id());
        assert_eq!(piece.color(), original.color());
        assert_eq!(piece.width(), original.width());
        assert!(!piece.is_eraser());
        assert_eq!(piece, &piece.rebuilt());
    }
}

#[test]
fn test_end_runs_of_one_point_are_dropped() {
    let mut engine = InkEngine::new();
    add_line(&mut engine, horizontal_line([0.0, 20.0, 30.0, 40.0, 60.0, 70.0]));

    erase(&mut engine, &[pos(30.0, 0.0)], 10.0);

    let paths = engine.get_paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].points(), &[pos(60.0, 0.0), pos(70.0, 0.0)]);
}

#[test]
fn test_multi_sample_erase_undoes_as_one_step() {
    let mut engine = InkEngine::new();
    add_line(&mut engine, horizontal_line((0..=20).map(|i| i as f32 * 10.0)));
    let original = engine.get_paths();

    engine.start_eraser(pos(50.0, 0.0), 10.0);
    engine.gesture_update(pos(50.0, 0.0));
    engine.gesture_update(pos(150.0, 0.0));

    // The eraser stroke is visible while the gesture runs
    let during = engine.get_paths();
    assert_eq!(during.len(), 4);
    assert!(during.last().unwrap().is_eraser());
    // The second sample split a fragment, not a pre-existing stroke
    assert_eq!(engine.erased_originals().len(), 1);
    assert_eq!(engine.erased_originals()[0].id(), original[0].id());

    engine.gesture_end();

    let after = engine.get_paths();
    assert_eq!(after.len(), 3);
    assert!(after.iter().all(|stroke| !stroke.is_eraser()));
    assert!(engine.erased_originals().is_empty());
    assert_eq!(engine.history().undo_len(), 2);

    engine.undo();
    assert_eq!(engine.get_paths(), original);

    engine.redo();
    assert_eq!(engine.get_paths(), after);
}

#[test]
fn test_eraser_gesture_without_moves_is_undoable() {
    let mut engine = InkEngine::new();
    add_line(&mut engine, horizontal_line([0.0, 10.0]));
    let before = engine.get_paths();

    engine.start_eraser(pos(5.0, 0.0), 10.0);
    engine.gesture_cancel();

    assert_eq!(engine.get_paths(), before);
    assert_eq!(engine.history().undo_len(), 2);

    engine.undo();
    assert_eq!(engine.get_paths(), before);
    engine.undo();
    assert!(engine.get_paths().is_empty());
}

#[test]
fn test_thin_eraser_still_uses_minimum_radius() {
    let mut engine = InkEngine::new();
    add_line(&mut engine, horizontal_line([0.0, 9.0, 30.0, 40.0]));

    // A width of 1 would give a radius of 1; the floor of 10 still reaches x = 9
    erase(&mut engine, &[pos(0.0, 0.0)], 1.0);

    let paths = engine.get_paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].points(), &[pos(30.0, 0.0), pos(40.0, 0.0)]);
}

#[test]
fn test_splitter_keeps_z_order() {
    let under: StrokeRef = Stroke::from_points(horizontal_line([0.0, 10.0, 20.0, 30.0, 40.0]), Color32::RED, 2.0)
        .unwrap()
        .into_ref();
    let over: StrokeRef = Stroke::from_points(vec![pos(0.0, 100.0), pos(40.0, 100.0)], Color32::BLUE, 2.0)
        .unwrap()
        .into_ref();

    let outcome = eraser::erase_at(&[under.clone(), over.clone()], pos(20.0, 0.0), 5.0);

    assert_eq!(outcome.strokes.len(), 3);
    assert_eq!(outcome.strokes[0].color(), Color32::RED);
    assert_eq!(outcome.strokes[1].color(), Color32::RED);
    assert!(StrokeRef::ptr_eq(&outcome.strokes[2], &over));
    assert_eq!(outcome.removed.len(), 1);
    assert!(StrokeRef::ptr_eq(&outcome.removed[0], &under));
    assert_eq!(outcome.added.len(), 2);
}
