use flo_vector::*;

fn contour_points(path: &Path, contour: &Contour) -> Vec<Point2D> {
    let mut points = vec![contour.start_point()];
    points.extend(path.leaf_curves(contour).map(|curve| curve.end_point()));

    points
}

#[test]
fn relative_coordinates_follow_current_point() {
    let mut path = Path::new();
    path.set_relative(true);
    path.move_to(10.0, 10.0);
    path.line_to(5.0, 0.0);
    path.line_to(0.0, 5.0);

    assert!(path.is_relative());
    assert!(path.current_point() == Point2D::new(15.0, 15.0), "Current point is {:?}", path.current_point());
}

#[test]
fn cubic_to_reflects_previous_control_point() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.cubic_to2(10.0, 0.0, 20.0, 10.0, 30.0, 10.0);
    path.cubic_to(50.0, 0.0, 60.0, 0.0);

    let contour = &path.contours()[0];
    let second  = path.segment(contour.segments()[1]).curve();

    match second {
        Curve::Cubic(start, control1, _, _) => {
            assert!(*start == Point2D::new(30.0, 10.0), "{:?}", second);
            assert!(*control1 == Point2D::new(40.0, 10.0), "{:?}", second);
        }

        _ => assert!(false, "Expected a cubic, found {:?}", second),
    }
}

#[test]
fn cubic_to_without_previous_segment_uses_current_point() {
    let mut path = Path::new();
    path.move_to(5.0, 5.0);
    path.cubic_to(20.0, 20.0, 30.0, 5.0);

    let curve = *path.segment(path.contours()[0].segments()[0]).curve();
    assert!(curve == Curve::Cubic(Point2D::new(5.0, 5.0), Point2D::new(5.0, 5.0), Point2D::new(20.0, 20.0), Point2D::new(30.0, 5.0)), "{:?}", curve);
}

#[test]
fn close_adds_line_back_to_start() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.line_to(10.0, 0.0);
    path.line_to(10.0, 10.0);
    path.close();

    let contour = &path.contours()[0];

    assert!(contour.is_closed());
    assert!(contour.segments().len() == 3, "Expected 3 segments, found {}", contour.segments().len());
    assert!(path.current_point() == Point2D::new(0.0, 0.0));
}

#[test]
fn close_at_start_point_does_not_add_a_line() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.line_to(10.0, 0.0);
    path.line_to(10.0, 10.0);
    path.line_to(0.0, 0.0);
    path.close();

    assert!(path.contours()[0].is_closed());
    assert!(path.segment_count() == 3, "Expected 3 segments, found {}", path.segment_count());
}

#[test]
fn drawing_after_close_starts_new_contour() {
    let mut path = Path::new();
    path.move_to(5.0, 5.0);
    path.line_to(10.0, 5.0);
    path.line_to(10.0, 10.0);
    path.close();
    path.line_to(0.0, 0.0);

    assert!(path.contours().len() == 2, "Expected 2 contours, found {}", path.contours().len());

    let second = &path.contours()[1];
    assert!(!second.is_closed());
    assert!(contour_points(&path, second) == vec![Point2D::new(5.0, 5.0), Point2D::new(0.0, 0.0)], "{:?}", contour_points(&path, second));
}

#[test]
fn closed_contour_wraps_around() {
    let path    = Path::rect(0.0, 0.0, 10.0, 10.0);
    let contour = &path.contours()[0];

    assert!(contour.next_index(3, 4) == Some(0));
    assert!(contour.next_index(1, 4) == Some(2));
}

#[test]
fn editing_invalidates_hash_and_bounds() {
    let mut path = Path::rect(0.0, 0.0, 10.0, 10.0);
    let hash     = path.update_hash();
    path.update_bounds();

    assert!(path.cached_hash() == Some(hash));

    path.move_to(20.0, 20.0);
    path.line_to(30.0, 30.0);

    assert!(path.cached_hash().is_none());
    assert!(path.content_hash() != hash);
    assert!(path.bounds().max == Point2D::new(30.0, 30.0), "{:?}", path.bounds());
}

#[test]
fn trailing_move_does_not_change_hash() {
    let mut path = Path::rect(0.0, 0.0, 10.0, 10.0);
    let hash     = path.content_hash();

    path.move_to(50.0, 50.0);

    assert!(path.content_hash() == hash);
}

#[test]
fn circle_stays_within_radius() {
    let path    = Path::circle(50.0, 50.0, 20.0);
    let bounds  = path.bounds();

    assert!(path.contours()[0].is_closed());

    // Control points stick out a little way, but not much
    assert!(bounds.min.x > 29.0 && bounds.max.x < 71.0, "{:?}", bounds);
    assert!(bounds.min.y > 29.0 && bounds.max.y < 71.0, "{:?}", bounds);

    for curve in path.leaf_curves(&path.contours()[0]) {
        let mid = curve.point_at(0.5);
        assert!((mid.distance(Point2D::new(50.0, 50.0)) - 20.0).abs() < 0.01, "{:?} is not on the circle", mid);
    }
}

#[test]
fn max_arc_sweep_controls_piece_count() {
    let mut path = Path::new();
    path.set_max_arc_sweep(45.0);
    path.move_to(100.0, 0.0);
    path.arc_to(-100.0, 0.0, 180.0);

    assert!(path.segment_count() == 4, "Expected 4 pieces, found {}", path.segment_count());
}

#[test]
fn arc_by_is_relative() {
    let mut path = Path::new();
    path.move_to(100.0, 0.0);
    path.arc_by(-100.0, 100.0, 90.0);

    let end = path.current_point();
    assert!(end == Point2D::new(0.0, 100.0), "{:?}", end);

    // Anticlockwise from (100, 0) to (0, 100) goes through the first quadrant
    let mid = path.segment(path.contours()[0].segments()[1]).curve().point_at(0.5);
    assert!((mid.length() - 100.0).abs() < 0.05, "{:?}", mid);
    assert!(mid.x > 0.0 && mid.y > 0.0, "{:?}", mid);
}

#[test]
fn arc_to_the_same_point_does_nothing() {
    let mut path = Path::new();
    path.move_to(10.0, 10.0);
    path.arc_to(10.0, 10.0, 90.0);

    assert!(path.is_empty());
}

#[test]
fn import_applies_transform() {
    let source      = Path::rect(0.0, 0.0, 10.0, 10.0);
    let mut target  = Path::new();

    target.import_path(&source, &(Transform2D::translate(5.0, 0.0) * Transform2D::scale(2.0, 2.0)));

    let bounds = target.bounds();
    assert!(bounds.min == Point2D::new(5.0, 0.0), "{:?}", bounds);
    assert!(bounds.max == Point2D::new(25.0, 20.0), "{:?}", bounds);
    assert!(target.contours()[0].is_closed());
}

#[test]
fn canonical_copy_is_marked_and_hashed() {
    let mut path = Path::rect(0.0, 0.0, 10.0, 10.0);
    path.move_to(20.0, 20.0);

    let canonical = path.canonical_copy();

    assert!(canonical.is_canonical());
    assert!(!path.is_canonical());
    assert!(canonical.cached_hash() == Some(path.content_hash()));
    assert!(paths_match(&canonical, &path));
}

#[test]
fn reset_empties_path() {
    let mut path = Path::circle(0.0, 0.0, 10.0);
    path.set_relative(true);
    path.reset();

    assert!(path.is_empty());
    assert!(!path.is_relative());
    assert!(path.contours().len() == 1);

    path.move_to(1.0, 1.0);
    path.line_to(2.0, 2.0);
    assert!(path.segment_count() == 1);
}
