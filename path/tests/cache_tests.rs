use flo_vector::*;

use std::sync::*;

fn triangle(offset: f32) -> Path {
    let mut path = Path::new();
    path.move_to(10.0 + offset, 10.0);
    path.line_to(100.0, 10.0 - offset);
    path.quad_to(150.0, 50.0 + offset, 100.0, 100.0);
    path.close();

    path
}

#[test]
fn canonical_path_finds_itself() {
    let mut cache   = PathCache::new();
    let canonical   = cache.find_path(&triangle(0.0));
    let again       = cache.find_path(&canonical);

    assert!(Arc::ptr_eq(&canonical, &again));
    assert!(canonical.is_canonical());
    assert!(cache.path_count() == 1);
}

#[test]
fn identical_paths_share_canonical_copy() {
    let mut cache   = PathCache::new();
    let first       = cache.find_path(&triangle(0.0));
    let second      = cache.find_path(&triangle(0.0));

    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.path_count() == 1);
}

#[test]
fn different_paths_are_stored_separately() {
    let mut cache   = PathCache::new();
    let first       = cache.find_path(&triangle(0.0));
    let second      = cache.find_path(&triangle(1.0));

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(cache.path_count() == 2);
}

#[test]
fn nearby_paths_either_side_of_a_quantization_step_are_stored_separately() {
    let mut cache   = PathCache::new();
    let first       = cache.find_path(&triangle(0.00045));
    let second      = cache.find_path(&triangle(0.00052));

    assert!(quantize(10.00045) != quantize(10.00052));
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(cache.path_count() == 2);
}

#[test]
fn noise_below_resolution_finds_same_mesh() {
    let mut cache   = PathCache::new();
    let style       = StrokeStyle::stroke(2.0).with_join(JoinKind::Round);
    let noisy_style = StrokeStyle::stroke(2.00001).with_join(JoinKind::Round);

    let first       = cache.find_mesh(&triangle(0.0), &style);
    let second      = cache.find_mesh(&triangle(0.00002), &noisy_style);

    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.mesh_count() == 1);
}

#[test]
fn different_styles_share_source_path() {
    let mut cache   = PathCache::new();
    let thin        = cache.find_mesh(&triangle(0.0), &StrokeStyle::stroke(1.0));
    let thick       = cache.find_mesh(&triangle(0.0), &StrokeStyle::stroke(8.0));

    assert!(!Arc::ptr_eq(&thin, &thick));
    assert!(Arc::ptr_eq(thin.source_path(), thick.source_path()));
    assert!(cache.mesh_count() == 2);
    assert!(cache.path_count() == 1);
}

#[test]
fn mesh_contains_stroke_outline() {
    let mut cache   = PathCache::new();
    let mesh        = cache.find_mesh(&triangle(0.0), &StrokeStyle::stroke(4.0).with_fill(true));
    let stroke      = mesh.stroke_path().expect("Stroke outline");

    assert!(mesh.style().fill);
    assert!(!stroke.is_empty());

    // The diagonal edge spreads the stroke out to the left of the leftmost point
    let path_bounds     = mesh.source_path().bounds();
    let stroke_bounds   = stroke.bounds();
    assert!(stroke_bounds.min.x < path_bounds.min.x - 1.0, "{:?} {:?}", path_bounds, stroke_bounds);
}

#[test]
fn source_path_is_not_refined() {
    let mut cache   = PathCache::new();
    let mesh        = cache.find_mesh(&Path::circle(0.0, 0.0, 500.0), &StrokeStyle::stroke(4.0));

    assert!(!mesh.source_path().contours()[0].is_refined());
}

#[test]
fn custom_options_control_refinement() {
    let mut fine_cache      = PathCache::with_options(MeshOptions::default().with_refine_options(RefineOptions::default()));
    let mut coarse_cache    = PathCache::new();
    let circle              = Path::circle(0.0, 0.0, 500.0);

    let fine                = fine_cache.find_mesh(&circle, &StrokeStyle::stroke(4.0));
    let coarse              = coarse_cache.find_mesh(&circle, &StrokeStyle::stroke(4.0));

    let fine_segments       = fine.stroke_path().map(|path| path.segment_count()).unwrap_or(0);
    let coarse_segments     = coarse.stroke_path().map(|path| path.segment_count()).unwrap_or(0);

    assert!(fine_segments > coarse_segments, "{} segments for fine mesh, {} for coarse", fine_segments, coarse_segments);
}
