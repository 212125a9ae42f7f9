// Copyright 2025 Lars Brubaker
// Rectangle fast-path clipping: bounds-based accept/reject, exact edge
// crossings, corner insertion, and the open-polyline variant.

mod helpers;

use clip2_rust::geom::{area, path64_from_flat};
use clip2_rust::{rect_clip, rect_clip_lines, ClipError, Rect64};
use helpers::{all_points_within, net_area, square};

fn rect() -> Rect64 {
    Rect64::new(0, 0, 100, 100)
}

#[test]
fn triangle_outside_is_rejected_by_bounds() {
    let tri = path64_from_flat(&[200i64, 50, 260, 50, 230, 90]);
    let out = rect_clip(rect(), &vec![tri]).unwrap();
    assert!(out.is_empty());
}

#[test]
fn triangle_inside_passes_through_unchanged() {
    let tri = path64_from_flat(&[10i64, 10, 60, 10, 30, 50]);
    let out = rect_clip(rect(), &vec![tri.clone()]).unwrap();
    assert_eq!(out, vec![tri]);
}

#[test]
fn overlapping_square_is_clipped_exactly() {
    let out = rect_clip(rect(), &vec![square(60, 60, 80)]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]).abs(), 1600.0);
    assert!(all_points_within(&out, 60, 60, 100, 100));
}

#[test]
fn square_crossing_two_opposite_edges() {
    // a horizontal band across the whole rect
    let band = path64_from_flat(&[-20i64, 40, 120, 40, 120, 60, -20, 60]);
    let out = rect_clip(rect(), &vec![band]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]).abs(), 100.0 * 20.0);
    assert!(all_points_within(&out, 0, 40, 100, 60));
}

#[test]
fn surrounding_path_yields_the_whole_rect() {
    let big = square(-50, -50, 200);
    let out = rect_clip(rect(), &vec![big]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]).abs(), 10000.0);
}

#[test]
fn multiple_paths_in_one_call() {
    let out = rect_clip(
        rect(),
        &vec![
            square(10, 10, 20),        // inside
            square(200, 200, 20),      // outside
            square(90, 90, 20),        // straddles the corner
        ],
    )
    .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(net_area(&out).abs(), 400.0 + 100.0);
}

#[test]
fn zig_zag_crossing_one_edge_repeatedly() {
    // a comb dipping below the bottom edge twice
    let comb = path64_from_flat(&[
        10i64, 50, 30, 130, 50, 50, 70, 130, 90, 50,
    ]);
    let out = rect_clip(rect(), &vec![comb]).unwrap();
    assert!(!out.is_empty());
    assert!(all_points_within(&out, 0, 0, 100, 100));
    // both teeth survive as area inside the rect
    let clipped: f64 = out.iter().map(|p| area(p).abs()).sum();
    assert!(clipped > 0.0);
    // every fragment must be a simple ring of 3+ points
    for path in &out {
        assert!(path.len() >= 3);
    }
}

#[test]
fn invalid_rect_fails_fast() {
    let tri = path64_from_flat(&[10i64, 10, 60, 10, 30, 50]);
    assert_eq!(
        rect_clip(Rect64::invalid(), &vec![tri.clone()]).unwrap_err(),
        ClipError::InvalidRect
    );
    assert_eq!(
        rect_clip_lines(Rect64::invalid(), &vec![tri]).unwrap_err(),
        ClipError::InvalidRect
    );
}

#[test]
fn open_polyline_fragments() {
    // a W shape dipping out of the bottom of the rect twice
    let w = path64_from_flat(&[
        10i64, 50, 30, 130, 50, 50, 70, 130, 90, 50,
    ]);
    let out = rect_clip_lines(rect(), &vec![w]).unwrap();
    assert_eq!(out.len(), 3);
    assert!(all_points_within(&out, 0, 0, 100, 100));
    for frag in &out {
        assert!(frag.len() >= 2);
        assert_ne!(frag.first(), frag.last()); // no ring closure
    }
}

#[test]
fn polyline_fully_inside_passes_through() {
    let line = path64_from_flat(&[10i64, 10, 50, 50, 90, 10]);
    let out = rect_clip_lines(rect(), &vec![line.clone()]).unwrap();
    assert_eq!(out, vec![line]);
}
