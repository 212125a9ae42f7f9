// Copyright 2025 Lars Brubaker
// Open (polyline) subjects: they never define interior, and are clipped
// against the closed-path winding at their position.

mod helpers;

use clip2_rust::geom::path64_from_flat;
use clip2_rust::{ClipType, Clipper64, FillRule};
use helpers::square;

fn clip_line(
    line: &[i64],
    clip_size: i64,
    ct: ClipType,
) -> (Vec<Vec<clip2_rust::Point64>>, Vec<Vec<clip2_rust::Point64>>) {
    let mut clipper = Clipper64::new();
    clipper.add_open_subject(&vec![path64_from_flat(line)]);
    clipper.add_clip(&vec![square(0, 0, clip_size)]);
    clipper.execute_with_open(ct, FillRule::EvenOdd).unwrap()
}

fn polyline_length(paths: &[Vec<clip2_rust::Point64>]) -> f64 {
    let mut len = 0.0;
    for path in paths {
        for w in path.windows(2) {
            let dx = (w[1].x - w[0].x) as f64;
            let dy = (w[1].y - w[0].y) as f64;
            len += (dx * dx + dy * dy).sqrt();
        }
    }
    len
}

#[test]
fn intersection_keeps_the_inside_part() {
    let (closed, open) = clip_line(&[5, -5, 5, 15], 10, ClipType::Intersection);
    assert!(closed.is_empty());
    assert_eq!(open.len(), 1);
    assert_eq!(polyline_length(&open), 10.0);
    assert!(open[0].iter().all(|p| p.x == 5 && p.y >= 0 && p.y <= 10));
}

#[test]
fn difference_keeps_the_outside_parts() {
    let (closed, open) = clip_line(&[5, -5, 5, 15], 10, ClipType::Difference);
    assert!(closed.is_empty());
    assert_eq!(open.len(), 2);
    assert_eq!(polyline_length(&open), 10.0);
    for path in &open {
        assert!(path.iter().all(|p| p.y <= 0 || p.y >= 10));
    }
}

#[test]
fn union_excludes_the_closed_interior() {
    let mut clipper = Clipper64::new();
    clipper.add_open_subject(&vec![path64_from_flat(&[5i64, -5, 5, 15])]);
    clipper.add_subject(&vec![square(0, 0, 10)]);
    let (closed, open) = clipper
        .execute_with_open(ClipType::Union, FillRule::EvenOdd)
        .unwrap();
    // the square survives; the line is trimmed to its exterior portions
    assert_eq!(closed.len(), 1);
    assert_eq!(open.len(), 2);
    assert_eq!(polyline_length(&open), 10.0);
}

#[test]
fn line_missing_the_clip_disappears_from_intersection() {
    let (closed, open) = clip_line(&[20, 0, 30, 10], 10, ClipType::Intersection);
    assert!(closed.is_empty());
    assert!(open.is_empty());
}

#[test]
fn diagonal_line_is_cut_at_the_boundary() {
    let (_, open) = clip_line(&[-10, -10, 20, 20], 10, ClipType::Intersection);
    assert_eq!(open.len(), 1);
    let mut pts = open[0].clone();
    pts.sort_by_key(|p| p.x);
    assert_eq!(pts.first().map(|p| (p.x, p.y)), Some((0, 0)));
    assert_eq!(pts.last().map(|p| (p.x, p.y)), Some((10, 10)));
}

#[test]
fn flat_open_path_is_accepted() {
    let (_, open) = clip_line(&[-5, 5, 15, 5], 10, ClipType::Intersection);
    assert_eq!(open.len(), 1);
    assert_eq!(polyline_length(&open), 10.0);
    assert!(open[0].iter().all(|p| p.y == 5));
}

#[test]
fn open_paths_never_close_into_rings() {
    let (_, open) = clip_line(&[2, 2, 8, 2, 8, 8, 2, 8], 10, ClipType::Intersection);
    // fully inside: passes through as one open path, unclosed
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].len(), 4);
    assert_ne!(open[0].first(), open[0].last());
}
