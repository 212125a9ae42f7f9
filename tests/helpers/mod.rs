// Copyright 2025 Lars Brubaker
// Shared test utilities for clip2-rust tests.

#![allow(dead_code)]

use clip2_rust::geom::{area, path64_from_flat};
use clip2_rust::{Path64, Paths64, Point64};

/// Axis-aligned square with its top-left corner at (left, top).
pub fn square(left: i64, top: i64, size: i64) -> Path64 {
    path64_from_flat(&[
        left,
        top,
        left + size,
        top,
        left + size,
        top + size,
        left,
        top + size,
    ])
}

/// Axis-aligned rectangle path from explicit bounds.
pub fn rect_path(left: i64, top: i64, right: i64, bottom: i64) -> Path64 {
    path64_from_flat(&[left, top, right, top, right, bottom, left, bottom])
}

/// The classic five-pointed star drawn with crossing strokes; its core
/// pentagon has winding 2.
pub fn star() -> Path64 {
    path64_from_flat(&[
        350i64, 75, 379, 161, 469, 161, 397, 215, 423, 301, 350, 250, 277, 301, 303, 215, 231,
        161, 321, 161,
    ])
}

/// Net signed area over all paths (holes subtract).
pub fn net_area(paths: &Paths64) -> f64 {
    paths.iter().map(area).sum()
}

/// Sum of absolute ring areas (holes add).
pub fn total_area(paths: &Paths64) -> f64 {
    paths.iter().map(|p| area(p).abs()).sum()
}

pub fn assert_area_approx(actual: f64, expected: f64, tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() < tolerance,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// The multiset of vertices across all paths, in a canonical order.
pub fn point_set(paths: &Paths64) -> Vec<Point64> {
    let mut pts: Vec<Point64> = paths.iter().flatten().copied().collect();
    pts.sort_by_key(|p| (p.x, p.y));
    pts
}

/// Every vertex of every path lies inside the given inclusive bounds.
pub fn all_points_within(paths: &Paths64, left: i64, top: i64, right: i64, bottom: i64) -> bool {
    paths
        .iter()
        .flatten()
        .all(|p| p.x >= left && p.x <= right && p.y >= top && p.y <= bottom)
}
