// Copyright 2025 Lars Brubaker
// Minkowski sum/difference built on quad tiling plus a NonZero union.

mod helpers;

use clip2_rust::geom::{bounds_paths, path64_from_flat};
use clip2_rust::minkowski::{diff, sum, sum_d};
use clip2_rust::Rect64;
use helpers::{net_area, square};

fn brush(half: i64) -> Vec<clip2_rust::Point64> {
    path64_from_flat(&[-half, -half, half, -half, half, half, -half, half])
}

#[test]
fn closed_sweep_grows_the_rim() {
    let out = sum(&brush(1), &square(0, 0, 10), true).unwrap();
    // the rim sweep covers a 12x12 band with an 8x8 untouched interior
    assert_eq!(bounds_paths(&out), Rect64::new(-1, -1, 11, 11));
    assert_eq!(net_area(&out), 144.0 - 64.0);
}

#[test]
fn open_sweep_paints_a_capsule() {
    let line = path64_from_flat(&[0i64, 0, 10, 0]);
    let out = sum(&brush(1), &line, false).unwrap();
    assert_eq!(bounds_paths(&out), Rect64::new(-1, -1, 11, 1));
    assert_eq!(net_area(&out), 24.0);
}

#[test]
fn difference_reflects_the_pattern() {
    let pattern = path64_from_flat(&[4i64, 4, 6, 4, 6, 6, 4, 6]);
    let out = diff(&pattern, &square(0, 0, 10), true).unwrap();
    assert_eq!(bounds_paths(&out), Rect64::new(-6, -6, 6, 6));
}

#[test]
fn sum_is_commutative_for_closed_shapes() {
    let a = brush(2);
    let b = square(0, 0, 8);
    let ab = sum(&a, &b, true).unwrap();
    let ba = sum(&b, &a, true).unwrap();
    // the swept envelopes coincide
    assert_eq!(bounds_paths(&ab), bounds_paths(&ba));
    assert_eq!(net_area(&ab), net_area(&ba));
}

#[test]
fn decimal_variant_round_trips_the_scale() {
    let pattern = vec![clip2_rust::PointD::new(-0.5, -0.5),
        clip2_rust::PointD::new(0.5, -0.5),
        clip2_rust::PointD::new(0.5, 0.5),
        clip2_rust::PointD::new(-0.5, 0.5)];
    let path = vec![clip2_rust::PointD::new(0.0, 0.0),
        clip2_rust::PointD::new(4.0, 0.0),
        clip2_rust::PointD::new(4.0, 4.0),
        clip2_rust::PointD::new(0.0, 4.0)];
    let out = sum_d(&pattern, &path, true, 2).unwrap();
    assert!(!out.is_empty());
    let min_x = out
        .iter()
        .flatten()
        .map(|p| p.x)
        .fold(f64::INFINITY, f64::min);
    assert!((min_x + 0.5).abs() < 1e-9);
}
