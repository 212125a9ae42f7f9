// Copyright 2025 Lars Brubaker
// Inflate/deflate behavior: exact rectangles for right-angle joins, arcs
// within tolerance for round joins, caps for open paths.

mod helpers;

use std::f64::consts::PI;

use clip2_rust::geom::{bounds_paths, reverse_path};
use clip2_rust::{inflate_paths, ClipperOffset, EndType, JoinType, Rect64};
use helpers::{assert_area_approx, net_area, square, total_area};

#[test]
fn square_grows_to_a_square() {
    let out = inflate_paths(
        &vec![square(0, 0, 10)],
        2.0,
        JoinType::Square,
        EndType::Polygon,
        2.0,
        0.0,
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(net_area(&out), 196.0);
    assert_eq!(bounds_paths(&out), Rect64::new(-2, -2, 12, 12));
}

#[test]
fn square_shrinks_to_a_square() {
    let out = inflate_paths(
        &vec![square(0, 0, 10)],
        -2.0,
        JoinType::Square,
        EndType::Polygon,
        2.0,
        0.0,
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(net_area(&out), 36.0);
    assert_eq!(bounds_paths(&out), Rect64::new(2, 2, 8, 8));
}

#[test]
fn miter_join_keeps_right_angle_corners() {
    let out = inflate_paths(
        &vec![square(0, 0, 10)],
        3.0,
        JoinType::Miter,
        EndType::Polygon,
        2.0,
        0.0,
    )
    .unwrap();
    assert_eq!(net_area(&out), 256.0);
    assert_eq!(bounds_paths(&out), Rect64::new(-3, -3, 13, 13));
}

#[test]
fn bevel_join_chops_corners() {
    let out = inflate_paths(
        &vec![square(0, 0, 10)],
        2.0,
        JoinType::Bevel,
        EndType::Polygon,
        2.0,
        0.0,
    )
    .unwrap();
    // four 2x2 right triangles come off the full square
    assert_area_approx(net_area(&out), 196.0 - 4.0 * 2.0, 1.0, "bevelled corners");
}

#[test]
fn round_join_area_tracks_quarter_circles() {
    let out = inflate_paths(
        &vec![square(0, 0, 10)],
        4.0,
        JoinType::Round,
        EndType::Polygon,
        2.0,
        0.02,
    )
    .unwrap();
    let expected = 100.0 + 4.0 * 40.0 + PI * 16.0;
    let got = net_area(&out);
    assert!(
        (got - expected).abs() / expected < 0.005,
        "round join area {} vs {}",
        got,
        expected
    );
}

#[test]
fn offset_round_trip_restores_area() {
    let subject = vec![square(0, 0, 100)];
    for d in [2.0, 5.0, 10.0] {
        let grown = inflate_paths(&subject, d, JoinType::Miter, EndType::Polygon, 2.0, 0.0)
            .unwrap();
        let back = inflate_paths(&grown, -d, JoinType::Miter, EndType::Polygon, 2.0, 0.0)
            .unwrap();
        assert_area_approx(net_area(&back), 10000.0, 1.0, "round trip");
    }
}

#[test]
fn ring_with_hole_offsets_both_boundaries() {
    let subj = vec![square(0, 0, 20), reverse_path(&square(5, 5, 10))];
    let out = inflate_paths(&subj, 1.0, JoinType::Miter, EndType::Polygon, 2.0, 0.0)
        .unwrap();
    // the outer boundary grows while the hole tightens
    assert_eq!(out.len(), 2);
    assert_eq!(net_area(&out), 22.0 * 22.0 - 8.0 * 8.0);
}

#[test]
fn joined_open_path_makes_a_loop() {
    let line = vec![clip2_rust::geom::path64_from_flat(&[0i64, 0, 20, 0])];
    let out = inflate_paths(&line, 3.0, JoinType::Miter, EndType::Joined, 2.0, 0.0)
        .unwrap();
    // both sides offset and joined: a 26x6 band
    assert_eq!(bounds_paths(&out), Rect64::new(-3, -3, 23, 3));
}

#[test]
fn round_end_caps_cover_half_circles() {
    let line = vec![clip2_rust::geom::path64_from_flat(&[0i64, 0, 20, 0])];
    let out = inflate_paths(&line, 5.0, JoinType::Round, EndType::Round, 2.0, 0.02)
        .unwrap();
    let expected = 20.0 * 10.0 + PI * 25.0;
    let got = total_area(&out);
    assert!(
        (got - expected).abs() / expected < 0.01,
        "capsule area {} vs {}",
        got,
        expected
    );
}

#[test]
fn reusable_offsetter_with_multiple_groups() {
    let mut offsetter = ClipperOffset::new();
    offsetter.add_paths(&vec![square(0, 0, 10)], JoinType::Miter, EndType::Polygon);
    offsetter.add_paths(&vec![square(30, 0, 10)], JoinType::Miter, EndType::Polygon);
    let out = offsetter.execute(1.0).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(net_area(&out), 2.0 * 144.0);
}
