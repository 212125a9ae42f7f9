// Copyright 2025 Lars Brubaker
// Boolean operation correctness: the cornerstone two-squares scenarios,
// algebraic identities, and degenerate input handling.

mod helpers;

use clip2_rust::geom::{area, path64_from_flat};
use clip2_rust::{difference, intersect, union, xor, FillRule, Paths64, Point64};
use helpers::{assert_area_approx, net_area, point_set, square};

#[test]
fn intersect_offset_squares() {
    // subject (0,0)-(10,10), clip (5,5)-(15,15): a 5x5 overlap
    let subj = vec![square(0, 0, 10)];
    let clip = vec![square(5, 5, 10)];
    let out = intersect(&subj, &clip, FillRule::EvenOdd).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 25.0);
    assert_eq!(
        point_set(&out),
        vec![
            Point64::new(5, 5),
            Point64::new(5, 10),
            Point64::new(10, 5),
            Point64::new(10, 10),
        ]
    );
}

#[test]
fn union_offset_squares() {
    let subj = vec![square(0, 0, 10)];
    let clip = vec![square(5, 5, 10)];
    let out = union(&subj, &clip, FillRule::EvenOdd).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 175.0); // 100 + 100 - 25
}

#[test]
fn union_of_simple_polygon_with_itself_is_idempotent() {
    let subj = vec![square(3, 3, 9), square(3, 3, 9)];
    for fr in [
        FillRule::NonZero,
        FillRule::Positive,
        FillRule::EvenOdd,
    ] {
        let out = union(&subj, &Paths64::new(), fr).unwrap();
        if fr == FillRule::EvenOdd {
            // identical rings cancel under even-odd parity
            assert_eq!(net_area(&out), 0.0, "even-odd self-union");
            continue;
        }
        assert_eq!(out.len(), 1, "{:?}", fr);
        assert_eq!(area(&out[0]), 81.0, "{:?}", fr);
        assert!(area(&out[0]) > 0.0, "{:?} orientation", fr);
    }
}

#[test]
fn intersect_and_union_are_commutative() {
    let a = vec![square(0, 0, 10)];
    let b = vec![square(4, 6, 10)];
    for fr in [
        FillRule::EvenOdd,
        FillRule::NonZero,
        FillRule::Positive,
        FillRule::Negative,
    ] {
        let i_ab = intersect(&a, &b, fr).unwrap();
        let i_ba = intersect(&b, &a, fr).unwrap();
        assert_eq!(net_area(&i_ab), net_area(&i_ba), "intersect {:?}", fr);
        assert_eq!(point_set(&i_ab), point_set(&i_ba), "intersect {:?}", fr);

        let u_ab = union(&a, &b, fr).unwrap();
        let u_ba = union(&b, &a, fr).unwrap();
        assert_eq!(net_area(&u_ab), net_area(&u_ba), "union {:?}", fr);
        assert_eq!(point_set(&u_ab), point_set(&u_ba), "union {:?}", fr);
    }
}

#[test]
fn difference_is_order_sensitive() {
    let a = vec![square(0, 0, 10)];
    let b = vec![square(5, 0, 10)];
    let ab = difference(&a, &b, FillRule::EvenOdd).unwrap();
    let ba = difference(&b, &a, FillRule::EvenOdd).unwrap();
    assert_eq!(net_area(&ab), 50.0);
    assert_eq!(net_area(&ba), 50.0);
    assert_ne!(point_set(&ab), point_set(&ba));
}

#[test]
fn inclusion_exclusion_identity() {
    // area(A∪B) + area(A∩B) == area(A) + area(B) for simple inputs
    let cases = [
        (square(0, 0, 10), square(5, 5, 10)),   // overlapping
        (square(0, 0, 10), square(20, 0, 10)),  // disjoint
        (square(0, 0, 10), square(2, 2, 4)),    // contained
        (square(0, 0, 10), square(10, 0, 10)),  // edge-sharing
    ];
    for (a, b) in cases {
        let a = vec![a];
        let b = vec![b];
        let u = union(&a, &b, FillRule::NonZero).unwrap();
        let i = intersect(&a, &b, FillRule::NonZero).unwrap();
        let lhs = net_area(&u) + net_area(&i);
        let rhs = net_area(&a) + net_area(&b);
        assert_area_approx(lhs, rhs, 1e-9, "inclusion-exclusion");
    }
}

#[test]
fn xor_complements_intersection() {
    let a = vec![square(0, 0, 10)];
    let b = vec![square(5, 5, 10)];
    let x = xor(&a, &b, FillRule::EvenOdd).unwrap();
    let u = union(&a, &b, FillRule::EvenOdd).unwrap();
    let i = intersect(&a, &b, FillRule::EvenOdd).unwrap();
    assert_area_approx(net_area(&x), net_area(&u) - net_area(&i), 1e-9, "xor");
}

#[test]
fn degenerate_paths_contribute_no_area() {
    let degenerates: Paths64 = vec![
        path64_from_flat(&[5i64, 5]),
        path64_from_flat(&[5i64, 5, 9, 9]),
        Vec::new(),
    ];
    let clip = vec![square(0, 0, 10)];
    let out = union(&degenerates, &clip, FillRule::EvenOdd).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 100.0);

    let only_degenerate = union(&degenerates, &Paths64::new(), FillRule::EvenOdd).unwrap();
    assert!(only_degenerate.is_empty());
}

#[test]
fn union_of_empty_subject_returns_clip_cleaned() {
    // a clip square carrying a duplicate and a collinear midpoint
    let clip = vec![path64_from_flat(&[
        0i64, 0, 5, 0, 5, 0, 10, 0, 10, 10, 0, 10,
    ])];
    let out = union(&Paths64::new(), &clip, FillRule::EvenOdd).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 100.0);
}

#[test]
fn empty_everything_is_empty() {
    let out = union(&Paths64::new(), &Paths64::new(), FillRule::EvenOdd).unwrap();
    assert!(out.is_empty());
}
