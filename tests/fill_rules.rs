// Copyright 2025 Lars Brubaker
// Fill rule semantics over self-intersecting and nested inputs.

mod helpers;

use clip2_rust::geom::reverse_path;
use clip2_rust::{union, FillRule, Paths64};
use helpers::{net_area, square, star, total_area};

#[test]
fn star_even_odd_excludes_the_core() {
    let subj = vec![star()];
    let even_odd = union(&subj, &Paths64::new(), FillRule::EvenOdd).unwrap();
    let non_zero = union(&subj, &Paths64::new(), FillRule::NonZero).unwrap();

    // the core pentagon (winding 2) only fills under NonZero, so even-odd
    // carries it as a hole and encloses strictly less
    let eo_area = net_area(&even_odd);
    let nz_area = net_area(&non_zero).abs();
    assert!(eo_area.abs() > 0.0);
    assert!(
        nz_area > eo_area.abs(),
        "NonZero ({}) should exceed EvenOdd ({})",
        nz_area,
        eo_area
    );
}

#[test]
fn positive_and_negative_split_by_orientation() {
    let subj = vec![star()];
    let nz = total_area(&union(&subj, &Paths64::new(), FillRule::NonZero).unwrap());
    let pos = total_area(&union(&subj, &Paths64::new(), FillRule::Positive).unwrap());
    let neg = total_area(&union(&subj, &Paths64::new(), FillRule::Negative).unwrap());

    // all the star's winding is one signed direction, so one of the signed
    // rules matches NonZero and the other sees nothing
    assert_eq!(pos.max(neg), nz);
    assert_eq!(pos.min(neg), 0.0);

    // reversing the input swaps which rule fires
    let rev = vec![reverse_path(&star())];
    let pos_rev = total_area(&union(&rev, &Paths64::new(), FillRule::Positive).unwrap());
    let neg_rev = total_area(&union(&rev, &Paths64::new(), FillRule::Negative).unwrap());
    assert_eq!(pos_rev, neg);
    assert_eq!(neg_rev, pos);
}

#[test]
fn nested_squares_even_odd_keeps_rings_alternating() {
    // concentric squares: 20, 16, 12, 8 wide, all the same winding
    let subj = vec![
        square(0, 0, 20),
        square(2, 2, 16),
        square(4, 4, 12),
        square(6, 6, 8),
    ];
    let out = union(&subj, &Paths64::new(), FillRule::EvenOdd).unwrap();
    assert_eq!(out.len(), 4);
    // rings 20x20 and 12x12 are solid, 16x16 and 8x8 are holes
    assert_eq!(net_area(&out), 400.0 - 256.0 + 144.0 - 64.0);
}

#[test]
fn nested_squares_nonzero_dissolves_same_winding_rings() {
    let subj = vec![square(0, 0, 20), square(2, 2, 16)];
    let out = union(&subj, &Paths64::new(), FillRule::NonZero).unwrap();
    // the inner same-winding ring adds nothing
    assert_eq!(out.len(), 1);
    assert_eq!(net_area(&out), 400.0);
}

#[test]
fn hole_by_reversed_inner_ring_under_nonzero() {
    let subj = vec![square(0, 0, 20), reverse_path(&square(5, 5, 10))];
    let out = union(&subj, &Paths64::new(), FillRule::NonZero).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(net_area(&out), 400.0 - 100.0);
}

#[test]
fn overlapping_same_winding_squares_per_rule() {
    let subj = vec![square(0, 0, 10), square(5, 5, 10)];
    let eo = union(&subj, &Paths64::new(), FillRule::EvenOdd).unwrap();
    let nz = union(&subj, &Paths64::new(), FillRule::NonZero).unwrap();
    // even-odd: the 5x5 double-covered region drops out as a hole
    assert_eq!(net_area(&eo), 175.0 - 25.0);
    assert_eq!(net_area(&nz), 175.0);
}
