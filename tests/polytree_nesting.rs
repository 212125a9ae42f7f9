// Copyright 2025 Lars Brubaker
// Hierarchical output: owners must truly contain their children, and
// solid/hole state follows depth parity.

mod helpers;

use clip2_rust::geom::area;
use clip2_rust::polytree::ROOT;
use clip2_rust::{boolean_op_tree, ClipType, Clipper64, FillRule, Paths64};
use helpers::square;

#[test]
fn four_level_nesting_alternates_parity() {
    let subj = vec![
        square(0, 0, 20),
        square(2, 2, 16),
        square(4, 4, 12),
        square(6, 6, 8),
    ];
    let tree = boolean_op_tree(ClipType::Union, FillRule::EvenOdd, &subj, &Paths64::new())
        .unwrap();

    let outers = tree.children(ROOT);
    assert_eq!(outers.len(), 1);
    let mut node = outers[0];
    let mut expected_areas = [400.0, 256.0, 144.0, 64.0].into_iter();
    let mut depth = 0;
    loop {
        assert_eq!(tree.depth(node), depth);
        assert_eq!(tree.is_hole(node), depth % 2 == 1, "depth {}", depth);
        let expect = expected_areas.next().unwrap();
        assert_eq!(area(tree.polygon(node)).abs(), expect, "depth {}", depth);
        let children = tree.children(node);
        if children.is_empty() {
            break;
        }
        assert_eq!(children.len(), 1);
        node = children[0];
        depth += 1;
    }
    assert_eq!(depth, 3);
}

#[test]
fn disjoint_islands_are_siblings() {
    let subj = vec![square(0, 0, 10), square(20, 0, 10), square(40, 0, 10)];
    let tree = boolean_op_tree(ClipType::Union, FillRule::NonZero, &subj, &Paths64::new())
        .unwrap();
    assert_eq!(tree.children(ROOT).len(), 3);
    for &n in tree.children(ROOT) {
        assert!(!tree.is_hole(n));
        assert!(tree.children(n).is_empty());
    }
}

#[test]
fn island_inside_hole_is_solid_again() {
    let subj = vec![square(0, 0, 30), square(5, 5, 20), square(10, 10, 10)];
    let tree = boolean_op_tree(ClipType::Union, FillRule::EvenOdd, &subj, &Paths64::new())
        .unwrap();
    let outer = tree.children(ROOT)[0];
    let hole = tree.children(outer)[0];
    let island = tree.children(hole)[0];
    assert!(!tree.is_hole(outer));
    assert!(tree.is_hole(hole));
    assert!(!tree.is_hole(island));
}

#[test]
fn tree_flattens_to_the_same_paths_as_execute() {
    let subj = vec![square(0, 0, 20), square(4, 4, 10)];
    let clip = vec![square(8, 8, 20)];

    let flat = {
        let mut c = Clipper64::new();
        c.add_subject(&subj);
        c.add_clip(&clip);
        c.execute(ClipType::Intersection, FillRule::EvenOdd).unwrap()
    };
    let tree = boolean_op_tree(ClipType::Intersection, FillRule::EvenOdd, &subj, &clip)
        .unwrap();
    let from_tree = tree.to_paths();

    let sum_flat: f64 = flat.iter().map(area).sum();
    let sum_tree: f64 = from_tree.iter().map(area).sum();
    assert_eq!(flat.len(), from_tree.len());
    assert!((sum_flat - sum_tree).abs() < 1e-9);
}

#[test]
fn empty_result_gives_empty_tree() {
    let subj = vec![square(0, 0, 10)];
    let clip = vec![square(50, 50, 10)];
    let tree = boolean_op_tree(ClipType::Intersection, FillRule::EvenOdd, &subj, &clip)
        .unwrap();
    assert!(tree.is_empty());
}
