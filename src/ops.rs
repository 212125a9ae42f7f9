// Copyright 2025 Lars Brubaker
// License: MIT
//
// Boolean operation façade. The decimal variants trade input precision for
// the integer engine's robustness guarantees: coordinates are scaled by
// 10^precision, clipped in integer space, then scaled back.

use crate::engine::Clipper64;
use crate::error::ClipError;
use crate::geom::{
    scale_paths_to_64, scale_paths_to_d, ClipType, FillRule, Paths64, PathsD,
};
use crate::polytree::PolyTree64;

/// Run one boolean operation over closed subject and clip paths.
pub fn boolean_op(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &Paths64,
    clips: &Paths64,
) -> Result<Paths64, ClipError> {
    let mut clipper = Clipper64::new();
    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    clipper.execute(clip_type, fill_rule)
}

/// Like `boolean_op`, returning the hierarchical (hole-aware) result.
pub fn boolean_op_tree(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &Paths64,
    clips: &Paths64,
) -> Result<PolyTree64, ClipError> {
    let mut clipper = Clipper64::new();
    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    clipper.execute_tree(clip_type, fill_rule).map(|(tree, _)| tree)
}

pub fn intersect(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Intersection, fill_rule, subjects, clips)
}

/// Union of subjects and clips. Pass empty clips for a self-union.
pub fn union(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Union, fill_rule, subjects, clips)
}

pub fn difference(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Difference, fill_rule, subjects, clips)
}

pub fn xor(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Xor, fill_rule, subjects, clips)
}

// ─────────────────────────── Decimal-scaled API ────────────────────────────

/// Decimal precision is capped so the scale factor keeps products inside
/// the safe integer range.
pub(crate) fn check_precision(precision: i32) -> Result<(), ClipError> {
    if !(-8..=8).contains(&precision) {
        return Err(ClipError::PrecisionRange(precision));
    }
    Ok(())
}

pub fn boolean_op_d(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &PathsD,
    clips: &PathsD,
    precision: i32,
) -> Result<PathsD, ClipError> {
    check_precision(precision)?;
    let scale = 10f64.powi(precision);
    let subjects64 = scale_paths_to_64(subjects, scale);
    let clips64 = scale_paths_to_64(clips, scale);
    let solution = boolean_op(clip_type, fill_rule, &subjects64, &clips64)?;
    Ok(scale_paths_to_d(&solution, 1.0 / scale))
}

pub fn intersect_d(
    subjects: &PathsD,
    clips: &PathsD,
    fill_rule: FillRule,
    precision: i32,
) -> Result<PathsD, ClipError> {
    boolean_op_d(ClipType::Intersection, fill_rule, subjects, clips, precision)
}

pub fn union_d(
    subjects: &PathsD,
    clips: &PathsD,
    fill_rule: FillRule,
    precision: i32,
) -> Result<PathsD, ClipError> {
    boolean_op_d(ClipType::Union, fill_rule, subjects, clips, precision)
}

pub fn difference_d(
    subjects: &PathsD,
    clips: &PathsD,
    fill_rule: FillRule,
    precision: i32,
) -> Result<PathsD, ClipError> {
    boolean_op_d(ClipType::Difference, fill_rule, subjects, clips, precision)
}

pub fn xor_d(
    subjects: &PathsD,
    clips: &PathsD,
    fill_rule: FillRule,
    precision: i32,
) -> Result<PathsD, ClipError> {
    boolean_op_d(ClipType::Xor, fill_rule, subjects, clips, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{area, path64_from_flat, pathd_from_flat};

    #[test]
    fn precision_is_validated_before_any_work() {
        let subj = vec![pathd_from_flat(&[0.0f64, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])];
        for bad in [-9, 9, 100] {
            let err = union_d(&subj, &vec![], FillRule::EvenOdd, bad).unwrap_err();
            assert_eq!(err, ClipError::PrecisionRange(bad));
        }
        assert!(union_d(&subj, &vec![], FillRule::EvenOdd, 8).is_ok());
    }

    #[test]
    fn decimal_intersect_scales_and_rescales() {
        let a = vec![pathd_from_flat(&[0.0f64, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])];
        let b = vec![pathd_from_flat(&[0.5f64, 0.5, 1.5, 0.5, 1.5, 1.5, 0.5, 1.5])];
        let solution = intersect_d(&a, &b, FillRule::EvenOdd, 2).unwrap();
        assert_eq!(solution.len(), 1);
        // 0.5 x 0.5 square
        let mut enclosed = 0.0;
        let path = &solution[0];
        let mut prev = path[path.len() - 1];
        for &pt in path {
            enclosed += (prev.y + pt.y) * (prev.x - pt.x);
            prev = pt;
        }
        assert!((enclosed * 0.5 - 0.25).abs() < 1e-9);
    }

    #[test]
    fn facade_matches_engine() {
        let subj = vec![path64_from_flat(&[0i64, 0, 10, 0, 10, 10, 0, 10])];
        let clip = vec![path64_from_flat(&[5i64, 5, 15, 5, 15, 15, 5, 15])];
        let inter = intersect(&subj, &clip, FillRule::NonZero).unwrap();
        let uni = union(&subj, &clip, FillRule::NonZero).unwrap();
        assert_eq!(area(&inter[0]), 25.0);
        assert_eq!(area(&uni[0]), 175.0);
    }
}
