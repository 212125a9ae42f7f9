// Copyright 2025 Lars Brubaker
// License: MIT
//
// Minkowski sums and differences via quad tiling: one translated pattern
// copy per path vertex, one positively-oriented quad per (path edge,
// pattern edge) pair, and a NonZero union to dissolve the dense
// self-overlap the tiling produces.

use crate::error::ClipError;
use crate::geom::{
    is_positive, reverse_path, scale_paths_to_64, scale_paths_to_d, FillRule, Path64, PathD,
    Paths64, PathsD,
};
use crate::ops::{check_precision, union};

fn minkowski_internal(pattern: &Path64, path: &Path64, is_sum: bool, is_closed: bool) -> Paths64 {
    let delta = usize::from(!is_closed);
    let pat_len = pattern.len();
    let path_len = path.len();
    if pat_len == 0 || path_len == 0 {
        return Paths64::new();
    }

    // one translated (or reflected-translated) pattern copy per path vertex
    let mut tmp: Paths64 = Vec::with_capacity(path_len);
    for &path_pt in path {
        let copy: Path64 = if is_sum {
            pattern.iter().map(|&base_pt| path_pt + base_pt).collect()
        } else {
            pattern.iter().map(|&base_pt| path_pt - base_pt).collect()
        };
        tmp.push(copy);
    }

    let mut result: Paths64 = Vec::with_capacity((path_len - delta) * pat_len);
    let mut g = if is_closed { path_len - 1 } else { 0 };
    for i in delta..path_len {
        let mut h = pat_len - 1;
        for j in 0..pat_len {
            let quad: Path64 = vec![tmp[g][h], tmp[i][h], tmp[i][j], tmp[g][j]];
            if is_positive(&quad) {
                result.push(quad);
            } else {
                result.push(reverse_path(&quad));
            }
            h = j;
        }
        g = i;
    }
    result
}

/// Minkowski sum of `pattern` swept along `path`.
pub fn sum(pattern: &Path64, path: &Path64, is_closed: bool) -> Result<Paths64, ClipError> {
    let quads = minkowski_internal(pattern, path, true, is_closed);
    union(&quads, &Paths64::new(), FillRule::NonZero)
}

/// Minkowski difference: the sum with the reflected pattern.
pub fn diff(pattern: &Path64, path: &Path64, is_closed: bool) -> Result<Paths64, ClipError> {
    let quads = minkowski_internal(pattern, path, false, is_closed);
    union(&quads, &Paths64::new(), FillRule::NonZero)
}

/// Decimal-scaled Minkowski sum.
pub fn sum_d(
    pattern: &PathD,
    path: &PathD,
    is_closed: bool,
    precision: i32,
) -> Result<PathsD, ClipError> {
    check_precision(precision)?;
    let scale = 10f64.powi(precision);
    let pattern64 = scale_paths_to_64(&vec![pattern.clone()], scale).remove(0);
    let path64 = scale_paths_to_64(&vec![path.clone()], scale).remove(0);
    let solution = sum(&pattern64, &path64, is_closed)?;
    Ok(scale_paths_to_d(&solution, 1.0 / scale))
}

/// Decimal-scaled Minkowski difference.
pub fn diff_d(
    pattern: &PathD,
    path: &PathD,
    is_closed: bool,
    precision: i32,
) -> Result<PathsD, ClipError> {
    check_precision(precision)?;
    let scale = 10f64.powi(precision);
    let pattern64 = scale_paths_to_64(&vec![pattern.clone()], scale).remove(0);
    let path64 = scale_paths_to_64(&vec![path.clone()], scale).remove(0);
    let solution = diff(&pattern64, &path64, is_closed)?;
    Ok(scale_paths_to_d(&solution, 1.0 / scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{area_paths, bounds_paths, path64_from_flat, Rect64};

    #[test]
    fn sum_of_two_squares_is_a_square() {
        let pattern = path64_from_flat(&[-1i64, -1, 1, -1, 1, 1, -1, 1]);
        let path = path64_from_flat(&[0i64, 0, 10, 0, 10, 10, 0, 10]);
        let out = sum(&pattern, &path, true).unwrap();
        // a 2x2 square swept around a 10x10 square rim covers the 12x12
        // outline; the 8x8 interior void survives as a hole
        assert_eq!(bounds_paths(&out), Rect64::new(-1, -1, 11, 11));
        assert_eq!(area_paths(&out), 144.0 - 64.0);
    }

    #[test]
    fn diff_recenters_offset_pattern() {
        let pattern = path64_from_flat(&[4i64, 4, 6, 4, 6, 6, 4, 6]);
        let path = path64_from_flat(&[0i64, 0, 10, 0, 10, 10, 0, 10]);
        let out = diff(&pattern, &path, true).unwrap();
        assert_eq!(bounds_paths(&out), Rect64::new(-6, -6, 6, 6));
    }

    #[test]
    fn open_path_sweep() {
        let pattern = path64_from_flat(&[-1i64, -1, 1, -1, 1, 1, -1, 1]);
        let line = path64_from_flat(&[0i64, 0, 10, 0]);
        let out = sum(&pattern, &line, false).unwrap();
        // a 2x2 brush dragged along a 10-long segment
        assert_eq!(bounds_paths(&out), Rect64::new(-1, -1, 11, 1));
        assert_eq!(area_paths(&out), 24.0);
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let empty = Path64::new();
        let square = path64_from_flat(&[0i64, 0, 4, 0, 4, 4, 0, 4]);
        assert!(sum(&empty, &square, true).unwrap().is_empty());
        assert!(sum(&square, &empty, true).unwrap().is_empty());
    }
}
