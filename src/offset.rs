// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon offsetting (inflate/deflate).
//
// Each edge gets a unit outward normal; each vertex is classified by the
// sine/cosine of the angle between its adjacent normals and joined
// accordingly. Concave vertices always emit a three-point bridge whose
// local self-overlap is removed by the mandatory final self-union, with
// the union's fill rule chosen from the aggregate winding of the input
// (the orientation of the path owning the bottom-most point), so reversed
// inputs deflate where normal inputs inflate.

use std::f64::consts::PI;

use crate::engine::Clipper64;
use crate::error::ClipError;
use crate::geom::{
    area, checked_coord, cross_d, dot_d, ellipse, scale_paths_to_64, scale_paths_to_d,
    strip_duplicates, ClipType, EndType, FillRule, JoinType, Path64, Paths64, PathsD, PathD,
    Point64, PointD, Rect64,
};
use crate::ops::check_precision;

const TOLERANCE: f64 = 1.0e-12;

#[derive(Clone, Debug)]
struct Group {
    in_paths: Paths64,
    join_type: JoinType,
    end_type: EndType,
    paths_reversed: bool,
    lowest_path_idx: Option<usize>,
}

impl Group {
    fn new(paths: &Paths64, join_type: JoinType, end_type: EndType) -> Self {
        let is_joined = end_type == EndType::Polygon || end_type == EndType::Joined;
        let in_paths: Paths64 = paths.iter().map(|p| strip_duplicates(p, is_joined)).collect();
        if end_type == EndType::Polygon {
            // the bottom-most path must be an outer path; a negative area
            // there means the whole group is reversed
            let lowest_path_idx = get_lowest_path_idx(&in_paths);
            let paths_reversed = match lowest_path_idx {
                Some(i) => area(&in_paths[i]) < 0.0,
                None => false,
            };
            Group { in_paths, join_type, end_type, paths_reversed, lowest_path_idx }
        } else {
            Group {
                in_paths,
                join_type,
                end_type,
                paths_reversed: false,
                lowest_path_idx: None,
            }
        }
    }
}

/// Index of the path owning the bottom-most (largest Y, then smallest X)
/// point.
fn get_lowest_path_idx(paths: &Paths64) -> Option<usize> {
    let mut result = None;
    let mut bot = Point64::new(i64::MAX, i64::MIN);
    for (i, path) in paths.iter().enumerate() {
        for &pt in path {
            if pt.y < bot.y || (pt.y == bot.y && pt.x >= bot.x) {
                continue;
            }
            result = Some(i);
            bot = pt;
        }
    }
    result
}

fn get_unit_normal(pt1: Point64, pt2: Point64) -> PointD {
    let dx = (pt2.x - pt1.x) as f64;
    let dy = (pt2.y - pt1.y) as f64;
    if dx == 0.0 && dy == 0.0 {
        return PointD::new(0.0, 0.0);
    }
    let inverse = 1.0 / (dx * dx + dy * dy).sqrt();
    PointD::new(dy * inverse, -dx * inverse)
}

fn translate_point(pt: PointD, dx: f64, dy: f64) -> PointD {
    PointD::new(pt.x + dx, pt.y + dy)
}

fn reflect_point(pt: PointD, pivot: PointD) -> PointD {
    PointD::new(pivot.x + (pivot.x - pt.x), pivot.y + (pivot.y - pt.y))
}

fn get_avg_unit_vector(vec1: PointD, vec2: PointD) -> PointD {
    let sum = PointD::new(vec1.x + vec2.x, vec1.y + vec2.y);
    let h = (sum.x * sum.x + sum.y * sum.y).sqrt();
    if h < TOLERANCE {
        PointD::new(0.0, 0.0)
    } else {
        PointD::new(sum.x / h, sum.y / h)
    }
}

/// Intersection of two (infinite) lines given by point pairs.
fn intersect_point_d(pt1a: PointD, pt1b: PointD, pt2a: PointD, pt2b: PointD) -> PointD {
    if (pt1a.x - pt1b.x).abs() < TOLERANCE {
        // line 1 is vertical
        if (pt2a.x - pt2b.x).abs() < TOLERANCE {
            return PointD::new(0.0, 0.0);
        }
        let m2 = (pt2b.y - pt2a.y) / (pt2b.x - pt2a.x);
        let b2 = pt2a.y - m2 * pt2a.x;
        return PointD::new(pt1a.x, m2 * pt1a.x + b2);
    }
    if (pt2a.x - pt2b.x).abs() < TOLERANCE {
        // line 2 is vertical
        let m1 = (pt1b.y - pt1a.y) / (pt1b.x - pt1a.x);
        let b1 = pt1a.y - m1 * pt1a.x;
        return PointD::new(pt2a.x, m1 * pt2a.x + b1);
    }
    let m1 = (pt1b.y - pt1a.y) / (pt1b.x - pt1a.x);
    let b1 = pt1a.y - m1 * pt1a.x;
    let m2 = (pt2b.y - pt2a.y) / (pt2b.x - pt2a.x);
    let b2 = pt2a.y - m2 * pt2a.x;
    if (m1 - m2).abs() < TOLERANCE {
        return PointD::new(0.0, 0.0);
    }
    let x = (b2 - b1) / (m1 - m2);
    PointD::new(x, m1 * x + b1)
}

fn get_perpendic(pt: Point64, norm: PointD, delta: f64) -> Point64 {
    Point64::new(
        checked_coord(pt.x as f64 + norm.x * delta),
        checked_coord(pt.y as f64 + norm.y * delta),
    )
}

fn get_perpendic_d(pt: Point64, norm: PointD, delta: f64) -> PointD {
    PointD::new(pt.x as f64 + norm.x * delta, pt.y as f64 + norm.y * delta)
}

// ─────────────────────────────── ClipperOffset ─────────────────────────────

/// Inflates (delta > 0) or deflates (delta < 0) groups of paths. Group
/// paths with `EndType::Polygon` offset as closed rings; the open end
/// types grow an open path into a closed outline with the selected caps.
pub struct ClipperOffset {
    groups: Vec<Group>,
    norms: PathD,
    solution: Paths64,
    delta: f64,
    group_delta: f64,
    mit_lim_sqr: f64,
    steps_per_rad: f64,
    step_sin: f64,
    step_cos: f64,
    join_type: JoinType,
    end_type: EndType,
    pub miter_limit: f64,
    pub arc_tolerance: f64,
    pub preserve_collinear: bool,
    pub reverse_solution: bool,
}

impl Default for ClipperOffset {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipperOffset {
    pub fn new() -> Self {
        ClipperOffset {
            groups: Vec::new(),
            norms: PathD::new(),
            solution: Paths64::new(),
            delta: 0.0,
            group_delta: 0.0,
            mit_lim_sqr: 0.0,
            steps_per_rad: 0.0,
            step_sin: 0.0,
            step_cos: 0.0,
            join_type: JoinType::Miter,
            end_type: EndType::Polygon,
            miter_limit: 2.0,
            arc_tolerance: 0.0,
            preserve_collinear: false,
            reverse_solution: false,
        }
    }

    pub fn add_path(&mut self, path: &Path64, join_type: JoinType, end_type: EndType) {
        self.add_paths(&vec![path.clone()], join_type, end_type);
    }

    pub fn add_paths(&mut self, paths: &Paths64, join_type: JoinType, end_type: EndType) {
        if paths.is_empty() {
            return;
        }
        self.groups.push(Group::new(paths, join_type, end_type));
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.norms.clear();
        self.solution.clear();
    }

    /// Offset every group by `delta` and self-union the raw result.
    pub fn execute(&mut self, delta: f64) -> Result<Paths64, ClipError> {
        self.solution.clear();
        if self.groups.is_empty() {
            return Ok(Paths64::new());
        }

        if delta.abs() < 0.5 {
            // too small to displace anything; merge the inputs unchanged
            for gi in 0..self.groups.len() {
                for path in self.groups[gi].in_paths.clone() {
                    self.solution.push(path);
                }
            }
        } else {
            self.delta = delta;
            self.mit_lim_sqr = if self.miter_limit <= 1.0 {
                2.0
            } else {
                2.0 / (self.miter_limit * self.miter_limit)
            };
            for gi in 0..self.groups.len() {
                self.do_group_offset(gi);
            }
        }

        // the self-overlaps produced by concave bridges (and by adjacent
        // edges crossing) are removed here
        let paths_reversed = self.groups[0].paths_reversed;
        let mut clipper = Clipper64::new();
        clipper.preserve_collinear = self.preserve_collinear;
        // the solution should retain the orientation of the input
        clipper.reverse_solution = self.reverse_solution != paths_reversed;
        clipper.add_subject(&self.solution);
        let fill_rule = if paths_reversed { FillRule::Negative } else { FillRule::Positive };
        clipper.execute(ClipType::Union, fill_rule)
    }

    fn do_group_offset(&mut self, gi: usize) {
        let group = self.groups[gi].clone();

        if group.end_type == EndType::Polygon {
            if group.lowest_path_idx.is_none() {
                self.delta = self.delta.abs();
            }
            self.group_delta = if group.paths_reversed { -self.delta } else { self.delta };
        } else {
            self.group_delta = self.delta.abs();
        }
        let abs_delta = self.group_delta.abs();
        self.join_type = group.join_type;

        if group.join_type == JoinType::Round || group.end_type == EndType::Round {
            // the arc tolerance sets how far a flattened arc chord may sag;
            // when unset, allow about radius/500
            let arc_tol = if self.arc_tolerance > 0.01 {
                self.arc_tolerance
            } else {
                abs_delta / 500.0
            };
            let steps_per_360 = PI / (1.0 - arc_tol / abs_delta).clamp(-1.0, 1.0).acos();
            self.step_sin = (2.0 * PI / steps_per_360).sin();
            self.step_cos = (2.0 * PI / steps_per_360).cos();
            if self.group_delta < 0.0 {
                self.step_sin = -self.step_sin;
            }
            self.steps_per_rad = steps_per_360 / (2.0 * PI);
        }

        for path in &group.in_paths {
            let cnt = path.len();
            if cnt == 0 {
                continue;
            }

            if cnt == 1 {
                let pt = path[0];
                if self.group_delta < 1.0 {
                    log::debug!("skipping single-point path with sub-unit delta");
                    continue;
                }
                // a single vertex grows into a circle or a square
                if group.end_type == EndType::Round {
                    let steps = (self.steps_per_rad * 2.0 * PI).ceil() as usize;
                    self.solution.push(ellipse(pt, abs_delta, abs_delta, steps));
                } else {
                    let d = self.group_delta.ceil() as i64;
                    let rec = Rect64::new(pt.x - d, pt.y - d, pt.x + d, pt.y + d);
                    self.solution.push(rec.as_path());
                }
                continue;
            }

            self.end_type = group.end_type;
            if cnt == 2 && group.end_type == EndType::Joined {
                self.end_type = if group.join_type == JoinType::Round {
                    EndType::Round
                } else {
                    EndType::Square
                };
            }

            self.build_normals(path);
            match self.end_type {
                EndType::Polygon => self.offset_polygon(path),
                EndType::Joined => self.offset_open_joined(path),
                _ => self.offset_open_path(path),
            }
        }
    }

    fn build_normals(&mut self, path: &Path64) {
        let cnt = path.len();
        self.norms.clear();
        self.norms.reserve(cnt);
        for i in 0..cnt - 1 {
            self.norms.push(get_unit_normal(path[i], path[i + 1]));
        }
        self.norms.push(get_unit_normal(path[cnt - 1], path[0]));
    }

    fn offset_polygon(&mut self, path: &Path64) {
        let mut path_out = Path64::new();
        let mut k = path.len() - 1;
        for j in 0..path.len() {
            self.offset_point(path, j, &mut k, &mut path_out);
        }
        self.solution.push(path_out);
    }

    fn offset_open_joined(&mut self, path: &Path64) {
        self.offset_polygon(path);
        let reversed: Path64 = path.iter().rev().copied().collect();
        self.build_normals(&reversed);
        self.offset_polygon(&reversed);
    }

    fn offset_open_path(&mut self, path: &Path64) {
        let mut path_out = Path64::new();
        let high_i = path.len() - 1;

        // the line start cap
        match self.end_type {
            EndType::Butt => self.do_bevel(path, 0, 0, &mut path_out),
            EndType::Round => self.do_round(path, 0, 0, PI, &mut path_out),
            _ => self.do_square(path, 0, 0, &mut path_out),
        }

        // offset the left side going forward
        let mut k = 0;
        for j in 1..high_i {
            self.offset_point(path, j, &mut k, &mut path_out);
        }

        // reverse the normals
        for i in (1..=high_i).rev() {
            self.norms[i] = PointD::new(-self.norms[i - 1].x, -self.norms[i - 1].y);
        }
        self.norms[0] = self.norms[high_i];

        // the line end cap
        match self.end_type {
            EndType::Butt => self.do_bevel(path, high_i, high_i, &mut path_out),
            EndType::Round => self.do_round(path, high_i, high_i, PI, &mut path_out),
            _ => self.do_square(path, high_i, high_i, &mut path_out),
        }

        // offset the right side going back
        let mut k = high_i;
        for j in (1..high_i).rev() {
            self.offset_point(path, j, &mut k, &mut path_out);
        }

        self.solution.push(path_out);
    }

    /// Join one vertex. `k` trails `j` as the index of the previous
    /// distinct vertex.
    fn offset_point(&mut self, path: &Path64, j: usize, k: &mut usize, path_out: &mut Path64) {
        if path[j] == path[*k] {
            *k = j;
            return;
        }

        // sin/cos of the turn between the adjacent edge normals:
        // zero sine is a straight-through vertex, negative sine (for a
        // positive delta) a concave one
        let mut sin_a = cross_d(self.norms[*k], self.norms[j]);
        let cos_a = dot_d(self.norms[*k], self.norms[j]);
        sin_a = sin_a.clamp(-1.0, 1.0);

        if self.group_delta.abs() <= TOLERANCE {
            path_out.push(path[j]);
            *k = j;
            return;
        }

        if cos_a > -0.999 && sin_a * self.group_delta < 0.0 {
            // concave: bridge with perpendicular-in, vertex, perpendicular-out.
            // the bridge overlaps itself, which the final union removes
            path_out.push(get_perpendic(path[j], self.norms[*k], self.group_delta));
            path_out.push(path[j]);
            path_out.push(get_perpendic(path[j], self.norms[j], self.group_delta));
        } else if cos_a > 0.999 && self.join_type != JoinType::Round {
            // almost no turn: the vertex passes straight through
            self.do_miter(path, j, *k, cos_a, path_out);
        } else {
            match self.join_type {
                JoinType::Miter => {
                    // within the miter limit, emit the analytic apex
                    if cos_a > self.mit_lim_sqr - 1.0 {
                        self.do_miter(path, j, *k, cos_a, path_out);
                    } else {
                        self.do_square(path, j, *k, path_out);
                    }
                }
                JoinType::Round => {
                    self.do_round(path, j, *k, sin_a.atan2(cos_a), path_out);
                }
                JoinType::Bevel => self.do_bevel(path, j, *k, path_out),
                JoinType::Square => {
                    // squares only beyond a right angle, so rectangular
                    // outlines keep exact corners
                    if cos_a >= 0.0 {
                        self.do_miter(path, j, *k, cos_a, path_out);
                    } else {
                        self.do_square(path, j, *k, path_out);
                    }
                }
            }
        }
        *k = j;
    }

    fn do_miter(&self, path: &Path64, j: usize, k: usize, cos_a: f64, path_out: &mut Path64) {
        let q = self.group_delta / (cos_a + 1.0);
        path_out.push(Point64::new(
            checked_coord(path[j].x as f64 + (self.norms[k].x + self.norms[j].x) * q),
            checked_coord(path[j].y as f64 + (self.norms[k].y + self.norms[j].y) * q),
        ));
    }

    fn do_bevel(&self, path: &Path64, j: usize, k: usize, path_out: &mut Path64) {
        let (pt1, pt2);
        if j == k {
            // an end cap: straight across the path end
            let abs_delta = self.group_delta.abs();
            pt1 = Point64::new(
                checked_coord(path[j].x as f64 - abs_delta * self.norms[j].x),
                checked_coord(path[j].y as f64 - abs_delta * self.norms[j].y),
            );
            pt2 = Point64::new(
                checked_coord(path[j].x as f64 + abs_delta * self.norms[j].x),
                checked_coord(path[j].y as f64 + abs_delta * self.norms[j].y),
            );
        } else {
            pt1 = get_perpendic(path[j], self.norms[k], self.group_delta);
            pt2 = get_perpendic(path[j], self.norms[j], self.group_delta);
        }
        path_out.push(pt1);
        path_out.push(pt2);
    }

    fn do_square(&self, path: &Path64, j: usize, k: usize, path_out: &mut Path64) {
        let vec = if j == k {
            PointD::new(self.norms[j].y, -self.norms[j].x)
        } else {
            get_avg_unit_vector(
                PointD::new(-self.norms[k].y, self.norms[k].x),
                PointD::new(self.norms[j].y, -self.norms[j].x),
            )
        };
        let abs_delta = self.group_delta.abs();

        // offset the vertex delta units along the (bisecting) unit vector
        let pt_q = translate_point(PointD::from_64(path[j]), abs_delta * vec.x, abs_delta * vec.y);
        // the squared-off line runs through pt_q perpendicular to vec
        let pt1 = translate_point(pt_q, self.group_delta * vec.y, self.group_delta * -vec.x);
        let pt2 = translate_point(pt_q, self.group_delta * -vec.y, self.group_delta * vec.x);
        // two vertices along the first offset edge
        let pt3 = get_perpendic_d(path[k], self.norms[k], self.group_delta);

        if j == k {
            let pt4 = PointD::new(
                pt3.x + vec.x * self.group_delta,
                pt3.y + vec.y * self.group_delta,
            );
            let pt = intersect_point_d(pt1, pt2, pt3, pt4);
            // the second point mirrors through pt_q
            path_out.push(Point64::from_d(reflect_point(pt, pt_q)));
            path_out.push(Point64::from_d(pt));
        } else {
            let pt4 = get_perpendic_d(path[j], self.norms[k], self.group_delta);
            let pt = intersect_point_d(pt1, pt2, pt3, pt4);
            path_out.push(Point64::from_d(pt));
            path_out.push(Point64::from_d(reflect_point(pt, pt_q)));
        }
    }

    fn do_round(&self, path: &Path64, j: usize, k: usize, angle: f64, path_out: &mut Path64) {
        let pt = path[j];
        let mut offset_vec = PointD::new(
            self.norms[k].x * self.group_delta,
            self.norms[k].y * self.group_delta,
        );
        if j == k {
            offset_vec = PointD::new(-offset_vec.x, -offset_vec.y);
        }
        path_out.push(Point64::new(
            checked_coord(pt.x as f64 + offset_vec.x),
            checked_coord(pt.y as f64 + offset_vec.y),
        ));
        let steps = (self.steps_per_rad * angle.abs()).ceil() as usize;
        for _ in 1..steps {
            offset_vec = PointD::new(
                offset_vec.x * self.step_cos - self.step_sin * offset_vec.y,
                offset_vec.x * self.step_sin + offset_vec.y * self.step_cos,
            );
            path_out.push(Point64::new(
                checked_coord(pt.x as f64 + offset_vec.x),
                checked_coord(pt.y as f64 + offset_vec.y),
            ));
        }
        path_out.push(get_perpendic(pt, self.norms[j], self.group_delta));
    }
}

// ─────────────────────────────── Convenience ───────────────────────────────

/// Offset `paths` by `delta` in one call.
pub fn inflate_paths(
    paths: &Paths64,
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
    arc_tolerance: f64,
) -> Result<Paths64, ClipError> {
    let mut offsetter = ClipperOffset::new();
    offsetter.miter_limit = miter_limit;
    offsetter.arc_tolerance = arc_tolerance;
    offsetter.add_paths(paths, join_type, end_type);
    offsetter.execute(delta)
}

/// Decimal-scaled variant of `inflate_paths`.
pub fn inflate_paths_d(
    paths: &PathsD,
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
    arc_tolerance: f64,
    precision: i32,
) -> Result<PathsD, ClipError> {
    check_precision(precision)?;
    let scale = 10f64.powi(precision);
    let paths64 = scale_paths_to_64(paths, scale);
    let solution = inflate_paths(
        &paths64,
        delta * scale,
        join_type,
        end_type,
        miter_limit,
        arc_tolerance * scale,
    )?;
    Ok(scale_paths_to_d(&solution, 1.0 / scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{area_paths, bounds_paths, path64_from_flat};

    fn square(left: i64, top: i64, size: i64) -> Path64 {
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

    #[test]
    fn inflate_square_with_square_joins() {
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
        assert_eq!(area_paths(&out), 196.0);
        assert_eq!(bounds_paths(&out), Rect64::new(-2, -2, 12, 12));
    }

    #[test]
    fn deflate_square() {
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
        assert_eq!(area_paths(&out), 36.0);
        assert_eq!(bounds_paths(&out), Rect64::new(2, 2, 8, 8));
    }

    #[test]
    fn deflate_to_nothing() {
        let out = inflate_paths(
            &vec![square(0, 0, 10)],
            -6.0,
            JoinType::Miter,
            EndType::Polygon,
            2.0,
            0.0,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn reversed_input_offsets_inward() {
        let reversed: Path64 = square(0, 0, 10).into_iter().rev().collect();
        let out = inflate_paths(
            &vec![reversed],
            2.0,
            JoinType::Miter,
            EndType::Polygon,
            2.0,
            0.0,
        )
        .unwrap();
        // a reversed ring is a hole, so "outward" grows the hole's void
        assert_eq!(out.len(), 1);
        assert_eq!(bounds_paths(&out), Rect64::new(2, 2, 8, 8));
    }

    #[test]
    fn round_join_approximates_circle_area() {
        let out = inflate_paths(
            &vec![square(0, 0, 10)],
            5.0,
            JoinType::Round,
            EndType::Polygon,
            2.0,
            0.05,
        )
        .unwrap();
        // square + 4 edge strips + 4 quarter circles
        let expected = 100.0 + 4.0 * 50.0 + PI * 25.0;
        let got = area_paths(&out);
        assert!(
            (got - expected).abs() / expected < 0.01,
            "area {} vs {}",
            got,
            expected
        );
    }

    #[test]
    fn single_point_becomes_circle_or_square() {
        let dot = vec![path64_from_flat(&[5i64, 5])];
        let circle = inflate_paths(&dot, 4.0, JoinType::Round, EndType::Round, 2.0, 0.0).unwrap();
        assert_eq!(circle.len(), 1);
        let circle_area = area_paths(&circle);
        assert!((circle_area - PI * 16.0).abs() / (PI * 16.0) < 0.1);

        let sq = inflate_paths(&dot, 4.0, JoinType::Miter, EndType::Butt, 2.0, 0.0).unwrap();
        assert_eq!(sq.len(), 1);
        assert_eq!(bounds_paths(&sq), Rect64::new(1, 1, 9, 9));
    }

    #[test]
    fn open_path_butt_caps_make_a_band() {
        let line = vec![path64_from_flat(&[0i64, 0, 10, 0])];
        let out = inflate_paths(&line, 2.0, JoinType::Miter, EndType::Butt, 2.0, 0.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(area_paths(&out), 40.0);
        assert_eq!(bounds_paths(&out), Rect64::new(0, -2, 10, 2));
    }

    #[test]
    fn tiny_delta_returns_cleaned_input() {
        let out = inflate_paths(
            &vec![square(0, 0, 10)],
            0.2,
            JoinType::Miter,
            EndType::Polygon,
            2.0,
            0.0,
        )
        .unwrap();
        assert_eq!(area_paths(&out), 100.0);
    }

    #[test]
    fn offset_round_trip_preserves_area() {
        let subject = vec![square(0, 0, 100)];
        let grown = inflate_paths(&subject, 3.0, JoinType::Miter, EndType::Polygon, 2.0, 0.0)
            .unwrap();
        let back = inflate_paths(&grown, -3.0, JoinType::Miter, EndType::Polygon, 2.0, 0.0)
            .unwrap();
        let err = (area_paths(&back) - 10000.0).abs();
        assert!(err < 1.0, "area drifted by {}", err);
    }
}
