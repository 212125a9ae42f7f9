// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometry primitives and robust predicates.
//
// All integer math that could overflow an i64 is widened to i128, so
// orientation tests keep the correct sign for coordinates anywhere inside
// the safe range (roughly ±2^61). Two rounding modes coexist on purpose:
// interior segment-intersection coordinates truncate toward zero, while
// every other f64 → i64 derivation rounds half-to-even. Downstream
// consumers depend on those exact coordinates; do not unify the modes.

use std::cmp::Ordering;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

/// Coordinates must stay inside ±MAX_COORD so that differences and their
/// pairwise products stay representable during the widened predicates.
pub const MAX_COORD: i64 = i64::MAX >> 2;
pub const MIN_COORD: i64 = -MAX_COORD;

/// Sentinel returned by range-checked casts instead of silently wrapping.
pub const INVALID64: i64 = i64::MAX;

const MAX_COORD_F: f64 = MAX_COORD as f64;
const MIN_COORD_F: f64 = MIN_COORD as f64;

// ─────────────────────────────── Core types ───────────────────────────────

/// Integer point. The Y axis grows downward, so "bottom" coordinates are
/// numerically larger than "top" ones throughout the crate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point64 {
    pub x: i64,
    pub y: i64,
}

/// Floating-point point used by the decimal-scaled API and offsetting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

pub type Path64 = Vec<Point64>;
pub type Paths64 = Vec<Path64>;
pub type PathD = Vec<PointD>;
pub type PathsD = Vec<PathD>;

impl Point64 {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Point64 { x, y }
    }

    /// Nearest-integer conversion (half-to-even), with the range check that
    /// yields INVALID64 rather than a wrapped coordinate.
    #[inline]
    pub fn from_d(pt: PointD) -> Self {
        Point64 {
            x: checked_coord(pt.x),
            y: checked_coord(pt.y),
        }
    }
}

impl PointD {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        PointD { x, y }
    }

    #[inline]
    pub fn from_64(pt: Point64) -> Self {
        PointD {
            x: pt.x as f64,
            y: pt.y as f64,
        }
    }
}

impl std::ops::Add for Point64 {
    type Output = Point64;
    #[inline]
    fn add(self, other: Point64) -> Point64 {
        Point64::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point64 {
    type Output = Point64;
    #[inline]
    fn sub(self, other: Point64) -> Point64 {
        Point64::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned rectangle; `top < bottom` for a non-empty rect since Y grows
/// downward. The inverted-bounds value from `invalid()` doubles as "empty".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect64 {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect64 {
    #[inline]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Rect64 { left, top, right, bottom }
    }

    /// The "nothing" sentinel: inverted on both axes so any real point
    /// grows it and every emptiness test holds.
    #[inline]
    pub const fn invalid() -> Self {
        Rect64 {
            left: i64::MAX,
            top: i64::MAX,
            right: i64::MIN,
            bottom: i64::MIN,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bottom <= self.top || self.right <= self.left
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn mid_point(&self) -> Point64 {
        Point64::new((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    #[inline]
    pub fn contains_pt(&self, pt: Point64) -> bool {
        pt.x > self.left && pt.x < self.right && pt.y > self.top && pt.y < self.bottom
    }

    #[inline]
    pub fn contains_rect(&self, rec: &Rect64) -> bool {
        rec.left >= self.left
            && rec.right <= self.right
            && rec.top >= self.top
            && rec.bottom <= self.bottom
    }

    #[inline]
    pub fn intersects(&self, rec: &Rect64) -> bool {
        self.left.max(rec.left) <= self.right.min(rec.right)
            && self.top.max(rec.top) <= self.bottom.min(rec.bottom)
    }

    /// The rectangle as a closed path, clockwise in display coordinates.
    pub fn as_path(&self) -> Path64 {
        vec![
            Point64::new(self.left, self.top),
            Point64::new(self.right, self.top),
            Point64::new(self.right, self.bottom),
            Point64::new(self.left, self.bottom),
        ]
    }
}

/// Floating-point rectangle for the decimal-scaled API.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectD {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RectD {
    #[inline]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        RectD { left, top, right, bottom }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bottom <= self.top || self.right <= self.left
    }
}

// ─────────────────────────────── Enums ─────────────────────────────────────

/// Which regions of a (possibly self-overlapping) path count as interior.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipType {
    #[default]
    Intersection,
    Union,
    Difference,
    Xor,
}

/// Operand role: boolean semantics treat subject and clip differently only
/// for Difference (and for open-path passthrough).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    #[default]
    Subject,
    Clip,
}

/// Corner style used while offsetting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    Miter,
    Round,
    Bevel,
    Square,
}

/// Path-end style used while offsetting. `Polygon` closes the offset ring;
/// `Joined` offsets both sides of an open path into one ring.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndType {
    #[default]
    Polygon,
    Joined,
    Butt,
    Square,
    Round,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointInPolygonResult {
    IsOn,
    IsInside,
    IsOutside,
}

// ─────────────────────────────── Predicates ────────────────────────────────

/// Sign of the cross product of (pt2-pt1) × (pt3-pt2), exact for all
/// coordinates within the safe range. Returns 0 iff exactly collinear.
#[inline]
pub fn cross_sign(pt1: Point64, pt2: Point64, pt3: Point64) -> i32 {
    let a = ((pt2.x - pt1.x) as i128) * ((pt3.y - pt2.y) as i128);
    let b = ((pt2.y - pt1.y) as i128) * ((pt3.x - pt2.x) as i128);
    match a.cmp(&b) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Widened dot product of (pt2-pt1) · (pt3-pt2); only its sign is used.
#[inline]
pub fn dot_sign(pt1: Point64, pt2: Point64, pt3: Point64) -> i32 {
    let d = ((pt2.x - pt1.x) as i128) * ((pt3.x - pt2.x) as i128)
        + ((pt2.y - pt1.y) as i128) * ((pt3.y - pt2.y) as i128);
    match d.cmp(&0) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Cross product of two free vectors (used on unit normals).
#[inline]
pub fn cross_d(vec1: PointD, vec2: PointD) -> f64 {
    vec1.x * vec2.y - vec1.y * vec2.x
}

/// Dot product of two free vectors.
#[inline]
pub fn dot_d(vec1: PointD, vec2: PointD) -> f64 {
    vec1.x * vec2.x + vec1.y * vec2.y
}

/// Do two segments cross? `inclusive` also accepts endpoint touches
/// (but never fully-collinear overlap).
pub fn segs_intersect(
    seg1a: Point64,
    seg1b: Point64,
    seg2a: Point64,
    seg2b: Point64,
    inclusive: bool,
) -> bool {
    if inclusive {
        let res1 = cross_sign(seg1a, seg2a, seg2b);
        let res2 = cross_sign(seg1b, seg2a, seg2b);
        if res1 * res2 > 0 {
            return false;
        }
        let res3 = cross_sign(seg2a, seg1a, seg1b);
        let res4 = cross_sign(seg2b, seg1a, seg1b);
        if res3 * res4 > 0 {
            return false;
        }
        res1 != 0 || res2 != 0 || res3 != 0 || res4 != 0
    } else {
        cross_sign(seg1a, seg2a, seg2b) * cross_sign(seg1b, seg2a, seg2b) < 0
            && cross_sign(seg2a, seg1a, seg1b) * cross_sign(seg2b, seg1a, seg1b) < 0
    }
}

/// Intersection of the infinite lines through two segments, clamped to
/// segment 1's extent. Interior coordinates truncate toward zero; see the
/// module notes. Returns None for parallel lines.
pub fn get_intersect_point(
    ln1a: Point64,
    ln1b: Point64,
    ln2a: Point64,
    ln2b: Point64,
) -> Option<Point64> {
    let dy1 = (ln1b.y - ln1a.y) as f64;
    let dx1 = (ln1b.x - ln1a.x) as f64;
    let dy2 = (ln2b.y - ln2a.y) as f64;
    let dx2 = (ln2b.x - ln2a.x) as f64;
    let det = dy1 * dx2 - dy2 * dx1;
    if det == 0.0 {
        return None;
    }
    let t = ((ln1a.x - ln2a.x) as f64 * dy2 - (ln1a.y - ln2a.y) as f64 * dx2) / det;
    if t <= 0.0 {
        Some(ln1a)
    } else if t >= 1.0 {
        Some(ln1b)
    } else {
        Some(Point64::new(
            ln1a.x + (t * dx1) as i64,
            ln1a.y + (t * dy1) as i64,
        ))
    }
}

/// Point on the segment closest to `off_pt` (half-to-even rounded).
pub fn get_closest_pt_on_segment(off_pt: Point64, seg1: Point64, seg2: Point64) -> Point64 {
    if seg1 == seg2 {
        return seg1;
    }
    let dx = (seg2.x - seg1.x) as f64;
    let dy = (seg2.y - seg1.y) as f64;
    let q = ((off_pt.x - seg1.x) as f64 * dx + (off_pt.y - seg1.y) as f64 * dy)
        / (dx * dx + dy * dy);
    let q = q.clamp(0.0, 1.0);
    Point64::new(
        (seg1.x as f64 + q * dx).round_ties_even() as i64,
        (seg1.y as f64 + q * dy).round_ties_even() as i64,
    )
}

/// Squared perpendicular distance from a point to the line through
/// `line1`/`line2`.
pub fn perpendic_dist_from_line_sqrd(pt: Point64, line1: Point64, line2: Point64) -> f64 {
    let a = (pt.x - line1.x) as f64;
    let b = (pt.y - line1.y) as f64;
    let c = (line2.x - line1.x) as f64;
    let d = (line2.y - line1.y) as f64;
    if c == 0.0 && d == 0.0 {
        return 0.0;
    }
    let e = a * d - c * b;
    e * e / (c * c + d * d)
}

/// Winding-independent point-in-polygon classification. Points exactly on
/// an edge or vertex always classify as IsOn, regardless of orientation or
/// traversal order.
pub fn point_in_polygon(pt: Point64, polygon: &Path64) -> PointInPolygonResult {
    let len = polygon.len();
    if len < 3 {
        return PointInPolygonResult::IsOutside;
    }

    let mut start = 0;
    while start < len && polygon[start].y == pt.y {
        start += 1;
    }
    if start == len {
        return PointInPolygonResult::IsOutside;
    }

    let mut is_above = polygon[start].y < pt.y;
    let starting_above = is_above;
    let mut val = 0u32;
    let mut i = start + 1;
    let mut end = len;

    loop {
        if i == end {
            if end == 0 || start == 0 {
                break;
            }
            end = start;
            i = 0;
        }

        if is_above {
            while i < end && polygon[i].y < pt.y {
                i += 1;
            }
        } else {
            while i < end && polygon[i].y > pt.y {
                i += 1;
            }
        }
        if i == end {
            continue;
        }

        let curr = polygon[i];
        let prev = if i > 0 { polygon[i - 1] } else { polygon[len - 1] };

        if curr.y == pt.y {
            if curr.x == pt.x || (curr.y == prev.y && ((pt.x < prev.x) != (pt.x < curr.x))) {
                return PointInPolygonResult::IsOn;
            }
            i += 1;
            if i == start {
                break;
            }
            continue;
        }

        if pt.x < curr.x && pt.x < prev.x {
            // the ray only counts edges crossing on its left
        } else if pt.x > prev.x && pt.x > curr.x {
            val = 1 - val;
        } else {
            let d = cross_sign(prev, curr, pt);
            if d == 0 {
                return PointInPolygonResult::IsOn;
            }
            if (d < 0) == is_above {
                val = 1 - val;
            }
        }
        is_above = !is_above;
        i += 1;
    }

    if is_above != starting_above {
        if i == len {
            i = 0;
        }
        let d = if i > 0 {
            cross_sign(polygon[i - 1], polygon[i], pt)
        } else {
            cross_sign(polygon[len - 1], polygon[0], pt)
        };
        if d == 0 {
            return PointInPolygonResult::IsOn;
        }
        if (d < 0) == is_above {
            val = 1 - val;
        }
    }

    if val == 0 {
        PointInPolygonResult::IsOutside
    } else {
        PointInPolygonResult::IsInside
    }
}

// ─────────────────────────────── Path utilities ────────────────────────────

/// Signed shoelace area. Positive for counter-clockwise paths in display
/// coordinates (Y down).
pub fn area(path: &Path64) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    let mut prev = path[path.len() - 1];
    for &pt in path {
        a += (prev.y + pt.y) as f64 * (prev.x - pt.x) as f64;
        prev = pt;
    }
    a * 0.5
}

pub fn area_paths(paths: &Paths64) -> f64 {
    paths.iter().map(area).sum()
}

#[inline]
pub fn is_positive(path: &Path64) -> bool {
    area(path) >= 0.0
}

pub fn reverse_path(path: &Path64) -> Path64 {
    path.iter().rev().copied().collect()
}

pub fn reverse_paths(paths: &Paths64) -> Paths64 {
    paths.iter().map(reverse_path).collect()
}

pub fn translate_path(path: &Path64, dx: i64, dy: i64) -> Path64 {
    path.iter().map(|pt| Point64::new(pt.x + dx, pt.y + dy)).collect()
}

/// Remove consecutive duplicate points; for closed paths also drop a
/// repeated closing point.
pub fn strip_duplicates(path: &Path64, is_closed: bool) -> Path64 {
    let mut result: Path64 = Vec::with_capacity(path.len());
    for &pt in path {
        if result.last() != Some(&pt) {
            result.push(pt);
        }
    }
    if is_closed {
        while result.len() > 1 && result.last() == result.first() {
            result.pop();
        }
    }
    result
}

pub fn bounds(path: &Path64) -> Rect64 {
    let mut rec = Rect64::invalid();
    for pt in path {
        if pt.x < rec.left {
            rec.left = pt.x;
        }
        if pt.x > rec.right {
            rec.right = pt.x;
        }
        if pt.y < rec.top {
            rec.top = pt.y;
        }
        if pt.y > rec.bottom {
            rec.bottom = pt.y;
        }
    }
    if rec.left == i64::MAX {
        Rect64::default()
    } else {
        rec
    }
}

pub fn bounds_paths(paths: &Paths64) -> Rect64 {
    let mut rec = Rect64::invalid();
    for path in paths {
        for pt in path {
            if pt.x < rec.left {
                rec.left = pt.x;
            }
            if pt.x > rec.right {
                rec.right = pt.x;
            }
            if pt.y < rec.top {
                rec.top = pt.y;
            }
            if pt.y > rec.bottom {
                rec.bottom = pt.y;
            }
        }
    }
    if rec.left == i64::MAX {
        Rect64::default()
    } else {
        rec
    }
}

/// Approximate a full ellipse. `steps == 0` picks a count from the radii.
pub fn ellipse(center: Point64, radius_x: f64, radius_y: f64, steps: usize) -> Path64 {
    if radius_x <= 0.0 {
        return Path64::new();
    }
    let radius_y = if radius_y <= 0.0 { radius_x } else { radius_y };
    let steps = if steps <= 2 {
        (std::f64::consts::PI * ((radius_x + radius_y) / 2.0).sqrt()).ceil() as usize
    } else {
        steps
    };
    let si = (2.0 * std::f64::consts::PI / steps as f64).sin();
    let co = (2.0 * std::f64::consts::PI / steps as f64).cos();
    let (mut dx, mut dy) = (co, si);
    let mut result = Path64::with_capacity(steps);
    result.push(Point64::new(checked_coord(center.x as f64 + radius_x), center.y));
    for _ in 1..steps {
        result.push(Point64::new(
            checked_coord(center.x as f64 + radius_x * dx),
            checked_coord(center.y as f64 + radius_y * dy),
        ));
        let x = dx * co - dy * si;
        dy = dx * si + dy * co;
        dx = x;
    }
    result
}

// ─────────────────────────────── Rounding & scaling ────────────────────────

/// Half-to-even rounded cast with the overflow sentinel.
#[inline]
pub fn checked_coord(v: f64) -> i64 {
    if v >= MAX_COORD_F || v <= MIN_COORD_F {
        INVALID64
    } else {
        v.round_ties_even() as i64
    }
}

pub fn scale_path_to_64(path: &PathD, scale: f64) -> Path64 {
    path.iter()
        .map(|pt| Point64::new(checked_coord(pt.x * scale), checked_coord(pt.y * scale)))
        .collect()
}

pub fn scale_paths_to_64(paths: &PathsD, scale: f64) -> Paths64 {
    paths.iter().map(|p| scale_path_to_64(p, scale)).collect()
}

pub fn scale_path_to_d(path: &Path64, scale: f64) -> PathD {
    path.iter()
        .map(|pt| PointD::new(pt.x as f64 * scale, pt.y as f64 * scale))
        .collect()
}

pub fn scale_paths_to_d(paths: &Paths64, scale: f64) -> PathsD {
    paths.iter().map(|p| scale_path_to_d(p, scale)).collect()
}

/// Build an integer path from a flat `[x0, y0, x1, y1, ...]` slice of any
/// numeric type (values are half-to-even rounded).
pub fn path64_from_flat<T: NumCast + Copy>(coords: &[T]) -> Path64 {
    coords
        .chunks_exact(2)
        .map(|c| {
            let x: f64 = NumCast::from(c[0]).unwrap_or(f64::NAN);
            let y: f64 = NumCast::from(c[1]).unwrap_or(f64::NAN);
            Point64::new(checked_coord(x), checked_coord(y))
        })
        .collect()
}

/// Build a decimal path from a flat coordinate slice.
pub fn pathd_from_flat<T: NumCast + Copy>(coords: &[T]) -> PathD {
    coords
        .chunks_exact(2)
        .map(|c| {
            let x: f64 = NumCast::from(c[0]).unwrap_or(f64::NAN);
            let y: f64 = NumCast::from(c[1]).unwrap_or(f64::NAN);
            PointD::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i64) -> Path64 {
        path64_from_flat(&[0i64, 0, size, 0, size, size, 0, size])
    }

    #[test]
    fn cross_sign_basic() {
        let a = Point64::new(0, 0);
        let b = Point64::new(10, 0);
        let c = Point64::new(10, 10);
        assert_eq!(cross_sign(a, b, c), 1);
        assert_eq!(cross_sign(c, b, a), -1);
        assert_eq!(cross_sign(a, b, Point64::new(20, 0)), 0);
    }

    #[test]
    fn cross_sign_near_max_coords() {
        // A sliver triangle at the edge of the safe range must not flip sign.
        let a = Point64::new(MIN_COORD, MIN_COORD);
        let b = Point64::new(MAX_COORD, MAX_COORD - 1);
        let c = Point64::new(MAX_COORD, MAX_COORD);
        assert_eq!(cross_sign(a, b, c), 1);
        assert_eq!(cross_sign(a, c, b), -1);
    }

    #[test]
    fn point_in_polygon_classifies() {
        let sq = square(10);
        assert_eq!(
            point_in_polygon(Point64::new(5, 5), &sq),
            PointInPolygonResult::IsInside
        );
        assert_eq!(
            point_in_polygon(Point64::new(15, 5), &sq),
            PointInPolygonResult::IsOutside
        );
        assert_eq!(
            point_in_polygon(Point64::new(0, 5), &sq),
            PointInPolygonResult::IsOn
        );
    }

    #[test]
    fn point_in_polygon_on_for_all_vertices_and_midpoints() {
        let tri = path64_from_flat(&[0i64, 0, 40, 0, 20, 30]);
        let n = tri.len();
        for i in 0..n {
            assert_eq!(point_in_polygon(tri[i], &tri), PointInPolygonResult::IsOn);
            let next = tri[(i + 1) % n];
            let mid = Point64::new((tri[i].x + next.x) / 2, (tri[i].y + next.y) / 2);
            assert_eq!(point_in_polygon(mid, &tri), PointInPolygonResult::IsOn);
        }
        // winding direction must not change the answer
        let rev = reverse_path(&tri);
        for i in 0..n {
            assert_eq!(point_in_polygon(tri[i], &rev), PointInPolygonResult::IsOn);
        }
    }

    #[test]
    fn segs_intersect_proper_crossing() {
        let a1 = Point64::new(0, 0);
        let a2 = Point64::new(10, 10);
        let b1 = Point64::new(0, 10);
        let b2 = Point64::new(10, 0);
        assert!(segs_intersect(a1, a2, b1, b2, false));
        // endpoint touch: only inclusive sees it
        let c2 = Point64::new(5, 5);
        assert!(!segs_intersect(a1, c2, b1, b2, false));
        assert!(segs_intersect(a1, c2, b1, b2, true));
    }

    #[test]
    fn intersect_point_truncates_toward_zero() {
        // crossing at (4.5, 4.5): truncation gives 4, not 5 (rounding would)
        let ip = get_intersect_point(
            Point64::new(0, 0),
            Point64::new(9, 9),
            Point64::new(0, 9),
            Point64::new(9, 0),
        )
        .unwrap();
        assert_eq!(ip, Point64::new(4, 4));
    }

    #[test]
    fn intersect_point_clamps_to_first_segment() {
        let a1 = Point64::new(0, 0);
        let a2 = Point64::new(10, 0);
        // lines meet beyond a2
        let ip = get_intersect_point(a1, a2, Point64::new(20, -5), Point64::new(20, 5)).unwrap();
        assert_eq!(ip, a2);
        assert_eq!(
            get_intersect_point(a1, a2, Point64::new(0, 5), Point64::new(10, 5)),
            None
        );
    }

    #[test]
    fn area_sign_follows_orientation() {
        let sq = square(10);
        assert_eq!(area(&sq), 100.0);
        assert_eq!(area(&reverse_path(&sq)), -100.0);
        assert_eq!(area(&sq[..2].to_vec()), 0.0);
    }

    #[test]
    fn strip_duplicates_closed() {
        let p = path64_from_flat(&[0i64, 0, 0, 0, 5, 0, 5, 5, 0, 0]);
        let s = strip_duplicates(&p, true);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], Point64::new(0, 0));
    }

    #[test]
    fn bounds_of_path() {
        let tri = path64_from_flat(&[-3i64, 2, 7, -1, 4, 9]);
        let b = bounds(&tri);
        assert_eq!(b, Rect64::new(-3, -1, 7, 9));
        assert!(bounds(&Path64::new()).is_empty());
    }

    #[test]
    fn ellipse_step_count() {
        let e = ellipse(Point64::new(0, 0), 100.0, 0.0, 16);
        assert_eq!(e.len(), 16);
        assert_eq!(e[0], Point64::new(100, 0));
        for pt in &e {
            let r = ((pt.x * pt.x + pt.y * pt.y) as f64).sqrt();
            assert!((r - 100.0).abs() < 1.5, "radius {}", r);
        }
    }

    #[test]
    fn checked_coord_sentinel() {
        assert_eq!(checked_coord(2.5), 2); // half-to-even
        assert_eq!(checked_coord(3.5), 4);
        assert_eq!(checked_coord(1e40), INVALID64);
        assert_eq!(checked_coord(-1e40), INVALID64);
    }
}
