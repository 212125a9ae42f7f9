// Copyright 2025 Lars Brubaker
// License: MIT
//
// Rectangle-only clipping, far cheaper than the full sweep for this one
// shape. Path vertices are classified against the rectangle's four edge
// zones; walking the path inserts rectangle corners whenever the zone
// jumps across non-adjacent regions and exact crossing points where the
// boundary is crossed. Because a path may touch the same rectangle edge
// many times, a final edge-pairing pass stitches or splits the collected
// fragments so the output rings stay simple.
//
// Output fragments are circular rings of OutPt2 nodes in an arena, linked
// by u32 indices (INVALID is the null link); `results` holds the last
// node of each fragment, and the eight `edge_lists` hold nodes lying on
// each rect edge, split by traversal direction (cw/ccw per edge).

use crate::error::ClipError;
use crate::geom::{
    bounds, checked_coord, cross_sign, get_intersect_point, point_in_polygon, scale_paths_to_64,
    scale_paths_to_d, segs_intersect, Path64, Paths64, PathsD, Point64, PointInPolygonResult,
    Rect64, RectD,
};
use crate::ops::check_precision;
use crate::vertex::INVALID;

type Op2Idx = u32;

const NO_EDGE: u8 = u8::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Location {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    Inside = 4,
}

impl Location {
    #[inline]
    fn idx(self) -> usize {
        self as usize
    }

    fn from_idx(i: usize) -> Location {
        match i & 3 {
            0 => Location::Left,
            1 => Location::Top,
            2 => Location::Right,
            _ => Location::Bottom,
        }
    }

    /// The neighbouring boundary zone, walking the rect clockwise or not.
    fn adjacent(self, is_clockwise: bool) -> Location {
        let delta = if is_clockwise { 1 } else { 3 };
        Location::from_idx(self.idx() + delta)
    }
}

#[inline]
fn heading_clockwise(prev: Location, curr: Location) -> bool {
    (prev.idx() + 1) % 4 == curr.idx()
}

#[inline]
fn are_opposites(prev: Location, curr: Location) -> bool {
    (prev.idx() as i32 - curr.idx() as i32).abs() == 2
}

fn get_location(rec: &Rect64, pt: Point64) -> (bool, Location) {
    // the bool is false when pt sits exactly on a rect edge
    if pt.x == rec.left && pt.y >= rec.top && pt.y <= rec.bottom {
        return (false, Location::Left);
    }
    if pt.x == rec.right && pt.y >= rec.top && pt.y <= rec.bottom {
        return (false, Location::Right);
    }
    if pt.y == rec.top && pt.x >= rec.left && pt.x <= rec.right {
        return (false, Location::Top);
    }
    if pt.y == rec.bottom && pt.x >= rec.left && pt.x <= rec.right {
        return (false, Location::Bottom);
    }
    let loc = if pt.x < rec.left {
        Location::Left
    } else if pt.x > rec.right {
        Location::Right
    } else if pt.y < rec.top {
        Location::Top
    } else if pt.y > rec.bottom {
        Location::Bottom
    } else {
        Location::Inside
    };
    (true, loc)
}

struct OutPt2 {
    pt: Point64,
    next: Op2Idx,
    prev: Op2Idx,
    owner_idx: u32,
    edge: u8, // which of the eight edge lists holds this node
}

/// Clips closed paths against one axis-aligned rectangle.
pub struct RectClip64 {
    rect: Rect64,
    mp: Point64,
    rect_path: Path64,
    path_bounds: Rect64,
    ops: Vec<OutPt2>,
    results: Vec<Op2Idx>,
    edge_lists: [Vec<Op2Idx>; 8],
}

impl RectClip64 {
    pub fn new(rect: Rect64) -> Self {
        RectClip64 {
            rect,
            mp: rect.mid_point(),
            rect_path: rect.as_path(),
            path_bounds: Rect64::default(),
            ops: Vec::new(),
            results: Vec::new(),
            edge_lists: Default::default(),
        }
    }

    /// Clip every closed path in `paths` to the rectangle.
    pub fn execute(&mut self, paths: &Paths64) -> Paths64 {
        let mut result = Paths64::new();
        if self.rect.is_empty() {
            return result;
        }
        for path in paths {
            if path.len() < 3 {
                continue;
            }
            self.path_bounds = bounds(path);
            if !self.rect.intersects(&self.path_bounds) {
                continue; // the path lies entirely outside
            }
            if self.rect.contains_rect(&self.path_bounds) {
                result.push(path.clone()); // entirely inside, unchanged
                continue;
            }
            self.execute_internal(path);
            self.check_edges();
            for i in 0..4 {
                self.tidy_edge_pair(i);
            }
            for r in 0..self.results.len() {
                let op = self.results[r];
                let tmp = self.get_path_closed(op);
                if !tmp.is_empty() {
                    result.push(tmp);
                }
            }
            self.clear_state();
        }
        result
    }

    fn clear_state(&mut self) {
        self.ops.clear();
        self.results.clear();
        for e in self.edge_lists.iter_mut() {
            e.clear();
        }
    }

    // ─────── Fragment assembly ────────────────────────────────────────────

    fn new_op(&mut self, pt: Point64) -> Op2Idx {
        let idx = self.ops.len() as Op2Idx;
        self.ops.push(OutPt2 {
            pt,
            next: idx,
            prev: idx,
            owner_idx: 0,
            edge: NO_EDGE,
        });
        idx
    }

    fn add(&mut self, pt: Point64) {
        self.add_op(pt, false);
    }

    fn add_op(&mut self, pt: Point64, starting_new_path: bool) {
        let curr_idx = self.results.len();
        if curr_idx == 0 || starting_new_path {
            let op = self.new_op(pt);
            self.ops[op as usize].owner_idx = curr_idx as u32;
            self.results.push(op);
            return;
        }
        let curr_idx = curr_idx - 1;
        let prev_op = self.results[curr_idx];
        if prev_op != INVALID && self.ops[prev_op as usize].pt == pt {
            return;
        }
        let op = self.new_op(pt);
        self.ops[op as usize].owner_idx = curr_idx as u32;
        if prev_op == INVALID {
            self.results[curr_idx] = op;
            return;
        }
        let next = self.ops[prev_op as usize].next;
        self.ops[op as usize].next = next;
        self.ops[next as usize].prev = op;
        self.ops[op as usize].prev = prev_op;
        self.ops[prev_op as usize].next = op;
        self.results[curr_idx] = op;
    }

    fn add_corner(&mut self, prev: Location, curr: Location) {
        let pt = if heading_clockwise(prev, curr) {
            self.rect_path[prev.idx()]
        } else {
            self.rect_path[curr.idx()]
        };
        self.add(pt);
    }

    fn add_corner_adjacent(&mut self, loc: &mut Location, is_clockwise: bool) {
        if is_clockwise {
            self.add(self.rect_path[loc.idx()]);
            *loc = loc.adjacent(true);
        } else {
            *loc = loc.adjacent(false);
            self.add(self.rect_path[loc.idx()]);
        }
    }

    fn is_clockwise(
        &self,
        prev: Location,
        curr: Location,
        prev_pt: Point64,
        curr_pt: Point64,
    ) -> bool {
        if are_opposites(prev, curr) {
            cross_sign(prev_pt, self.mp, curr_pt) < 0
        } else {
            heading_clockwise(prev, curr)
        }
    }

    // ─────── Boundary crossing ────────────────────────────────────────────

    /// Crossing point of segment p→p2 with the rect boundary nearest `p`,
    /// searching from zone `loc` (updated when the crossing lands on a
    /// different edge). Returns None when the segment stays outside.
    fn get_intersection(
        &self,
        p: Point64,
        p2: Point64,
        loc: &mut Location,
    ) -> Option<Point64> {
        let rp = &self.rect_path;
        let ip;
        match *loc {
            Location::Left => {
                if segs_intersect(p, p2, rp[0], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[3]);
                } else if p.y < rp[0].y && segs_intersect(p, p2, rp[0], rp[1], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[1]);
                    *loc = Location::Top;
                } else if segs_intersect(p, p2, rp[2], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[2], rp[3]);
                    *loc = Location::Bottom;
                } else {
                    return None;
                }
            }
            Location::Right => {
                if segs_intersect(p, p2, rp[1], rp[2], true) {
                    ip = get_intersect_point(p, p2, rp[1], rp[2]);
                } else if p.y < rp[0].y && segs_intersect(p, p2, rp[0], rp[1], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[1]);
                    *loc = Location::Top;
                } else if segs_intersect(p, p2, rp[2], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[2], rp[3]);
                    *loc = Location::Bottom;
                } else {
                    return None;
                }
            }
            Location::Top => {
                if segs_intersect(p, p2, rp[0], rp[1], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[1]);
                } else if p.x < rp[0].x && segs_intersect(p, p2, rp[0], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[3]);
                    *loc = Location::Left;
                } else if p.x > rp[1].x && segs_intersect(p, p2, rp[1], rp[2], true) {
                    ip = get_intersect_point(p, p2, rp[1], rp[2]);
                    *loc = Location::Right;
                } else {
                    return None;
                }
            }
            Location::Bottom => {
                if segs_intersect(p, p2, rp[2], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[2], rp[3]);
                } else if p.x < rp[3].x && segs_intersect(p, p2, rp[0], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[3]);
                    *loc = Location::Left;
                } else if p.x > rp[2].x && segs_intersect(p, p2, rp[1], rp[2], true) {
                    ip = get_intersect_point(p, p2, rp[1], rp[2]);
                    *loc = Location::Right;
                } else {
                    return None;
                }
            }
            Location::Inside => {
                if segs_intersect(p, p2, rp[0], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[3]);
                    *loc = Location::Left;
                } else if segs_intersect(p, p2, rp[0], rp[1], true) {
                    ip = get_intersect_point(p, p2, rp[0], rp[1]);
                    *loc = Location::Top;
                } else if segs_intersect(p, p2, rp[1], rp[2], true) {
                    ip = get_intersect_point(p, p2, rp[1], rp[2]);
                    *loc = Location::Right;
                } else if segs_intersect(p, p2, rp[2], rp[3], true) {
                    ip = get_intersect_point(p, p2, rp[2], rp[3]);
                    *loc = Location::Bottom;
                } else {
                    return None;
                }
            }
        }
        Some(ip.unwrap_or(p))
    }

    fn get_next_location(&mut self, path: &Path64, loc: &mut Location, i: &mut usize, high_i: usize) {
        match *loc {
            Location::Left => {
                while *i <= high_i && path[*i].x <= self.rect.left {
                    *i += 1;
                }
                if *i > high_i {
                    return;
                }
                *loc = if path[*i].x >= self.rect.right {
                    Location::Right
                } else if path[*i].y <= self.rect.top {
                    Location::Top
                } else if path[*i].y >= self.rect.bottom {
                    Location::Bottom
                } else {
                    Location::Inside
                };
            }
            Location::Top => {
                while *i <= high_i && path[*i].y <= self.rect.top {
                    *i += 1;
                }
                if *i > high_i {
                    return;
                }
                *loc = if path[*i].y >= self.rect.bottom {
                    Location::Bottom
                } else if path[*i].x <= self.rect.left {
                    Location::Left
                } else if path[*i].x >= self.rect.right {
                    Location::Right
                } else {
                    Location::Inside
                };
            }
            Location::Right => {
                while *i <= high_i && path[*i].x >= self.rect.right {
                    *i += 1;
                }
                if *i > high_i {
                    return;
                }
                *loc = if path[*i].x <= self.rect.left {
                    Location::Left
                } else if path[*i].y <= self.rect.top {
                    Location::Top
                } else if path[*i].y >= self.rect.bottom {
                    Location::Bottom
                } else {
                    Location::Inside
                };
            }
            Location::Bottom => {
                while *i <= high_i && path[*i].y >= self.rect.bottom {
                    *i += 1;
                }
                if *i > high_i {
                    return;
                }
                *loc = if path[*i].y <= self.rect.top {
                    Location::Top
                } else if path[*i].x <= self.rect.left {
                    Location::Left
                } else if path[*i].x >= self.rect.right {
                    Location::Right
                } else {
                    Location::Inside
                };
            }
            Location::Inside => {
                while *i <= high_i {
                    if path[*i].x < self.rect.left {
                        *loc = Location::Left;
                    } else if path[*i].x > self.rect.right {
                        *loc = Location::Right;
                    } else if path[*i].y > self.rect.bottom {
                        *loc = Location::Bottom;
                    } else if path[*i].y < self.rect.top {
                        *loc = Location::Top;
                    } else {
                        self.add(path[*i]);
                        *i += 1;
                        continue;
                    }
                    break;
                }
            }
        }
    }

    // ─────── Closed-path walk ─────────────────────────────────────────────

    fn execute_internal(&mut self, path: &Path64) {
        let high_i = path.len() - 1;
        let mut start_locs: Vec<Location> = Vec::new();
        let mut crossing_loc = Location::Inside;
        let mut first_cross = Location::Inside;

        let (mut i, mut loc);
        let (on_edge, loc0) = get_location(&self.rect, path[high_i]);
        loc = loc0;
        if !on_edge {
            let mut prev = Location::Inside;
            let mut k = high_i as i64 - 1;
            while k >= 0 {
                let (ok, pl) = get_location(&self.rect, path[k as usize]);
                if ok {
                    prev = pl;
                    break;
                }
                k -= 1;
            }
            if k < 0 {
                // every vertex lies on the rect boundary
                for &pt in path {
                    self.add(pt);
                }
                return;
            }
            if prev == Location::Inside {
                loc = Location::Inside;
            }
        }
        let starting_loc = loc;
        i = 0;

        while i <= high_i {
            let prev_loc_before = loc;
            let prev_cross_loc = crossing_loc;
            self.get_next_location(path, &mut loc, &mut i, high_i);
            if i > high_i {
                break;
            }
            let mut prev = prev_loc_before;

            let prev_pt = if i == 0 { path[high_i] } else { path[i - 1] };
            crossing_loc = loc;

            let ip = match self.get_intersection(path[i], prev_pt, &mut crossing_loc) {
                Some(ip) => ip,
                None => {
                    // still outside: emit the corners the path walked past
                    if prev_cross_loc == Location::Inside {
                        let is_clockw = self.is_clockwise(prev, loc, prev_pt, path[i]);
                        loop {
                            start_locs.push(prev);
                            prev = prev.adjacent(is_clockw);
                            if prev == loc {
                                break;
                            }
                        }
                        crossing_loc = prev_cross_loc; // still not crossed
                    } else if prev != Location::Inside && prev != loc {
                        let is_clockw = self.is_clockwise(prev, loc, prev_pt, path[i]);
                        loop {
                            self.add_corner_adjacent(&mut prev, is_clockw);
                            if prev == loc {
                                break;
                            }
                        }
                    }
                    i += 1;
                    continue;
                }
            };

            // we must be crossing the rect boundary to get here
            if loc == Location::Inside {
                // the path is entering the rect
                if first_cross == Location::Inside {
                    first_cross = crossing_loc;
                    start_locs.push(prev);
                } else if prev != crossing_loc {
                    let is_clockw = self.is_clockwise(prev, crossing_loc, prev_pt, path[i]);
                    loop {
                        self.add_corner_adjacent(&mut prev, is_clockw);
                        if prev == crossing_loc {
                            break;
                        }
                    }
                }
            } else if prev != Location::Inside {
                // the path is passing right through: ip is the second
                // crossing but the first one (ip2) is needed too
                let mut loc2 = prev;
                let ip2 = self
                    .get_intersection(prev_pt, path[i], &mut loc2)
                    .unwrap_or(prev_pt);
                if prev_cross_loc != Location::Inside && prev_cross_loc != loc2 {
                    self.add_corner(prev_cross_loc, loc2);
                }
                if first_cross == Location::Inside {
                    first_cross = loc2;
                    start_locs.push(prev);
                }
                loc = crossing_loc;
                self.add(ip2);
                if ip == ip2 {
                    // path[i] is most likely sitting on the rect edge
                    let (_, loc3) = get_location(&self.rect, path[i]);
                    self.add_corner(crossing_loc, loc3);
                    crossing_loc = loc3;
                    loc = loc3;
                    continue;
                }
            } else {
                // the path is exiting the rect
                loc = crossing_loc;
                if first_cross == Location::Inside {
                    first_cross = crossing_loc;
                }
            }

            self.add(ip);
        }

        if first_cross == Location::Inside {
            // the path never crossed the boundary
            if starting_loc != Location::Inside {
                // an outside path can still surround the whole rect
                if self.path_bounds.contains_rect(&self.rect)
                    && path_contains_rect(path, &self.rect_path)
                {
                    for j in 0..4 {
                        self.add(self.rect_path[j]);
                        let op = self.results[0];
                        self.add_to_edge(j * 2, op);
                    }
                }
            }
        } else if loc != Location::Inside && (loc != first_cross || start_locs.len() > 2) {
            if !start_locs.is_empty() {
                let mut prev = loc;
                for k in 0..start_locs.len() {
                    let loc2 = start_locs[k];
                    if prev == loc2 {
                        continue;
                    }
                    let cw = heading_clockwise(prev, loc2);
                    self.add_corner_adjacent(&mut prev, cw);
                    prev = loc2;
                }
                loc = prev;
            }
            if loc != first_cross {
                let cw = heading_clockwise(loc, first_cross);
                self.add_corner_adjacent(&mut loc, cw);
            }
        }
    }

    // ─────── Edge bookkeeping & the pairing pass ──────────────────────────

    fn add_to_edge(&mut self, edge_idx: usize, op: Op2Idx) {
        if op == INVALID || self.ops[op as usize].edge != NO_EDGE {
            return;
        }
        self.ops[op as usize].edge = edge_idx as u8;
        self.edge_lists[edge_idx].push(op);
    }

    fn uncouple_edge(&mut self, op: Op2Idx) {
        let e = self.ops[op as usize].edge;
        if e == NO_EDGE {
            return;
        }
        let list = &mut self.edge_lists[e as usize];
        for slot in list.iter_mut() {
            if *slot == op {
                *slot = INVALID;
                break;
            }
        }
        self.ops[op as usize].edge = NO_EDGE;
    }

    fn set_new_owner(&mut self, op: Op2Idx, new_idx: u32) {
        self.ops[op as usize].owner_idx = new_idx;
        let mut op2 = self.ops[op as usize].next;
        while op2 != op {
            self.ops[op2 as usize].owner_idx = new_idx;
            op2 = self.ops[op2 as usize].next;
        }
    }

    /// Remove `op` from its ring; returns the previous node, or INVALID
    /// when the ring is spent.
    fn unlink_op_back(&mut self, op: Op2Idx) -> Op2Idx {
        if self.ops[op as usize].next == op {
            return INVALID;
        }
        let next = self.ops[op as usize].next;
        let prev = self.ops[op as usize].prev;
        self.ops[prev as usize].next = next;
        self.ops[next as usize].prev = prev;
        prev
    }

    fn unlink_op(&mut self, op: Op2Idx) -> Op2Idx {
        if self.ops[op as usize].next == op {
            return INVALID;
        }
        let next = self.ops[op as usize].next;
        let prev = self.ops[op as usize].prev;
        self.ops[prev as usize].next = next;
        self.ops[next as usize].prev = prev;
        next
    }

    fn get_edges_for_pt(&self, pt: Point64) -> u32 {
        let mut result = 0u32;
        if pt.x == self.rect.left {
            result = 1;
        } else if pt.x == self.rect.right {
            result = 4;
        }
        if pt.y == self.rect.top {
            result += 2;
        } else if pt.y == self.rect.bottom {
            result += 8;
        }
        result
    }

    fn is_heading_clockwise_on_edge(pt1: Point64, pt2: Point64, edge_idx: usize) -> bool {
        match edge_idx {
            0 => pt2.y < pt1.y,
            1 => pt2.x > pt1.x,
            2 => pt2.y > pt1.y,
            _ => pt2.x < pt1.x,
        }
    }

    /// Drop collinear run-ons and register every boundary-touching node
    /// with the edge lists it sits on.
    fn check_edges(&mut self) {
        for i in 0..self.results.len() {
            let mut op = self.results[i];
            if op == INVALID {
                continue;
            }
            let mut op2 = op;
            loop {
                let prev = self.ops[op2 as usize].prev;
                let next = self.ops[op2 as usize].next;
                if cross_sign(
                    self.ops[prev as usize].pt,
                    self.ops[op2 as usize].pt,
                    self.ops[next as usize].pt,
                ) == 0
                {
                    if op2 == op {
                        op2 = self.unlink_op_back(op2);
                        if op2 == INVALID {
                            break;
                        }
                        op = self.ops[op2 as usize].prev;
                    } else {
                        op2 = self.unlink_op_back(op2);
                        if op2 == INVALID {
                            break;
                        }
                    }
                } else {
                    op2 = self.ops[op2 as usize].next;
                }
                if op2 == op {
                    break;
                }
            }
            if op2 == INVALID {
                self.results[i] = INVALID;
                continue;
            }
            self.results[i] = op2;

            let mut edge_set1 = self.get_edges_for_pt(self.ops[self.ops[op as usize].prev as usize].pt);
            op2 = op;
            loop {
                let edge_set2 = self.get_edges_for_pt(self.ops[op2 as usize].pt);
                if edge_set2 != 0 && self.ops[op2 as usize].edge == NO_EDGE {
                    let combined = edge_set1 & edge_set2;
                    for j in 0..4 {
                        if combined & (1 << j) == 0 {
                            continue;
                        }
                        let prev_pt = self.ops[self.ops[op2 as usize].prev as usize].pt;
                        let pt = self.ops[op2 as usize].pt;
                        if Self::is_heading_clockwise_on_edge(prev_pt, pt, j) {
                            self.add_to_edge(j * 2, op2);
                        } else {
                            self.add_to_edge(j * 2 + 1, op2);
                        }
                    }
                }
                edge_set1 = edge_set2;
                op2 = self.ops[op2 as usize].next;
                if op2 == op {
                    break;
                }
            }
        }
    }

    fn has_horz_overlap(left1: Point64, right1: Point64, left2: Point64, right2: Point64) -> bool {
        left1.x < right2.x && right1.x > left2.x
    }

    fn has_vert_overlap(top1: Point64, bottom1: Point64, top2: Point64, bottom2: Point64) -> bool {
        top1.y < bottom2.y && bottom1.y > top2.y
    }

    /// Stitch or split fragments that run along one rect edge in both
    /// directions. Overlapping opposite-direction runs mean either two
    /// fragments rejoining or one fragment pinching apart.
    fn tidy_edge_pair(&mut self, idx: usize) {
        if self.edge_lists[idx * 2 + 1].is_empty() {
            return;
        }
        let is_horz = idx == 1 || idx == 3;
        let cw_is_toward_larger = idx == 1 || idx == 2;
        let cw_list = idx * 2;
        let ccw_list = idx * 2 + 1;
        let mut i = 0;
        let mut j = 0;

        while i < self.edge_lists[cw_list].len() {
            let p1_head = self.edge_lists[cw_list][i];
            if p1_head == INVALID || self.ops[p1_head as usize].next == self.ops[p1_head as usize].prev
            {
                self.edge_lists[cw_list][i] = INVALID;
                i += 1;
                j = 0;
                continue;
            }

            let j_lim = self.edge_lists[ccw_list].len();
            while j < j_lim {
                let c = self.edge_lists[ccw_list][j];
                if c != INVALID && self.ops[c as usize].next != self.ops[c as usize].prev {
                    break;
                }
                j += 1;
            }
            if j == j_lim {
                i += 1;
                j = 0;
                continue;
            }

            let cw_head = self.edge_lists[cw_list][i];
            let ccw_head = self.edge_lists[ccw_list][j];
            let (p1, p1a, p2, p2a);
            if cw_is_toward_larger {
                // p1 →→ p1a and p2 ←← p2a
                p1 = self.ops[cw_head as usize].prev;
                p1a = cw_head;
                p2 = ccw_head;
                p2a = self.ops[ccw_head as usize].prev;
            } else {
                // p1 ←← p1a and p2 →→ p2a
                p1 = cw_head;
                p1a = self.ops[cw_head as usize].prev;
                p2 = self.ops[ccw_head as usize].prev;
                p2a = ccw_head;
            }
            let (p1_pt, p1a_pt) = (self.ops[p1 as usize].pt, self.ops[p1a as usize].pt);
            let (p2_pt, p2a_pt) = (self.ops[p2 as usize].pt, self.ops[p2a as usize].pt);

            if (is_horz && !Self::has_horz_overlap(p1_pt, p1a_pt, p2_pt, p2a_pt))
                || (!is_horz && !Self::has_vert_overlap(p1_pt, p1a_pt, p2_pt, p2a_pt))
            {
                j += 1;
                continue;
            }

            // either splitting one fragment or rejoining two
            let is_rejoining =
                self.ops[cw_head as usize].owner_idx != self.ops[ccw_head as usize].owner_idx;
            if is_rejoining {
                let p2_owner = self.ops[p2 as usize].owner_idx;
                self.results[p2_owner as usize] = INVALID;
                let p1_owner = self.ops[p1 as usize].owner_idx;
                self.set_new_owner(p2, p1_owner);
            }

            // swap the connections
            if cw_is_toward_larger {
                // p1 → | → p1a
                // p2 ← | ← p2a
                self.ops[p1 as usize].next = p2;
                self.ops[p2 as usize].prev = p1;
                self.ops[p1a as usize].prev = p2a;
                self.ops[p2a as usize].next = p1a;
            } else {
                self.ops[p1 as usize].prev = p2;
                self.ops[p2 as usize].next = p1;
                self.ops[p1a as usize].next = p2a;
                self.ops[p2a as usize].prev = p1a;
            }

            if !is_rejoining {
                let new_idx = self.results.len() as u32;
                self.results.push(p1a);
                self.set_new_owner(p1a, new_idx);
            }

            let (op, op2) = if cw_is_toward_larger { (p2, p1a) } else { (p1, p2a) };
            let op_owner = self.ops[op as usize].owner_idx;
            let op2_owner = self.ops[op2 as usize].owner_idx;
            self.results[op_owner as usize] = op;
            self.results[op2_owner as usize] = op2;

            // and now lots of work to get ready for the next loop
            let (op_is_larger, op2_is_larger);
            if is_horz {
                op_is_larger =
                    self.ops[op as usize].pt.x > self.ops[self.ops[op as usize].prev as usize].pt.x;
                op2_is_larger = self.ops[op2 as usize].pt.x
                    > self.ops[self.ops[op2 as usize].prev as usize].pt.x;
            } else {
                op_is_larger =
                    self.ops[op as usize].pt.y > self.ops[self.ops[op as usize].prev as usize].pt.y;
                op2_is_larger = self.ops[op2 as usize].pt.y
                    > self.ops[self.ops[op2 as usize].prev as usize].pt.y;
            }

            let op_spent = self.ops[op as usize].next == self.ops[op as usize].prev
                || self.ops[op as usize].pt == self.ops[self.ops[op as usize].prev as usize].pt;
            let op2_spent = self.ops[op2 as usize].next == self.ops[op2 as usize].prev
                || self.ops[op2 as usize].pt == self.ops[self.ops[op2 as usize].prev as usize].pt;

            if op_spent {
                if op2_is_larger == cw_is_toward_larger {
                    self.edge_lists[cw_list][i] = op2;
                    self.edge_lists[ccw_list][j] = INVALID;
                    j += 1;
                } else {
                    self.edge_lists[ccw_list][j] = op2;
                    self.edge_lists[cw_list][i] = INVALID;
                    i += 1;
                }
            } else if op2_spent {
                if op_is_larger == cw_is_toward_larger {
                    self.edge_lists[cw_list][i] = op;
                    self.edge_lists[ccw_list][j] = INVALID;
                    j += 1;
                } else {
                    self.edge_lists[ccw_list][j] = op;
                    self.edge_lists[cw_list][i] = INVALID;
                    i += 1;
                }
            } else if op_is_larger == op2_is_larger {
                if op_is_larger == cw_is_toward_larger {
                    self.edge_lists[cw_list][i] = op;
                    self.uncouple_edge(op2);
                    self.add_to_edge(cw_list, op2);
                    self.edge_lists[ccw_list][j] = INVALID;
                    j += 1;
                } else {
                    self.edge_lists[ccw_list][j] = op;
                    self.uncouple_edge(op2);
                    self.add_to_edge(ccw_list, op2);
                    self.edge_lists[cw_list][i] = INVALID;
                    i += 1;
                }
            } else {
                if op_is_larger == cw_is_toward_larger {
                    self.edge_lists[cw_list][i] = op;
                } else {
                    self.edge_lists[ccw_list][j] = op;
                }
                if op2_is_larger == cw_is_toward_larger {
                    self.edge_lists[cw_list][i] = op2;
                } else {
                    self.edge_lists[ccw_list][j] = op2;
                }
            }
        }
    }

    // ─────── Output ───────────────────────────────────────────────────────

    fn get_path_closed(&mut self, op: Op2Idx) -> Path64 {
        let mut result = Path64::new();
        if op == INVALID || self.ops[op as usize].prev == self.ops[op as usize].next {
            return result;
        }
        let mut op = op;
        let mut op2 = self.ops[op as usize].next;
        while op2 != INVALID && op2 != op {
            let prev = self.ops[op2 as usize].prev;
            let next = self.ops[op2 as usize].next;
            if cross_sign(
                self.ops[prev as usize].pt,
                self.ops[op2 as usize].pt,
                self.ops[next as usize].pt,
            ) == 0
            {
                op = prev;
                op2 = self.unlink_op(op2);
            } else {
                op2 = self.ops[op2 as usize].next;
            }
        }
        if op2 == INVALID {
            return Path64::new();
        }
        result.push(self.ops[op as usize].pt);
        let mut op2 = self.ops[op as usize].next;
        while op2 != op {
            result.push(self.ops[op2 as usize].pt);
            op2 = self.ops[op2 as usize].next;
        }
        result
    }

    fn get_path_open(&self, op: Op2Idx) -> Path64 {
        let mut result = Path64::new();
        if op == INVALID || self.ops[op as usize].prev == self.ops[op as usize].next {
            return result;
        }
        let start = self.ops[op as usize].next; // the fragment's first point
        result.push(self.ops[start as usize].pt);
        let mut op2 = self.ops[start as usize].next;
        while op2 != start {
            result.push(self.ops[op2 as usize].pt);
            op2 = self.ops[op2 as usize].next;
        }
        result
    }

    // ─────── Open-polyline walk ───────────────────────────────────────────

    fn execute_lines_internal(&mut self, path: &Path64) {
        let high_i = path.len() - 1;
        let (mut i, mut loc);
        let (on_edge, loc0) = get_location(&self.rect, path[0]);
        loc = loc0;
        i = 1;
        if !on_edge {
            let mut prev = Location::Inside;
            let mut k = 1;
            while k <= high_i {
                let (ok, pl) = get_location(&self.rect, path[k]);
                if ok {
                    prev = pl;
                    break;
                }
                k += 1;
            }
            if k > high_i {
                // the entire polyline runs along the rect boundary
                for &pt in path {
                    self.add(pt);
                }
                return;
            }
            if prev == Location::Inside {
                loc = Location::Inside;
            }
            i = 1;
        }
        if loc == Location::Inside {
            self.add(path[0]);
        }

        while i <= high_i {
            let prev = loc;
            self.get_next_location(path, &mut loc, &mut i, high_i);
            if i > high_i {
                break;
            }
            let prev_pt = path[i - 1];
            let mut crossing_loc = loc;
            let ip = match self.get_intersection(path[i], prev_pt, &mut crossing_loc) {
                Some(ip) => ip,
                None => {
                    i += 1;
                    continue;
                }
            };

            if loc == Location::Inside {
                // entering: start a fresh fragment
                self.add_op(ip, true);
            } else if prev != Location::Inside {
                // passing right through
                let mut loc2 = prev;
                let ip2 = self
                    .get_intersection(prev_pt, path[i], &mut loc2)
                    .unwrap_or(prev_pt);
                self.add_op(ip2, true);
                self.add(ip);
            } else {
                // exiting
                self.add(ip);
            }
        }
    }
}

fn path_contains_rect(path: &Path64, rect_path: &Path64) -> bool {
    // rounding can leave corner samples on the boundary; vote the corners
    let mut io_count = 0;
    for &pt in rect_path {
        match point_in_polygon(pt, path) {
            PointInPolygonResult::IsInside => io_count -= 1,
            PointInPolygonResult::IsOutside => io_count += 1,
            PointInPolygonResult::IsOn => {}
        }
    }
    io_count <= 0
}

/// Clips open polylines against one axis-aligned rectangle: no corner
/// insertion and no ring closure, just trimmed fragments.
pub struct RectClipLines64 {
    inner: RectClip64,
}

impl RectClipLines64 {
    pub fn new(rect: Rect64) -> Self {
        RectClipLines64 { inner: RectClip64::new(rect) }
    }

    pub fn execute(&mut self, paths: &Paths64) -> Paths64 {
        let mut result = Paths64::new();
        if self.inner.rect.is_empty() {
            return result;
        }
        for path in paths {
            if path.len() < 2 {
                continue;
            }
            self.inner.path_bounds = bounds(path);
            if !self.inner.rect.intersects(&self.inner.path_bounds) {
                continue;
            }
            self.inner.execute_lines_internal(path);
            for r in 0..self.inner.results.len() {
                let op = self.inner.results[r];
                let tmp = self.inner.get_path_open(op);
                if !tmp.is_empty() {
                    result.push(tmp);
                }
            }
            self.inner.clear_state();
        }
        result
    }
}

// ─────────────────────────────── Convenience ───────────────────────────────

/// Clip closed paths to `rect`. Fails fast on an inverted/empty rect.
pub fn rect_clip(rect: Rect64, paths: &Paths64) -> Result<Paths64, ClipError> {
    if rect.is_empty() {
        return Err(ClipError::InvalidRect);
    }
    let solution = RectClip64::new(rect).execute(paths);
    log::debug!("rect clip kept {} of {} paths", solution.len(), paths.len());
    Ok(solution)
}

/// Clip open polylines to `rect`.
pub fn rect_clip_lines(rect: Rect64, paths: &Paths64) -> Result<Paths64, ClipError> {
    if rect.is_empty() {
        return Err(ClipError::InvalidRect);
    }
    Ok(RectClipLines64::new(rect).execute(paths))
}

/// Decimal-scaled variant of `rect_clip`.
pub fn rect_clip_d(rect: RectD, paths: &PathsD, precision: i32) -> Result<PathsD, ClipError> {
    check_precision(precision)?;
    if rect.is_empty() {
        return Err(ClipError::InvalidRect);
    }
    let scale = 10f64.powi(precision);
    let scaled_rect = Rect64::new(
        checked_coord(rect.left * scale),
        checked_coord(rect.top * scale),
        checked_coord(rect.right * scale),
        checked_coord(rect.bottom * scale),
    );
    let paths64 = scale_paths_to_64(paths, scale);
    let solution = RectClip64::new(scaled_rect).execute(&paths64);
    Ok(scale_paths_to_d(&solution, 1.0 / scale))
}
