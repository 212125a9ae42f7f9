// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output stage of the sweep: ring cleanup (collinear stripping, degenerate
// triangle rejection, self-intersection splitting) and conversion of the
// OutPt rings into plain paths or the owner-validated polytree.

use crate::geom::{
    bounds, cross_sign, dot_sign, get_intersect_point, point_in_polygon, segs_intersect, Path64,
    Paths64, Point64, PointInPolygonResult,
};
use crate::polytree::{PolyTree64, ROOT};
use crate::vertex::INVALID;

use super::{Clipper64, OutPtIdx, OutRecIdx};

impl Clipper64 {
    // ─────── Ring measurement ─────────────────────────────────────────────

    fn area_ring(&self, op: OutPtIdx) -> f64 {
        let mut a = 0.0;
        let mut op2 = op;
        loop {
            let prev = self.outpts[op2 as usize].prev;
            let p = self.op_pt(op2);
            let pp = self.op_pt(prev);
            a += (pp.y + p.y) as f64 * (pp.x - p.x) as f64;
            op2 = self.outpts[op2 as usize].next;
            if op2 == op {
                break;
            }
        }
        a * 0.5
    }

    fn area_triangle(pt1: Point64, pt2: Point64, pt3: Point64) -> f64 {
        ((pt3.y + pt1.y) as f64 * (pt3.x - pt1.x) as f64
            + (pt1.y + pt2.y) as f64 * (pt1.x - pt2.x) as f64
            + (pt2.y + pt3.y) as f64 * (pt2.x - pt3.x) as f64)
            * 0.5
    }

    #[inline]
    fn pts_really_close(pt1: Point64, pt2: Point64) -> bool {
        (pt1.x - pt2.x).abs() < 2 && (pt1.y - pt2.y).abs() < 2
    }

    fn is_very_small_triangle(&self, op: OutPtIdx) -> bool {
        let next = self.outpts[op as usize].next;
        let prev = self.outpts[op as usize].prev;
        self.outpts[next as usize].next == prev
            && (Self::pts_really_close(self.op_pt(prev), self.op_pt(next))
                || Self::pts_really_close(self.op_pt(op), self.op_pt(next))
                || Self::pts_really_close(self.op_pt(op), self.op_pt(prev)))
    }

    fn is_valid_closed_path(&self, op: OutPtIdx) -> bool {
        if op == INVALID {
            return false;
        }
        let next = self.outpts[op as usize].next;
        let prev = self.outpts[op as usize].prev;
        next != op && next != prev && !(self.outpts[next as usize].next == prev && self.is_very_small_triangle(op))
    }

    fn dispose_out_pt(&mut self, op: OutPtIdx) -> OutPtIdx {
        let next = self.outpts[op as usize].next;
        let prev = self.outpts[op as usize].prev;
        let result = if next == op { INVALID } else { next };
        self.outpts[prev as usize].next = next;
        self.outpts[next as usize].prev = prev;
        result
    }

    // ─────── Cleanup ──────────────────────────────────────────────────────

    /// Strip duplicate and collinear ring vertices. 180 degree spikes are
    /// always removed; non-reversing collinear runs survive only when
    /// `preserve_collinear` is set. Ends with a self-intersection check.
    pub(crate) fn clean_collinear(&mut self, outrec: OutRecIdx) {
        let outrec = self.get_real_outrec(outrec);
        if outrec == INVALID || self.outrecs[outrec as usize].is_open {
            return;
        }
        if !self.is_valid_closed_path(self.outrecs[outrec as usize].pts) {
            self.outrecs[outrec as usize].pts = INVALID;
            return;
        }

        let mut start_op = self.outrecs[outrec as usize].pts;
        let mut op2 = start_op;
        loop {
            let prev = self.outpts[op2 as usize].prev;
            let next = self.outpts[op2 as usize].next;
            let p_prev = self.op_pt(prev);
            let p = self.op_pt(op2);
            let p_next = self.op_pt(next);
            if cross_sign(p_prev, p, p_next) == 0
                && (p == p_prev
                    || p == p_next
                    || !self.preserve_collinear
                    || dot_sign(p_prev, p, p_next) < 0)
            {
                if op2 == self.outrecs[outrec as usize].pts {
                    self.outrecs[outrec as usize].pts = prev;
                }
                op2 = self.dispose_out_pt(op2);
                if !self.is_valid_closed_path(op2) {
                    self.outrecs[outrec as usize].pts = INVALID;
                    return;
                }
                start_op = op2;
                continue;
            }
            op2 = next;
            if op2 == start_op {
                break;
            }
        }
        self.fix_self_intersects(outrec);
    }

    fn fix_self_intersects(&mut self, outrec: OutRecIdx) {
        let mut op2 = self.outrecs[outrec as usize].pts;
        loop {
            let next = self.outpts[op2 as usize].next;
            // triangles can't self-intersect
            if self.outpts[op2 as usize].prev == self.outpts[next as usize].next {
                break;
            }
            let p_prev = self.op_pt(self.outpts[op2 as usize].prev);
            let p = self.op_pt(op2);
            let p_next = self.op_pt(next);
            let p_nn = self.op_pt(self.outpts[next as usize].next);
            if segs_intersect(p_prev, p, p_next, p_nn, false) {
                self.do_split_op(outrec, op2);
                if self.outrecs[outrec as usize].pts == INVALID {
                    return;
                }
                op2 = self.outrecs[outrec as usize].pts;
                continue;
            }
            op2 = next;
            if op2 == self.outrecs[outrec as usize].pts {
                break;
            }
        }
    }

    /// Resolve one genuine local self-intersection: the ring is split at
    /// the crossing point, the larger-area piece stays in `outrec` and the
    /// split-off triangle becomes a new ring when it encloses real area.
    fn do_split_op(&mut self, outrec: OutRecIdx, split_op: OutPtIdx) {
        // split_op.prev <=> split_op and split_op.next <=> split_op.next.next
        // are the intersecting segments
        let prev_op = self.outpts[split_op as usize].prev;
        let next_op = self.outpts[split_op as usize].next;
        let next_next_op = self.outpts[next_op as usize].next;
        self.outrecs[outrec as usize].pts = prev_op;

        let ip = get_intersect_point(
            self.op_pt(prev_op),
            self.op_pt(split_op),
            self.op_pt(next_op),
            self.op_pt(next_next_op),
        )
        .unwrap_or_else(|| self.op_pt(split_op));

        let area1 = self.area_ring(prev_op);
        let abs_area1 = area1.abs();
        if abs_area1 < 2.0 {
            self.outrecs[outrec as usize].pts = INVALID;
            return;
        }

        let area2 = Self::area_triangle(ip, self.op_pt(split_op), self.op_pt(next_op));
        let abs_area2 = area2.abs();

        // de-link split_op and split_op.next from the path while inserting
        // the intersection point
        if ip == self.op_pt(prev_op) || ip == self.op_pt(next_next_op) {
            self.outpts[next_next_op as usize].prev = prev_op;
            self.outpts[prev_op as usize].next = next_next_op;
        } else {
            let new_op2 = self.new_outpt_raw(ip, outrec, prev_op, next_next_op);
            self.outpts[next_next_op as usize].prev = new_op2;
            self.outpts[prev_op as usize].next = new_op2;
        }

        // area1 is the whole ring's area *before* splitting while area2 is
        // the split triangle's, so matching signs (or a larger area2) mean
        // the triangle is a genuine region rather than noise
        if abs_area2 > 1.0 && (abs_area2 > abs_area1 || (area2 > 0.0) == (area1 > 0.0)) {
            let new_outrec = self.new_outrec_for_split(outrec);
            self.outpts[split_op as usize].outrec = new_outrec;
            self.outpts[next_op as usize].outrec = new_outrec;
            if self.using_polytree {
                self.outrecs[outrec as usize].splits.push(new_outrec);
            }
            let new_op = self.new_outpt_raw(ip, new_outrec, next_op, split_op);
            self.outrecs[new_outrec as usize].pts = new_op;
            self.outpts[split_op as usize].prev = new_op;
            self.outpts[next_op as usize].next = new_op;
        }
    }

    fn new_outpt_raw(
        &mut self,
        pt: Point64,
        outrec: OutRecIdx,
        prev: OutPtIdx,
        next: OutPtIdx,
    ) -> OutPtIdx {
        let idx = self.outpts.len() as OutPtIdx;
        self.outpts.push(super::OutPt { pt, next, prev, outrec });
        idx
    }

    fn new_outrec_for_split(&mut self, parent: OutRecIdx) -> OutRecIdx {
        let owner = self.outrecs[parent as usize].owner;
        let idx = self.outrecs.len() as OutRecIdx;
        self.outrecs.push(super::OutRec {
            owner,
            front_edge: INVALID,
            back_edge: INVALID,
            pts: INVALID,
            polypath: INVALID,
            bounds: Default::default(),
            path: Path64::new(),
            is_open: false,
            splits: Vec::new(),
            recursive_split: INVALID,
        });
        idx
    }

    // ─────── Path building ────────────────────────────────────────────────

    fn build_path(&self, op: OutPtIdx, reverse: bool, is_open: bool, path: &mut Path64) -> bool {
        if op == INVALID {
            return false;
        }
        let next0 = self.outpts[op as usize].next;
        if next0 == op || (!is_open && next0 == self.outpts[op as usize].prev) {
            return false;
        }
        path.clear();

        let (start, mut last_pt, mut op2) = if reverse {
            (op, self.op_pt(op), self.outpts[op as usize].prev)
        } else {
            let op1 = next0;
            (op1, self.op_pt(op1), self.outpts[op1 as usize].next)
        };
        path.push(last_pt);

        while op2 != start {
            if self.op_pt(op2) != last_pt {
                last_pt = self.op_pt(op2);
                path.push(last_pt);
            }
            op2 = if reverse {
                self.outpts[op2 as usize].prev
            } else {
                self.outpts[op2 as usize].next
            };
        }

        if path.len() == 3 && !is_open && self.is_very_small_triangle(op2) {
            return false;
        }
        true
    }

    pub(crate) fn build_paths(&mut self, closed: &mut Paths64, open: &mut Paths64) {
        closed.clear();
        open.clear();
        // outrecs can be appended mid-loop by self-intersection splits
        let mut i = 0;
        while i < self.outrecs.len() {
            let outrec = i as OutRecIdx;
            i += 1;
            if self.outrecs[outrec as usize].pts == INVALID {
                continue;
            }
            let mut path = Path64::new();
            if self.outrecs[outrec as usize].is_open {
                if self.build_path(
                    self.outrecs[outrec as usize].pts,
                    self.reverse_solution,
                    true,
                    &mut path,
                ) {
                    open.push(path);
                }
            } else {
                self.clean_collinear(outrec);
                // closed paths should always return positive orientation,
                // unless reverse_solution asks otherwise
                if self.build_path(
                    self.outrecs[outrec as usize].pts,
                    self.reverse_solution,
                    false,
                    &mut path,
                ) {
                    closed.push(path);
                }
            }
        }
        log::debug!(
            "sweep produced {} closed and {} open paths",
            closed.len(),
            open.len()
        );
    }

    // ─────── Tree building ────────────────────────────────────────────────

    fn check_bounds(&mut self, outrec: OutRecIdx) -> bool {
        let o = outrec as usize;
        if self.outrecs[o].pts == INVALID {
            return false;
        }
        if !self.outrecs[o].bounds.is_empty() {
            return true;
        }
        self.clean_collinear(outrec);
        if self.outrecs[o].pts == INVALID {
            return false;
        }
        let mut path = Path64::new();
        if !self.build_path(self.outrecs[o].pts, self.reverse_solution, false, &mut path) {
            return false;
        }
        self.outrecs[o].bounds = bounds(&path);
        self.outrecs[o].path = path;
        true
    }

    /// True geometric containment check with tolerance for shared
    /// boundaries: vote over the ring's own vertices and fall back to the
    /// bounds midpoint when every sample lands on the boundary.
    fn path1_inside_path2(&self, outrec1: OutRecIdx, outrec2: OutRecIdx) -> bool {
        let path1 = &self.outrecs[outrec1 as usize].path;
        let path2 = &self.outrecs[outrec2 as usize].path;
        let mut io_count = 0i32;
        for &pt in path1 {
            match point_in_polygon(pt, path2) {
                PointInPolygonResult::IsInside => io_count -= 1,
                PointInPolygonResult::IsOutside => io_count += 1,
                PointInPolygonResult::IsOn => {}
            }
            if io_count.abs() > 2 {
                break;
            }
        }
        if io_count != 0 {
            return io_count < 0;
        }
        let mp = bounds(path1).mid_point();
        point_in_polygon(mp, path2) == PointInPolygonResult::IsInside
    }

    fn is_valid_owner(&self, outrec: OutRecIdx, test_owner: OutRecIdx) -> bool {
        // an owner chain may never loop back through outrec
        let mut t = test_owner;
        while t != INVALID && t != outrec {
            t = self.outrecs[t as usize].owner;
        }
        t == INVALID
    }

    /// When self-intersection repair split a candidate owner, the real
    /// owner may be one of the split-off rings instead.
    fn check_split_owner(&mut self, outrec: OutRecIdx, owner: OutRecIdx) -> bool {
        let splits = self.outrecs[owner as usize].splits.clone();
        for &s in &splits {
            let split = self.get_real_outrec(s);
            if split == INVALID || split == outrec || split == owner {
                continue;
            }
            if self.outrecs[split as usize].recursive_split == outrec {
                continue;
            }
            self.outrecs[split as usize].recursive_split = outrec; // guards against cycles
            if !self.outrecs[split as usize].splits.is_empty()
                && self.check_split_owner(outrec, split)
            {
                return true;
            }
            if self.is_valid_owner(outrec, split)
                && self.check_bounds(split)
                && self.outrecs[split as usize]
                    .bounds
                    .contains_rect(&self.outrecs[outrec as usize].bounds)
                && self.path1_inside_path2(outrec, split)
            {
                self.outrecs[outrec as usize].owner = split;
                return true;
            }
        }
        false
    }

    /// Walk the candidate owner chain until a ring that geometrically
    /// contains this one is found, then attach the ring beneath it.
    /// Nesting is shallow in practice, so plain recursion is fine.
    fn recursive_check_owners(&mut self, outrec: OutRecIdx, tree: &mut PolyTree64) {
        // pre-condition: outrec has valid bounds
        let o = outrec as usize;
        if self.outrecs[o].polypath != INVALID || self.outrecs[o].bounds.is_empty() {
            return;
        }

        while self.outrecs[o].owner != INVALID {
            let owner = self.outrecs[o].owner;
            if !self.outrecs[owner as usize].splits.is_empty()
                && self.check_split_owner(outrec, owner)
            {
                break;
            }
            if self.outrecs[owner as usize].pts != INVALID
                && self.check_bounds(owner)
                && self.path1_inside_path2(outrec, owner)
            {
                break;
            }
            self.outrecs[o].owner = self.outrecs[owner as usize].owner;
        }

        let owner = self.outrecs[o].owner;
        let parent = if owner != INVALID {
            if self.outrecs[owner as usize].polypath == INVALID {
                self.recursive_check_owners(owner, tree);
            }
            self.outrecs[owner as usize].polypath
        } else {
            ROOT
        };
        let parent = if parent == INVALID { ROOT } else { parent };
        let path = self.outrecs[o].path.clone();
        self.outrecs[o].polypath = tree.add_child(parent, path);
    }

    pub(crate) fn build_tree(&mut self, tree: &mut PolyTree64, open: &mut Paths64) {
        tree.clear();
        open.clear();
        let mut i = 0;
        while i < self.outrecs.len() {
            let outrec = i as OutRecIdx;
            i += 1;
            if self.outrecs[outrec as usize].pts == INVALID {
                continue;
            }
            if self.outrecs[outrec as usize].is_open {
                let mut path = Path64::new();
                if self.build_path(
                    self.outrecs[outrec as usize].pts,
                    self.reverse_solution,
                    true,
                    &mut path,
                ) {
                    open.push(path);
                }
                continue;
            }
            if !self.check_bounds(outrec) {
                continue;
            }
            self.recursive_check_owners(outrec, tree);
        }
    }
}
