// Copyright 2025 Lars Brubaker
// License: MIT
//
// The sweep engine: a Vatti-style scanline clipper over integer coordinates.
//
// All mutable topology (active edges, output rings, output points) lives in
// growable arenas owned by the Clipper64 instance, linked by u32 indices
// with INVALID = u32::MAX as the null link. The AEL (active edge list) and
// SEL (sorted edge list, used only while resolving the order at the next
// scanbeam) are intrusive index links on the Active arena, so an edge can
// belong to both at once.
//
// The sweep runs bottom-up in display coordinates: "bottom" is the largest
// Y, so the scanline queue pops the maximum pending Y first. Edges that
// intersect are always adjacent in the AEL when their intersection is
// processed; the jump-pointer merge pass in build_intersect_list restores
// order with adjacent swaps only, which keeps the whole run at
// O((n + k) log n).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::ClipError;
use crate::geom::{
    cross_sign, get_closest_pt_on_segment, get_intersect_point, perpendic_dist_from_line_sqrd,
    ClipType, FillRule, Path64, PathType, Paths64, Point64, Rect64,
};
use crate::polytree::{PolyNodeIdx, PolyTree64};
use crate::vertex::{
    self, LocalMinima, Vertex, VertexIdx, INVALID, VF_LOCAL_MAX, VF_OPEN_END, VF_OPEN_START,
};

/// Index into Clipper64::actives
pub(crate) type ActiveIdx = u32;
/// Index into Clipper64::outpts
pub(crate) type OutPtIdx = u32;
/// Index into Clipper64::outrecs
pub(crate) type OutRecIdx = u32;

/// Deferred ring-merge mark: two adjacent hot edges found collinear at a
/// shared point are joined lazily, and Split() undoes the mark when the
/// edges diverge again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
enum JoinWith {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Active {
    bot: Point64,
    top: Point64,
    /// X at the current scanline Y.
    cur_x: i64,
    /// Inverse slope dx/dy; ±infinity flags a horizontal edge.
    dx: f64,
    /// Winding direction of the input bound: +1 ascending, -1 descending.
    wind_dx: i32,
    wind_cnt: i32,
    wind_cnt2: i32,
    /// Owning output ring while the edge is hot, else INVALID.
    outrec: OutRecIdx,
    prev_in_ael: ActiveIdx,
    next_in_ael: ActiveIdx,
    prev_in_sel: ActiveIdx,
    next_in_sel: ActiveIdx,
    jump: ActiveIdx,
    vertex_top: VertexIdx,
    /// Index into Clipper64::minima.
    local_min: u32,
    is_left_bound: bool,
    join_with: JoinWith,
}

impl Default for Active {
    fn default() -> Self {
        Active {
            bot: Point64::new(0, 0),
            top: Point64::new(0, 0),
            cur_x: 0,
            dx: 0.0,
            wind_dx: 1,
            wind_cnt: 0,
            wind_cnt2: 0,
            outrec: INVALID,
            prev_in_ael: INVALID,
            next_in_ael: INVALID,
            prev_in_sel: INVALID,
            next_in_sel: INVALID,
            jump: INVALID,
            vertex_top: INVALID,
            local_min: 0,
            is_left_bound: false,
            join_with: JoinWith::None,
        }
    }
}

/// One vertex of an output ring (circular doubly-linked).
#[derive(Clone, Debug)]
pub(crate) struct OutPt {
    pub(crate) pt: Point64,
    pub(crate) next: OutPtIdx,
    pub(crate) prev: OutPtIdx,
    pub(crate) outrec: OutRecIdx,
}

/// An in-progress or finished output polygon plus its topology metadata.
#[derive(Clone, Debug)]
pub(crate) struct OutRec {
    pub(crate) owner: OutRecIdx,
    pub(crate) front_edge: ActiveIdx,
    pub(crate) back_edge: ActiveIdx,
    pub(crate) pts: OutPtIdx,
    pub(crate) polypath: PolyNodeIdx,
    pub(crate) bounds: Rect64,
    pub(crate) path: Path64,
    pub(crate) is_open: bool,
    /// Rings carved off this one by self-intersection repair.
    pub(crate) splits: Vec<OutRecIdx>,
    /// Guard against cycles while resolving split ownership.
    pub(crate) recursive_split: OutRecIdx,
}

struct IntersectNode {
    pt: Point64,
    edge1: ActiveIdx,
    edge2: ActiveIdx,
}

// ─────────────────────────────── Clipper64 ─────────────────────────────────

/// The clipping engine. Add subject/clip paths, then call one of the
/// execute methods. State is operation-scoped: the solution arenas are
/// cleared after every execute, and `clear` resets the instance for a
/// fresh set of input paths.
pub struct Clipper64 {
    clip_type: ClipType,
    fill_rule: FillRule,
    vertices: Vec<Vertex>,
    minima: Vec<LocalMinima>,
    pub(crate) actives: Vec<Active>,
    pub(crate) outrecs: Vec<OutRec>,
    pub(crate) outpts: Vec<OutPt>,
    ael_first: ActiveIdx,
    sel_first: ActiveIdx,
    scanline_list: BinaryHeap<i64>,
    intersect_list: Vec<IntersectNode>,
    curr_loc_min: usize,
    curr_bot_y: i64,
    minima_sorted: bool,
    has_open_paths: bool,
    pub(crate) using_polytree: bool,
    pub(crate) succeeded: bool,
    /// Keep non-reversing collinear output vertices (spikes are always
    /// removed).
    pub preserve_collinear: bool,
    /// Emit closed paths with reversed orientation.
    pub reverse_solution: bool,
}

impl Default for Clipper64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper64 {
    pub fn new() -> Self {
        Clipper64 {
            clip_type: ClipType::Intersection,
            fill_rule: FillRule::EvenOdd,
            vertices: Vec::new(),
            minima: Vec::new(),
            actives: Vec::new(),
            outrecs: Vec::new(),
            outpts: Vec::new(),
            ael_first: INVALID,
            sel_first: INVALID,
            scanline_list: BinaryHeap::new(),
            intersect_list: Vec::new(),
            curr_loc_min: 0,
            curr_bot_y: 0,
            minima_sorted: false,
            has_open_paths: false,
            using_polytree: false,
            succeeded: true,
            preserve_collinear: true,
            reverse_solution: false,
        }
    }

    // ─────── Input ────────────────────────────────────────────────────────

    pub fn add_paths(&mut self, paths: &Paths64, poly_type: PathType, is_open: bool) {
        if is_open && !paths.is_empty() {
            self.has_open_paths = true;
        }
        self.minima_sorted = false;
        vertex::build_paths(&mut self.vertices, &mut self.minima, paths, poly_type, is_open);
    }

    pub fn add_subject(&mut self, subjects: &Paths64) {
        self.add_paths(subjects, PathType::Subject, false);
    }

    pub fn add_open_subject(&mut self, subjects: &Paths64) {
        self.add_paths(subjects, PathType::Subject, true);
    }

    pub fn add_clip(&mut self, clips: &Paths64) {
        self.add_paths(clips, PathType::Clip, false);
    }

    /// Forget all input paths and solution state.
    pub fn clear(&mut self) {
        self.clear_solution_state();
        self.vertices.clear();
        self.minima.clear();
        self.curr_loc_min = 0;
        self.minima_sorted = false;
        self.has_open_paths = false;
    }

    // ─────── Execution ────────────────────────────────────────────────────

    /// Run the boolean operation and return the closed output paths.
    pub fn execute(&mut self, ct: ClipType, fr: FillRule) -> Result<Paths64, ClipError> {
        let mut closed = Paths64::new();
        let mut open = Paths64::new();
        self.execute_into(ct, fr, &mut closed, &mut open)?;
        Ok(closed)
    }

    /// Run the boolean operation, returning (closed, open) output paths.
    pub fn execute_with_open(
        &mut self,
        ct: ClipType,
        fr: FillRule,
    ) -> Result<(Paths64, Paths64), ClipError> {
        let mut closed = Paths64::new();
        let mut open = Paths64::new();
        self.execute_into(ct, fr, &mut closed, &mut open)?;
        Ok((closed, open))
    }

    /// Run the boolean operation and return the hierarchical (hole-aware)
    /// result, plus any open output paths.
    pub fn execute_tree(
        &mut self,
        ct: ClipType,
        fr: FillRule,
    ) -> Result<(PolyTree64, Paths64), ClipError> {
        self.using_polytree = true;
        let mut tree = PolyTree64::new();
        let mut open = Paths64::new();
        self.execute_internal(ct, fr);
        let ok = self.succeeded;
        if ok {
            self.build_tree(&mut tree, &mut open);
        }
        self.clear_solution_state();
        self.using_polytree = false;
        if !ok {
            log::warn!("clip aborted on inconsistent edge topology");
            return Err(ClipError::Topology);
        }
        Ok((tree, open))
    }

    fn execute_into(
        &mut self,
        ct: ClipType,
        fr: FillRule,
        closed: &mut Paths64,
        open: &mut Paths64,
    ) -> Result<(), ClipError> {
        self.using_polytree = false;
        self.execute_internal(ct, fr);
        let ok = self.succeeded;
        if ok {
            self.build_paths(closed, open);
        }
        self.clear_solution_state();
        if !ok {
            log::warn!("clip aborted on inconsistent edge topology");
            return Err(ClipError::Topology);
        }
        Ok(())
    }

    fn execute_internal(&mut self, ct: ClipType, fr: FillRule) {
        self.clip_type = ct;
        self.fill_rule = fr;
        self.reset();
        let mut y = match self.pop_scanline() {
            Some(y) => y,
            None => return,
        };
        while self.succeeded {
            self.insert_local_minima_into_ael(y);
            while let Some(e) = self.pop_horz() {
                self.do_horizontal(e);
            }
            self.curr_bot_y = y; // bottom of scanbeam
            y = match self.pop_scanline() {
                Some(top_y) => top_y, // y becomes the top of the scanbeam
                None => break,
            };
            self.do_intersections(y);
            self.do_top_of_scanbeam(y);
            while let Some(e) = self.pop_horz() {
                self.do_horizontal(e);
            }
        }
    }

    fn reset(&mut self) {
        if !self.minima_sorted {
            // largest Y first: minima are consumed as the sweep climbs
            let vertices = &self.vertices;
            self.minima.sort_by(|a, b| {
                vertices[b.vertex as usize]
                    .pt
                    .y
                    .cmp(&vertices[a.vertex as usize].pt.y)
            });
            self.minima_sorted = true;
        }
        for i in (0..self.minima.len()).rev() {
            let y = self.vertices[self.minima[i].vertex as usize].pt.y;
            self.scanline_list.push(y);
        }
        self.curr_bot_y = 0;
        self.curr_loc_min = 0;
        self.ael_first = INVALID;
        self.sel_first = INVALID;
        self.succeeded = true;
    }

    pub(crate) fn clear_solution_state(&mut self) {
        self.actives.clear();
        self.outrecs.clear();
        self.outpts.clear();
        self.intersect_list.clear();
        self.scanline_list.clear();
        self.ael_first = INVALID;
        self.sel_first = INVALID;
    }

    // ─────── Scanline queue ───────────────────────────────────────────────

    #[inline]
    fn insert_scanline(&mut self, y: i64) {
        self.scanline_list.push(y);
    }

    fn pop_scanline(&mut self) -> Option<i64> {
        let y = self.scanline_list.pop()?;
        while self.scanline_list.peek() == Some(&y) {
            self.scanline_list.pop();
        }
        Some(y)
    }

    #[inline]
    fn has_loc_min_at_y(&self, y: i64) -> bool {
        self.curr_loc_min < self.minima.len()
            && self.vertices[self.minima[self.curr_loc_min].vertex as usize].pt.y == y
    }

    // ─────── Small accessors & predicates ─────────────────────────────────

    #[inline]
    fn vertex_pt(&self, v: VertexIdx) -> Point64 {
        self.vertices[v as usize].pt
    }

    #[inline]
    pub(crate) fn op_pt(&self, op: OutPtIdx) -> Point64 {
        self.outpts[op as usize].pt
    }

    #[inline]
    fn is_hot(&self, e: ActiveIdx) -> bool {
        self.actives[e as usize].outrec != INVALID
    }

    #[inline]
    fn is_open(&self, e: ActiveIdx) -> bool {
        self.minima[self.actives[e as usize].local_min as usize].is_open
    }

    #[inline]
    fn is_open_end_vertex(&self, v: VertexIdx) -> bool {
        self.vertices[v as usize].flags & (VF_OPEN_START | VF_OPEN_END) != 0
    }

    /// Does this edge terminate at an open-path end?
    #[inline]
    fn is_open_end(&self, e: ActiveIdx) -> bool {
        self.is_open(e) && self.is_open_end_vertex(self.actives[e as usize].vertex_top)
    }

    #[inline]
    fn is_horizontal(&self, e: ActiveIdx) -> bool {
        self.actives[e as usize].top.y == self.actives[e as usize].bot.y
    }

    #[inline]
    fn is_heading_right_horz(&self, e: ActiveIdx) -> bool {
        self.actives[e as usize].dx == f64::NEG_INFINITY
    }

    #[inline]
    fn is_heading_left_horz(&self, e: ActiveIdx) -> bool {
        self.actives[e as usize].dx == f64::INFINITY
    }

    #[inline]
    fn poly_type(&self, e: ActiveIdx) -> PathType {
        self.minima[self.actives[e as usize].local_min as usize].poly_type
    }

    #[inline]
    fn is_same_poly_type(&self, e1: ActiveIdx, e2: ActiveIdx) -> bool {
        self.poly_type(e1) == self.poly_type(e2)
    }

    #[inline]
    fn is_maxima(&self, e: ActiveIdx) -> bool {
        self.vertices[self.actives[e as usize].vertex_top as usize].flags & VF_LOCAL_MAX != 0
    }

    #[inline]
    fn is_joined(&self, e: ActiveIdx) -> bool {
        self.actives[e as usize].join_with != JoinWith::None
    }

    /// The next ring vertex along this bound's walking direction.
    #[inline]
    fn next_vertex(&self, e: ActiveIdx) -> VertexIdx {
        let a = &self.actives[e as usize];
        if a.wind_dx > 0 {
            self.vertices[a.vertex_top as usize].next
        } else {
            self.vertices[a.vertex_top as usize].prev
        }
    }

    #[inline]
    fn prev_prev_vertex(&self, e: ActiveIdx) -> VertexIdx {
        let a = &self.actives[e as usize];
        if a.wind_dx > 0 {
            let p = self.vertices[a.vertex_top as usize].prev;
            self.vertices[p as usize].prev
        } else {
            let n = self.vertices[a.vertex_top as usize].next;
            self.vertices[n as usize].next
        }
    }

    #[inline]
    fn is_front(&self, e: ActiveIdx) -> bool {
        let outrec = self.actives[e as usize].outrec;
        outrec != INVALID && self.outrecs[outrec as usize].front_edge == e
    }

    fn get_dx(pt1: Point64, pt2: Point64) -> f64 {
        let dy = (pt2.y - pt1.y) as f64;
        if dy != 0.0 {
            (pt2.x - pt1.x) as f64 / dy
        } else if pt2.x > pt1.x {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    #[inline]
    fn set_dx(&mut self, e: ActiveIdx) {
        self.actives[e as usize].dx =
            Self::get_dx(self.actives[e as usize].bot, self.actives[e as usize].top);
    }

    fn top_x(&self, e: ActiveIdx, current_y: i64) -> i64 {
        let a = &self.actives[e as usize];
        if current_y == a.top.y || a.top.x == a.bot.x {
            a.top.x
        } else if current_y == a.bot.y {
            a.bot.x
        } else {
            a.bot.x + (a.dx * (current_y - a.bot.y) as f64).round_ties_even() as i64
        }
    }

    fn get_maxima_pair(&self, e: ActiveIdx) -> ActiveIdx {
        let vt = self.actives[e as usize].vertex_top;
        let mut e2 = self.actives[e as usize].next_in_ael;
        while e2 != INVALID {
            if self.actives[e2 as usize].vertex_top == vt {
                return e2;
            }
            e2 = self.actives[e2 as usize].next_in_ael;
        }
        INVALID
    }

    // ─────── Output ring bookkeeping ──────────────────────────────────────

    fn new_outrec(&mut self) -> OutRecIdx {
        let idx = self.outrecs.len() as OutRecIdx;
        self.outrecs.push(OutRec {
            owner: INVALID,
            front_edge: INVALID,
            back_edge: INVALID,
            pts: INVALID,
            polypath: INVALID,
            bounds: Rect64::default(),
            path: Path64::new(),
            is_open: false,
            splits: Vec::new(),
            recursive_split: INVALID,
        });
        idx
    }

    fn new_outpt(&mut self, pt: Point64, outrec: OutRecIdx) -> OutPtIdx {
        let idx = self.outpts.len() as OutPtIdx;
        self.outpts.push(OutPt {
            pt,
            next: idx,
            prev: idx,
            outrec,
        });
        idx
    }

    #[inline]
    fn set_sides(&mut self, outrec: OutRecIdx, start_edge: ActiveIdx, end_edge: ActiveIdx) {
        self.outrecs[outrec as usize].front_edge = start_edge;
        self.outrecs[outrec as usize].back_edge = end_edge;
    }

    fn swap_outrecs(&mut self, e1: ActiveIdx, e2: ActiveIdx) {
        let or1 = self.actives[e1 as usize].outrec;
        let or2 = self.actives[e2 as usize].outrec;
        if or1 == or2 {
            if or1 == INVALID {
                return;
            }
            let front = self.outrecs[or1 as usize].front_edge;
            self.outrecs[or1 as usize].front_edge = self.outrecs[or1 as usize].back_edge;
            self.outrecs[or1 as usize].back_edge = front;
            return;
        }
        if or1 != INVALID {
            if self.outrecs[or1 as usize].front_edge == e1 {
                self.outrecs[or1 as usize].front_edge = e2;
            } else {
                self.outrecs[or1 as usize].back_edge = e2;
            }
        }
        if or2 != INVALID {
            if self.outrecs[or2 as usize].front_edge == e2 {
                self.outrecs[or2 as usize].front_edge = e1;
            } else {
                self.outrecs[or2 as usize].back_edge = e1;
            }
        }
        self.actives[e1 as usize].outrec = or2;
        self.actives[e2 as usize].outrec = or1;
    }

    fn swap_front_back_sides(&mut self, outrec: OutRecIdx) {
        // rarely needed for closed paths, but open paths hit this
        let o = outrec as usize;
        let front = self.outrecs[o].front_edge;
        self.outrecs[o].front_edge = self.outrecs[o].back_edge;
        self.outrecs[o].back_edge = front;
        let pts = self.outrecs[o].pts;
        self.outrecs[o].pts = self.outpts[pts as usize].next;
    }

    fn uncouple_outrec(&mut self, e: ActiveIdx) {
        let outrec = self.actives[e as usize].outrec;
        if outrec == INVALID {
            return;
        }
        let front = self.outrecs[outrec as usize].front_edge;
        let back = self.outrecs[outrec as usize].back_edge;
        if front != INVALID {
            self.actives[front as usize].outrec = INVALID;
        }
        if back != INVALID {
            self.actives[back as usize].outrec = INVALID;
        }
        self.outrecs[outrec as usize].front_edge = INVALID;
        self.outrecs[outrec as usize].back_edge = INVALID;
    }

    fn set_owner(&mut self, outrec: OutRecIdx, new_owner: OutRecIdx) {
        // skip owners whose rings have already been emptied
        while self.outrecs[new_owner as usize].owner != INVALID
            && self.outrecs[self.outrecs[new_owner as usize].owner as usize].pts == INVALID
        {
            let oo = self.outrecs[new_owner as usize].owner;
            self.outrecs[new_owner as usize].owner = self.outrecs[oo as usize].owner;
        }
        // break any cycle that would make outrec (indirectly) own itself
        let mut tmp = new_owner;
        while tmp != INVALID && tmp != outrec {
            tmp = self.outrecs[tmp as usize].owner;
        }
        if tmp != INVALID {
            self.outrecs[new_owner as usize].owner = self.outrecs[outrec as usize].owner;
        }
        self.outrecs[outrec as usize].owner = new_owner;
    }

    pub(crate) fn get_real_outrec(&self, mut outrec: OutRecIdx) -> OutRecIdx {
        while outrec != INVALID && self.outrecs[outrec as usize].pts == INVALID {
            outrec = self.outrecs[outrec as usize].owner;
        }
        outrec
    }

    fn get_prev_hot_edge(&self, e: ActiveIdx) -> ActiveIdx {
        let mut prev = self.actives[e as usize].prev_in_ael;
        while prev != INVALID && (self.is_open(prev) || !self.is_hot(prev)) {
            prev = self.actives[prev as usize].prev_in_ael;
        }
        prev
    }

    #[inline]
    fn outrec_is_ascending(&self, hot_edge: ActiveIdx) -> bool {
        hot_edge == self.outrecs[self.actives[hot_edge as usize].outrec as usize].front_edge
    }

    // ─────── AEL management ───────────────────────────────────────────────

    /// The opaque total-order contract for inserting a new edge at its
    /// local minimum: `true` iff `newcomer` belongs right of `resident`.
    /// The collinear/open-path branches are deliberate special cases;
    /// property tests pin the contract down rather than re-deriving it.
    fn is_valid_ael_order(&self, resident: ActiveIdx, newcomer: ActiveIdx) -> bool {
        let r = resident as usize;
        let n = newcomer as usize;
        if self.actives[n].cur_x != self.actives[r].cur_x {
            return self.actives[n].cur_x > self.actives[r].cur_x;
        }

        // get the turning direction: resident.top, newcomer.bot, newcomer.top
        let d = cross_sign(self.actives[r].top, self.actives[n].bot, self.actives[n].top);
        if d != 0 {
            return d < 0;
        }

        // edges must be collinear to get here.
        // for starting open paths, place them according to the direction
        // they're about to turn
        if !self.is_maxima(resident) && self.actives[r].top.y > self.actives[n].top.y {
            return cross_sign(
                self.actives[n].bot,
                self.actives[r].top,
                self.vertex_pt(self.next_vertex(resident)),
            ) <= 0;
        }
        if !self.is_maxima(newcomer) && self.actives[n].top.y > self.actives[r].top.y {
            return cross_sign(
                self.actives[n].bot,
                self.actives[n].top,
                self.vertex_pt(self.next_vertex(newcomer)),
            ) >= 0;
        }

        let y = self.actives[n].bot.y;
        let newcomer_is_left = self.actives[n].is_left_bound;
        let resident_min_y =
            self.vertex_pt(self.minima[self.actives[r].local_min as usize].vertex).y;

        if self.actives[r].bot.y != y || resident_min_y != y {
            return newcomer_is_left;
        }
        // resident must also have just been inserted at this minimum
        if self.actives[r].is_left_bound != newcomer_is_left {
            return newcomer_is_left;
        }
        if cross_sign(
            self.vertex_pt(self.prev_prev_vertex(resident)),
            self.actives[r].bot,
            self.actives[r].top,
        ) == 0
        {
            return true;
        }
        // compare the turning direction of the alternate bound
        (cross_sign(
            self.vertex_pt(self.prev_prev_vertex(resident)),
            self.actives[n].bot,
            self.vertex_pt(self.prev_prev_vertex(newcomer)),
        ) > 0) == newcomer_is_left
    }

    fn insert_left_edge(&mut self, e: ActiveIdx) {
        if self.ael_first == INVALID {
            self.actives[e as usize].prev_in_ael = INVALID;
            self.actives[e as usize].next_in_ael = INVALID;
            self.ael_first = e;
        } else if !self.is_valid_ael_order(self.ael_first, e) {
            self.actives[e as usize].prev_in_ael = INVALID;
            self.actives[e as usize].next_in_ael = self.ael_first;
            self.actives[self.ael_first as usize].prev_in_ael = e;
            self.ael_first = e;
        } else {
            let mut e2 = self.ael_first;
            while self.actives[e2 as usize].next_in_ael != INVALID
                && self.is_valid_ael_order(self.actives[e2 as usize].next_in_ael, e)
            {
                e2 = self.actives[e2 as usize].next_in_ael;
            }
            // don't separate joined edges
            if self.actives[e2 as usize].join_with == JoinWith::Right {
                e2 = self.actives[e2 as usize].next_in_ael;
            }
            let next = self.actives[e2 as usize].next_in_ael;
            self.actives[e as usize].next_in_ael = next;
            if next != INVALID {
                self.actives[next as usize].prev_in_ael = e;
            }
            self.actives[e as usize].prev_in_ael = e2;
            self.actives[e2 as usize].next_in_ael = e;
        }
    }

    fn insert_right_edge(&mut self, e: ActiveIdx, e2: ActiveIdx) {
        let next = self.actives[e as usize].next_in_ael;
        self.actives[e2 as usize].next_in_ael = next;
        if next != INVALID {
            self.actives[next as usize].prev_in_ael = e2;
        }
        self.actives[e2 as usize].prev_in_ael = e;
        self.actives[e as usize].next_in_ael = e2;
    }

    fn delete_from_ael(&mut self, e: ActiveIdx) {
        let prev = self.actives[e as usize].prev_in_ael;
        let next = self.actives[e as usize].next_in_ael;
        if prev == INVALID && next == INVALID && self.ael_first != e {
            return; // already deleted
        }
        if prev != INVALID {
            self.actives[prev as usize].next_in_ael = next;
        } else {
            self.ael_first = next;
        }
        if next != INVALID {
            self.actives[next as usize].prev_in_ael = prev;
        }
        // the arena slot is dead from here on
        self.actives[e as usize].prev_in_ael = INVALID;
        self.actives[e as usize].next_in_ael = INVALID;
    }

    fn swap_positions_in_ael(&mut self, e1: ActiveIdx, e2: ActiveIdx) {
        // precondition: e1 is immediately left of e2
        let next = self.actives[e2 as usize].next_in_ael;
        if next != INVALID {
            self.actives[next as usize].prev_in_ael = e1;
        }
        let prev = self.actives[e1 as usize].prev_in_ael;
        if prev != INVALID {
            self.actives[prev as usize].next_in_ael = e2;
        }
        self.actives[e2 as usize].prev_in_ael = prev;
        self.actives[e2 as usize].next_in_ael = e1;
        self.actives[e1 as usize].prev_in_ael = e2;
        self.actives[e1 as usize].next_in_ael = next;
        if self.actives[e2 as usize].prev_in_ael == INVALID {
            self.ael_first = e2;
        }
    }

    #[inline]
    fn push_horz(&mut self, e: ActiveIdx) {
        self.actives[e as usize].next_in_sel = self.sel_first;
        self.sel_first = e;
    }

    fn pop_horz(&mut self) -> Option<ActiveIdx> {
        let e = self.sel_first;
        if e == INVALID {
            return None;
        }
        self.sel_first = self.actives[e as usize].next_in_sel;
        Some(e)
    }

    // ─────── Winding counts & the contribution predicate ──────────────────

    fn set_wind_count_closed(&mut self, e: ActiveIdx) {
        // An edge's wind_cnt is the winding of the higher-count region it
        // touches; adjacent regions only ever differ by one.
        let pt = self.poly_type(e);
        let mut e2 = self.actives[e as usize].prev_in_ael;
        while e2 != INVALID && (self.poly_type(e2) != pt || self.is_open(e2)) {
            e2 = self.actives[e2 as usize].prev_in_ael;
        }

        if e2 == INVALID {
            self.actives[e as usize].wind_cnt = self.actives[e as usize].wind_dx;
            e2 = self.ael_first;
        } else if self.fill_rule == FillRule::EvenOdd {
            self.actives[e as usize].wind_cnt = self.actives[e as usize].wind_dx;
            self.actives[e as usize].wind_cnt2 = self.actives[e2 as usize].wind_cnt2;
            e2 = self.actives[e2 as usize].next_in_ael;
        } else {
            // NonZero, Positive or Negative filling here.
            // when e2's wind_cnt runs in the same direction as its wind_dx
            // the polygon fills to the right of e2, so e is inside it
            let e2wc = self.actives[e2 as usize].wind_cnt;
            let e2wd = self.actives[e2 as usize].wind_dx;
            let ewd = self.actives[e as usize].wind_dx;
            let wc = if e2wc * e2wd < 0 {
                // opposite directions, so e is outside e2
                if e2wc.abs() > 1 {
                    // outside the previous polygon but still inside another
                    if e2wd * ewd < 0 {
                        e2wc
                    } else {
                        e2wc + ewd
                    }
                } else if self.is_open(e) {
                    1
                } else {
                    ewd
                }
            } else {
                // e must be inside e2
                if e2wd * ewd < 0 {
                    e2wc
                } else {
                    e2wc + ewd
                }
            };
            self.actives[e as usize].wind_cnt = wc;
            self.actives[e as usize].wind_cnt2 = self.actives[e2 as usize].wind_cnt2;
            e2 = self.actives[e2 as usize].next_in_ael;
        }

        // accumulate the opposite polytype's winding
        if self.fill_rule == FillRule::EvenOdd {
            while e2 != e {
                if self.poly_type(e2) != pt && !self.is_open(e2) {
                    self.actives[e as usize].wind_cnt2 =
                        if self.actives[e as usize].wind_cnt2 == 0 { 1 } else { 0 };
                }
                e2 = self.actives[e2 as usize].next_in_ael;
            }
        } else {
            while e2 != e {
                if self.poly_type(e2) != pt && !self.is_open(e2) {
                    self.actives[e as usize].wind_cnt2 += self.actives[e2 as usize].wind_dx;
                }
                e2 = self.actives[e2 as usize].next_in_ael;
            }
        }
    }

    fn set_wind_count_open(&mut self, e: ActiveIdx) {
        let mut e2 = self.ael_first;
        if self.fill_rule == FillRule::EvenOdd {
            let mut cnt1 = 0;
            let mut cnt2 = 0;
            while e2 != e {
                if self.poly_type(e2) == PathType::Clip {
                    cnt2 += 1;
                } else if !self.is_open(e2) {
                    cnt1 += 1;
                }
                e2 = self.actives[e2 as usize].next_in_ael;
            }
            self.actives[e as usize].wind_cnt = if cnt1 & 1 != 0 { 1 } else { 0 };
            self.actives[e as usize].wind_cnt2 = if cnt2 & 1 != 0 { 1 } else { 0 };
        } else {
            while e2 != e {
                if self.poly_type(e2) == PathType::Clip {
                    self.actives[e as usize].wind_cnt2 += self.actives[e2 as usize].wind_dx;
                } else if !self.is_open(e2) {
                    self.actives[e as usize].wind_cnt += self.actives[e2 as usize].wind_dx;
                }
                e2 = self.actives[e2 as usize].next_in_ael;
            }
        }
    }

    fn is_contributing_closed(&self, e: ActiveIdx) -> bool {
        let a = &self.actives[e as usize];
        match self.fill_rule {
            FillRule::Positive => {
                if a.wind_cnt != 1 {
                    return false;
                }
            }
            FillRule::Negative => {
                if a.wind_cnt != -1 {
                    return false;
                }
            }
            FillRule::NonZero => {
                if a.wind_cnt.abs() != 1 {
                    return false;
                }
            }
            FillRule::EvenOdd => {}
        }

        match self.clip_type {
            ClipType::Intersection => match self.fill_rule {
                FillRule::Positive => a.wind_cnt2 > 0,
                FillRule::Negative => a.wind_cnt2 < 0,
                _ => a.wind_cnt2 != 0,
            },
            ClipType::Union => match self.fill_rule {
                FillRule::Positive => a.wind_cnt2 <= 0,
                FillRule::Negative => a.wind_cnt2 >= 0,
                _ => a.wind_cnt2 == 0,
            },
            ClipType::Difference => {
                let outside_clip = match self.fill_rule {
                    FillRule::Positive => a.wind_cnt2 <= 0,
                    FillRule::Negative => a.wind_cnt2 >= 0,
                    _ => a.wind_cnt2 == 0,
                };
                (self.poly_type(e) == PathType::Subject) == outside_clip
            }
            ClipType::Xor => true, // XOr is always contributing unless completely inside
        }
    }

    fn is_contributing_open(&self, e: ActiveIdx) -> bool {
        let a = &self.actives[e as usize];
        let (is_in_subj, is_in_clip) = match self.fill_rule {
            FillRule::Positive => (a.wind_cnt > 0, a.wind_cnt2 > 0),
            FillRule::Negative => (a.wind_cnt < 0, a.wind_cnt2 < 0),
            _ => (a.wind_cnt != 0, a.wind_cnt2 != 0),
        };
        match self.clip_type {
            ClipType::Intersection => is_in_clip,
            ClipType::Union => !is_in_subj && !is_in_clip,
            _ => !is_in_clip,
        }
    }

    // ─────── Local minima insertion ───────────────────────────────────────

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) {
        while self.has_loc_min_at_y(bot_y) {
            let lm_idx = self.curr_loc_min;
            self.curr_loc_min += 1;
            let lm = self.minima[lm_idx];
            let vflags = self.vertices[lm.vertex as usize].flags;
            let vpt = self.vertex_pt(lm.vertex);

            let mut left_bound = INVALID;
            if vflags & VF_OPEN_START == 0 {
                let vprev = self.vertices[lm.vertex as usize].prev;
                let idx = self.actives.len() as ActiveIdx;
                self.actives.push(Active {
                    bot: vpt,
                    top: self.vertex_pt(vprev),
                    cur_x: vpt.x,
                    wind_dx: -1,
                    vertex_top: vprev,
                    local_min: lm_idx as u32,
                    ..Default::default()
                });
                self.set_dx(idx);
                left_bound = idx;
            }

            let mut right_bound = INVALID;
            if vflags & VF_OPEN_END == 0 {
                let vnext = self.vertices[lm.vertex as usize].next;
                let idx = self.actives.len() as ActiveIdx;
                self.actives.push(Active {
                    bot: vpt,
                    top: self.vertex_pt(vnext),
                    cur_x: vpt.x,
                    wind_dx: 1,
                    vertex_top: vnext,
                    local_min: lm_idx as u32,
                    ..Default::default()
                });
                self.set_dx(idx);
                right_bound = idx;
            }

            // so far left_bound is just the descending bound and right_bound
            // the ascending one
            if left_bound != INVALID && right_bound != INVALID {
                if self.is_horizontal(left_bound) {
                    if self.is_heading_right_horz(left_bound) {
                        std::mem::swap(&mut left_bound, &mut right_bound);
                    }
                } else if self.is_horizontal(right_bound) {
                    if self.is_heading_left_horz(right_bound) {
                        std::mem::swap(&mut left_bound, &mut right_bound);
                    }
                } else if self.actives[left_bound as usize].dx
                    < self.actives[right_bound as usize].dx
                {
                    std::mem::swap(&mut left_bound, &mut right_bound);
                }
            } else if left_bound == INVALID {
                left_bound = right_bound;
                right_bound = INVALID;
            }

            self.actives[left_bound as usize].is_left_bound = true;
            self.insert_left_edge(left_bound);

            let contributing;
            if self.is_open(left_bound) {
                self.set_wind_count_open(left_bound);
                contributing = self.is_contributing_open(left_bound);
            } else {
                self.set_wind_count_closed(left_bound);
                contributing = self.is_contributing_closed(left_bound);
            }

            if right_bound != INVALID {
                self.actives[right_bound as usize].wind_cnt =
                    self.actives[left_bound as usize].wind_cnt;
                self.actives[right_bound as usize].wind_cnt2 =
                    self.actives[left_bound as usize].wind_cnt2;
                self.insert_right_edge(left_bound, right_bound);

                if contributing {
                    let bot = self.actives[left_bound as usize].bot;
                    self.add_local_min_poly(left_bound, right_bound, bot, true);
                    if !self.is_horizontal(left_bound) {
                        self.check_join_left(left_bound, bot, false);
                    }
                }

                while self.actives[right_bound as usize].next_in_ael != INVALID
                    && self.is_valid_ael_order(
                        self.actives[right_bound as usize].next_in_ael,
                        right_bound,
                    )
                {
                    let next = self.actives[right_bound as usize].next_in_ael;
                    let bot = self.actives[right_bound as usize].bot;
                    self.intersect_edges(right_bound, next, bot);
                    self.swap_positions_in_ael(right_bound, next);
                }

                if self.is_horizontal(right_bound) {
                    self.push_horz(right_bound);
                } else {
                    let bot = self.actives[right_bound as usize].bot;
                    self.check_join_right(right_bound, bot, false);
                    let top_y = self.actives[right_bound as usize].top.y;
                    self.insert_scanline(top_y);
                }
            } else if contributing {
                let bot = self.actives[left_bound as usize].bot;
                self.start_open_path(left_bound, bot);
            }

            if self.is_horizontal(left_bound) {
                self.push_horz(left_bound);
            } else {
                let top_y = self.actives[left_bound as usize].top.y;
                self.insert_scanline(top_y);
            }
        }
    }

    // ─────── Output ring construction ─────────────────────────────────────

    fn add_local_min_poly(
        &mut self,
        e1: ActiveIdx,
        e2: ActiveIdx,
        pt: Point64,
        is_new: bool,
    ) -> OutPtIdx {
        let outrec = self.new_outrec();
        self.actives[e1 as usize].outrec = outrec;
        self.actives[e2 as usize].outrec = outrec;

        if self.is_open(e1) {
            self.outrecs[outrec as usize].owner = INVALID;
            self.outrecs[outrec as usize].is_open = true;
            if self.actives[e1 as usize].wind_dx > 0 {
                self.set_sides(outrec, e1, e2);
            } else {
                self.set_sides(outrec, e2, e1);
            }
        } else {
            self.outrecs[outrec as usize].is_open = false;
            // wind_dx is the winding of the *input* bound; output orientation
            // is carried by which edge becomes the front edge
            let prev_hot = self.get_prev_hot_edge(e1);
            if prev_hot != INVALID {
                let prev_or = self.actives[prev_hot as usize].outrec;
                if self.using_polytree {
                    self.set_owner(outrec, prev_or);
                } else {
                    self.outrecs[outrec as usize].owner = prev_or;
                }
                if self.outrec_is_ascending(prev_hot) == is_new {
                    self.set_sides(outrec, e2, e1);
                } else {
                    self.set_sides(outrec, e1, e2);
                }
            } else {
                self.outrecs[outrec as usize].owner = INVALID;
                if is_new {
                    self.set_sides(outrec, e1, e2);
                } else {
                    self.set_sides(outrec, e2, e1);
                }
            }
        }

        let op = self.new_outpt(pt, outrec);
        self.outrecs[outrec as usize].pts = op;
        op
    }

    fn add_local_max_poly(&mut self, e1: ActiveIdx, e2: ActiveIdx, pt: Point64) -> OutPtIdx {
        if self.is_joined(e1) {
            self.split(e1, pt);
        }
        if self.is_joined(e2) {
            self.split(e2, pt);
        }

        if self.is_front(e1) == self.is_front(e2) {
            // we should practically never get here, but ...
            if self.is_open_end(e1) {
                let or1 = self.actives[e1 as usize].outrec;
                self.swap_front_back_sides(or1);
            } else if self.is_open_end(e2) {
                let or2 = self.actives[e2 as usize].outrec;
                self.swap_front_back_sides(or2);
            } else {
                self.succeeded = false;
                return INVALID;
            }
        }

        let result = self.add_out_pt(e1, pt);
        let or1 = self.actives[e1 as usize].outrec;
        let or2 = self.actives[e2 as usize].outrec;
        if or1 == or2 {
            self.outrecs[or1 as usize].pts = result;
            if self.using_polytree {
                let prev_hot = self.get_prev_hot_edge(e1);
                if prev_hot == INVALID {
                    self.outrecs[or1 as usize].owner = INVALID;
                } else {
                    let prev_or = self.actives[prev_hot as usize].outrec;
                    // not necessarily the real owner; fixed while building
                    // the tree
                    self.set_owner(or1, prev_or);
                }
            }
            self.uncouple_outrec(e1);
        } else if self.is_open(e1) {
            // preserve the winding orientation of the open ring
            if self.actives[e1 as usize].wind_dx < 0 {
                self.join_outrec_paths(e1, e2);
            } else {
                self.join_outrec_paths(e2, e1);
            }
        } else if or1 < or2 {
            self.join_outrec_paths(e1, e2);
        } else {
            self.join_outrec_paths(e2, e1);
        }
        result
    }

    fn join_outrec_paths(&mut self, e1: ActiveIdx, e2: ActiveIdx) {
        // join e2's ring onto e1's, then retire e2's ring
        let or1 = self.actives[e1 as usize].outrec;
        let or2 = self.actives[e2 as usize].outrec;
        let p1_start = self.outrecs[or1 as usize].pts;
        let p2_start = self.outrecs[or2 as usize].pts;
        let p1_end = self.outpts[p1_start as usize].next;
        let p2_end = self.outpts[p2_start as usize].next;

        if self.is_front(e1) {
            self.outpts[p2_end as usize].prev = p1_start;
            self.outpts[p1_start as usize].next = p2_end;
            self.outpts[p2_start as usize].next = p1_end;
            self.outpts[p1_end as usize].prev = p2_start;
            self.outrecs[or1 as usize].pts = p2_start;
            // nb: when e1 is open, e1 and e2 must be a maxima pair
            let fe = self.outrecs[or2 as usize].front_edge;
            self.outrecs[or1 as usize].front_edge = fe;
            if fe != INVALID {
                self.actives[fe as usize].outrec = or1;
            }
        } else {
            self.outpts[p1_end as usize].prev = p2_start;
            self.outpts[p2_start as usize].next = p1_end;
            self.outpts[p1_start as usize].next = p2_end;
            self.outpts[p2_end as usize].prev = p1_start;
            let be = self.outrecs[or2 as usize].back_edge;
            self.outrecs[or1 as usize].back_edge = be;
            if be != INVALID {
                self.actives[be as usize].outrec = or1;
            }
        }

        self.outrecs[or2 as usize].front_edge = INVALID;
        self.outrecs[or2 as usize].back_edge = INVALID;
        self.outrecs[or2 as usize].pts = INVALID;
        self.set_owner(or2, or1);

        if self.is_open_end(e1) {
            self.outrecs[or2 as usize].pts = self.outrecs[or1 as usize].pts;
            self.outrecs[or1 as usize].pts = INVALID;
        }

        self.actives[e1 as usize].outrec = INVALID;
        self.actives[e2 as usize].outrec = INVALID;
    }

    fn add_out_pt(&mut self, e: ActiveIdx, pt: Point64) -> OutPtIdx {
        // the ring head op_front and its next op_back correspond to the
        // outrec's front and back edges respectively
        let outrec = self.actives[e as usize].outrec;
        let to_front = self.is_front(e);
        let op_front = self.outrecs[outrec as usize].pts;
        let op_back = self.outpts[op_front as usize].next;

        if to_front && pt == self.op_pt(op_front) {
            return op_front;
        }
        if !to_front && pt == self.op_pt(op_back) {
            return op_back;
        }

        let new_op = self.new_outpt(pt, outrec);
        self.outpts[op_back as usize].prev = new_op;
        self.outpts[new_op as usize].prev = op_front;
        self.outpts[new_op as usize].next = op_back;
        self.outpts[op_front as usize].next = new_op;
        if to_front {
            self.outrecs[outrec as usize].pts = new_op;
        }
        new_op
    }

    fn start_open_path(&mut self, e: ActiveIdx, pt: Point64) -> OutPtIdx {
        let outrec = self.new_outrec();
        self.outrecs[outrec as usize].is_open = true;
        if self.actives[e as usize].wind_dx > 0 {
            self.outrecs[outrec as usize].front_edge = e;
            self.outrecs[outrec as usize].back_edge = INVALID;
        } else {
            self.outrecs[outrec as usize].front_edge = INVALID;
            self.outrecs[outrec as usize].back_edge = e;
        }
        self.actives[e as usize].outrec = outrec;
        let op = self.new_outpt(pt, outrec);
        self.outrecs[outrec as usize].pts = op;
        op
    }

    fn update_edge_into_ael(&mut self, e: ActiveIdx) {
        let eu = e as usize;
        self.actives[eu].bot = self.actives[eu].top;
        let vt = self.next_vertex(e);
        self.actives[eu].vertex_top = vt;
        self.actives[eu].top = self.vertex_pt(vt);
        self.actives[eu].cur_x = self.actives[eu].bot.x;
        self.set_dx(e);

        if self.is_joined(e) {
            let bot = self.actives[eu].bot;
            self.split(e, bot);
        }
        if self.is_horizontal(e) {
            if !self.is_open(e) {
                self.trim_horz(e, self.preserve_collinear);
            }
            return;
        }
        self.insert_scanline(self.actives[eu].top.y);
        let bot = self.actives[eu].bot;
        self.check_join_left(e, bot, false);
        self.check_join_right(e, bot, true);
    }

    // ─────── Joined-edge repair ───────────────────────────────────────────

    fn split(&mut self, e: ActiveIdx, curr_pt: Point64) {
        if self.actives[e as usize].join_with == JoinWith::Right {
            self.actives[e as usize].join_with = JoinWith::None;
            let next = self.actives[e as usize].next_in_ael;
            if next == INVALID {
                return;
            }
            self.actives[next as usize].join_with = JoinWith::None;
            self.add_local_min_poly(e, next, curr_pt, true);
        } else {
            self.actives[e as usize].join_with = JoinWith::None;
            let prev = self.actives[e as usize].prev_in_ael;
            if prev == INVALID {
                return;
            }
            self.actives[prev as usize].join_with = JoinWith::None;
            self.add_local_min_poly(prev, e, curr_pt, true);
        }
    }

    fn check_join_left(&mut self, e: ActiveIdx, pt: Point64, check_curr_x: bool) {
        let prev = self.actives[e as usize].prev_in_ael;
        if prev == INVALID
            || !self.is_hot(e)
            || !self.is_hot(prev)
            || self.is_horizontal(e)
            || self.is_horizontal(prev)
            || self.is_open(e)
            || self.is_open(prev)
        {
            return;
        }
        // avoid trivial joins right next to an edge top or bottom
        if (pt.y < self.actives[e as usize].top.y + 2
            || pt.y < self.actives[prev as usize].top.y + 2)
            && (self.actives[e as usize].bot.y > pt.y
                || self.actives[prev as usize].bot.y > pt.y)
        {
            return;
        }

        if check_curr_x {
            if perpendic_dist_from_line_sqrd(
                pt,
                self.actives[prev as usize].bot,
                self.actives[prev as usize].top,
            ) > 0.25
            {
                return;
            }
        } else if self.actives[e as usize].cur_x != self.actives[prev as usize].cur_x {
            return;
        }
        if cross_sign(self.actives[e as usize].top, pt, self.actives[prev as usize].top) != 0 {
            return;
        }

        let or_e = self.actives[e as usize].outrec;
        let or_prev = self.actives[prev as usize].outrec;
        if or_e == or_prev {
            self.add_local_max_poly(prev, e, pt);
        } else if or_e < or_prev {
            self.join_outrec_paths(e, prev);
        } else {
            self.join_outrec_paths(prev, e);
        }
        self.actives[prev as usize].join_with = JoinWith::Right;
        self.actives[e as usize].join_with = JoinWith::Left;
    }

    fn check_join_right(&mut self, e: ActiveIdx, pt: Point64, check_curr_x: bool) {
        let next = self.actives[e as usize].next_in_ael;
        if next == INVALID
            || !self.is_hot(e)
            || !self.is_hot(next)
            || self.is_horizontal(e)
            || self.is_horizontal(next)
            || self.is_open(e)
            || self.is_open(next)
        {
            return;
        }
        if (pt.y < self.actives[e as usize].top.y + 2
            || pt.y < self.actives[next as usize].top.y + 2)
            && (self.actives[e as usize].bot.y > pt.y
                || self.actives[next as usize].bot.y > pt.y)
        {
            return;
        }

        if check_curr_x {
            if perpendic_dist_from_line_sqrd(
                pt,
                self.actives[next as usize].bot,
                self.actives[next as usize].top,
            ) > 0.25
            {
                return;
            }
        } else if self.actives[e as usize].cur_x != self.actives[next as usize].cur_x {
            return;
        }
        if cross_sign(self.actives[e as usize].top, pt, self.actives[next as usize].top) != 0 {
            return;
        }

        let or_e = self.actives[e as usize].outrec;
        let or_next = self.actives[next as usize].outrec;
        if or_e == or_next {
            self.add_local_max_poly(e, next, pt);
        } else if or_e < or_next {
            self.join_outrec_paths(e, next);
        } else {
            self.join_outrec_paths(next, e);
        }
        self.actives[e as usize].join_with = JoinWith::Right;
        self.actives[next as usize].join_with = JoinWith::Left;
    }

    // ─────── Edge intersection ────────────────────────────────────────────

    fn find_edge_with_matching_loc_min(&self, e: ActiveIdx) -> ActiveIdx {
        let lm = self.actives[e as usize].local_min;
        let bot = self.actives[e as usize].bot;
        let mut result = self.actives[e as usize].next_in_ael;
        while result != INVALID {
            if self.actives[result as usize].local_min == lm {
                return result;
            }
            if !self.is_horizontal(result) && bot != self.actives[result as usize].bot {
                result = INVALID;
            } else {
                result = self.actives[result as usize].next_in_ael;
            }
        }
        result = self.actives[e as usize].prev_in_ael;
        while result != INVALID {
            if self.actives[result as usize].local_min == lm {
                return result;
            }
            if !self.is_horizontal(result) && bot != self.actives[result as usize].bot {
                result = INVALID;
            } else {
                result = self.actives[result as usize].prev_in_ael;
            }
        }
        INVALID
    }

    fn intersect_edges(&mut self, mut e1: ActiveIdx, mut e2: ActiveIdx, pt: Point64) {
        // open path intersections are managed separately
        if self.has_open_paths && (self.is_open(e1) || self.is_open(e2)) {
            if self.is_open(e1) && self.is_open(e2) {
                return;
            }
            if self.is_open(e2) {
                std::mem::swap(&mut e1, &mut e2);
            }
            if self.is_joined(e2) {
                self.split(e2, pt);
            }

            if self.clip_type == ClipType::Union {
                if !self.is_hot(e2) {
                    return;
                }
            } else if self.poly_type(e2) == PathType::Subject {
                return;
            }
            match self.fill_rule {
                FillRule::Positive => {
                    if self.actives[e2 as usize].wind_cnt != 1 {
                        return;
                    }
                }
                FillRule::Negative => {
                    if self.actives[e2 as usize].wind_cnt != -1 {
                        return;
                    }
                }
                _ => {
                    if self.actives[e2 as usize].wind_cnt.abs() != 1 {
                        return;
                    }
                }
            }

            // toggle contribution
            if self.is_hot(e1) {
                self.add_out_pt(e1, pt);
                let or1 = self.actives[e1 as usize].outrec;
                if self.is_front(e1) {
                    self.outrecs[or1 as usize].front_edge = INVALID;
                } else {
                    self.outrecs[or1 as usize].back_edge = INVALID;
                }
                self.actives[e1 as usize].outrec = INVALID;
            } else {
                // horizontal edges can pass under open paths at a local min
                let lm_vertex = self.minima[self.actives[e1 as usize].local_min as usize].vertex;
                if pt == self.vertex_pt(lm_vertex) && !self.is_open_end_vertex(lm_vertex) {
                    // find the other side of the local min and if it's hot,
                    // continue its ring on e1
                    let e3 = self.find_edge_with_matching_loc_min(e1);
                    if e3 != INVALID && self.is_hot(e3) {
                        let or3 = self.actives[e3 as usize].outrec;
                        self.actives[e1 as usize].outrec = or3;
                        if self.actives[e1 as usize].wind_dx > 0 {
                            self.set_sides(or3, e1, e3);
                        } else {
                            self.set_sides(or3, e3, e1);
                        }
                        return;
                    }
                    self.start_open_path(e1, pt);
                } else {
                    self.start_open_path(e1, pt);
                }
            }
            return;
        }

        // managing closed paths from here on
        if self.is_joined(e1) {
            self.split(e1, pt);
        }
        if self.is_joined(e2) {
            self.split(e2, pt);
        }

        // update winding counts (assumes e1 and e2 are adjacent)
        let old_e1_wind_count;
        let old_e2_wind_count;
        let e1_wind_dx = self.actives[e1 as usize].wind_dx;
        let e2_wind_dx = self.actives[e2 as usize].wind_dx;
        if self.is_same_poly_type(e1, e2) {
            if self.fill_rule == FillRule::EvenOdd {
                let tmp = self.actives[e1 as usize].wind_cnt;
                self.actives[e1 as usize].wind_cnt = self.actives[e2 as usize].wind_cnt;
                self.actives[e2 as usize].wind_cnt = tmp;
            } else {
                if self.actives[e1 as usize].wind_cnt + e2_wind_dx == 0 {
                    self.actives[e1 as usize].wind_cnt = -self.actives[e1 as usize].wind_cnt;
                } else {
                    self.actives[e1 as usize].wind_cnt += e2_wind_dx;
                }
                if self.actives[e2 as usize].wind_cnt - e1_wind_dx == 0 {
                    self.actives[e2 as usize].wind_cnt = -self.actives[e2 as usize].wind_cnt;
                } else {
                    self.actives[e2 as usize].wind_cnt -= e1_wind_dx;
                }
            }
        } else if self.fill_rule != FillRule::EvenOdd {
            self.actives[e1 as usize].wind_cnt2 += e2_wind_dx;
            self.actives[e2 as usize].wind_cnt2 -= e1_wind_dx;
        } else {
            self.actives[e1 as usize].wind_cnt2 =
                if self.actives[e1 as usize].wind_cnt2 == 0 { 1 } else { 0 };
            self.actives[e2 as usize].wind_cnt2 =
                if self.actives[e2 as usize].wind_cnt2 == 0 { 1 } else { 0 };
        }

        match self.fill_rule {
            FillRule::Positive => {
                old_e1_wind_count = self.actives[e1 as usize].wind_cnt;
                old_e2_wind_count = self.actives[e2 as usize].wind_cnt;
            }
            FillRule::Negative => {
                old_e1_wind_count = -self.actives[e1 as usize].wind_cnt;
                old_e2_wind_count = -self.actives[e2 as usize].wind_cnt;
            }
            _ => {
                old_e1_wind_count = self.actives[e1 as usize].wind_cnt.abs();
                old_e2_wind_count = self.actives[e2 as usize].wind_cnt.abs();
            }
        }

        let e1_windcnt_in_01 = old_e1_wind_count == 0 || old_e1_wind_count == 1;
        let e2_windcnt_in_01 = old_e2_wind_count == 0 || old_e2_wind_count == 1;
        if (!self.is_hot(e1) && !e1_windcnt_in_01) || (!self.is_hot(e2) && !e2_windcnt_in_01) {
            return;
        }

        // now process the intersection
        if self.is_hot(e1) && self.is_hot(e2) {
            if !e1_windcnt_in_01
                || !e2_windcnt_in_01
                || (!self.is_same_poly_type(e1, e2) && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt);
            } else if self.is_front(e1) || self.actives[e1 as usize].outrec
                == self.actives[e2 as usize].outrec
            {
                // not strictly necessary, but splitting polygons that touch
                // only at a shared vertex keeps the output simpler
                self.add_local_max_poly(e1, e2, pt);
                self.add_local_min_poly(e1, e2, pt, false);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_outrecs(e1, e2);
            }
        } else if self.is_hot(e1) {
            self.add_out_pt(e1, pt);
            self.swap_outrecs(e1, e2);
        } else if self.is_hot(e2) {
            self.add_out_pt(e2, pt);
            self.swap_outrecs(e1, e2);
        } else {
            // neither edge is hot
            let e1_wc2;
            let e2_wc2;
            match self.fill_rule {
                FillRule::Positive => {
                    e1_wc2 = self.actives[e1 as usize].wind_cnt2;
                    e2_wc2 = self.actives[e2 as usize].wind_cnt2;
                }
                FillRule::Negative => {
                    e1_wc2 = -self.actives[e1 as usize].wind_cnt2;
                    e2_wc2 = -self.actives[e2 as usize].wind_cnt2;
                }
                _ => {
                    e1_wc2 = self.actives[e1 as usize].wind_cnt2.abs();
                    e2_wc2 = self.actives[e2 as usize].wind_cnt2.abs();
                }
            }

            if !self.is_same_poly_type(e1, e2) {
                self.add_local_min_poly(e1, e2, pt, false);
            } else if old_e1_wind_count == 1 && old_e2_wind_count == 1 {
                match self.clip_type {
                    ClipType::Union => {
                        if e1_wc2 <= 0 && e2_wc2 <= 0 {
                            self.add_local_min_poly(e1, e2, pt, false);
                        }
                    }
                    ClipType::Difference => {
                        if (self.poly_type(e1) == PathType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (self.poly_type(e1) == PathType::Subject
                                && e1_wc2 <= 0
                                && e2_wc2 <= 0)
                        {
                            self.add_local_min_poly(e1, e2, pt, false);
                        }
                    }
                    ClipType::Xor => {
                        self.add_local_min_poly(e1, e2, pt, false);
                    }
                    ClipType::Intersection => {
                        if e1_wc2 > 0 && e2_wc2 > 0 {
                            self.add_local_min_poly(e1, e2, pt, false);
                        }
                    }
                }
            }
        }
    }

    // ─────── Scanbeam-top intersection resolution ─────────────────────────

    fn do_intersections(&mut self, top_y: i64) {
        if self.build_intersect_list(top_y) {
            self.process_intersect_list();
            self.intersect_list.clear();
        }
    }

    fn adjust_curr_x_and_copy_to_sel(&mut self, top_y: i64) {
        let mut e = self.ael_first;
        self.sel_first = e;
        while e != INVALID {
            let eu = e as usize;
            self.actives[eu].prev_in_sel = self.actives[eu].prev_in_ael;
            self.actives[eu].next_in_sel = self.actives[eu].next_in_ael;
            self.actives[eu].jump = self.actives[eu].next_in_sel;
            if self.actives[eu].join_with == JoinWith::Left {
                // keeps the join intact through the re-sort
                let prev = self.actives[eu].prev_in_ael;
                self.actives[eu].cur_x = self.actives[prev as usize].cur_x;
            } else {
                self.actives[eu].cur_x = self.top_x(e, top_y);
            }
            e = self.actives[eu].next_in_ael;
        }
    }

    /// Merge-sort the SEL by X at the new scanline. Every adjacent swap is
    /// one genuine edge crossing inside the scanbeam and is recorded as an
    /// intersection node; the AEL itself is reordered later, one node at a
    /// time, so crossing edges are always adjacent when processed.
    fn build_intersect_list(&mut self, top_y: i64) -> bool {
        if self.ael_first == INVALID
            || self.actives[self.ael_first as usize].next_in_ael == INVALID
        {
            return false;
        }
        self.adjust_curr_x_and_copy_to_sel(top_y);

        let mut left = self.sel_first;
        while self.actives[left as usize].jump != INVALID {
            let mut prev_base = INVALID;
            while left != INVALID && self.actives[left as usize].jump != INVALID {
                let mut curr_base = left;
                let mut right = self.actives[left as usize].jump;
                let mut l_end = right;
                let r_end = self.actives[right as usize].jump;
                self.actives[left as usize].jump = r_end;
                while left != l_end && right != r_end {
                    if self.actives[right as usize].cur_x < self.actives[left as usize].cur_x {
                        // a crossing: record intersections against everything
                        // from here back to `left`
                        let mut tmp = self.actives[right as usize].prev_in_sel;
                        loop {
                            self.add_new_intersect_node(tmp, right, top_y);
                            if tmp == left {
                                break;
                            }
                            tmp = self.actives[tmp as usize].prev_in_sel;
                        }
                        let tmp = right;
                        right = self.extract_from_sel(tmp);
                        l_end = right;
                        self.insert1_before2_in_sel(tmp, left);
                        if left == curr_base {
                            curr_base = tmp;
                            self.actives[curr_base as usize].jump = r_end;
                            if prev_base == INVALID {
                                self.sel_first = curr_base;
                            } else {
                                self.actives[prev_base as usize].jump = curr_base;
                            }
                        }
                    } else {
                        left = self.actives[left as usize].next_in_sel;
                    }
                }
                prev_base = curr_base;
                left = r_end;
            }
            left = self.sel_first;
        }
        !self.intersect_list.is_empty()
    }

    fn extract_from_sel(&mut self, e: ActiveIdx) -> ActiveIdx {
        let next = self.actives[e as usize].next_in_sel;
        let prev = self.actives[e as usize].prev_in_sel;
        if next != INVALID {
            self.actives[next as usize].prev_in_sel = prev;
        }
        self.actives[prev as usize].next_in_sel = next;
        next
    }

    fn insert1_before2_in_sel(&mut self, e1: ActiveIdx, e2: ActiveIdx) {
        let prev = self.actives[e2 as usize].prev_in_sel;
        self.actives[e1 as usize].prev_in_sel = prev;
        if prev != INVALID {
            self.actives[prev as usize].next_in_sel = e1;
        }
        self.actives[e1 as usize].next_in_sel = e2;
        self.actives[e2 as usize].prev_in_sel = e1;
    }

    fn add_new_intersect_node(&mut self, e1: ActiveIdx, e2: ActiveIdx, top_y: i64) {
        let (b1, t1, dx1, cx1) = {
            let a = &self.actives[e1 as usize];
            (a.bot, a.top, a.dx, a.cur_x)
        };
        let (b2, t2, dx2) = {
            let a = &self.actives[e2 as usize];
            (a.bot, a.top, a.dx)
        };
        let mut ip =
            get_intersect_point(b1, t1, b2, t2).unwrap_or_else(|| Point64::new(cx1, top_y));

        // rounding can land the intersection just outside the scanbeam;
        // nudge it back in, preferring the less horizontal edge
        if ip.y > self.curr_bot_y || ip.y < top_y {
            let abs_dx1 = dx1.abs();
            let abs_dx2 = dx2.abs();
            if abs_dx1 > 100.0 && abs_dx2 > 100.0 {
                if abs_dx1 > abs_dx2 {
                    ip = get_closest_pt_on_segment(ip, b1, t1);
                } else {
                    ip = get_closest_pt_on_segment(ip, b2, t2);
                }
            } else if abs_dx1 > 100.0 {
                ip = get_closest_pt_on_segment(ip, b1, t1);
            } else if abs_dx2 > 100.0 {
                ip = get_closest_pt_on_segment(ip, b2, t2);
            } else {
                if ip.y < top_y {
                    ip.y = top_y;
                } else {
                    ip.y = self.curr_bot_y;
                }
                if abs_dx1 < abs_dx2 {
                    ip.x = self.top_x(e1, ip.y);
                } else {
                    ip.x = self.top_x(e2, ip.y);
                }
            }
        }
        self.intersect_list.push(IntersectNode { pt: ip, edge1: e1, edge2: e2 });
    }

    fn edges_adjacent_in_ael(&self, i: usize) -> bool {
        let n = &self.intersect_list[i];
        self.actives[n.edge1 as usize].next_in_ael == n.edge2
            || self.actives[n.edge1 as usize].prev_in_ael == n.edge2
    }

    fn process_intersect_list(&mut self) {
        // apply bottom-up (Y desc, then X asc) so lower intersections never
        // invalidate the pending ones above them
        self.intersect_list.sort_by(|a, b| {
            if a.pt.y == b.pt.y {
                a.pt.x.cmp(&b.pt.x)
            } else if a.pt.y > b.pt.y {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });

        for i in 0..self.intersect_list.len() {
            if !self.edges_adjacent_in_ael(i) {
                // find the next node whose edges are adjacent and do it first
                let mut j = i + 1;
                loop {
                    if j == self.intersect_list.len() {
                        // the adjacency invariant is broken; give up rather
                        // than emit garbage
                        self.succeeded = false;
                        return;
                    }
                    if self.edges_adjacent_in_ael(j) {
                        break;
                    }
                    j += 1;
                }
                self.intersect_list.swap(i, j);
            }

            let (e1, e2, pt) = {
                let n = &self.intersect_list[i];
                (n.edge1, n.edge2, n.pt)
            };
            self.intersect_edges(e1, e2, pt);
            self.swap_positions_in_ael(e1, e2);
            self.actives[e1 as usize].cur_x = pt.x;
            self.actives[e2 as usize].cur_x = pt.x;
            self.check_join_left(e2, pt, true);
            self.check_join_right(e1, pt, true);
        }
    }

    // ─────── Horizontals ──────────────────────────────────────────────────

    fn trim_horz(&mut self, horz: ActiveIdx, preserve_collinear: bool) {
        let mut was_trimmed = false;
        let mut pt = self.vertex_pt(self.next_vertex(horz));
        while pt.y == self.actives[horz as usize].top.y {
            // always trim 180 degree spikes (in closed paths),
            // otherwise break if preserve_collinear = true
            if preserve_collinear
                && (pt.x < self.actives[horz as usize].top.x)
                    != (self.actives[horz as usize].bot.x < self.actives[horz as usize].top.x)
            {
                break;
            }
            let vt = self.next_vertex(horz);
            self.actives[horz as usize].vertex_top = vt;
            self.actives[horz as usize].top = pt;
            was_trimmed = true;
            if self.is_maxima(horz) {
                break;
            }
            pt = self.vertex_pt(self.next_vertex(horz));
        }
        if was_trimmed {
            self.set_dx(horz); // +/-infinity
        }
    }

    fn reset_horz_direction(&self, horz: ActiveIdx, vertex_max: VertexIdx) -> (bool, i64, i64) {
        let a_bot_x = self.actives[horz as usize].bot.x;
        let a_top_x = self.actives[horz as usize].top.x;
        let cur_x = self.actives[horz as usize].cur_x;
        if a_bot_x == a_top_x {
            // the horizontal edge is going nowhere
            let left_x = cur_x;
            let right_x = cur_x;
            let mut e = self.actives[horz as usize].next_in_ael;
            while e != INVALID && self.actives[e as usize].vertex_top != vertex_max {
                e = self.actives[e as usize].next_in_ael;
            }
            return (e != INVALID, left_x, right_x);
        }
        if cur_x < a_top_x {
            (true, cur_x, a_top_x)
        } else {
            (false, a_top_x, cur_x) // right to left
        }
    }

    fn horz_is_spike(&self, horz: ActiveIdx) -> bool {
        let next_pt = self.vertex_pt(self.next_vertex(horz));
        let a = &self.actives[horz as usize];
        (a.bot.x < a.top.x) != (a.top.x < next_pt.x)
    }

    fn get_curr_y_maxima_vertex(&self, e: ActiveIdx) -> VertexIdx {
        let mut result = self.actives[e as usize].vertex_top;
        if self.actives[e as usize].wind_dx > 0 {
            while self.vertex_pt(self.vertices[result as usize].next)
                .y == self.vertex_pt(result).y
            {
                result = self.vertices[result as usize].next;
            }
        } else {
            while self.vertex_pt(self.vertices[result as usize].prev)
                .y == self.vertex_pt(result).y
            {
                result = self.vertices[result as usize].prev;
            }
        }
        if self.vertices[result as usize].flags & VF_LOCAL_MAX != 0 {
            result
        } else {
            INVALID // not a maxima
        }
    }

    fn get_curr_y_maxima_vertex_open(&self, e: ActiveIdx) -> VertexIdx {
        let mut result = self.actives[e as usize].vertex_top;
        if self.actives[e as usize].wind_dx > 0 {
            loop {
                let next = self.vertices[result as usize].next;
                if self.vertex_pt(next).y != self.vertex_pt(result).y
                    || self.vertices[next as usize].flags & (VF_OPEN_END | VF_LOCAL_MAX) != 0
                {
                    break;
                }
                result = next;
            }
        } else {
            loop {
                let prev = self.vertices[result as usize].prev;
                if self.vertex_pt(prev).y != self.vertex_pt(result).y
                    || self.vertices[prev as usize].flags & (VF_OPEN_END | VF_LOCAL_MAX) != 0
                {
                    break;
                }
                result = prev;
            }
        }
        if self.vertices[result as usize].flags & VF_LOCAL_MAX != 0 {
            result
        } else {
            INVALID // not a maxima
        }
    }

    /// Process a horizontal edge and any consecutive horizontals in its
    /// bound as one unit, intersecting every AEL edge the run crosses.
    fn do_horizontal(&mut self, horz: ActiveIdx) {
        let horz_is_open = self.is_open(horz);
        let y = self.actives[horz as usize].bot.y;

        let vertex_max = if horz_is_open {
            self.get_curr_y_maxima_vertex_open(horz)
        } else {
            self.get_curr_y_maxima_vertex(horz)
        };

        // remove 180 degree spikes and simplify consecutive horizontals
        if vertex_max != INVALID
            && !horz_is_open
            && vertex_max != self.actives[horz as usize].vertex_top
        {
            self.trim_horz(horz, self.preserve_collinear);
        }

        let (mut is_left_to_right, mut left_x, mut right_x) =
            self.reset_horz_direction(horz, vertex_max);

        if self.is_hot(horz) {
            let cur_x = self.actives[horz as usize].cur_x;
            self.add_out_pt(horz, Point64::new(cur_x, y));
        }

        loop {
            // loop through the AEL edges the horizontal crosses
            let mut e = if is_left_to_right {
                self.actives[horz as usize].next_in_ael
            } else {
                self.actives[horz as usize].prev_in_ael
            };
            while e != INVALID {
                if self.actives[e as usize].vertex_top == vertex_max {
                    // do this first!
                    if self.is_hot(horz) && self.is_joined(e) {
                        let e_top = self.actives[e as usize].top;
                        self.split(e, e_top);
                    }
                    if self.is_hot(horz) {
                        while self.actives[horz as usize].vertex_top != vertex_max {
                            let horz_top = self.actives[horz as usize].top;
                            self.add_out_pt(horz, horz_top);
                            self.update_edge_into_ael(horz);
                        }
                        let horz_top = self.actives[horz as usize].top;
                        if is_left_to_right {
                            self.add_local_max_poly(horz, e, horz_top);
                        } else {
                            self.add_local_max_poly(e, horz, horz_top);
                        }
                    }
                    self.delete_from_ael(e);
                    self.delete_from_ael(horz);
                    return;
                }

                // if horz is a maxima, keep going until the maxima pair,
                // otherwise check for break conditions
                if vertex_max != self.actives[horz as usize].vertex_top || self.is_open_end(horz)
                {
                    // stop when e is past the end of the horizontal run
                    let e_cur_x = self.actives[e as usize].cur_x;
                    if (is_left_to_right && e_cur_x > right_x)
                        || (!is_left_to_right && e_cur_x < left_x)
                    {
                        break;
                    }
                    if e_cur_x == self.actives[horz as usize].top.x && !self.is_horizontal(e) {
                        let pt = self.vertex_pt(self.next_vertex(horz));
                        // to keep as many open edges in the solution as
                        // possible, only break when e is truly past the end
                        if self.is_open(e) && !self.is_same_poly_type(e, horz) && !self.is_hot(e)
                        {
                            if (is_left_to_right && self.top_x(e, pt.y) > pt.x)
                                || (!is_left_to_right && self.top_x(e, pt.y) < pt.x)
                            {
                                break;
                            }
                        } else if (is_left_to_right && self.top_x(e, pt.y) >= pt.x)
                            || (!is_left_to_right && self.top_x(e, pt.y) <= pt.x)
                        {
                            break;
                        }
                    }
                }

                let pt = Point64::new(self.actives[e as usize].cur_x, y);
                if is_left_to_right {
                    self.intersect_edges(horz, e, pt);
                    self.swap_positions_in_ael(horz, e);
                    self.actives[horz as usize].cur_x = pt.x;
                    e = self.actives[horz as usize].next_in_ael;
                } else {
                    self.intersect_edges(e, horz, pt);
                    self.swap_positions_in_ael(e, horz);
                    self.actives[horz as usize].cur_x = pt.x;
                    e = self.actives[horz as usize].prev_in_ael;
                }
            } // end of this horizontal

            // is the horizontal open at its top?
            if horz_is_open && self.is_open_end(horz) {
                if self.is_hot(horz) {
                    let horz_top = self.actives[horz as usize].top;
                    self.add_out_pt(horz, horz_top);
                    let outrec = self.actives[horz as usize].outrec;
                    if self.is_front(horz) {
                        self.outrecs[outrec as usize].front_edge = INVALID;
                    } else {
                        self.outrecs[outrec as usize].back_edge = INVALID;
                    }
                    self.actives[horz as usize].outrec = INVALID;
                }
                self.delete_from_ael(horz);
                return;
            }

            if self.vertex_pt(self.next_vertex(horz)).y != self.actives[horz as usize].top.y {
                break;
            }

            // still more horizontals in this bound
            if self.is_hot(horz) {
                let horz_top = self.actives[horz as usize].top;
                self.add_out_pt(horz, horz_top);
            }
            self.update_edge_into_ael(horz);
            if self.preserve_collinear && !horz_is_open && self.horz_is_spike(horz) {
                self.trim_horz(horz, true);
            }
            let dir = self.reset_horz_direction(horz, vertex_max);
            is_left_to_right = dir.0;
            left_x = dir.1;
            right_x = dir.2;
        }

        // this is the end of an intermediate horizontal
        if self.is_hot(horz) {
            let horz_top = self.actives[horz as usize].top;
            self.add_out_pt(horz, horz_top);
        }
        self.update_edge_into_ael(horz);
    }

    // ─────── Scanbeam top ─────────────────────────────────────────────────

    fn do_top_of_scanbeam(&mut self, y: i64) {
        self.sel_first = INVALID; // the SEL is reused as the horizontal stack
        let mut e = self.ael_first;
        while e != INVALID {
            // e will never be horizontal here
            if self.actives[e as usize].top.y == y {
                self.actives[e as usize].cur_x = self.actives[e as usize].top.x;
                if self.is_maxima(e) {
                    e = self.do_maxima(e); // top of bound (maxima)
                    continue;
                }
                // an intermediate vertex
                if self.is_hot(e) {
                    let top = self.actives[e as usize].top;
                    self.add_out_pt(e, top);
                }
                self.update_edge_into_ael(e);
                if self.is_horizontal(e) {
                    self.push_horz(e); // horizontals are processed later
                }
            } else {
                self.actives[e as usize].cur_x = self.top_x(e, y);
            }
            e = self.actives[e as usize].next_in_ael;
        }
    }

    fn do_maxima(&mut self, e: ActiveIdx) -> ActiveIdx {
        let prev_e = self.actives[e as usize].prev_in_ael;
        let mut next_e = self.actives[e as usize].next_in_ael;

        if self.is_open_end(e) {
            if self.is_hot(e) {
                let top = self.actives[e as usize].top;
                self.add_out_pt(e, top);
            }
            if !self.is_horizontal(e) {
                if self.is_hot(e) {
                    let outrec = self.actives[e as usize].outrec;
                    if self.is_front(e) {
                        self.outrecs[outrec as usize].front_edge = INVALID;
                    } else {
                        self.outrecs[outrec as usize].back_edge = INVALID;
                    }
                    self.actives[e as usize].outrec = INVALID;
                }
                self.delete_from_ael(e);
            }
            return next_e;
        }

        let max_pair = self.get_maxima_pair(e);
        if max_pair == INVALID {
            return next_e; // the maxima pair is horizontal
        }

        if self.is_joined(e) {
            let top = self.actives[e as usize].top;
            self.split(e, top);
        }
        if self.is_joined(max_pair) {
            let top = self.actives[max_pair as usize].top;
            self.split(max_pair, top);
        }

        // only non-horizontal maxima here: process any edges between the
        // maxima pair
        while next_e != max_pair {
            let top = self.actives[e as usize].top;
            self.intersect_edges(e, next_e, top);
            self.swap_positions_in_ael(e, next_e);
            next_e = self.actives[e as usize].next_in_ael;
            if next_e == INVALID {
                // the pair vanished from the AEL: the topology is broken
                self.succeeded = false;
                return INVALID;
            }
        }

        if self.is_open(e) {
            if self.is_hot(e) {
                let top = self.actives[e as usize].top;
                self.add_local_max_poly(e, max_pair, top);
            }
            self.delete_from_ael(max_pair);
            self.delete_from_ael(e);
            return if prev_e != INVALID {
                self.actives[prev_e as usize].next_in_ael
            } else {
                self.ael_first
            };
        }

        // here e.next_in_ael == max_pair
        if self.is_hot(e) {
            let top = self.actives[e as usize].top;
            self.add_local_max_poly(e, max_pair, top);
        }
        self.delete_from_ael(e);
        self.delete_from_ael(max_pair);
        if prev_e != INVALID {
            self.actives[prev_e as usize].next_in_ael
        } else {
            self.ael_first
        }
    }
}

mod output;
