// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vertex rings and local minima.
//
// Each input path becomes a circular doubly-linked ring of Vertex nodes.
// All links are u32 indices into one growable arena (INVALID = u32::MAX is
// the null link), so rings are cheap to build and to drop wholesale.
// Every descend→ascend turn of a ring is recorded as a local minimum; the
// flat minima list seeds the sweep. "Up" means decreasing Y (Y grows
// downward), so a local minimum sits at a locally largest Y.

use crate::geom::{Path64, PathType, Point64};

pub const INVALID: u32 = u32::MAX;

/// Index into the vertex arena.
pub type VertexIdx = u32;

pub const VF_OPEN_START: u8 = 1;
pub const VF_OPEN_END: u8 = 2;
pub const VF_LOCAL_MAX: u8 = 4;
pub const VF_LOCAL_MIN: u8 = 8;

#[derive(Clone, Debug)]
pub struct Vertex {
    pub pt: Point64,
    pub prev: VertexIdx,
    pub next: VertexIdx,
    pub flags: u8,
}

/// One seed for the sweep: a LOCAL_MIN vertex plus the operand role of its
/// path. Collected flat; sorted by Y before the sweep starts.
#[derive(Clone, Copy, Debug)]
pub struct LocalMinima {
    pub vertex: VertexIdx,
    pub poly_type: PathType,
    pub is_open: bool,
}

#[inline]
fn add_loc_min(
    vertices: &mut [Vertex],
    minima: &mut Vec<LocalMinima>,
    vert: VertexIdx,
    poly_type: PathType,
    is_open: bool,
) {
    // a vertex can seed at most one minimum
    if vertices[vert as usize].flags & VF_LOCAL_MIN != 0 {
        return;
    }
    vertices[vert as usize].flags |= VF_LOCAL_MIN;
    minima.push(LocalMinima { vertex: vert, poly_type, is_open });
}

/// Build vertex rings for `paths`, appending nodes to `vertices` and local
/// minima to `minima`. Consecutive duplicate points are skipped and a
/// repeated closing point is dropped. Fully flat closed paths contribute
/// nothing; flat open paths are kept and flagged OPEN_START/OPEN_END.
pub fn build_paths(
    vertices: &mut Vec<Vertex>,
    minima: &mut Vec<LocalMinima>,
    paths: &[Path64],
    poly_type: PathType,
    is_open: bool,
) {
    for path in paths {
        let mut v0: VertexIdx = INVALID;
        let mut prev_v: VertexIdx = INVALID;
        for &pt in path {
            if v0 == INVALID {
                v0 = vertices.len() as VertexIdx;
                vertices.push(Vertex { pt, prev: INVALID, next: INVALID, flags: 0 });
                prev_v = v0;
            } else if vertices[prev_v as usize].pt != pt {
                let curr = vertices.len() as VertexIdx;
                vertices.push(Vertex { pt, prev: prev_v, next: INVALID, flags: 0 });
                vertices[prev_v as usize].next = curr;
                prev_v = curr;
            }
        }
        // need at least two distinct points
        if prev_v == INVALID || vertices[prev_v as usize].prev == INVALID {
            continue;
        }
        if !is_open && vertices[prev_v as usize].pt == vertices[v0 as usize].pt {
            prev_v = vertices[prev_v as usize].prev;
        }
        vertices[prev_v as usize].next = v0;
        vertices[v0 as usize].prev = prev_v;
        if !is_open && prev_v == v0 {
            continue;
        }

        // find the first genuine ascend or descend
        let mut going_up;
        if is_open {
            let mut curr = vertices[v0 as usize].next;
            while curr != v0 && vertices[curr as usize].pt.y == vertices[v0 as usize].pt.y {
                curr = vertices[curr as usize].next;
            }
            going_up = vertices[curr as usize].pt.y <= vertices[v0 as usize].pt.y;
            if going_up {
                vertices[v0 as usize].flags = VF_OPEN_START;
                add_loc_min(vertices, minima, v0, poly_type, true);
            } else {
                vertices[v0 as usize].flags = VF_OPEN_START | VF_LOCAL_MAX;
            }
        } else {
            let mut prev = vertices[v0 as usize].prev;
            while prev != v0 && vertices[prev as usize].pt.y == vertices[v0 as usize].pt.y {
                prev = vertices[prev as usize].prev;
            }
            if prev == v0 {
                continue; // only open paths may be completely flat
            }
            going_up = vertices[prev as usize].pt.y > vertices[v0 as usize].pt.y;
        }

        let going_up0 = going_up;
        let mut prev_v = v0;
        let mut curr_v = vertices[v0 as usize].next;
        while curr_v != v0 {
            if vertices[curr_v as usize].pt.y > vertices[prev_v as usize].pt.y && going_up {
                vertices[prev_v as usize].flags |= VF_LOCAL_MAX;
                going_up = false;
            } else if vertices[curr_v as usize].pt.y < vertices[prev_v as usize].pt.y && !going_up
            {
                going_up = true;
                add_loc_min(vertices, minima, prev_v, poly_type, is_open);
            }
            prev_v = curr_v;
            curr_v = vertices[curr_v as usize].next;
        }

        if is_open {
            vertices[prev_v as usize].flags |= VF_OPEN_END;
            if going_up {
                vertices[prev_v as usize].flags |= VF_LOCAL_MAX;
            } else {
                add_loc_min(vertices, minima, prev_v, poly_type, is_open);
            }
        } else if going_up != going_up0 {
            if going_up0 {
                add_loc_min(vertices, minima, prev_v, poly_type, false);
            } else {
                vertices[prev_v as usize].flags |= VF_LOCAL_MAX;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::path64_from_flat;

    fn build(paths: &[Path64], is_open: bool) -> (Vec<Vertex>, Vec<LocalMinima>) {
        let mut vertices = Vec::new();
        let mut minima = Vec::new();
        build_paths(&mut vertices, &mut minima, paths, PathType::Subject, is_open);
        (vertices, minima)
    }

    #[test]
    fn square_has_one_minimum_and_one_maximum() {
        let sq = path64_from_flat(&[0i64, 0, 10, 0, 10, 10, 0, 10]);
        let (vertices, minima) = build(&[sq], false);
        assert_eq!(minima.len(), 1);
        let max_count = vertices.iter().filter(|v| v.flags & VF_LOCAL_MAX != 0).count();
        assert_eq!(max_count, 1);
        // the minimum sits at the largest Y of the ring
        let min_y = vertices[minima[0].vertex as usize].pt.y;
        assert_eq!(min_y, 10);
    }

    #[test]
    fn w_shape_has_two_minima() {
        // zig-zag with two bottom spikes
        let w = path64_from_flat(&[0i64, 0, 2, 8, 4, 4, 6, 8, 8, 0]);
        let (_, minima) = build(&[w], false);
        assert_eq!(minima.len(), 2);
    }

    #[test]
    fn flat_closed_path_is_rejected() {
        let flat = path64_from_flat(&[0i64, 5, 10, 5, 20, 5]);
        let (_, minima) = build(&[flat], false);
        assert!(minima.is_empty());
    }

    #[test]
    fn flat_open_path_is_kept() {
        let flat = path64_from_flat(&[0i64, 5, 10, 5, 20, 5]);
        let (vertices, minima) = build(&[flat], true);
        assert_eq!(minima.len(), 1);
        assert!(vertices.iter().any(|v| v.flags & VF_OPEN_START != 0));
        assert!(vertices.iter().any(|v| v.flags & VF_OPEN_END != 0));
    }

    #[test]
    fn duplicate_points_are_skipped() {
        let p = path64_from_flat(&[0i64, 0, 0, 0, 10, 0, 10, 10, 10, 10, 0, 10, 0, 0]);
        let (vertices, minima) = build(&[p], false);
        assert_eq!(minima.len(), 1);
        // ring length is 4 after dedup and closing-point removal
        let start = minima[0].vertex;
        let mut n = 1;
        let mut v = vertices[start as usize].next;
        while v != start {
            n += 1;
            v = vertices[v as usize].next;
        }
        assert_eq!(n, 4);
    }

    #[test]
    fn degenerate_paths_contribute_nothing() {
        let single = path64_from_flat(&[3i64, 3]);
        let twin = path64_from_flat(&[3i64, 3, 3, 3]);
        let (_, minima) = build(&[single, twin, Path64::new()], false);
        assert!(minima.is_empty());
    }
}
