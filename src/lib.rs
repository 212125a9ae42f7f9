// clip2-rust: 2D polygon clipping and offsetting over robust integer coordinates
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod engine;
pub mod error;
pub mod geom;
pub mod minkowski;
pub mod offset;
pub mod ops;
pub mod polytree;
pub mod rectclip;
pub mod vertex;

pub use engine::Clipper64;
pub use error::ClipError;
pub use geom::{
    ClipType, EndType, FillRule, JoinType, Path64, PathD, PathType, Paths64, PathsD, Point64,
    PointD, PointInPolygonResult, Rect64, RectD,
};
pub use offset::{inflate_paths, inflate_paths_d, ClipperOffset};
pub use ops::{
    boolean_op, boolean_op_d, boolean_op_tree, difference, difference_d, intersect, intersect_d,
    union, union_d, xor, xor_d,
};
pub use polytree::PolyTree64;
pub use rectclip::{rect_clip, rect_clip_d, rect_clip_lines, RectClip64, RectClipLines64};
