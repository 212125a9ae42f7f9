// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for clipping operations.

use thiserror::Error;

/// Errors that can occur during a clipping, offsetting or scaling operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// Decimal precision outside the supported range.
    #[error("precision must be in the range [-8, 8], got {0}")]
    PrecisionRange(i32),

    /// The sweep encountered an edge configuration that should be impossible
    /// for well-formed input and aborted rather than emit a corrupt result.
    #[error("sweep aborted: inconsistent edge topology")]
    Topology,

    /// The clip rectangle has inverted or zero-extent bounds.
    #[error("invalid clip rectangle")]
    InvalidRect,
}
