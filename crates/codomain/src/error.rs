//! Chain error types.

use thiserror::Error;

use crate::context::MapKind;

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can occur while configuring a codomain chain.
///
/// All errors are raised before any chain state is mutated, so a failed
/// call leaves the chain exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Interval bounds rejected at construction or [`set_interval`].
    ///
    /// [`set_interval`]: crate::CodomainChain::set_interval
    #[error("invalid codomain interval [{start}, {end}]")]
    InvalidInterval {
        /// Requested lower bound.
        start: i32,
        /// Requested upper bound.
        end: i32,
    },

    /// A context of this kind is already installed (at most one per kind).
    #[error("a {0} context is already installed")]
    DuplicateContext(MapKind),

    /// No context of this kind is installed (raised by `update`).
    #[error("no {0} context is installed")]
    ContextNotFound(MapKind),

    /// The identity context is managed internally and cannot be
    /// added, updated, or removed by the caller.
    #[error("the identity context is managed by the chain")]
    IdentityManaged,

    /// Contrast-stretching pivot abscissas are not strictly increasing.
    #[error("invalid stretch pivots: x_start {x_start} must be < x_end {x_end}")]
    InvalidPivots {
        /// Abscissa of the first pivot.
        x_start: i32,
        /// Abscissa of the second pivot.
        x_end: i32,
    },

    /// Plane-slicing clamp levels are inverted or outside the domain.
    #[error("invalid slicing limits: [{lower}, {upper}]")]
    InvalidLimits {
        /// Requested lower clamp level.
        lower: i32,
        /// Requested upper clamp level.
        upper: i32,
    },
}
