//! # codomain
//!
//! Composable codomain remapping for image-rendering pipelines.
//!
//! A rendering engine maps every quantized pixel intensity through a chain
//! of integer-range transforms before the value reaches an output color
//! channel. This crate provides that chain: the transform steps (identity,
//! reverse-intensity, plane-slicing, contrast-stretching), their
//! configuration contexts, and the composition engine that folds them into
//! a single precomputed lookup table.
//!
//! # Design
//!
//! Composing the steps is O(interval size x chain length), so it happens
//! once per configuration change: every mutation of a [`CodomainChain`]
//! rebuilds its LUT synchronously. The per-pixel hot path,
//! [`CodomainChain::transform`], is then a clamp and one array index.
//!
//! # Usage
//!
//! ```rust
//! use codomain::{
//!     BitPlane, CodomainChain, CodomainContext, PlaneSlicingContext,
//!     ReverseIntensityContext,
//! };
//!
//! let mut chain = CodomainChain::new(0, 255)?;
//! chain.add(CodomainContext::ReverseIntensity(
//!     ReverseIntensityContext::new(),
//! ))?;
//! chain.add(CodomainContext::PlaneSlicing(PlaneSlicingContext::new(
//!     BitPlane::Bit6,
//!     false,
//! )))?;
//!
//! // Per-pixel: one table lookup.
//! let y = chain.transform(100);
//! # let _ = y;
//! # Ok::<(), codomain::ChainError>(())
//! ```
//!
//! # Rules
//!
//! - A chain holds at most one step per [`MapKind`]; insertion order is
//!   composition order.
//! - The identity step is always installed first and managed internally.
//! - Installing a context moves it into the chain; later parameter changes
//!   go through [`CodomainChain::update`].
//! - Inputs outside the interval are clamped, never rejected; `transform`
//!   cannot fail.
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Rebuild diagnostics
//! - [`rayon`] - Parallel bulk apply (`parallel` feature, default on)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod chain;
mod context;
mod error;
pub mod map;

pub use chain::{CodomainChain, MAX, MIN};
pub use context::{
    BitPlane, CodomainContext, ContrastStretchingContext, MapKind, PlaneSlicingContext,
    ReverseIntensityContext,
};
pub use error::{ChainError, ChainResult};
