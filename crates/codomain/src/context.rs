//! Transform step configuration.
//!
//! Each transform step in a chain is described by a context: the parameters
//! chosen by the caller plus derived state recomputed from them and from the
//! current codomain bounds. Contexts are plain values; installing one in a
//! chain moves it in, so a caller-held copy can never mutate an installed
//! step behind the chain's back.
//!
//! Derived state (plane values, segment coefficients) is refreshed by
//! [`CodomainContext::build`], which the chain calls after every bounds
//! change. [`CodomainContext::set_codomain`] only stores the bounds.

use std::fmt;

use crate::chain::{MAX, MIN};
use crate::error::{ChainError, ChainResult};
use crate::map;

/// Identifies a transform kind.
///
/// Kind doubles as the identity of a step: a chain holds at most one
/// context per kind, and `update`/`remove` match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Pass-through (the chain's built-in sentinel).
    Identity,
    /// Intensity reversal, `y = end - x`.
    ReverseIntensity,
    /// Bit-plane isolation.
    PlaneSlicing,
    /// Piecewise-linear contrast stretch.
    ContrastStretching,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::ReverseIntensity => f.write_str("reverse-intensity"),
            Self::PlaneSlicing => f.write_str("plane-slicing"),
            Self::ContrastStretching => f.write_str("contrast-stretching"),
        }
    }
}

/// One bit position of an 8-bit intensity value.
///
/// Plane slicing treats each bit position as an independent binary layer.
/// The plane value of `BitN` is `2^N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitPlane {
    /// Bit 0, plane value 1.
    Bit0,
    /// Bit 1, plane value 2.
    Bit1,
    /// Bit 2, plane value 4.
    Bit2,
    /// Bit 3, plane value 8.
    Bit3,
    /// Bit 4, plane value 16.
    Bit4,
    /// Bit 5, plane value 32.
    Bit5,
    /// Bit 6, plane value 64.
    Bit6,
    /// Bit 7, plane value 128.
    Bit7,
}

impl BitPlane {
    /// Bit position, `0..=7`.
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Self::Bit0 => 0,
            Self::Bit1 => 1,
            Self::Bit2 => 2,
            Self::Bit3 => 3,
            Self::Bit4 => 4,
            Self::Bit5 => 5,
            Self::Bit6 => 6,
            Self::Bit7 => 7,
        }
    }

    /// Intensity value of this plane, `2^index`.
    #[inline]
    pub fn plane_value(self) -> i32 {
        1 << self.index()
    }

    /// Intensity value of the plane below, `0` for [`BitPlane::Bit0`].
    #[inline]
    pub fn previous_value(self) -> i32 {
        self.plane_value() >> 1
    }
}

/// Parameters for the reverse-intensity step.
///
/// Carries no caller-chosen parameters; the transform only needs the
/// current codomain bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseIntensityContext {
    pub(crate) interval_start: i32,
    pub(crate) interval_end: i32,
}

impl ReverseIntensityContext {
    /// Creates a reverse-intensity context bound to the default domain.
    pub fn new() -> Self {
        Self {
            interval_start: MIN,
            interval_end: MAX,
        }
    }

    pub(crate) fn set_codomain(&mut self, start: i32, end: i32) {
        self.interval_start = start;
        self.interval_end = end;
    }
}

impl Default for ReverseIntensityContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the plane-slicing step.
///
/// Isolates one bit plane of the intensity values. In constant mode every
/// value outside the selected plane collapses to `lower_limit` or
/// `upper_limit`; in non-constant mode values outside the plane's range
/// pass through unchanged.
///
/// # Example
///
/// ```rust
/// use codomain::{BitPlane, PlaneSlicingContext};
///
/// let ctx = PlaneSlicingContext::new(BitPlane::Bit2, true);
/// assert_eq!(ctx.bit_plane(), BitPlane::Bit2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneSlicingContext {
    pub(crate) bit_plane: BitPlane,
    pub(crate) constant: bool,
    pub(crate) lower_limit: i32,
    pub(crate) upper_limit: i32,
    // Derived from bit_plane by build().
    pub(crate) plane_selected: i32,
    pub(crate) plane_previous: i32,
    pub(crate) interval_start: i32,
    pub(crate) interval_end: i32,
}

impl PlaneSlicingContext {
    /// Creates a plane-slicing context with clamp levels at the domain
    /// bounds.
    pub fn new(bit_plane: BitPlane, constant: bool) -> Self {
        let mut ctx = Self {
            bit_plane,
            constant,
            lower_limit: MIN,
            upper_limit: MAX,
            plane_selected: 0,
            plane_previous: 0,
            interval_start: MIN,
            interval_end: MAX,
        };
        ctx.build();
        ctx
    }

    /// Creates a plane-slicing context with explicit clamp levels for
    /// constant mode.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidLimits`] if the levels are inverted or fall
    /// outside the global domain.
    pub fn with_limits(
        bit_plane: BitPlane,
        constant: bool,
        lower_limit: i32,
        upper_limit: i32,
    ) -> ChainResult<Self> {
        if lower_limit > upper_limit || lower_limit < MIN || upper_limit > MAX {
            return Err(ChainError::InvalidLimits {
                lower: lower_limit,
                upper: upper_limit,
            });
        }
        let mut ctx = Self::new(bit_plane, constant);
        ctx.lower_limit = lower_limit;
        ctx.upper_limit = upper_limit;
        Ok(ctx)
    }

    /// Selected bit plane.
    pub fn bit_plane(&self) -> BitPlane {
        self.bit_plane
    }

    /// Whether constant mode is active.
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Clamp level for values below the selected plane (constant mode).
    pub fn lower_limit(&self) -> i32 {
        self.lower_limit
    }

    /// Clamp level for values above the selected plane (constant mode).
    pub fn upper_limit(&self) -> i32 {
        self.upper_limit
    }

    pub(crate) fn set_codomain(&mut self, start: i32, end: i32) {
        self.interval_start = start;
        self.interval_end = end;
    }

    pub(crate) fn build(&mut self) {
        self.plane_selected = self.bit_plane.plane_value();
        self.plane_previous = self.bit_plane.previous_value();
    }
}

/// Parameters for the contrast-stretching step.
///
/// Two pivot points split the interval into three linear segments:
/// shadows `[start, x_start)`, midtones `[x_start, x_end)`, and highlights
/// `[x_end, end]`. Each segment has its own slope and intercept, derived
/// by `build` from the pivots and the current bounds.
///
/// # Example
///
/// ```rust
/// use codomain::ContrastStretchingContext;
///
/// // Steepen the midtones between 64 and 192.
/// let ctx = ContrastStretchingContext::new((64, 32), (192, 224)).unwrap();
/// assert_eq!(ctx.x_start(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastStretchingContext {
    pub(crate) x_start: i32,
    pub(crate) y_start: i32,
    pub(crate) x_end: i32,
    pub(crate) y_end: i32,
    // Segment coefficients, derived by build().
    pub(crate) a0: f64,
    pub(crate) b0: f64,
    pub(crate) a1: f64,
    pub(crate) b1: f64,
    pub(crate) a2: f64,
    pub(crate) b2: f64,
    pub(crate) interval_start: i32,
    pub(crate) interval_end: i32,
}

impl ContrastStretchingContext {
    /// Creates a contrast-stretching context from its two pivot points
    /// `(x_start, y_start)` and `(x_end, y_end)`.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidPivots`] if `x_start >= x_end`.
    pub fn new(start: (i32, i32), end: (i32, i32)) -> ChainResult<Self> {
        let (x_start, y_start) = start;
        let (x_end, y_end) = end;
        if x_start >= x_end {
            return Err(ChainError::InvalidPivots { x_start, x_end });
        }
        let mut ctx = Self {
            x_start,
            y_start,
            x_end,
            y_end,
            a0: 0.0,
            b0: 0.0,
            a1: 0.0,
            b1: 0.0,
            a2: 0.0,
            b2: 0.0,
            interval_start: MIN,
            interval_end: MAX,
        };
        ctx.build();
        Ok(ctx)
    }

    /// Abscissa of the first pivot.
    pub fn x_start(&self) -> i32 {
        self.x_start
    }

    /// Ordinate of the first pivot.
    pub fn y_start(&self) -> i32 {
        self.y_start
    }

    /// Abscissa of the second pivot.
    pub fn x_end(&self) -> i32 {
        self.x_end
    }

    /// Ordinate of the second pivot.
    pub fn y_end(&self) -> i32 {
        self.y_end
    }

    pub(crate) fn set_codomain(&mut self, start: i32, end: i32) {
        self.interval_start = start;
        self.interval_end = end;
    }

    pub(crate) fn build(&mut self) {
        (self.a0, self.b0) = segment(
            self.interval_start,
            self.interval_start,
            self.x_start,
            self.y_start,
        );
        (self.a1, self.b1) = segment(self.x_start, self.y_start, self.x_end, self.y_end);
        (self.a2, self.b2) = segment(self.x_end, self.y_end, self.interval_end, self.interval_end);
    }
}

/// Slope/intercept of the line through `(x0, y0)` and `(x1, y1)`.
///
/// A pivot sitting on an interval bound makes the segment empty; it
/// degenerates to a flat line at the pivot ordinate rather than dividing
/// by zero.
fn segment(x0: i32, y0: i32, x1: i32, y1: i32) -> (f64, f64) {
    if x0 == x1 {
        return (0.0, f64::from(y1));
    }
    let a = f64::from(y1 - y0) / f64::from(x1 - x0);
    let b = f64::from(y0) - a * f64::from(x0);
    (a, b)
}

/// Configuration for one transform step of a chain.
///
/// A tagged sum over the per-kind parameter structs. The chain folds input
/// values through installed contexts in insertion order via
/// [`evaluate`](Self::evaluate).
#[derive(Debug, Clone, PartialEq)]
pub enum CodomainContext {
    /// Pass-through. Always installed as the chain's first step and
    /// managed internally; callers cannot add or remove it.
    Identity,
    /// Intensity reversal.
    ReverseIntensity(ReverseIntensityContext),
    /// Bit-plane isolation.
    PlaneSlicing(PlaneSlicingContext),
    /// Piecewise-linear contrast stretch.
    ContrastStretching(ContrastStretchingContext),
}

impl CodomainContext {
    /// The kind tag identifying this context within a chain.
    pub fn kind(&self) -> MapKind {
        match self {
            Self::Identity => MapKind::Identity,
            Self::ReverseIntensity(_) => MapKind::ReverseIntensity,
            Self::PlaneSlicing(_) => MapKind::PlaneSlicing,
            Self::ContrastStretching(_) => MapKind::ContrastStretching,
        }
    }

    /// Stores new codomain bounds.
    ///
    /// Derived state is not recomputed here; call [`build`](Self::build)
    /// afterwards.
    pub fn set_codomain(&mut self, start: i32, end: i32) {
        match self {
            Self::Identity => {}
            Self::ReverseIntensity(ctx) => ctx.set_codomain(start, end),
            Self::PlaneSlicing(ctx) => ctx.set_codomain(start, end),
            Self::ContrastStretching(ctx) => ctx.set_codomain(start, end),
        }
    }

    /// Recomputes derived state from the raw parameters and current bounds.
    pub fn build(&mut self) {
        match self {
            Self::Identity | Self::ReverseIntensity(_) => {}
            Self::PlaneSlicing(ctx) => ctx.build(),
            Self::ContrastStretching(ctx) => ctx.build(),
        }
    }

    /// Applies this step's transform to a value already clamped to the
    /// interval.
    #[inline]
    pub fn evaluate(&self, x: i32) -> i32 {
        match self {
            Self::Identity => map::identity(x),
            Self::ReverseIntensity(ctx) => map::reverse_intensity(ctx, x),
            Self::PlaneSlicing(ctx) => map::plane_slicing(ctx, x),
            Self::ContrastStretching(ctx) => map::contrast_stretching(ctx, x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_plane_values() {
        assert_eq!(BitPlane::Bit0.plane_value(), 1);
        assert_eq!(BitPlane::Bit0.previous_value(), 0);
        assert_eq!(BitPlane::Bit2.plane_value(), 4);
        assert_eq!(BitPlane::Bit2.previous_value(), 2);
        assert_eq!(BitPlane::Bit7.plane_value(), 128);
        assert_eq!(BitPlane::Bit7.previous_value(), 64);
    }

    #[test]
    fn test_plane_slicing_derived_state() {
        let ctx = PlaneSlicingContext::new(BitPlane::Bit4, false);
        assert_eq!(ctx.plane_selected, 16);
        assert_eq!(ctx.plane_previous, 8);
        assert_eq!(ctx.lower_limit(), MIN);
        assert_eq!(ctx.upper_limit(), MAX);
    }

    #[test]
    fn test_plane_slicing_limit_validation() {
        let err = PlaneSlicingContext::with_limits(BitPlane::Bit1, true, 200, 100);
        assert_eq!(
            err,
            Err(ChainError::InvalidLimits {
                lower: 200,
                upper: 100
            })
        );

        let err = PlaneSlicingContext::with_limits(BitPlane::Bit1, true, -1, 100);
        assert!(err.is_err());
        let err = PlaneSlicingContext::with_limits(BitPlane::Bit1, true, 0, 256);
        assert!(err.is_err());
    }

    #[test]
    fn test_pivot_validation() {
        let err = ContrastStretchingContext::new((100, 50), (100, 200));
        assert_eq!(
            err,
            Err(ChainError::InvalidPivots {
                x_start: 100,
                x_end: 100
            })
        );
        assert!(ContrastStretchingContext::new((100, 50), (99, 200)).is_err());
        assert!(ContrastStretchingContext::new((50, 10), (200, 240)).is_ok());
    }

    #[test]
    fn test_stretch_coefficients_follow_bounds() {
        // Pivots chosen so every exercised slope is exactly representable.
        let ctx = ContrastStretchingContext::new((63, 31), (191, 223)).unwrap();
        let mut op = CodomainContext::ContrastStretching(ctx);

        // Pivots map to their ordinates, bounds map to themselves.
        assert_eq!(op.evaluate(0), 0);
        assert_eq!(op.evaluate(63), 31);
        assert_eq!(op.evaluate(191), 223);
        assert_eq!(op.evaluate(255), 255);
        // Midtone segment: 1.5 * 100 - 63.5, truncated.
        assert_eq!(op.evaluate(100), 86);

        // Narrowing the interval moves the outer segments.
        op.set_codomain(0, 207);
        op.build();
        assert_eq!(op.evaluate(63), 31);
        assert_eq!(op.evaluate(207), 207);
        assert_eq!(op.evaluate(200), 214);
    }

    #[test]
    fn test_degenerate_segment_is_flat() {
        // First pivot on the lower bound: shadow segment is empty and
        // must not divide by zero.
        let ctx = ContrastStretchingContext::new((0, 40), (128, 220)).unwrap();
        let op = CodomainContext::ContrastStretching(ctx);
        assert_eq!(op.evaluate(0), 40);
    }

    #[test]
    fn test_context_value_semantics() {
        let original = PlaneSlicingContext::new(BitPlane::Bit3, true);
        let mut copy = original;
        copy.set_codomain(10, 20);
        copy.build();
        // The original is unaffected by mutating the copy.
        assert_eq!(original.interval_start, MIN);
        assert_eq!(original.interval_end, MAX);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(CodomainContext::Identity.kind(), MapKind::Identity);
        assert_eq!(
            CodomainContext::ReverseIntensity(ReverseIntensityContext::new()).kind(),
            MapKind::ReverseIntensity
        );
        assert_eq!(format!("{}", MapKind::PlaneSlicing), "plane-slicing");
    }
}
