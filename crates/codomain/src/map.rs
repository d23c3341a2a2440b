//! Per-kind transform functions.
//!
//! Each function maps one input value through one step of the chain. They
//! are pure: all state lives in the context structs, and the input is
//! assumed to be clamped to the active interval already (the chain
//! guarantees this, both while building the LUT and in `transform`).

use crate::context::{ContrastStretchingContext, PlaneSlicingContext, ReverseIntensityContext};

/// Pass-through, `y = x`.
#[inline]
pub fn identity(x: i32) -> i32 {
    x
}

/// Intensity reversal, `y = interval_end - x`.
///
/// Applying the step twice restores the input.
#[inline]
pub fn reverse_intensity(ctx: &ReverseIntensityContext, x: i32) -> i32 {
    ctx.interval_end - x
}

/// Bit-plane isolation.
///
/// Constant mode collapses values outside the selected plane to the two
/// clamp levels; non-constant mode highlights the plane's range and passes
/// everything else through.
#[inline]
pub fn plane_slicing(ctx: &PlaneSlicingContext, x: i32) -> i32 {
    if ctx.constant {
        if x < ctx.plane_selected {
            ctx.lower_limit
        } else if x > ctx.plane_selected + 1 {
            ctx.upper_limit
        } else {
            ctx.plane_selected
        }
    } else if x > ctx.plane_previous && x <= ctx.plane_selected {
        ctx.plane_selected
    } else {
        x
    }
}

/// Three-segment piecewise-linear contrast stretch.
///
/// Selects the segment containing `x` (shadows below `x_start`, midtones
/// up to `x_end`, highlights above) and applies its line, truncating to
/// integer.
#[inline]
pub fn contrast_stretching(ctx: &ContrastStretchingContext, x: i32) -> i32 {
    let (a, b) = if x < ctx.x_start {
        (ctx.a0, ctx.b0)
    } else if x < ctx.x_end {
        (ctx.a1, ctx.b1)
    } else {
        (ctx.a2, ctx.b2)
    };
    (a * f64::from(x) + b) as i32
}
