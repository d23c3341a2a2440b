//! The codomain chain: ordered transform steps composed into one LUT.
//!
//! Every mutation (`add`, `update`, `remove`, `set_interval`, `reset`)
//! synchronously rebuilds the lookup table before returning, so the table
//! is never stale and [`transform`](CodomainChain::transform) stays a
//! single array index on the per-pixel hot path.

use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::context::{CodomainContext, MapKind};
use crate::error::{ChainError, ChainResult};

/// Lower bound of the global intensity domain.
pub const MIN: i32 = 0;

/// Upper bound of the global intensity domain.
pub const MAX: i32 = 255;

/// An ordered chain of codomain transform steps with a precomputed LUT.
///
/// The chain owns its contexts; installing one moves it in, so callers
/// cannot mutate an installed step afterwards. The identity step is always
/// present as the first element and is managed internally.
///
/// Insertion order is composition order: a newly added step applies last.
/// At most one step of each [`MapKind`] can be installed.
///
/// # Example
///
/// ```rust
/// use codomain::{CodomainChain, CodomainContext, ReverseIntensityContext};
///
/// let mut chain = CodomainChain::new(0, 255)?;
/// assert_eq!(chain.transform(100), 100);
///
/// chain.add(CodomainContext::ReverseIntensity(
///     ReverseIntensityContext::new(),
/// ))?;
/// assert_eq!(chain.transform(100), 155);
/// # Ok::<(), codomain::ChainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CodomainChain {
    interval_start: i32,
    interval_end: i32,
    contexts: Vec<CodomainContext>,
    lut: Vec<i32>,
}

impl CodomainChain {
    /// Creates a chain holding only the identity step.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidInterval`] unless
    /// `MIN <= start < end <= MAX`.
    pub fn new(start: i32, end: i32) -> ChainResult<Self> {
        check_interval(start, end)?;
        let mut chain = Self {
            interval_start: start,
            interval_end: end,
            contexts: vec![CodomainContext::Identity],
            lut: Vec::new(),
        };
        chain.rebuild_lut();
        Ok(chain)
    }

    /// Creates a chain with an initial ordered list of steps.
    ///
    /// Each context is bound to the interval and built on the way in. An
    /// empty list behaves like [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidInterval`] for bad bounds,
    /// [`ChainError::DuplicateContext`] if the list holds two contexts of
    /// the same kind, [`ChainError::IdentityManaged`] if it names the
    /// identity explicitly.
    pub fn with_contexts(
        start: i32,
        end: i32,
        contexts: Vec<CodomainContext>,
    ) -> ChainResult<Self> {
        check_interval(start, end)?;
        let mut chain = Self {
            interval_start: start,
            interval_end: end,
            contexts: Vec::with_capacity(contexts.len() + 1),
            lut: Vec::new(),
        };
        chain.contexts.push(CodomainContext::Identity);
        for mut context in contexts {
            let kind = context.kind();
            if kind == MapKind::Identity {
                return Err(ChainError::IdentityManaged);
            }
            if chain.contains(kind) {
                return Err(ChainError::DuplicateContext(kind));
            }
            context.set_codomain(start, end);
            context.build();
            chain.contexts.push(context);
        }
        chain.rebuild_lut();
        Ok(chain)
    }

    /// Lower bound of the current codomain interval.
    #[inline]
    pub fn interval_start(&self) -> i32 {
        self.interval_start
    }

    /// Upper bound of the current codomain interval.
    #[inline]
    pub fn interval_end(&self) -> i32 {
        self.interval_end
    }

    /// Whether a step of this kind is installed.
    ///
    /// Always true for [`MapKind::Identity`].
    pub fn contains(&self, kind: MapKind) -> bool {
        self.contexts.iter().any(|c| c.kind() == kind)
    }

    /// The installed steps in composition order, identity first.
    pub fn contexts(&self) -> &[CodomainContext] {
        &self.contexts
    }

    /// Read-only view of the current lookup table.
    ///
    /// Entry `i` holds the output for input `interval_start + i`.
    pub fn lut(&self) -> &[i32] {
        &self.lut
    }

    /// Changes the codomain interval.
    ///
    /// Every installed step is rebound and rebuilt, then the LUT is
    /// recomputed over the new interval. On error the chain is unchanged.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidInterval`] unless
    /// `MIN <= start < end <= MAX`.
    pub fn set_interval(&mut self, start: i32, end: i32) -> ChainResult<()> {
        check_interval(start, end)?;
        self.interval_start = start;
        self.interval_end = end;
        for context in &mut self.contexts {
            context.set_codomain(start, end);
            context.build();
        }
        self.rebuild_lut();
        Ok(())
    }

    /// Appends a step to the chain; it applies last in composition order.
    ///
    /// The context is bound to the current interval and built before the
    /// LUT is recomputed. On error the chain is unchanged.
    ///
    /// # Errors
    ///
    /// [`ChainError::IdentityManaged`] for the identity step,
    /// [`ChainError::DuplicateContext`] if a step of this kind is already
    /// installed.
    pub fn add(&mut self, mut context: CodomainContext) -> ChainResult<()> {
        let kind = context.kind();
        if kind == MapKind::Identity {
            return Err(ChainError::IdentityManaged);
        }
        if self.contains(kind) {
            return Err(ChainError::DuplicateContext(kind));
        }
        context.set_codomain(self.interval_start, self.interval_end);
        context.build();
        self.contexts.push(context);
        self.rebuild_lut();
        Ok(())
    }

    /// Replaces the installed step of the same kind, keeping its position
    /// in composition order.
    ///
    /// On error the chain is unchanged.
    ///
    /// # Errors
    ///
    /// [`ChainError::IdentityManaged`] for the identity step,
    /// [`ChainError::ContextNotFound`] if no step of this kind is
    /// installed.
    pub fn update(&mut self, mut context: CodomainContext) -> ChainResult<()> {
        let kind = context.kind();
        if kind == MapKind::Identity {
            return Err(ChainError::IdentityManaged);
        }
        let Some(pos) = self.contexts.iter().position(|c| c.kind() == kind) else {
            return Err(ChainError::ContextNotFound(kind));
        };
        context.set_codomain(self.interval_start, self.interval_end);
        context.build();
        self.contexts[pos] = context;
        self.rebuild_lut();
        Ok(())
    }

    /// Removes the step of this kind, if installed.
    ///
    /// Removing an absent step is a benign no-op, not an error.
    ///
    /// # Errors
    ///
    /// [`ChainError::IdentityManaged`] for the identity step.
    pub fn remove(&mut self, kind: MapKind) -> ChainResult<()> {
        if kind == MapKind::Identity {
            return Err(ChainError::IdentityManaged);
        }
        let Some(pos) = self.contexts.iter().position(|c| c.kind() == kind) else {
            return Ok(());
        };
        self.contexts.remove(pos);
        self.rebuild_lut();
        Ok(())
    }

    /// Drops every step except the identity and restores the default
    /// interval `[MIN, MAX]`.
    pub fn reset(&mut self) {
        self.interval_start = MIN;
        self.interval_end = MAX;
        self.contexts.truncate(1);
        self.rebuild_lut();
    }

    /// Maps one value through the chain.
    ///
    /// Input outside the interval is silently clamped to it. O(1): a
    /// single table lookup, no step evaluation.
    #[inline]
    pub fn transform(&self, x: i32) -> i32 {
        let x = x.clamp(self.interval_start, self.interval_end);
        self.lut[(x - self.interval_start) as usize]
    }

    /// Maps a buffer of values through the chain in place.
    ///
    /// Intended for whole-plane rendering. Runs in parallel when the
    /// `parallel` feature is enabled (the default).
    pub fn transform_slice(&self, values: &mut [i32]) {
        #[cfg(feature = "parallel")]
        {
            values.par_iter_mut().for_each(|v| *v = self.transform(*v));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for v in values.iter_mut() {
                *v = self.transform(*v);
            }
        }
    }

    /// Recomputes the LUT by folding every interval value through the
    /// steps in composition order.
    ///
    /// O(interval size x chain length); runs on every structural change so
    /// `transform` never evaluates a step.
    fn rebuild_lut(&mut self) {
        let size = (self.interval_end - self.interval_start + 1) as usize;
        let mut lut = Vec::with_capacity(size);
        for x in self.interval_start..=self.interval_end {
            let mut v = x;
            for context in &self.contexts {
                v = context.evaluate(v);
            }
            lut.push(v);
        }
        self.lut = lut;
        debug!(
            start = self.interval_start,
            end = self.interval_end,
            steps = self.contexts.len() - 1,
            "rebuilt codomain LUT"
        );
    }
}

fn check_interval(start: i32, end: i32) -> ChainResult<()> {
    if start >= end || start < MIN || end > MAX {
        return Err(ChainError::InvalidInterval { start, end });
    }
    Ok(())
}
