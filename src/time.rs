//! Time abstraction traits for platform-agnostic timing.
//!
//! The crate only needs two things from a clock: the current instant, and the
//! number of milliseconds between two instants (press-duration
//! classification). Implement these for your platform's monotonic timer.

/// Trait abstraction for instant types.
///
/// Instants must come from a monotonic source; the crate never compares
/// instants across a clock reset.
pub trait TimeInstant: Copy {
    /// Milliseconds elapsed since an earlier instant.
    ///
    /// `earlier` is always an instant previously obtained from the same
    /// [`TimeSource`], so implementations may assume `self >= earlier`.
    fn millis_since(&self, earlier: Self) -> u64;
}

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}
