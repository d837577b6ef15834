//! Scoped real-time scheduling priority.
//!
//! The capture loop busy-polls the data line and measures pulses of a few tens of
//! microseconds, so a single preemption can turn a `0` into a `1`. On hosted systems the
//! read is therefore run under the highest real-time priority the OS grants.
//! Elevation is best effort: a refusal is logged and the read continues.

use crate::error::PriorityError;

/// OS scheduler control for the calling thread.
pub trait PriorityControl {
    /// Requests the maximum real-time priority.
    fn elevate(&mut self) -> Result<(), PriorityError>;

    /// Returns to the default scheduling class and priority.
    fn restore(&mut self);
}

impl<T: PriorityControl + ?Sized> PriorityControl for &mut T {
    fn elevate(&mut self) -> Result<(), PriorityError> {
        T::elevate(self)
    }

    fn restore(&mut self) {
        T::restore(self)
    }
}

/// Scheduler for targets where nothing preempts the capture loop
/// (bare-metal, interrupts already masked by the caller).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPriority;

impl PriorityControl for NoPriority {
    fn elevate(&mut self) -> Result<(), PriorityError> {
        Ok(())
    }

    fn restore(&mut self) {}
}

/// Guard holding the elevated priority; restores the default when dropped.
///
/// Restoration happens whether or not elevation succeeded, so the thread always
/// leaves the guard in the default class.
pub struct ElevatedPriority<'a, S: PriorityControl + ?Sized> {
    scheduler: &'a mut S,
}

impl<'a, S: PriorityControl + ?Sized> ElevatedPriority<'a, S> {
    /// Elevates the priority, logging a refusal instead of failing.
    pub fn acquire(scheduler: &'a mut S) -> Self {
        if let Err(e) = scheduler.elevate() {
            warn!("could not elevate scheduling priority: {}", e);
        }
        Self { scheduler }
    }
}

impl<S: PriorityControl + ?Sized> Drop for ElevatedPriority<'_, S> {
    fn drop(&mut self) {
        self.scheduler.restore();
    }
}

/// Runs `body` under elevated priority and restores the default on every exit path,
/// including early returns from `body` and unwinding.
pub fn with_elevated_priority<S, R, F>(scheduler: &mut S, body: F) -> R
where
    S: PriorityControl + ?Sized,
    F: FnOnce() -> R,
{
    let _guard = ElevatedPriority::acquire(scheduler);
    body()
}
