//! Adapters for hosted targets such as a Raspberry Pi running Linux.
//!
//! The capture loop busy-polls, so these only matter around it: the delay is used for
//! the wake sequence and retry backoff, the clock for pulse timing, and [`SchedFifo`]
//! keeps the kernel from preempting the read.

use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use crate::io::MicrosClock;

/// Microsecond clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Starts a clock counting from now.
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MicrosClock for MonotonicClock {
    fn now_micros(&mut self) -> u32 {
        // Truncation gives the wrapping counter callers expect.
        self.origin.elapsed().as_micros() as u32
    }
}

/// Delay backed by [`std::thread::sleep`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(target_os = "linux")]
pub use self::linux::SchedFifo;

#[cfg(target_os = "linux")]
mod linux {
    use crate::error::PriorityError;
    use crate::priority::PriorityControl;

    /// Moves the calling process into `SCHED_FIFO` at the highest priority, and back
    /// to `SCHED_OTHER` with priority 0.
    ///
    /// Elevation needs root or `CAP_SYS_NICE`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SchedFifo;

    fn set_scheduler(policy: libc::c_int, priority: libc::c_int) -> Result<(), PriorityError> {
        let param = libc::sched_param {
            sched_priority: priority,
        };
        // SAFETY: `param` is a valid, initialized sched_param; pid 0 is the calling process.
        let result = unsafe { libc::sched_setscheduler(0, policy, &param) };
        if result == 0 {
            return Ok(());
        }
        match std::io::Error::last_os_error().raw_os_error() {
            Some(libc::EPERM) => Err(PriorityError::PermissionDenied),
            Some(libc::EINVAL) | Some(libc::ENOSYS) => Err(PriorityError::Unsupported),
            Some(code) => Err(PriorityError::Os(code)),
            None => Err(PriorityError::Os(-1)),
        }
    }

    impl PriorityControl for SchedFifo {
        fn elevate(&mut self) -> Result<(), PriorityError> {
            // SAFETY: plain query with no pointers involved.
            let max = unsafe { libc::sched_get_priority_max(libc::SCHED_FIFO) };
            if max < 0 {
                return Err(PriorityError::Unsupported);
            }
            set_scheduler(libc::SCHED_FIFO, max)
        }

        fn restore(&mut self) {
            if let Err(e) = set_scheduler(libc::SCHED_OTHER, 0) {
                warn!("could not restore default scheduling priority: {}", e);
            }
        }
    }
}
