use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use parking_lot::Mutex;
use std::time::Duration;
use timer::{Guard, Timer};

/// Handle to a task running on a fixed interval.
///
/// The task runs on the handle's own timer thread. It stops when [ScheduledTask::cancel]
/// is called or when the handle is dropped.
pub struct ScheduledTask {
    guard: Mutex<Option<Guard>>,
    // keeps the timer thread alive for as long as the guard
    _timer: Timer,
}

impl ScheduledTask {
    /// Stops the task. Calling it again has no effect.
    pub fn cancel(&self) {
        self.guard.lock().take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.guard.lock().is_none()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Schedules `f` to run every `interval`, first after one interval has elapsed.
///
/// # Errors
///
/// Returns [ErrorKind::InvalidOperation] for a zero interval or one too large to be
/// represented by the timer.
pub fn schedule_repeating<F>(interval: Duration, f: F) -> LilDbResult<ScheduledTask>
where
    F: 'static + FnMut() + Send,
{
    if interval.is_zero() {
        log::error!("Scheduled task interval must be greater than zero");
        return Err(LilDbError::new(
            "Scheduled task interval must be greater than zero",
            ErrorKind::InvalidOperation,
        ));
    }

    match chrono::Duration::from_std(interval) {
        Ok(chrono_duration) => {
            let timer = Timer::new();
            let guard = timer.schedule_repeating(chrono_duration, f);
            Ok(ScheduledTask {
                guard: Mutex::new(Some(guard)),
                _timer: timer,
            })
        }
        Err(e) => {
            log::error!("Failed to convert duration to chrono::Duration: {}", e);
            Err(LilDbError::new(
                &format!("Invalid task interval: {}", e),
                ErrorKind::InvalidOperation,
            ))
        }
    }
}
