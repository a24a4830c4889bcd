//! Termination conditions polled by the searches at every node. A stopped
//! search reports [`PlanningResult::Unknown`](crate::results::PlanningResult)
//! rather than exhaustion.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// The conditions under which a search should give up.
pub trait TerminationCondition {
    /// Returns true when the search should stop.
    fn should_stop(&mut self) -> bool;
}

/// A termination condition that never stops the search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Stops the search after a wall-clock budget has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    deadline: Instant,
}

impl TimeBudget {
    /// A time budget of the given duration, starting now.
    pub fn starting_now(budget: Duration) -> TimeBudget {
        TimeBudget {
            deadline: Instant::now() + budget,
        }
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Stops the search when the process receives SIGINT or SIGTERM.
#[derive(Clone, Debug)]
pub struct OsSignal {
    triggered: Arc<AtomicBool>,
}

impl OsSignal {
    /// Register the signal handlers.
    pub fn install() -> std::io::Result<OsSignal> {
        let triggered = Arc::new(AtomicBool::new(false));

        let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&triggered))?;
        let _ = signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&triggered))?;

        Ok(OsSignal { triggered })
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}
