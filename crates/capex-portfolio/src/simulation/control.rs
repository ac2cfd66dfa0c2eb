//! Progress reporting and cancellation for long simulations.
//!
//! The simulator calls its observer every `yield_every` iterations. An
//! observer that returns [`ControlFlow::Break`] stops the run; the summary
//! then covers the iterations completed so far.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Progress of a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationProgress {
    /// Iterations finished.
    pub completed: usize,
    /// Iterations requested.
    pub total: usize,
}

impl SimulationProgress {
    /// Completed fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Receives progress at each yield point and decides whether to continue.
pub trait ProgressObserver {
    /// Called after every `yield_every` iterations and after the last one.
    fn on_progress(&mut self, progress: SimulationProgress) -> ControlFlow<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(SimulationProgress) -> ControlFlow<()>,
{
    fn on_progress(&mut self, progress: SimulationProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Observer that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl ProgressObserver for Unobserved {
    fn on_progress(&mut self, _progress: SimulationProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Shared cancellation flag.
///
/// Clones share the flag, so one clone can be handed to the simulation while
/// another is kept to cancel it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl ProgressObserver for CancellationToken {
    fn on_progress(&mut self, _progress: SimulationProgress) -> ControlFlow<()> {
        if self.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let mut handed_out = token.clone();
        let progress = SimulationProgress { completed: 10, total: 100 };

        assert_eq!(handed_out.on_progress(progress), ControlFlow::Continue(()));
        token.cancel();
        assert!(handed_out.is_cancelled());
        assert_eq!(handed_out.on_progress(progress), ControlFlow::Break(()));
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |p: SimulationProgress| {
            seen.push(p.completed);
            ControlFlow::Continue(())
        };
        let _ = observer.on_progress(SimulationProgress { completed: 5, total: 10 });
        assert_eq!(seen, vec![5]);
    }

    #[test]
    fn test_fraction() {
        assert!((SimulationProgress { completed: 1, total: 4 }.fraction() - 0.25).abs() < 1e-12);
        assert!((SimulationProgress { completed: 0, total: 0 }.fraction() - 1.0).abs() < 1e-12);
    }
}
