//! Caller-driven termination.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use cutforge_solver::termination::{ExternalTermination, Termination};
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
/// assert!(!term.is_terminated());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_terminated());
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Adapts a zero-argument "is running" predicate.
///
/// The solver stops once the predicate returns `false`.
pub struct FnTermination<F> {
    running: F,
}

impl<F> FnTermination<F>
where
    F: Fn() -> bool + Send + Sync,
{
    pub fn new(running: F) -> Self {
        Self { running }
    }
}

impl<F> fmt::Debug for FnTermination<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTermination").finish_non_exhaustive()
    }
}

impl<F> Termination for FnTermination<F>
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_terminated(&self) -> bool {
        !(self.running)()
    }
}
