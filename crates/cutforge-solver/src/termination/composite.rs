//! Composite termination (OR) over a pair of conditions.

use super::Termination;

/// Combines two terminations with OR logic (either one stops the run).
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use cutforge_solver::termination::{
///     ExternalTermination, OrTermination, Termination, TimeTermination,
/// };
///
/// let flag = AtomicBool::new(false);
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     ExternalTermination::new(&flag),
/// ));
/// assert!(!termination.is_terminated());
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a pair of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

impl<A: Termination, B: Termination> Termination for OrTermination<(A, B)> {
    fn is_terminated(&self) -> bool {
        let (first, second) = &self.0;
        first.is_terminated() || second.is_terminated()
    }
}
