//! Cooperative cancellation.
//!
//! Every loop of the solver polls a single [`Termination`]: between GRASP
//! trials, between VNS rounds and at the top of every local search round.
//! The solver treats "running" as `!is_terminated()`.

mod composite;
mod external;
mod time;

use std::fmt::Debug;

pub use composite::OrTermination;
pub use external::{ExternalTermination, FnTermination};
pub use time::TimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self) -> bool;
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_terminated(&self) -> bool {
        (**self).is_terminated()
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self) -> bool {
        (**self).is_terminated()
    }
}

/// Never terminates; the run ends when its trial budget is spent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl Termination for NeverTerminate {
    fn is_terminated(&self) -> bool {
        false
    }
}
