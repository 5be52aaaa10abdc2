//! Direction of the optimization.
//!
//! The cut weight is either maximized or minimized. The direction is chosen
//! once from configuration and then threaded by value through every
//! component as a zero-sized strategy type, so the hot loops are
//! monomorphized per direction instead of branching at runtime.

use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Comparison strategy for cut costs.
pub trait Objective: Copy + Send + Sync + Debug + Default + 'static {
    /// Returns true if `lhs` is strictly better than `rhs`.
    fn better_than(&self, lhs: f64, rhs: f64) -> bool;

    /// A value every real cost is better than; seeds empty best-cost slots.
    fn worst(&self) -> f64;

    /// Runtime tag of this strategy.
    fn kind(&self) -> ObjectiveKind;
}

/// Larger cut weight is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Maximize;

/// Smaller cut weight is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimize;

impl Objective for Maximize {
    #[inline]
    fn better_than(&self, lhs: f64, rhs: f64) -> bool {
        lhs > rhs
    }

    fn worst(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::Maximize
    }
}

impl Objective for Minimize {
    #[inline]
    fn better_than(&self, lhs: f64, rhs: f64) -> bool {
        lhs < rhs
    }

    fn worst(&self) -> f64 {
        f64::INFINITY
    }

    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::Minimize
    }
}

/// Runtime selection of the objective direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectiveKind {
    #[default]
    Maximize,
    Minimize,
}

impl ObjectiveKind {
    /// Maps the `minimize` configuration flag to a direction.
    pub fn from_minimize(minimize: bool) -> Self {
        if minimize {
            ObjectiveKind::Minimize
        } else {
            ObjectiveKind::Maximize
        }
    }
}

impl std::fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveKind::Maximize => write!(f, "maximize"),
            ObjectiveKind::Minimize => write!(f, "minimize"),
        }
    }
}
