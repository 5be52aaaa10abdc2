//! cutforge Core - Core types and traits for approximate maximum k-cut
//!
//! This crate provides the fundamental abstractions for cutforge:
//! - Read-only graph capability and an in-memory CSR implementation
//! - Objective direction strategies (maximize / minimize the cut)
//! - Shared atomic buffers for candidate solutions, cardinalities and costs
//! - Degree-balanced work partitions for the parallel phases

pub mod error;
pub mod graph;
pub mod objective;
pub mod partition;
pub mod solution;

pub use error::{CutForgeError, Result};
pub use graph::{CsrCursor, CsrGraph, CsrGraphBuilder, Graph, RelationshipCursor};
pub use objective::{Maximize, Minimize, Objective, ObjectiveKind};
pub use partition::{degree_partition, range_partition, Partition};
pub use solution::{AtomicCost, CandidateSolution, Cardinalities, CommunityId};
