//! Shared test fixtures for cutforge crates.
//!
//! - [`graphs`] - Small graphs with known optimal cuts
//! - [`oracle`] - Independent sequential cut cost
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cutforge-test = { workspace = true }
//! ```

pub mod graphs;
pub mod oracle;

pub use graphs::{complete, cycle, grid, star, two_cliques, weighted_star};
pub use oracle::{community_sizes, cut_cost};
