//! Project workspace: portfolio, task board, and team workload.
//!
//! Projects own tasks that move across a five-column board. Status changes
//! are applied optimistically and rolled back from a snapshot when the remote
//! store refuses them. Portfolio statistics and per-user workload are pure
//! computations over the loaded collections. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
