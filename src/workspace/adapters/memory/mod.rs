//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! tests and offline bootstrapping without a remote backend.

mod gateway;
mod summary;

pub use gateway::InMemoryWorkspaceGateway;
pub use summary::CannedSummaryGenerator;
