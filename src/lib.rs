//! Orbit: project-management workspace core.
//!
//! This crate holds the state and computations behind a project dashboard: a
//! task board with optimistic status transitions, portfolio statistics and
//! filtering, and capacity-based workload for team members.
//!
//! # Architecture
//!
//! Orbit follows hexagonal architecture principles:
//!
//! - **Domain**: Entities and validation with no infrastructure dependencies
//! - **Ports**: Async trait interfaces for the remote store and summaries
//! - **Adapters**: In-memory implementations of the ports
//!
//! # Modules
//!
//! - [`workspace`]: Projects, tasks, users, and the services over them
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod telemetry;
pub mod workspace;
