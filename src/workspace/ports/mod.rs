//! Port contracts for the workspace.
//!
//! Ports define infrastructure-agnostic interfaces used by workspace services.

pub mod gateway;
pub mod summary;

pub use gateway::{GatewayError, GatewayResult, WorkspaceGateway};
pub use summary::{
    ProjectPlan, SummaryError, SummaryGenerator, SummaryKind, SummaryRequest, SummaryResponse,
    SummaryResult,
};
