//! Shared application service layer for pipeflow.
//!
//! Loads topology projects, compiles a system definition into a live
//! [`pf_network::Network`], applies scripted scenarios or one-line commands
//! and stores the resulting snapshots.

pub mod command;
pub mod error;
pub mod project_service;
pub mod run_service;
pub mod runtime_compile;
pub mod scenario;

pub use command::{parse_command, parse_script};
pub use error::{AppError, AppResult};
pub use project_service::{
    SystemSummary, get_system, list_systems, load_project, save_project, validate_project,
};
pub use run_service::{RunRequest, RunResponse, list_records, run_system};
pub use runtime_compile::{SystemRuntime, compile_system};
pub use scenario::{StepOutcome, apply_action, apply_all, run_scenario};
