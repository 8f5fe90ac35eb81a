//! # inv-compose
//!
//! Administrative procedures for an InvenTree deployment, delegated to the
//! server's own `invoke` tasks through the container orchestration tool:
//!
//! ```text
//! docker compose [-f file] run --rm inventree-server invoke <task> [args]
//! ```
//!
//! Procedures run strictly in sequence and stop at the first failing step.
//! Child output is inherited so the tool's own diagnostics reach the user.

mod action;
mod error;
mod invocation;
mod procedure;
mod runner;

pub use action::AdminAction;
pub use error::ComposeError;
pub use invocation::{ComposeCommand, Invocation};
pub use procedure::{Procedure, ProcedureReport, StepReport};
pub use runner::{CommandRunner, ExitOutcome, SystemRunner};
