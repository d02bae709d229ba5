//! Playground bookkeeping
//!
//! - `commands` - Off-side-rule command scanning and evaluation progress
//! - `results` - Per-command evaluation results

mod commands;
mod results;

pub use commands::{Command, PlaygroundCommands, Status};
pub use results::{EvalResult, ResultStorage};
