//! # CLI Command Implementations
//!
//! Each subcommand of `cicd-maker` lives in its own file and consists of:
//! - an `Args` struct deriving `clap::Args`,
//! - an `execute` function that calls into the `cicd_maker` library.

pub mod completions;
pub mod generate;
pub mod scan;
pub mod validate;
