//! Craft CLI - A local-first project management tool for software teams
//!
//! Craft runs developer tooling inside isolated, tool-managed environments.
//! The `fmt` command dispatches linting and formatting scripts into the
//! `static-analysis` environment, reconciling CLI flags, legacy project
//! configuration and environment-provided defaults into concrete shell
//! invocations.

pub mod domain;
pub mod storage;
pub mod env;
pub mod cli;

pub use domain::{ArgumentBundle, EffectiveConfig, Script, ScriptPlan};
