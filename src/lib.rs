//! pnpm-deps - pnpm workspace dependency tooling library
//!
//! This library provides the core functionality behind the CI steps of a pnpm
//! monorepo:
//! - Resolving `workspace:` and `catalog:` specifiers to concrete versions
//! - Rewriting package.json files with a resolved dependency map
//! - Detecting which packages changed between two git revisions

pub mod cli;
pub mod detect;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod resolve;
pub mod workspace;
