//! Core domain models for pnpm-deps
//!
//! This module contains the fundamental types used throughout the application:
//! - Workspace projects
//! - Specifier classification and range operators
//! - package.json dependency sections
//! - Resolution results

mod dependency;
mod project;
mod specifier;
mod update;

pub use dependency::DependencySection;
pub use project::{Project, MANIFEST_FILENAME};
pub use specifier::{
    RangeOperator, Specifier, CATALOG_PROTOCOL, DEFAULT_CATALOG, WORKSPACE_PROTOCOL,
};
pub use update::{ResolvedUpdate, UpdateMap, UpdateReason};
