//! A small engine that resolves virtual protocol paths into real filesystem paths.
//! Calling code refers to locations by logical name (`data://reports/${year}.csv`) instead of
//! hardcoded host paths, and may pass per-call substitutions.
//!
//! ### Overview
//!
//! `vfs-resolver` has two moving parts:
//! - `VfsHandler` binds one protocol (`name + separator`, e.g. `data://`) to a root folder on the
//!   host plus a set of `${placeholder}` replacements.
//! - `VfsManager` keeps handlers in registration order and hands a path to the first handler
//!   whose protocol it starts with.
//!
//! **Key ideas**:
//! - **Best effort**: a path no handler claims comes back unchanged, unknown placeholders stay
//!   verbatim. Resolution never fails.
//! - **Validated roots**: a handler can only be bound to an existing directory
//!   (`ConfigurationError` otherwise).
//! - **Accumulating replacements**: dynamic replacements passed to `resolve_path` are kept by
//!   the handler that used them (see `VfsHandler::set_persist_dynamic`).
//! - **Extensibility**: the manager dispatches through the `PathHandler` trait.
//! - **Configuration**: handlers can be declared in TOML and loaded with `VfsConfig`.

mod config;
mod core;
mod error;
mod vfs;

pub use config::{HandlerConfig, VfsConfig};
pub use self::core::{DEFAULT_PROTOCOL_SEPARATOR, DirProbe, HostFs, PathHandler, Result};
pub use error::ConfigurationError;
pub use vfs::{HandlerRef, ReplacementStore, Replacements, VfsHandler, VfsManager};
