//! dotforge is a personal configuration-management CLI.
//! This crate ships its import subsystem: it converts a chezmoi source
//! tree (attributes encoded in filename prefixes, Go-template bodies)
//! into dotforge's own convention (plain paths, Handlebars-style
//! templates), reporting per-run statistics.

/// Path attribute grammar
/// Strips the fixed-order filename markers and resolves logical and
/// physical destination paths
pub mod attrs;

/// Command-line interface module for the dotforge application
pub mod cli;

/// Common constants: template suffixes, reserved entries, variable names
pub mod constants;

/// Error types and handling for the dotforge application
pub mod error;

/// Logger initialization
pub mod logger;

/// Run statistics accumulated across a walk
pub mod stats;

/// Template syntax transpiler
/// Rewrites source template text into destination syntax with
/// construct-specific block closers
pub mod transpile;

/// Variable table loading and re-emission
pub mod vars;

/// Source tree traversal and import execution
pub mod walker;
