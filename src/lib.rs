//! gridstate: state engine for sortable, selectable, paginated data tables.
//!
//! The caller supplies rows and a column schema; the engine owns the sort
//! configuration, the selection set and the current page, and derives what a
//! rendering layer shows. Nothing in this crate draws.
//!
//! Pure Core / Impure Shell:
//! - pure: [`model`], [`state`], [`view_state`], [`parser`], [`integration`]
//! - impure: [`config`], [`logging`], [`source`] and the `gridstate` binary

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view_state;

// Glue used by the command-line driver
pub mod integration;
