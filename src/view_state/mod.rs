//! View-state layer.
//!
//! Turns engine state into the data a rendering layer draws. Nothing here
//! draws anything.

pub mod table_view;

pub use table_view::TableView;
