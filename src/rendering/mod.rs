//! # Rendering Module
//!
//! Text output for inspecting generated caves and paths in a terminal.

pub mod ascii;

pub use ascii::*;
