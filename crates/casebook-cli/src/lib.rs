//! CLI library components for the casebook tools.

#![deny(unsafe_code)]

pub mod logging;
pub mod render;
