// src/lib.rs

pub mod config;
pub mod core;
pub mod dim;
pub mod error;
pub mod import;
pub mod report;
pub mod store;
pub use crate::core::engine::VerbEngine;
pub use crate::error::{BeygjaError, Result};
