// src/core/mod.rs
pub mod classify;
pub mod codes;
pub mod collate;
pub mod compare;
pub mod engine;
pub mod mutate;
pub mod predict;
pub mod types;
