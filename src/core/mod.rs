// src/core/mod.rs

pub mod engine;
pub mod segmentation;
pub mod types;
