// src/utils/mod.rs
pub mod util;
