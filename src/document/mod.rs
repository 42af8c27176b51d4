// src/document/mod.rs
pub mod document;
pub mod fields;

pub use document::MazeDocument;
pub use fields::{FieldSink, FieldSource, JsonFields};
