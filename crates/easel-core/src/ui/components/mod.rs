//! Content-carrying element variants

pub mod label;

pub use label::{LABEL_CAPACITY, Label};
