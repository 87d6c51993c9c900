//! Terminal-facing output.

pub mod render;

pub use render::{RenderSink, Renderer};
