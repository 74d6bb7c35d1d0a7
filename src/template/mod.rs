//! Template compilation and rendering
//!
//! Templates are compiled once per `set_template` and reused for every
//! render until replaced.

pub mod compiler;
pub mod renderer;

pub use compiler::{compile, CompiledTemplate, TemplateSegment};
pub use renderer::render;
