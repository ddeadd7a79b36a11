//! Built-in document renderers.

mod text;

pub use text::TextBonafideRenderer;
