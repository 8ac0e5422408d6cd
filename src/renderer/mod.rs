//! Rendering
//!
//! Label layout is platform independent; drawing uses Canvas 2D in the
//! browser. Renderers only read engine state.

pub mod label;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use label::{LabelLayout, LabelLine, TextMeasure, layout_label};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
