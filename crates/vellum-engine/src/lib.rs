//! Vellum engine crate.
//!
//! Renderer core that turns materials and per-draw scene inputs into cached
//! shader programs, and desired pipeline state into a minimal stream of
//! graphics-API calls.
//!
//! Entry point is [`render::RenderCore`]; the native API sits behind
//! [`backend::GraphicsBackend`].

pub mod backend;
pub mod config;
pub mod coords;
pub mod error;
pub mod logging;
pub mod material;
pub mod program;
pub mod render;
pub mod scene;
pub mod state;

pub use error::ProgramError;
