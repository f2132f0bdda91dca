//! Small value types for framebuffer-space state.

mod color;
mod pixel_rect;

pub use color::ColorRgba;
pub use pixel_rect::PixelRect;
