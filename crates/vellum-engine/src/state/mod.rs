//! Software mirror of the graphics context's pipeline state.
//!
//! Every setter compares against the mirrored value and only reaches the
//! backend when the value changes. Unknown (post-reset) values never compare
//! equal, so the first set after a reset always issues its call.

mod attributes;
mod blend;
mod buffers;
mod capabilities;
mod mirror;
mod textures;

pub use blend::{BlendParams, Blending};
pub use mirror::{CullFace, StateMirror};
pub use textures::BoundTexture;
