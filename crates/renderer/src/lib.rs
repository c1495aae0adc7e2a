//! wgpu renderer for the uplink screen: a cover-fitted background image and
//! a bitmap-font overlay.

pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use pipeline::*;
pub use renderer::*;
pub use texture::*;
pub use vertex::*;
