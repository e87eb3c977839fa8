//! Pixel-level drawing: buffers, lines and triangles.

pub mod canvas;
pub mod depth;
pub mod framebuffer;
pub mod line;
pub mod rasterizer;

pub use canvas::Canvas;
pub use depth::{DepthBuffer, DEPTH_CLEAR};
pub use framebuffer::FrameBuffer;
pub use line::{draw_line, draw_line_with_depth, LinePixels};
pub use rasterizer::{FlatShader, PixelShader, ScanlineRasterizer, ScreenTriangle, TextureShader};
