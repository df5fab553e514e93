pub mod circular_mask;
pub mod cloud_options;
pub mod cloud_renderer;
pub mod colormap;
pub mod layout;
pub mod text_rasterizer;
