pub mod font_rasterizer;
pub mod masked_cloud_renderer;
