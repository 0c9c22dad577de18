//! Text overlay: label/color/anchor planning and glyph rasterization.

pub mod plan;
pub mod raster;
