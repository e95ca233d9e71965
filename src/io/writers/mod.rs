pub mod raster;
pub mod pdf;
