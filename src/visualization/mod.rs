pub mod colormap;
pub mod heatmap;
pub mod overlay;
pub mod picking;
pub mod ui;
