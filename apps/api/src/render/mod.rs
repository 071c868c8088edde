pub mod canvas;
pub mod font_metrics;
pub mod lopdf_canvas;
pub mod pdf;
pub mod preview;
pub mod recorder;
