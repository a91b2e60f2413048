/// egui widgets: side/top panels, chart plots and the word cloud canvas.
pub mod charts;
pub mod cloud;
pub mod panels;
pub mod report;
