//! Window widgets: the summary bar, the series panel and the plot itself.

pub mod panels;
pub mod plot;
