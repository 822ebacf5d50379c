/// UI layer: top bar, filter side panel, and the dashboard itself.
pub mod dashboard;
pub mod panels;
