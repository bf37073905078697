//! Widget components for the TUI

mod header;
mod input_panel;
pub(crate) mod results;
mod status_bar;

pub use header::MainHeader;
pub use input_panel::InputPanel;
pub use results::ResultsView;
pub use status_bar::StatusBar;
