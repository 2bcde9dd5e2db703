//! TUI widgets module.
//!
//! This module contains the widgets drawn by the TUI.

pub mod command_composer;
pub mod log_view;
pub mod pipeline_view;
pub mod results_view;

pub use command_composer::CommandComposer;
pub use log_view::LogView;
