//! # fwsim-cli
//!
//! CLI output, replay progress display, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod progress;
pub mod ui;

pub use presenter::CliPresenter;
pub use progress::ReplayProgressBar;
