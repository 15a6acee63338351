//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, playback
//!   timers and typed size/delay input
//! - **[`panes`]** — stateless render functions for each visible pane (grid,
//!   legend, call stack, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`PathCounter`] and
//! call [`App::run`] to start the event loop.
//!
//! [`PathCounter`]: crate::counter::PathCounter
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
