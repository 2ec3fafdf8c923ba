//! A table grid widget for `ratatui` that copies multiple selected cells
//! to the system clipboard as tab/newline-delimited text.
//!
//! The core widget lives in `tabgrid-core` and is re-exported here; this
//! crate adds the system clipboard integration:
//!
//! - [`clipboard::Clipboard`]: `arboard`-backed writer with helper-command
//!   fallbacks for headless environments.
//! - [`clipboard::ClipboardTable`]: a [`table::view::TableView`] bundled
//!   with a [`clipboard::Clipboard`], so `CopyRequested` actions land on
//!   the system clipboard without extra wiring.
//!
//! Enable the `crossterm` feature for terminal event conversion; see
//! `examples/table.rs` for a runnable demo.
pub use tabgrid_core::copy;
pub use tabgrid_core::input;
pub use tabgrid_core::keymap;
pub use tabgrid_core::render;
pub use tabgrid_core::selection;
pub use tabgrid_core::table;
pub use tabgrid_core::theme;
pub use tabgrid_core::viewport;

#[cfg(feature = "crossterm")]
pub use tabgrid_core::crossterm_input;

pub mod clipboard;
