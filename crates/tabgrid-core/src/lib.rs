//! `tabgrid-core` provides the table grid widget and its supporting
//! primitives.
//!
//! The centerpiece is [`table::view::TableView`]: a terminal table with
//! owned cell text, keyboard/mouse selection, and multi-cell copy. When
//! multi-copy is enabled, the copy chord serializes the selected cells as
//! tab/newline-delimited text (the format spreadsheet applications paste
//! as a grid) covering the selection's bounding rectangle, with
//! unselected positions rendered as empty strings.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Clipboard-free core: the widget emits
//!   [`table::view::TableAction::CopyRequested`] and the caller decides how
//!   to reach the system clipboard (the `tabgrid` facade crate ships an
//!   `arboard`-backed integration).
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `tabgrid`. Use this crate
//! directly if you only need the widget and want to bring your own
//! clipboard.
//!
//! Useful entry points:
//! - [`table::view::TableView`]: the widget.
//! - [`copy::selection_text`]: the selection-to-text formatter on its own.
//! - [`crossterm_input::input_event_from_crossterm`] (feature `crossterm`):
//!   terminal event conversion.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod copy;
pub mod input;
pub mod keymap;
pub mod render;
pub mod selection;
pub mod table;
pub mod viewport;
