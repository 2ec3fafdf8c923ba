//! System clipboard integration.

use std::io::Write;
use std::process::Command;
use std::process::Stdio;

use ratatui::layout::Rect;
use tabgrid_core::input::InputEvent;
use tabgrid_core::table::view::TableAction;
use tabgrid_core::table::view::TableView;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run clipboard helper `{program}`: {source}")]
    Helper {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard helper `{program}` exited with {status}")]
    HelperStatus {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("no usable clipboard backend")]
    Unavailable,
}

/// Cross-platform clipboard writer with fallbacks for headless environments.
///
/// The primary backend is `arboard`; when it cannot be initialized or a
/// write fails (common over SSH or in terminals without a display server),
/// platform helper commands are tried instead. Writes always replace the
/// entire clipboard content.
pub struct Clipboard {
    primary: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// Attempts to initialize the system clipboard. When unavailable the
    /// writer falls back to shell clipboard utilities on first use.
    pub fn new() -> Self {
        let primary = arboard::Clipboard::new().ok();
        Self { primary }
    }

    /// Copies `text` to the clipboard, replacing any prior content.
    pub fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::debug!(error = %err, "system clipboard write failed; trying helper commands");
                }
            }
        }

        self.primary = None;
        fallback_copy(text)
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_copy(text: &str) -> Result<(), ClipboardError> {
    for command in fallback_commands() {
        match try_command_copy(command, text) {
            Ok(()) => return Ok(()),
            Err(err) => {
                tracing::debug!(error = %err, "clipboard helper failed");
            }
        }
    }

    Err(ClipboardError::Unavailable)
}

fn try_command_copy(command: &[&str], text: &str) -> Result<(), ClipboardError> {
    let (program, args) = command.split_first().ok_or(ClipboardError::Unavailable)?;
    let helper_err = |source| ClipboardError::Helper {
        program: (*program).to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(helper_err)?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes()).map_err(helper_err)?;
    }

    let status = child.wait().map_err(helper_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::HelperStatus {
            program: (*program).to_string(),
            status,
        })
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["xclip", "-selection", "clipboard"], &["wl-copy"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}

/// A [`TableView`] bundled with a system [`Clipboard`].
///
/// Events pass through to the view; when the view answers the copy chord
/// with [`TableAction::CopyRequested`], the text is written to the system
/// clipboard before the action is returned, so the caller can still show
/// the copied text in the UI. Clipboard failures surface as
/// [`ClipboardError`] and are not retried.
pub struct ClipboardTable {
    view: TableView,
    clipboard: Clipboard,
}

impl ClipboardTable {
    pub fn new() -> Self {
        Self::with_view(TableView::new())
    }

    pub fn with_view(view: TableView) -> Self {
        Self {
            view,
            clipboard: Clipboard::new(),
        }
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView {
        &mut self.view
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<TableAction, ClipboardError> {
        let action = self.view.handle_event(event);
        self.apply(action)
    }

    pub fn handle_event_in_area(
        &mut self,
        area: Rect,
        event: InputEvent,
    ) -> Result<TableAction, ClipboardError> {
        let action = self.view.handle_event_in_area(area, event);
        self.apply(action)
    }

    fn apply(&mut self, action: TableAction) -> Result<TableAction, ClipboardError> {
        if let TableAction::CopyRequested(text) = &action {
            self.clipboard.copy(text)?;
        }
        Ok(action)
    }
}

impl Default for ClipboardTable {
    fn default() -> Self {
        Self::new()
    }
}
