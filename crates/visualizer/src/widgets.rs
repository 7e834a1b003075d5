//! Seams to the external UI widgets.
//!
//! The grid and the text editor are third-party controls; the visualizer only
//! binds data to them and forwards commands.

use std::io;
use std::path::Path;

use enumviz_payload::{Cell, Column};

use crate::commands::{EditOperation, ViewOption};
use crate::language::{CommentStyle, Language};

/// Failure reported by a widget while carrying out an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct WidgetError(pub String);

impl WidgetError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
}

impl SpreadsheetFormat {
    /// `.xls` selects the legacy format; anything else is `.xlsx`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xls") => SpreadsheetFormat::Xls,
            _ => SpreadsheetFormat::Xlsx,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Xls => "xls",
        }
    }
}

pub trait GridWidget {
    fn bind(&mut self, columns: &[Column], rows: &[Vec<Cell>]);
    fn set_read_only(&mut self, read_only: bool);
    fn export(&mut self, format: SpreadsheetFormat, path: &Path) -> io::Result<()>;
    /// Drops all bound data.
    fn clear(&mut self);
}

pub trait TextWidget {
    fn set_text(&mut self, text: &str);
    fn text(&self) -> String;
    fn set_language(&mut self, language: Language);
    /// Registers the prefix or delimiters used by the comment-lines command.
    /// `None` leaves the command without effect.
    fn set_comment_style(&mut self, style: Option<CommentStyle>);
    /// Turns on completion and other analysis once they are warmed up.
    fn enable_language_services(&mut self, language: Language);
    fn execute(&mut self, operation: EditOperation) -> Result<(), WidgetError>;
    fn set_view_option(&mut self, option: ViewOption, enabled: bool);
    fn clear(&mut self);
}

pub trait WidgetFactory {
    fn create_grid(&mut self) -> Box<dyn GridWidget>;
    fn create_text(&mut self) -> Box<dyn TextWidget>;
}
