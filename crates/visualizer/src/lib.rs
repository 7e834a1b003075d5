//! Host-side presentation of enumviz payloads.
//!
//! A [`VisualizerSession`] decodes a payload, lets the
//! [`PresentationSelector`] pick a grid or text surface for it, and routes
//! user commands to that surface. The grid and editor controls themselves
//! are supplied by the host through [`WidgetFactory`].

mod commands;
mod files;
mod format;
mod language;
mod notify;
mod options;
mod selector;
mod session;
mod surface;
mod warmup;
mod widgets;

pub use commands::{
    ids as command_ids, lookup as lookup_command, Command, EditOperation, FileAction, ViewOption,
};
pub use files::{
    ExternalIoError, FileActions, FileFilter, FilePicker, FileStreams, StdFileStreams, ALL_FILES,
    SPREADSHEET_FILES,
};
pub use format::{format_item, format_sequence, grid_text, pretty_one_line, truncation_line};
pub use language::{CommentStyle, Language};
pub use notify::{Notification, NotificationQueue, Notifier, Severity};
pub use options::VisualizerOptions;
pub use selector::PresentationSelector;
pub use session::{SessionError, SessionState, VisualizerSession};
pub use surface::{DisplaySurface, GridSurface, TextSurface};
pub use warmup::{LanguageServices, Warmup, WarmupStatus};
pub use widgets::{GridWidget, SpreadsheetFormat, TextWidget, WidgetError, WidgetFactory};
