//! Display surfaces bound to external widgets.
//!
//! A surface owns its widget. Dropping the surface clears the widget's data
//! and abandons any pending warm-up.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use enumviz_payload::TabularModel;
use tracing::{debug, info, warn};

use crate::commands::{EditOperation, ViewOption};
use crate::language::Language;
use crate::warmup::{Warmup, WarmupStatus};
use crate::widgets::{GridWidget, SpreadsheetFormat, TextWidget, WidgetError};

/// Read-only grid showing a decoded table.
pub struct GridSurface {
    widget: Box<dyn GridWidget>,
    model: TabularModel,
}

impl GridSurface {
    pub fn new(mut widget: Box<dyn GridWidget>, model: TabularModel) -> Self {
        widget.set_read_only(true);
        widget.bind(model.columns(), model.rows());
        Self { widget, model }
    }

    pub fn model(&self) -> &TabularModel {
        &self.model
    }

    pub fn export(&mut self, format: SpreadsheetFormat, path: &Path) -> io::Result<()> {
        self.widget.export(format, path)
    }
}

impl Drop for GridSurface {
    fn drop(&mut self) {
        self.widget.clear();
    }
}

/// Editable text view with syntax highlighting.
pub struct TextSurface {
    widget: Box<dyn TextWidget>,
    language: Language,
    services_enabled: bool,
    warmup: Option<Warmup>,
    view: BTreeSet<ViewOption>,
    document: Option<PathBuf>,
    modified: bool,
}

impl TextSurface {
    pub fn new(mut widget: Box<dyn TextWidget>, text: &str, language: Language) -> Self {
        let mut view = BTreeSet::new();
        for option in ViewOption::ALL {
            let enabled = option.default_enabled();
            widget.set_view_option(option, enabled);
            if enabled {
                view.insert(option);
            }
        }
        bind_language(widget.as_mut(), language);
        widget.set_text(text);
        Self {
            widget,
            language,
            services_enabled: false,
            warmup: None,
            view,
            document: None,
            modified: false,
        }
    }

    pub fn text(&self) -> String {
        self.widget.text()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switches highlighting. Language services, if any, are dropped.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.services_enabled = false;
        self.warmup = None;
        bind_language(self.widget.as_mut(), language);
    }

    /// Whether warmed-up language services are active.
    pub fn has_language_services(&self) -> bool {
        self.services_enabled
    }

    pub fn is_warming_up(&self) -> bool {
        self.warmup.is_some()
    }

    /// Attaches an in-flight warm-up. Ignored if it targets another language.
    pub fn attach_warmup(&mut self, warmup: Warmup) {
        if warmup.language() == self.language {
            self.warmup = Some(warmup);
        }
    }

    /// Applies a finished warm-up. Returns `true` when services were enabled.
    pub fn poll_background(&mut self) -> bool {
        let status = match &self.warmup {
            Some(warmup) => warmup.poll(),
            None => return false,
        };
        self.apply_warmup(status)
    }

    /// Like [`poll_background`](Self::poll_background) but blocks up to
    /// `timeout`.
    pub fn wait_background(&mut self, timeout: Duration) -> bool {
        let status = match &self.warmup {
            Some(warmup) => warmup.wait(timeout),
            None => return false,
        };
        self.apply_warmup(status)
    }

    fn apply_warmup(&mut self, status: WarmupStatus) -> bool {
        match status {
            WarmupStatus::Pending => false,
            WarmupStatus::Ready => {
                self.warmup = None;
                self.services_enabled = true;
                self.widget.enable_language_services(self.language);
                info!(language = %self.language, "language services enabled");
                true
            }
            WarmupStatus::Failed(reason) => {
                self.warmup = None;
                warn!(language = %self.language, %reason, "language services unavailable");
                false
            }
        }
    }

    pub fn execute(&mut self, operation: EditOperation) -> Result<(), WidgetError> {
        self.widget.execute(operation)?;
        if operation.modifies_text() {
            self.modified = true;
        }
        Ok(())
    }

    pub fn view_option(&self, option: ViewOption) -> bool {
        self.view.contains(&option)
    }

    pub fn set_view_option(&mut self, option: ViewOption, enabled: bool) {
        if enabled {
            self.view.insert(option);
        } else {
            self.view.remove(&option);
        }
        self.widget.set_view_option(option, enabled);
    }

    /// Flips `option` and returns its new state.
    pub fn toggle(&mut self, option: ViewOption) -> bool {
        let enabled = !self.view_option(option);
        self.set_view_option(option, enabled);
        enabled
    }

    /// Empties the editor and forgets the document path.
    pub fn new_document(&mut self) {
        self.widget.clear();
        self.widget.set_text("");
        self.document = None;
        self.modified = false;
        debug!("new document");
    }

    pub fn load_document(&mut self, path: &Path, text: &str, language: Language) {
        self.set_language(language);
        self.widget.set_text(text);
        self.document = Some(path.to_path_buf());
        self.modified = false;
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    pub fn mark_saved(&mut self, path: &Path) {
        self.document = Some(path.to_path_buf());
        self.modified = false;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

impl Drop for TextSurface {
    fn drop(&mut self) {
        self.warmup = None;
        self.widget.clear();
    }
}

fn bind_language(widget: &mut dyn TextWidget, language: Language) {
    widget.set_language(language);
    widget.set_comment_style(language.comment_style());
}

/// The view chosen for a decoded payload.
pub enum DisplaySurface {
    Grid(GridSurface),
    Text(TextSurface),
}

impl DisplaySurface {
    pub fn as_grid(&self) -> Option<&GridSurface> {
        match self {
            DisplaySurface::Grid(grid) => Some(grid),
            DisplaySurface::Text(_) => None,
        }
    }

    pub fn as_grid_mut(&mut self) -> Option<&mut GridSurface> {
        match self {
            DisplaySurface::Grid(grid) => Some(grid),
            DisplaySurface::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextSurface> {
        match self {
            DisplaySurface::Text(text) => Some(text),
            DisplaySurface::Grid(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextSurface> {
        match self {
            DisplaySurface::Text(text) => Some(text),
            DisplaySurface::Grid(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplaySurface::Grid(_) => "grid",
            DisplaySurface::Text(_) => "text",
        }
    }

    pub fn poll_background(&mut self) -> bool {
        match self {
            DisplaySurface::Text(text) => text.poll_background(),
            DisplaySurface::Grid(_) => false,
        }
    }
}
