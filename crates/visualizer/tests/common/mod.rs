#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{bounded, Receiver, Sender};
use enumviz_visualizer::{
    grid_text, CommentStyle, EditOperation, FileFilter, FilePicker, GridWidget, Language,
    LanguageServices, Notification, Notifier, SpreadsheetFormat, TextWidget, ViewOption,
    WidgetError, WidgetFactory,
};
use enumviz_payload::{Cell, Column};

#[derive(Debug, Default)]
pub struct GridState {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub read_only: bool,
    pub exports: Vec<(SpreadsheetFormat, PathBuf)>,
    pub cleared: bool,
}

pub struct MockGrid(pub Rc<RefCell<GridState>>);

impl GridWidget for MockGrid {
    fn bind(&mut self, columns: &[Column], rows: &[Vec<Cell>]) {
        let mut state = self.0.borrow_mut();
        state.headers = columns.iter().map(|c| c.name.clone()).collect();
        state.rows = rows
            .iter()
            .map(|r| r.iter().map(|c| grid_text(c).to_owned()).collect())
            .collect();
        state.cleared = false;
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.0.borrow_mut().read_only = read_only;
    }

    fn export(&mut self, format: SpreadsheetFormat, path: &Path) -> io::Result<()> {
        std::fs::write(path, b"PK")?;
        self.0.borrow_mut().exports.push((format, path.to_path_buf()));
        Ok(())
    }

    fn clear(&mut self) {
        let mut state = self.0.borrow_mut();
        state.headers.clear();
        state.rows.clear();
        state.cleared = true;
    }
}

#[derive(Debug, Default)]
pub struct TextState {
    pub text: String,
    pub language: Option<Language>,
    pub comment: Option<CommentStyle>,
    pub services: Option<Language>,
    pub executed: Vec<EditOperation>,
    pub view: BTreeMap<ViewOption, bool>,
    pub failing: Option<EditOperation>,
    pub cleared: bool,
}

pub struct MockText(pub Rc<RefCell<TextState>>);

impl TextWidget for MockText {
    fn set_text(&mut self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text = text.to_owned();
        state.cleared = false;
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn set_language(&mut self, language: Language) {
        let mut state = self.0.borrow_mut();
        state.language = Some(language);
        state.services = None;
    }

    fn set_comment_style(&mut self, style: Option<CommentStyle>) {
        self.0.borrow_mut().comment = style;
    }

    fn enable_language_services(&mut self, language: Language) {
        self.0.borrow_mut().services = Some(language);
    }

    fn execute(&mut self, operation: EditOperation) -> Result<(), WidgetError> {
        let mut state = self.0.borrow_mut();
        if state.failing == Some(operation) {
            return Err(WidgetError::new("selection is empty"));
        }
        if operation == EditOperation::MakeUppercase {
            state.text = state.text.to_uppercase();
        }
        state.executed.push(operation);
        Ok(())
    }

    fn set_view_option(&mut self, option: ViewOption, enabled: bool) {
        self.0.borrow_mut().view.insert(option, enabled);
    }

    fn clear(&mut self) {
        let mut state = self.0.borrow_mut();
        state.text.clear();
        state.cleared = true;
    }
}

/// Hands out mock widgets and keeps their shared state for inspection.
#[derive(Clone, Default)]
pub struct MockFactory {
    pub grid: Rc<RefCell<GridState>>,
    pub text: Rc<RefCell<TextState>>,
}

impl WidgetFactory for MockFactory {
    fn create_grid(&mut self) -> Box<dyn GridWidget> {
        Box::new(MockGrid(Rc::clone(&self.grid)))
    }

    fn create_text(&mut self) -> Box<dyn TextWidget> {
        Box::new(MockText(Rc::clone(&self.text)))
    }
}

/// Host-side notifier that keeps what it was told.
#[derive(Clone, Default)]
pub struct RecordingNotifier(pub Rc<RefCell<Vec<Notification>>>);

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

/// Answers dialogs from a script; an exhausted script means "cancel".
#[derive(Clone, Default)]
pub struct ScriptedPicker {
    pub answers: Rc<RefCell<VecDeque<Option<PathBuf>>>>,
    pub filters: Rc<RefCell<Vec<FileFilter>>>,
}

impl ScriptedPicker {
    pub fn answer(&self, path: Option<PathBuf>) {
        self.answers.borrow_mut().push_back(path);
    }

    fn next(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        self.filters.borrow_mut().push(*filter);
        self.answers.borrow_mut().pop_front().flatten()
    }
}

impl FilePicker for ScriptedPicker {
    fn pick_open(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        self.next(filter)
    }

    fn pick_save(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        self.next(filter)
    }
}

/// Language services that finish only when the test says so.
pub struct GatedServices {
    gate: Mutex<Receiver<()>>,
}

impl GatedServices {
    pub fn pair() -> (Sender<()>, Arc<dyn LanguageServices>) {
        let (open, gate) = bounded(1);
        let services = GatedServices {
            gate: Mutex::new(gate),
        };
        (open, Arc::new(services))
    }
}

impl LanguageServices for GatedServices {
    fn warm_up(&self, _language: Language) -> Result<(), String> {
        let gate = self.gate.lock().map_err(|e| e.to_string())?;
        gate.recv().map_err(|e| e.to_string())
    }
}
