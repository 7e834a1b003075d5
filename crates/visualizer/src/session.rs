//! One visualizer window: payload in, surface shown, commands dispatched,
//! then closed.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use enumviz_payload::{transport, DecodedModel, MalformedPayload, PayloadDecoder, Shape};
use tracing::{debug, info, warn};

use crate::commands::{self, Command, FileAction};
use crate::files::{ExternalIoError, FileActions};
use crate::notify::{Notification, NotificationQueue, Notifier};
use crate::options::VisualizerOptions;
use crate::selector::PresentationSelector;
use crate::surface::DisplaySurface;
use crate::warmup::LanguageServices;
use crate::widgets::WidgetFactory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
    Disposed,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the session already shows a payload")]
    AlreadyLoaded,
    #[error("the session is closed")]
    Disposed,
    #[error("the payload could not be visualized: {0}")]
    Malformed(#[from] MalformedPayload),
    #[error("failed to read payload: {0}")]
    Io(#[from] io::Error),
}

enum State {
    Empty,
    Loaded(DisplaySurface),
    Disposed,
}

/// Keeps every notification for the window and hands a copy to the host's
/// notifier, if one is attached.
struct Outbox {
    queue: NotificationQueue,
    host: Option<Box<dyn Notifier>>,
}

impl Notifier for Outbox {
    fn notify(&mut self, notification: Notification) {
        if let Some(host) = &mut self.host {
            host.notify(notification.clone());
        }
        self.queue.notify(notification);
    }
}

/// Lifecycle: `Empty` → `Loaded` → `Disposed`.
///
/// Failures never leave the window unusable: a bad payload keeps the session
/// `Empty` and queues an error notification; a failed file action queues a
/// notification and keeps the surface as it was.
pub struct VisualizerSession {
    selector: PresentationSelector,
    files: FileActions,
    decoder: PayloadDecoder,
    notifications: Outbox,
    options: VisualizerOptions,
    state: State,
}

impl VisualizerSession {
    pub fn new(factory: Box<dyn WidgetFactory>, files: FileActions) -> Self {
        Self::with_options(factory, files, VisualizerOptions::default())
    }

    pub fn with_options(
        factory: Box<dyn WidgetFactory>,
        files: FileActions,
        options: VisualizerOptions,
    ) -> Self {
        let mut selector = PresentationSelector::new(factory);
        selector.set_warm_up(options.warm_up_language_services);
        Self {
            selector,
            files,
            decoder: PayloadDecoder::with_max_entries(options.max_decoded_entries),
            notifications: Outbox {
                queue: NotificationQueue::new(),
                host: None,
            },
            options,
            state: State::Empty,
        }
    }

    pub fn with_language_services(mut self, services: Arc<dyn LanguageServices>) -> Self {
        self.selector = self.selector.with_language_services(services);
        self
    }

    /// Forwards every notification to `notifier` as it is raised. The
    /// session's own queue still records them.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifications.host = Some(notifier);
        self
    }

    pub fn state(&self) -> SessionState {
        match self.state {
            State::Empty => SessionState::Empty,
            State::Loaded(_) => SessionState::Loaded,
            State::Disposed => SessionState::Disposed,
        }
    }

    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    /// Decodes `bytes` and shows the result.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Shape, SessionError> {
        self.ensure_empty()?;
        match self.decoder.decode(bytes) {
            Ok(model) => self.show(model),
            Err(err) => {
                warn!(error = %err, bytes = bytes.len(), "payload rejected");
                self.notifications
                    .notify(Notification::error("Visualization failed", err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Reads `source` to EOF, then behaves like
    /// [`load_bytes`](Self::load_bytes).
    pub fn load_from<R: Read>(&mut self, source: R) -> Result<Shape, SessionError> {
        self.ensure_empty()?;
        match transport::read_payload(source) {
            Ok(payload) => self.load_bytes(payload.as_bytes()),
            Err(err) => {
                warn!(error = %err, "payload stream failed");
                self.notifications
                    .notify(Notification::error("Visualization failed", err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Shows an already decoded model.
    pub fn show(&mut self, model: DecodedModel) -> Result<Shape, SessionError> {
        self.ensure_empty()?;
        let shape = model.shape();
        if model.truncated() && self.options.notify_truncation {
            self.notifications.notify(Notification::info(
                "Partial view",
                format!("Only the first {} items are shown.", model.len()),
            ));
        }
        let surface = self.selector.select(model);
        info!(%shape, surface = surface.name(), "session loaded");
        self.state = State::Loaded(surface);
        Ok(shape)
    }

    fn ensure_empty(&self) -> Result<(), SessionError> {
        match self.state {
            State::Empty => Ok(()),
            State::Loaded(_) => Err(SessionError::AlreadyLoaded),
            State::Disposed => Err(SessionError::Disposed),
        }
    }

    pub fn surface(&self) -> Option<&DisplaySurface> {
        match &self.state {
            State::Loaded(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut DisplaySurface> {
        match &mut self.state {
            State::Loaded(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications.queue
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications.queue
    }

    /// Runs the command bound to `id`. Returns whether anything ran.
    ///
    /// Unknown ids, commands that do not apply to the current surface, and
    /// commands sent before a payload is loaded are ignored.
    pub fn dispatch(&mut self, id: &str) -> bool {
        let Some(command) = commands::lookup(id) else {
            debug!(id, "ignoring unknown command");
            return false;
        };
        let State::Loaded(surface) = &mut self.state else {
            debug!(id, "no surface for command");
            return false;
        };
        let notifications = &mut self.notifications;
        match (command, surface) {
            (Command::Edit(operation), DisplaySurface::Text(text)) => {
                if let Err(err) = text.execute(operation) {
                    warn!(id, error = %err, "command failed");
                    notifications
                        .notify(Notification::error("Error executing command", err.to_string()));
                }
            }
            (Command::Toggle(option), DisplaySurface::Text(text)) => {
                let enabled = text.toggle(option);
                debug!(?option, enabled, "view option toggled");
            }
            (Command::File(FileAction::NewDocument), DisplaySurface::Text(text)) => {
                text.new_document();
            }
            (Command::File(FileAction::OpenDocument), DisplaySurface::Text(text)) => {
                let result = self.files.open(text);
                if matches!(result, Ok(Some(_))) {
                    self.selector.start_warmup(text);
                }
                report("Open", result, notifications);
            }
            (Command::File(FileAction::SaveDocument), DisplaySurface::Text(text)) => {
                report("Save", self.files.save(text), notifications);
            }
            (Command::File(FileAction::ExportSpreadsheet), DisplaySurface::Grid(grid)) => {
                report("Export", self.files.export(grid), notifications);
            }
            (command, surface) => {
                debug!(?command, surface = surface.name(), "command does not apply");
                return false;
            }
        }
        true
    }

    /// Picks up a finished background warm-up, if any.
    pub fn poll_background(&mut self) -> bool {
        match &mut self.state {
            State::Loaded(surface) => surface.poll_background(),
            _ => false,
        }
    }

    /// Closes the window. Widgets are cleared and any warm-up is abandoned.
    pub fn close(&mut self) {
        if matches!(self.state, State::Disposed) {
            return;
        }
        self.state = State::Disposed;
        info!("session closed");
    }
}

fn report(
    action: &str,
    result: Result<Option<PathBuf>, ExternalIoError>,
    notifications: &mut dyn Notifier,
) {
    match result {
        Ok(Some(path)) => debug!(action, path = %path.display(), "file action done"),
        Ok(None) => debug!(action, "file action cancelled"),
        Err(err) => {
            warn!(action, error = %err, "file action failed");
            notifications.notify(Notification::warning(format!("{action} failed"), err.to_string()));
        }
    }
}
