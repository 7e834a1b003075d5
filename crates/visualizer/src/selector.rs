//! Maps a decoded model to a display surface.

use std::sync::Arc;

use enumviz_payload::DecodedModel;
use tracing::debug;

use crate::format::format_sequence;
use crate::language::Language;
use crate::surface::{DisplaySurface, GridSurface, TextSurface};
use crate::warmup::{LanguageServices, Warmup};
use crate::widgets::WidgetFactory;

/// Tables go to a read-only grid; sequences and text go to the editor.
pub struct PresentationSelector {
    factory: Box<dyn WidgetFactory>,
    services: Option<Arc<dyn LanguageServices>>,
    warm_up: bool,
}

impl PresentationSelector {
    pub fn new(factory: Box<dyn WidgetFactory>) -> Self {
        Self {
            factory,
            services: None,
            warm_up: true,
        }
    }

    pub fn with_language_services(mut self, services: Arc<dyn LanguageServices>) -> Self {
        self.services = Some(services);
        self
    }

    pub fn set_warm_up(&mut self, enabled: bool) {
        self.warm_up = enabled;
    }

    pub fn select(&mut self, model: DecodedModel) -> DisplaySurface {
        let surface = match model {
            DecodedModel::Tabular(table) => {
                DisplaySurface::Grid(GridSurface::new(self.factory.create_grid(), table))
            }
            DecodedModel::Sequential(seq) => {
                let text = format_sequence(&seq);
                DisplaySurface::Text(TextSurface::new(
                    self.factory.create_text(),
                    &text,
                    Language::PlainText,
                ))
            }
            DecodedModel::Textual(doc) => {
                let language = Language::from_hint(doc.language.as_deref());
                let mut surface = TextSurface::new(self.factory.create_text(), &doc.text, language);
                self.start_warmup(&mut surface);
                DisplaySurface::Text(surface)
            }
        };
        debug!(surface = surface.name(), "selected surface");
        surface
    }

    /// Starts a background warm-up for the surface's current language when
    /// services are configured and the language has any.
    pub fn start_warmup(&self, surface: &mut TextSurface) {
        let language = surface.language();
        if !self.warm_up || !language.has_language_services() {
            return;
        }
        if let Some(services) = &self.services {
            surface.attach_warmup(Warmup::spawn(Arc::clone(services), language));
        }
    }
}
