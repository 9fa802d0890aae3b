use crate::canvas::StrokeCanvas;
use crate::classify::{AssetStore, Classifier};
use crate::config::{CanvasMode, ShellConfig, ShellMessages};

/// Headless version of the "draw, classify, clear" screen.
///
/// Owns a persistent canvas plus the classifier and asset store it was
/// started with, and keeps the status line a host would display. The host
/// maps its buttons to [`Shell::on_classify`] and [`Shell::on_clear`] and
/// forwards touch input to [`Shell::canvas_mut`].
pub struct Shell {
    canvas: StrokeCanvas,
    classifier: Box<dyn Classifier>,
    assets: Box<dyn AssetStore>,
    messages: ShellMessages,
    status: String,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("canvas", &self.canvas)
            .field("messages", &self.messages)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Create a shell around an injected classifier and asset store.
    ///
    /// Classification needs committed pixels, so a transient canvas mode in
    /// `config` is overridden with the persistent one. An unusable stroke width
    /// falls back to the default as in [`StrokeCanvas::new`].
    pub fn new(
        config: ShellConfig,
        classifier: Box<dyn Classifier>,
        assets: Box<dyn AssetStore>,
    ) -> Self {
        let mut canvas_config = config.canvas;
        if canvas_config.mode != CanvasMode::Persistent {
            log::warn!("Shell requires a persistent canvas, overriding {:?}", canvas_config.mode);
            canvas_config.mode = CanvasMode::Persistent;
        }

        let status = config.messages.prompt.clone();
        Self {
            canvas: StrokeCanvas::new(canvas_config),
            classifier,
            assets,
            messages: config.messages,
            status,
        }
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut StrokeCanvas {
        &mut self.canvas
    }

    /// The text the host should currently display
    pub fn status(&self) -> &str {
        &self.status
    }

    /// "Clear" action: wipe the drawing and show the prompt again
    pub fn on_clear(&mut self) {
        self.canvas.clear();
        self.status = self.messages.prompt.clone();
    }

    /// "Classify" action.
    ///
    /// Without a raster image the classifier is not invoked and the status
    /// shows the no-image message. Otherwise the status shows the label, or
    /// the classifier's failure.
    pub fn on_classify(&mut self) -> &str {
        self.status = match self.canvas.get_image() {
            None => {
                log::warn!("Classify requested before the canvas has an image");
                self.messages.no_image.clone()
            }
            Some(image) => match self.classifier.classify(&image, self.assets.as_ref()) {
                Ok(label) => {
                    log::info!("Drawing classified as {}", label);
                    format!("{}{}", self.messages.classification_prefix, label)
                }
                Err(err) => {
                    log::error!("Classification failed: {}", err);
                    format!("{}{}", self.messages.error_prefix, err)
                }
            },
        };
        &self.status
    }
}
