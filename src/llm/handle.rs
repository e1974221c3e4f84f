use super::client::TextGenerator;
use std::{
    fmt,
    sync::{Arc, OnceLock},
};
use tracing::{info, warn};

/// Process-wide slot for the loaded generator.
///
/// Written at most once, by `initialize` during startup and before the
/// listener accepts connections. Request handlers only read it. An empty slot
/// means the service answers from the fallback responder.
#[derive(Clone, Default)]
pub struct ModelHandle {
    slot: Arc<OnceLock<Arc<dyn TextGenerator>>>,
}

impl ModelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the generator's `load` probe and stores it on success. Returns
    /// whether the model is usable; failure is logged, never propagated.
    pub async fn initialize(&self, generator: Arc<dyn TextGenerator>) -> bool {
        let model_id = generator.model_id();
        info!("Loading model {}", model_id);

        if let Err(e) = generator.load().await {
            warn!(
                "Model {} failed to load, using fallback responses: {}",
                model_id, e
            );
            return false;
        }

        if self.slot.set(generator).is_err() {
            warn!("Model handle already initialized, ignoring {}", model_id);
            return false;
        }

        info!("Model {} loaded successfully", model_id);
        true
    }

    pub fn get(&self) -> Option<Arc<dyn TextGenerator>> {
        self.slot.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
