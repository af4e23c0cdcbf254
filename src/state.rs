//! État partagé entre les workers actix.

use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::inference::ModelInference;

pub struct AppState {
    pub config: AppConfig,
    model: OnceCell<ModelInference>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            model: OnceCell::new(),
        }
    }

    /// Chargement paresseux et mémoïsé de l'artefact ONNX. Tant que le
    /// chargement échoue, chaque appel retente (l'artefact peut être déposé
    /// après le démarrage).
    pub fn model(&self) -> Result<&ModelInference, ApiError> {
        self.model.get_or_try_init(|| {
            ModelInference::load(&self.config.model_path).map_err(|e| {
                ApiError::ModelUnavailable(format!(
                    "{}: {}",
                    self.config.model_path.display(),
                    e
                ))
            })
        })
    }

    /// Tentative de chargement au démarrage. Les pages de contenu restent
    /// servies même sans artefact; seul le simulateur répond 503.
    pub fn warm_up(&self) {
        match self.model() {
            Ok(_) => info!("✅ Modèle ONNX chargé: {}", self.config.model_path.display()),
            Err(e) => warn!("⚠️ {} - le simulateur répondra 503 tant que l'artefact est absent", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modele_absent_donne_indisponible() {
        let state = AppState::new(AppConfig::from_lookup(|cle| match cle {
            "MODEL_PATH" => Some("models/inexistant.onnx".to_string()),
            _ => None,
        }));
        match state.model() {
            Err(ApiError::ModelUnavailable(message)) => {
                assert!(message.contains("models/inexistant.onnx"));
            }
            autre => panic!("attendu ModelUnavailable, obtenu {:?}", autre.map(|_| ())),
        }
    }
}
