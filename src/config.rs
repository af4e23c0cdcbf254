//! Configuration du serveur lue depuis les variables d'environnement.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Chemin de l'artefact ONNX produit par le pipeline d'entraînement.
    pub model_path: PathBuf,
    pub static_dir: PathBuf,
    /// Répertoire des figures PNG pré-générées pour la page Dataviz.
    pub img_dir: PathBuf,
    pub rate_limit_per_min: u32,
    pub rate_limit_batch_per_min: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|cle| std::env::var(cle).ok())
    }

    // Les valeurs numériques mal formées retombent sur la valeur par défaut.
    pub(crate) fn from_lookup(lire: impl Fn(&str) -> Option<String>) -> Self {
        let host = lire("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lire("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let workers = lire("WORKERS")
            .and_then(|w| w.parse().ok())
            .unwrap_or_else(num_cpus::get);
        let model_path = lire("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models/dpe_regressor.onnx"));
        let static_dir = lire("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./static"));
        let img_dir = lire("IMG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./img"));
        let rate_limit_per_min = lire("RATE_LIMIT_PER_MIN")
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);
        let rate_limit_batch_per_min = lire("RATE_LIMIT_BATCH_PER_MIN")
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        Self {
            host,
            port,
            workers,
            model_path,
            static_dir,
            img_dir,
            rate_limit_per_min,
            rate_limit_batch_per_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valeurs_par_defaut() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.model_path, PathBuf::from("models/dpe_regressor.onnx"));
        assert_eq!(config.rate_limit_per_min, 100);
        assert_eq!(config.rate_limit_batch_per_min, 20);
        assert!(config.workers >= 1);
    }

    #[test]
    fn surcharge_par_environnement() {
        let config = AppConfig::from_lookup(|cle| match cle {
            "HOST" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9000".to_string()),
            "MODEL_PATH" => Some("/srv/modele.onnx".to_string()),
            _ => None,
        });
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_path, PathBuf::from("/srv/modele.onnx"));
    }

    #[test]
    fn port_mal_forme_retombe_sur_defaut() {
        let config = AppConfig::from_lookup(|cle| match cle {
            "PORT" => Some("neuf-mille".to_string()),
            "WORKERS" => Some("-3".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert!(config.workers >= 1);
    }
}
