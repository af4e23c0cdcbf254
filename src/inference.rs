//! Frontière avec l'artefact ONNX produit par le pipeline d'entraînement.
//! Le modèle est opaque: un vecteur de features en entrée, une consommation
//! estimée en sortie.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tract_onnx::prelude::*;

use crate::models::NB_FEATURES;

pub const MODEL_VERSION: &str = "1.0.0";

type RunnableOnnx = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

// Le même vecteur d'entrée donne toujours la même prédiction: on mémorise
// par motif binaire des f32.
type CacheKey = [u32; NB_FEATURES];

pub struct ModelInference {
    model: RunnableOnnx,
    cache: DashMap<CacheKey, f32>,
    total_predictions: AtomicU64,
    cache_hits: AtomicU64,
}

impl ModelInference {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, NB_FEATURES)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            model,
            cache: DashMap::new(),
            total_predictions: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        })
    }

    /// Consommation estimée (kWh/m²/an) pour un vecteur encodé.
    pub fn predict(&self, features: &[f32; NB_FEATURES]) -> TractResult<f32> {
        let key = cache_key(features);
        if let Some(valeur) = self.cache.get(&key) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            self.total_predictions.fetch_add(1, Ordering::Relaxed);
            return Ok(*valeur);
        }

        let input_tensor = Tensor::from_shape(&[1, NB_FEATURES], features)?;
        let outputs = self.model.run(tvec!(input_tensor.into()))?;

        let prediction: f32 = *outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Aucune sortie du modèle"))?;

        self.cache.insert(key, prediction);
        self.total_predictions.fetch_add(1, Ordering::Relaxed);
        Ok(prediction)
    }

    pub fn batch_predict(
        &self,
        liste: &[[f32; NB_FEATURES]],
    ) -> TractResult<Vec<f32>> {
        liste.iter().map(|features| self.predict(features)).collect()
    }

    pub fn clear_cache(&self) -> usize {
        let entrees = self.cache.len();
        self.cache.clear();
        entrees
    }

    pub fn stats(&self) -> InferenceStats {
        InferenceStats {
            total_predictions: self.total_predictions.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_entries: self.cache.len(),
        }
    }

    pub fn get_model_info(&self) -> ModelInfo {
        ModelInfo {
            input_shape: vec![1, NB_FEATURES as i32],
            version: MODEL_VERSION.to_string(),
            features: vec![
                "Type de bâtiment".to_string(),
                "Période de construction".to_string(),
                "Surface habitable".to_string(),
                "Hauteur sous plafond".to_string(),
                "Qualité d'isolation des murs".to_string(),
            ],
        }
    }
}

fn cache_key(features: &[f32; NB_FEATURES]) -> CacheKey {
    features.map(f32::to_bits)
}

#[derive(Debug, Serialize)]
pub struct InferenceStats {
    pub total_predictions: u64,
    pub cache_hits: u64,
    pub cache_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub input_shape: Vec<i32>,
    pub version: String,
    pub features: Vec<String>,
}
