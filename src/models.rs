use serde::{Deserialize, Serialize};

use crate::inference::MODEL_VERSION;

/// Vocabulaires fermés du formulaire. L'ordre des valeurs est celui de
/// l'encodage ordinal utilisé à l'entraînement: ne pas réordonner.
pub const TYPES_BATIMENT: [&str; 2] = ["Maison", "Appartement"];
pub const PERIODES_CONSTRUCTION: [&str; 5] =
    ["< 1948", "1949-1974", "1975-2000", "2001-2012", ">= 2013"];
pub const QUALITES_ISOLATION: [&str; 4] = ["insuffisante", "moyenne", "bonne", "très bonne"];

pub const SURFACE_MIN: f32 = 5.0;
pub const SURFACE_MAX: f32 = 1000.0;
pub const HAUTEUR_MIN: f32 = 1.8;
pub const HAUTEUR_MAX: f32 = 4.0;

/// Largeur du vecteur d'entrée attendu par l'artefact ONNX.
pub const NB_FEATURES: usize = 5;

/// Caractéristiques d'un logement saisies dans le simulateur.
/// Les noms de champs correspondent aux colonnes du pipeline d'entraînement.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DwellingFeatures {
    pub type_batiment: String,
    pub periode_construction: String,
    pub surface_habitable: f32,
    pub hauteur_sous_plafond: f32,
    pub qualite_isolation_murs: String,
}

fn ordinal(valeur: &str, vocabulaire: &[&str]) -> Option<usize> {
    vocabulaire.iter().position(|v| *v == valeur)
}

impl DwellingFeatures {
    pub fn validate(&self) -> Result<(), String> {
        if ordinal(&self.type_batiment, &TYPES_BATIMENT).is_none() {
            return Err(format!(
                "Type de bâtiment inconnu: \"{}\" (attendu: {})",
                self.type_batiment,
                TYPES_BATIMENT.join(", ")
            ));
        }
        if ordinal(&self.periode_construction, &PERIODES_CONSTRUCTION).is_none() {
            return Err(format!(
                "Période de construction inconnue: \"{}\" (attendu: {})",
                self.periode_construction,
                PERIODES_CONSTRUCTION.join(", ")
            ));
        }
        if ordinal(&self.qualite_isolation_murs, &QUALITES_ISOLATION).is_none() {
            return Err(format!(
                "Qualité d'isolation des murs inconnue: \"{}\" (attendu: {})",
                self.qualite_isolation_murs,
                QUALITES_ISOLATION.join(", ")
            ));
        }
        if !(SURFACE_MIN..=SURFACE_MAX).contains(&self.surface_habitable) {
            return Err(format!(
                "Surface habitable hors bornes [{} ; {}] m² (valeur: {})",
                SURFACE_MIN, SURFACE_MAX, self.surface_habitable
            ));
        }
        if !(HAUTEUR_MIN..=HAUTEUR_MAX).contains(&self.hauteur_sous_plafond) {
            return Err(format!(
                "Hauteur sous plafond hors bornes [{} ; {}] m (valeur: {})",
                HAUTEUR_MIN, HAUTEUR_MAX, self.hauteur_sous_plafond
            ));
        }
        Ok(())
    }

    /// Vecteur de features dans l'ordre des colonnes d'entraînement.
    /// Suppose un enregistrement déjà validé; une catégorie inconnue
    /// s'encode en 0.
    pub fn encode(&self) -> [f32; NB_FEATURES] {
        [
            ordinal(&self.type_batiment, &TYPES_BATIMENT).unwrap_or(0) as f32,
            ordinal(&self.periode_construction, &PERIODES_CONSTRUCTION).unwrap_or(0) as f32,
            self.surface_habitable,
            self.hauteur_sous_plafond,
            ordinal(&self.qualite_isolation_murs, &QUALITES_ISOLATION).unwrap_or(0) as f32,
        ]
    }

    pub fn analyze_features(&self) -> Vec<FeatureAnalysis> {
        let score_periode = ordinal(&self.periode_construction, &PERIODES_CONSTRUCTION)
            .unwrap_or(0) as f32
            / (PERIODES_CONSTRUCTION.len() - 1) as f32;
        let score_isolation = ordinal(&self.qualite_isolation_murs, &QUALITES_ISOLATION)
            .unwrap_or(0) as f32
            / (QUALITES_ISOLATION.len() - 1) as f32;
        // Mitoyenneté: l'appartement perd moins de chaleur que la maison.
        let score_type = if self.type_batiment == "Appartement" { 0.6 } else { 0.4 };
        // Les petites surfaces sont pénalisées par le calcul au m².
        let score_surface = if self.surface_habitable < 40.0 { 0.3 } else { 0.6 };
        // Plus de volume à chauffer sous un plafond haut.
        let score_hauteur =
            (HAUTEUR_MAX - self.hauteur_sous_plafond) / (HAUTEUR_MAX - HAUTEUR_MIN);

        vec![
            FeatureAnalysis::new("Type de bâtiment", &self.type_batiment, score_type),
            FeatureAnalysis::new(
                "Période de construction",
                &self.periode_construction,
                score_periode,
            ),
            FeatureAnalysis::new(
                "Surface habitable",
                &format!("{} m²", self.surface_habitable),
                score_surface,
            ),
            FeatureAnalysis::new(
                "Hauteur sous plafond",
                &format!("{} m", self.hauteur_sous_plafond),
                score_hauteur,
            ),
            FeatureAnalysis::new(
                "Isolation des murs",
                &self.qualite_isolation_murs,
                score_isolation,
            ),
        ]
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct FeatureAnalysis {
    pub name: String,
    pub valeur: String,
    pub impact: String,
    pub color: String,
}

impl FeatureAnalysis {
    fn new(name: &str, valeur: &str, score: f32) -> Self {
        FeatureAnalysis {
            name: name.to_string(),
            valeur: valeur.to_string(),
            impact: Self::get_impact_text(score),
            color: Self::get_impact_color(score),
        }
    }

    fn get_impact_text(score: f32) -> String {
        match score {
            s if s > 0.8 => "TRÈS FAVORABLE".to_string(),
            s if s > 0.6 => "FAVORABLE".to_string(),
            s if s > 0.4 => "NEUTRE".to_string(),
            s if s > 0.2 => "PÉNALISANT".to_string(),
            _ => "TRÈS PÉNALISANT".to_string(),
        }
    }

    fn get_impact_color(score: f32) -> String {
        if score > 0.6 {
            "🟢".to_string()
        } else if score > 0.4 {
            "🟡".to_string()
        } else {
            "🔴".to_string()
        }
    }
}

/// Étiquette énergie, selon les seuils réglementaires 2021 en énergie
/// primaire (kWh/m²/an).
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum EtiquetteDpe {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EtiquetteDpe {
    pub fn from_consommation(conso: f32) -> Self {
        match conso {
            c if c <= 70.0 => EtiquetteDpe::A,
            c if c <= 110.0 => EtiquetteDpe::B,
            c if c <= 180.0 => EtiquetteDpe::C,
            c if c <= 250.0 => EtiquetteDpe::D,
            c if c <= 330.0 => EtiquetteDpe::E,
            c if c <= 420.0 => EtiquetteDpe::F,
            _ => EtiquetteDpe::G,
        }
    }

    pub fn passoire(self) -> bool {
        matches!(self, EtiquetteDpe::F | EtiquetteDpe::G)
    }

    pub fn couleur(self) -> &'static str {
        match self {
            EtiquetteDpe::A | EtiquetteDpe::B => "🟢",
            EtiquetteDpe::C | EtiquetteDpe::D => "🟡",
            EtiquetteDpe::E => "🟠",
            EtiquetteDpe::F | EtiquetteDpe::G => "🔴",
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct PredictionResult {
    /// Consommation estimée en énergie primaire (kWh/m²/an).
    pub prediction: f32,
    pub etiquette: EtiquetteDpe,
    pub etiquette_couleur: String,
    pub passoire_energetique: bool,
    pub message: String,
    pub features_analysis: Vec<FeatureAnalysis>,
    /// Écho de l'enregistrement transmis au modèle.
    pub donnees_envoyees: DwellingFeatures,
    pub timestamp: String,
    pub model_version: String,
}

impl PredictionResult {
    pub fn new(prediction: f32, features: &DwellingFeatures) -> Self {
        let etiquette = EtiquetteDpe::from_consommation(prediction);

        PredictionResult {
            prediction,
            etiquette,
            etiquette_couleur: etiquette.couleur().to_string(),
            passoire_energetique: etiquette.passoire(),
            message: Self::generate_message(etiquette),
            features_analysis: features.analyze_features(),
            donnees_envoyees: features.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model_version: MODEL_VERSION.to_string(),
        }
    }

    fn generate_message(etiquette: EtiquetteDpe) -> String {
        match etiquette {
            EtiquetteDpe::A | EtiquetteDpe::B => {
                "🏆 Logement performant - valeur verte maximale".to_string()
            }
            EtiquetteDpe::C | EtiquetteDpe::D => {
                "👍 Performance correcte - des améliorations ciblées restent possibles".to_string()
            }
            EtiquetteDpe::E => {
                "⚠️ Proche du seuil de passoire - travaux à anticiper".to_string()
            }
            EtiquetteDpe::F => {
                "🚨 Passoire énergétique - rénovation prioritaire".to_string()
            }
            EtiquetteDpe::G => {
                "🚨 Passoire énergétique - bien visé par les restrictions de location".to_string()
            }
        }
    }
}

/// Bornes et vocabulaires exposés au formulaire, pour que l'interface et la
/// validation serveur partagent la même source.
#[derive(Debug, Serialize)]
pub struct ChampNumerique {
    pub min: f32,
    pub max: f32,
    pub defaut: f32,
    pub pas: f32,
}

#[derive(Debug, Serialize)]
pub struct SimulatorOptions {
    pub types_batiment: Vec<&'static str>,
    pub periodes_construction: Vec<&'static str>,
    pub qualites_isolation_murs: Vec<&'static str>,
    pub surface_habitable: ChampNumerique,
    pub hauteur_sous_plafond: ChampNumerique,
}

impl SimulatorOptions {
    pub fn new() -> Self {
        SimulatorOptions {
            types_batiment: TYPES_BATIMENT.to_vec(),
            periodes_construction: PERIODES_CONSTRUCTION.to_vec(),
            qualites_isolation_murs: QUALITES_ISOLATION.to_vec(),
            surface_habitable: ChampNumerique {
                min: SURFACE_MIN,
                max: SURFACE_MAX,
                defaut: 60.0,
                pas: 1.0,
            },
            hauteur_sous_plafond: ChampNumerique {
                min: HAUTEUR_MIN,
                max: HAUTEUR_MAX,
                defaut: 2.5,
                pas: 0.1,
            },
        }
    }
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
    pub execution_time_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
            execution_time_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logement_valide() -> DwellingFeatures {
        DwellingFeatures {
            type_batiment: "Maison".to_string(),
            periode_construction: "1975-2000".to_string(),
            surface_habitable: 60.0,
            hauteur_sous_plafond: 2.5,
            qualite_isolation_murs: "moyenne".to_string(),
        }
    }

    #[test]
    fn validation_accepte_un_logement_valide() {
        assert!(logement_valide().validate().is_ok());
    }

    #[test]
    fn validation_accepte_les_bornes() {
        let mut logement = logement_valide();
        logement.surface_habitable = SURFACE_MIN;
        logement.hauteur_sous_plafond = HAUTEUR_MAX;
        assert!(logement.validate().is_ok());
        logement.surface_habitable = SURFACE_MAX;
        logement.hauteur_sous_plafond = HAUTEUR_MIN;
        assert!(logement.validate().is_ok());
    }

    #[test]
    fn validation_rejette_surface_hors_bornes() {
        let mut logement = logement_valide();
        logement.surface_habitable = 4.9;
        assert!(logement.validate().is_err());
        logement.surface_habitable = 1000.5;
        assert!(logement.validate().is_err());
    }

    #[test]
    fn validation_rejette_hauteur_hors_bornes() {
        let mut logement = logement_valide();
        logement.hauteur_sous_plafond = 1.7;
        assert!(logement.validate().is_err());
        logement.hauteur_sous_plafond = 4.1;
        assert!(logement.validate().is_err());
    }

    #[test]
    fn validation_rejette_categorie_inconnue() {
        let mut logement = logement_valide();
        logement.type_batiment = "Château".to_string();
        let erreur = logement.validate().unwrap_err();
        assert!(erreur.contains("Type de bâtiment inconnu"));

        let mut logement = logement_valide();
        logement.qualite_isolation_murs = "parfaite".to_string();
        assert!(logement.validate().is_err());
    }

    #[test]
    fn encodage_ordinal_dans_l_ordre_des_colonnes() {
        let logement = DwellingFeatures {
            type_batiment: "Appartement".to_string(),
            periode_construction: ">= 2013".to_string(),
            surface_habitable: 45.0,
            hauteur_sous_plafond: 2.7,
            qualite_isolation_murs: "très bonne".to_string(),
        };
        assert_eq!(logement.encode(), [1.0, 4.0, 45.0, 2.7, 3.0]);
    }

    #[test]
    fn encodage_premiere_categorie_vaut_zero() {
        let logement = DwellingFeatures {
            type_batiment: "Maison".to_string(),
            periode_construction: "< 1948".to_string(),
            surface_habitable: 100.0,
            hauteur_sous_plafond: 2.5,
            qualite_isolation_murs: "insuffisante".to_string(),
        };
        assert_eq!(logement.encode(), [0.0, 0.0, 100.0, 2.5, 0.0]);
    }

    #[test]
    fn etiquette_seuils_reglementaires() {
        assert_eq!(EtiquetteDpe::from_consommation(70.0), EtiquetteDpe::A);
        assert_eq!(EtiquetteDpe::from_consommation(70.1), EtiquetteDpe::B);
        assert_eq!(EtiquetteDpe::from_consommation(110.0), EtiquetteDpe::B);
        assert_eq!(EtiquetteDpe::from_consommation(180.0), EtiquetteDpe::C);
        assert_eq!(EtiquetteDpe::from_consommation(250.0), EtiquetteDpe::D);
        assert_eq!(EtiquetteDpe::from_consommation(330.0), EtiquetteDpe::E);
        assert_eq!(EtiquetteDpe::from_consommation(420.0), EtiquetteDpe::F);
        assert_eq!(EtiquetteDpe::from_consommation(420.1), EtiquetteDpe::G);
    }

    #[test]
    fn passoire_pour_f_et_g() {
        assert!(!EtiquetteDpe::E.passoire());
        assert!(EtiquetteDpe::F.passoire());
        assert!(EtiquetteDpe::G.passoire());
    }

    #[test]
    fn resultat_echo_des_donnees_envoyees() {
        let logement = logement_valide();
        let resultat = PredictionResult::new(250.0, &logement);
        assert_eq!(resultat.etiquette, EtiquetteDpe::D);
        assert!(!resultat.passoire_energetique);
        assert_eq!(resultat.donnees_envoyees, logement);
        assert_eq!(resultat.features_analysis.len(), 5);
    }

    #[test]
    fn resultat_signale_une_passoire() {
        let resultat = PredictionResult::new(500.0, &logement_valide());
        assert_eq!(resultat.etiquette, EtiquetteDpe::G);
        assert!(resultat.passoire_energetique);
        assert!(resultat.message.contains("Passoire"));
    }

    #[test]
    fn enveloppe_api() {
        let ok = ApiResponse::success(42);
        assert!(ok.success);
        assert_eq!(ok.data, Some(42));
        assert!(ok.error.is_none());

        let erreur = ApiResponse::<i32>::error("boum");
        assert!(!erreur.success);
        assert!(erreur.data.is_none());
        assert_eq!(erreur.error.as_deref(), Some("boum"));
    }

    #[test]
    fn options_du_simulateur_alignees_sur_la_validation() {
        let options = SimulatorOptions::new();
        assert_eq!(options.types_batiment.len(), 2);
        assert_eq!(options.periodes_construction.len(), 5);
        assert_eq!(options.qualites_isolation_murs.len(), 4);
        assert_eq!(options.surface_habitable.min, SURFACE_MIN);
        assert_eq!(options.hauteur_sous_plafond.max, HAUTEUR_MAX);
    }
}
