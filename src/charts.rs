//! Galerie des figures PNG pré-générées par la phase d'exploration.
//! Le manifeste est statique; la disponibilité de chaque fichier est vérifiée
//! à la demande pour que l'interface puisse signaler une figure manquante au
//! lieu d'un lien cassé.

use std::path::Path;

use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct ChartImage {
    pub fichier: &'static str,
    pub legende: &'static str,
    pub disponible: bool,
}

impl ChartImage {
    const fn new(fichier: &'static str, legende: &'static str) -> Self {
        ChartImage {
            fichier,
            legende,
            disponible: false,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ChartSection {
    pub titre: &'static str,
    pub commentaire: Option<&'static str>,
    pub images: Vec<ChartImage>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChartTab {
    pub titre: &'static str,
    pub sections: Vec<ChartSection>,
}

/// Manifeste complet, avec `disponible` résolu contre le répertoire d'images.
pub fn galerie(img_dir: &Path) -> Vec<ChartTab> {
    let mut onglets = manifeste();
    for onglet in &mut onglets {
        for section in &mut onglet.sections {
            for image in &mut section.images {
                image.disponible = img_dir.join(image.fichier).is_file();
            }
        }
    }
    onglets
}

fn manifeste() -> Vec<ChartTab> {
    vec![
        ChartTab {
            titre: "🌍 Panorama National",
            sections: vec![
                ChartSection {
                    titre: "Répartition DPE & GES",
                    commentaire: Some(
                        "💡 On observe souvent une corrélation entre les étiquettes DPE et GES, \
                         bien que le mode de chauffage influence fortement le GES.",
                    ),
                    images: vec![
                        ChartImage::new(
                            "repartition_etiquette_DPE_France.png",
                            "Répartition nationale des DPE",
                        ),
                        ChartImage::new(
                            "repartition_etiquette_GES_France.png",
                            "Répartition nationale des GES",
                        ),
                    ],
                },
                ChartSection {
                    titre: "Consommation réelle",
                    commentaire: None,
                    images: vec![ChartImage::new(
                        "repartition_conso_France.png",
                        "Distribution de la consommation énergétique (kWh/m²/an)",
                    )],
                },
            ],
        },
        ChartTab {
            titre: "🗺️ Géographie & Climat",
            sections: vec![
                ChartSection {
                    titre: "La France des passoires vs bâtiments écolos",
                    commentaire: None,
                    images: vec![
                        ChartImage::new(
                            "part_passoires_thermiques_par_departement.png",
                            "Part des passoires (F & G)",
                        ),
                        ChartImage::new(
                            "part_batiments_ecolo_par_departements.png",
                            "Part des bâtiments performants (A & B)",
                        ),
                    ],
                },
                ChartSection {
                    titre: "Influence de l'environnement",
                    commentaire: None,
                    images: vec![
                        ChartImage::new(
                            "repartition_DPE_regions.png",
                            "DPE par Région administrative",
                        ),
                        ChartImage::new(
                            "repartition_zone_climatique.png",
                            "Impact du climat local",
                        ),
                    ],
                },
                ChartSection {
                    titre: "Focus Altitude",
                    commentaire: None,
                    images: vec![ChartImage::new(
                        "repartition_classe_altitude.png",
                        "Répartition des classes selon l'altitude",
                    )],
                },
            ],
        },
        ChartTab {
            titre: "🏗️ Caractéristiques Bâti",
            sections: vec![
                ChartSection {
                    titre: "Type de bâtiment & Énergie",
                    commentaire: None,
                    images: vec![
                        ChartImage::new(
                            "etiquette_DPE_type_bat.png",
                            "DPE selon le type de logement",
                        ),
                        ChartImage::new(
                            "etiquette_GES_type_bat.png",
                            "GES selon le type de logement",
                        ),
                    ],
                },
                ChartSection {
                    titre: "Source d'énergie principale",
                    commentaire: None,
                    images: vec![ChartImage::new(
                        "repartition_type_energie_n1.png",
                        "Répartition par type d'énergie",
                    )],
                },
                ChartSection {
                    titre: "Inertie du bâtiment",
                    commentaire: Some(
                        "L'inertie thermique joue un rôle clé dans le confort et la performance.",
                    ),
                    images: vec![ChartImage::new(
                        "repartition_classe_inertie_batiment.png",
                        "Classement selon l'inertie",
                    )],
                },
            ],
        },
        ChartTab {
            titre: "⏳ Temps & Surface",
            sections: vec![
                ChartSection {
                    titre: "L'impact de l'ancienneté",
                    commentaire: Some(
                        "L'évolution des normes de construction au fil du temps.",
                    ),
                    images: vec![
                        ChartImage::new(
                            "repartition_etiquette_periode.png",
                            "Étiquettes par période de construction",
                        ),
                        ChartImage::new(
                            "repartition_periode_etiquette.png",
                            "Périodes de construction par étiquette",
                        ),
                    ],
                },
                ChartSection {
                    titre: "L'impact de la surface",
                    commentaire: Some(
                        "Les petites surfaces sont-elles défavorisées par le calcul du DPE ?",
                    ),
                    images: vec![ChartImage::new(
                        "surface_etiquette_boxplot.png",
                        "Distribution des surfaces par étiquette",
                    )],
                },
                ChartSection {
                    titre: "🔎 Détail du nettoyage des données (Outliers)",
                    commentaire: Some(
                        "Analyse de la distribution des surfaces avant et après traitement des \
                         valeurs aberrantes.",
                    ),
                    images: vec![
                        ChartImage::new("surface_without_outliers.png", "Surface sans outliers"),
                        ChartImage::new(
                            "surface_without_outliers_dist.png",
                            "Distribution nettoyée",
                        ),
                    ],
                },
            ],
        },
    ]
}
