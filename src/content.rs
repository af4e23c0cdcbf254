//! Contenu éditorial des pages Présentation et Résultats, servi en JSON et
//! rendu côté client. Le texte reprend la restitution du projet.

use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct PageMeta {
    pub slug: &'static str,
    pub titre: &'static str,
    pub icone: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct Metrique {
    pub label: &'static str,
    pub valeur: &'static str,
    pub delta: &'static str,
}

/// Un bloc de texte; `style` pilote l'encadré côté interface
/// ("normal", "info", "success", "warning").
#[derive(Debug, Serialize, Clone)]
pub struct Bloc {
    pub titre: &'static str,
    pub style: &'static str,
    pub markdown: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct Onglet {
    pub titre: &'static str,
    pub metriques: Vec<Metrique>,
    pub blocs: Vec<Bloc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Page {
    pub slug: &'static str,
    pub titre: &'static str,
    pub icone: &'static str,
    pub intro: &'static str,
    pub onglets: Vec<Onglet>,
}

pub fn liste() -> Vec<PageMeta> {
    pages()
        .into_iter()
        .map(|page| PageMeta {
            slug: page.slug,
            titre: page.titre,
            icone: page.icone,
        })
        .collect()
}

pub fn par_slug(slug: &str) -> Option<Page> {
    pages().into_iter().find(|page| page.slug == slug)
}

pub fn pages() -> Vec<Page> {
    vec![presentation(), resultats()]
}

fn presentation() -> Page {
    Page {
        slug: "presentation",
        titre: "Projet DPE : Modélisation & Prédiction",
        icone: "🏡",
        intro: "**Bienvenue sur l'interface de restitution de notre projet de Data Science.**\n\n\
            Ce projet explore les données du *Diagnostic de Performance Énergétique (DPE)* en France. \
            Il vise à appliquer des modèles de Machine Learning pour prédire l'étiquette énergétique \
            des logements et comprendre les facteurs déterminants de la consommation, à la croisée \
            des enjeux techniques, économiques et scientifiques.",
        onglets: vec![
            Onglet {
                titre: "🌍 Contexte",
                metriques: vec![],
                blocs: vec![
                    Bloc {
                        titre: "🛠️ Point de vue Technique",
                        style: "normal",
                        markdown: "- **Data Science & Bâtiment :** Exploration de données massives et hétérogènes issues du DPE.\n\
                            - **Complexité Réglementaire :** Le défi est de reproduire une logique réglementaire (paramètres physiques, climatiques, techniques) via des modèles statistiques.\n\
                            - **Stratégie de Modélisation :** Comparaison de modèles supervisés (Classification vs Régression) et gestion de déséquilibres de classes.",
                    },
                    Bloc {
                        titre: "💰 Point de vue Économique",
                        style: "normal",
                        markdown: "- **Valeur Verte :** Le DPE conditionne aujourd'hui la valeur vénale et locative des biens.\n\
                            - **Aide à la décision :** L'outil vise à simuler une étiquette DPE pour prioriser les travaux de rénovation et réduire l'incertitude pour les investisseurs et bailleurs.\n\
                            - **Optimisation :** Comprendre les facteurs pénalisants pour l'ingénierie financière de la rénovation.",
                    },
                    Bloc {
                        titre: "🔬 Point de vue Scientifique",
                        style: "normal",
                        markdown: "- **Limites du ML :** Jusqu'où l'IA peut-elle approcher un système réglementaire contraint ?\n\
                            - **Interprétabilité :** Utilisation de méthodes comme SHAP pour dépasser la \"boîte noire\" et articuler statistiques et expertise métier.\n\
                            - **Biais :** Analyse de l'impact des classes déséquilibrées sur la prédiction.",
                    },
                ],
            },
            Onglet {
                titre: "🎯 Objectifs",
                metriques: vec![],
                blocs: vec![
                    Bloc {
                        titre: "🤖 Technique",
                        style: "info",
                        markdown: "- **Prédire** l'étiquette (Classification) et la consommation (Régression).\n\
                            - **Construire** un pipeline robuste.\n\
                            - **Comparer** les familles de modèles (Random Forest, XGBoost, Neural Nets).\n\
                            - **Mesurer** l'impact de la simplification des données.",
                    },
                    Bloc {
                        titre: "📈 Économique",
                        style: "warning",
                        markdown: "- **Identifier** les déterminants majeurs.\n\
                            - **Différencier** les logements proches des seuils critiques.\n\
                            - **Prioriser** les actions de rénovation.\n\
                            - **Sécuriser** la décision économique.",
                    },
                    Bloc {
                        titre: "🧠 Scientifique",
                        style: "success",
                        markdown: "- **Approximer** la réglementation par la statistique.\n\
                            - **Analyser** les biais structurels.\n\
                            - **Interpréter** les décisions du modèle (SHAP).\n\
                            - **Critiquer** l'usage de l'IA dans le public.",
                    },
                ],
            },
            Onglet {
                titre: "💾 Données",
                metriques: vec![
                    Metrique {
                        label: "Volume Initial",
                        valeur: "~12 Millions",
                        delta: "lignes",
                    },
                    Metrique {
                        label: "Dimensionnalité",
                        valeur: "225",
                        delta: "colonnes",
                    },
                    Metrique {
                        label: "Couverture",
                        valeur: "France",
                        delta: "Entière",
                    },
                ],
                blocs: vec![
                    Bloc {
                        titre: "🔍 Détails du périmètre",
                        style: "normal",
                        markdown: "Les données utilisées proviennent de la base officielle de l'ADEME (Agence de la transition écologique).\n\n\
                            - **Source :** [Base DPE Logements (Existant)](https://data.ademe.fr/datasets/dpe03existant)\n\
                            - **Périmètre géographique :** France entière (Métropole + DROM).\n\
                            - **Filtre sectoriel :** Uniquement les logements résidentiels (**Appartements** et **Maisons**).\n\
                            - **Volumétrie brute :** Le jeu de données initial comportait environ 12 millions d'entrées pour 225 variables descriptives.",
                    },
                    Bloc {
                        titre: "Pipeline de données",
                        style: "info",
                        markdown: "Le projet a nécessité un important travail de nettoyage pour gérer les valeurs manquantes, \
                            filtrer les données aberrantes et réduire la dimensionnalité afin de ne garder que les variables \
                            pertinentes pour la modélisation.",
                    },
                ],
            },
        ],
    }
}

fn resultats() -> Page {
    Page {
        slug: "resultats",
        titre: "Résultats d'entraînement",
        icone: "📈",
        intro: "Synthèse de la phase de modélisation menée en amont; le détail du code \
            d'entraînement vit dans le dépôt du pipeline, pas ici.",
        onglets: vec![Onglet {
            titre: "Synthèse",
            metriques: vec![],
            blocs: vec![
                Bloc {
                    titre: "Modèles testés",
                    style: "normal",
                    markdown: "- Baseline\n- RandomForest / XGBoost / NN\n- Optimisation d'hyperparamètres",
                },
                Bloc {
                    titre: "Métriques",
                    style: "normal",
                    markdown: "- MAE / RMSE / R² (régression)\n- Accuracy / F1 (classification)",
                },
                Bloc {
                    titre: "Analyse d'erreur",
                    style: "normal",
                    markdown: "- où le modèle se trompe le plus\n- biais potentiels",
                },
                Bloc {
                    titre: "Illustrations / Courbes",
                    style: "info",
                    markdown: "Les figures exportées du pipeline (courbes de loss, importances) peuvent être \
                        déposées dans le répertoire d'images et référencées ici.",
                },
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_uniques() {
        let slugs: Vec<_> = pages().iter().map(|page| page.slug).collect();
        let uniques: HashSet<_> = slugs.iter().collect();
        assert_eq!(slugs.len(), uniques.len());
    }

    #[test]
    fn recherche_par_slug() {
        let page = par_slug("presentation").expect("page presentation absente");
        assert_eq!(page.onglets.len(), 3);
        assert!(par_slug("inconnue").is_none());
    }

    #[test]
    fn la_liste_reprend_toutes_les_pages() {
        assert_eq!(liste().len(), pages().len());
    }

    #[test]
    fn l_onglet_donnees_porte_les_metriques() {
        let page = par_slug("presentation").expect("page presentation absente");
        let donnees = page
            .onglets
            .iter()
            .find(|onglet| onglet.titre.contains("Données"))
            .expect("onglet Données absent");
        assert_eq!(donnees.metriques.len(), 3);
        assert_eq!(donnees.metriques[0].valeur, "~12 Millions");
    }

    #[test]
    fn styles_de_blocs_connus() {
        let connus = ["normal", "info", "success", "warning"];
        for page in pages() {
            for onglet in &page.onglets {
                for bloc in &onglet.blocs {
                    assert!(connus.contains(&bloc.style), "style inconnu: {}", bloc.style);
                }
            }
        }
    }
}
