pub mod charts;
pub mod config;
pub mod content;
pub mod error;
pub mod inference;
pub mod models;
pub mod rate_limit;
pub mod state;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::http::StatusCode;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder, ResponseError};
use log::{error, info, warn};
use serde::Serialize;
use std::time::Instant;

use crate::error::ApiError;
use crate::models::{ApiResponse, DwellingFeatures, PredictionResult, SimulatorOptions};
use crate::state::AppState;

// Handlers

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("✅ API du simulateur DPE"))
}

async fn model_info(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let model = state.model()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model.get_model_info())))
}

async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let model = state.model()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model.stats())))
}

fn reponse_erreur<T: Serialize>(status: StatusCode, message: &str, depart: Instant) -> HttpResponse {
    let mut response = ApiResponse::<T>::error(message);
    response.execution_time_ms = Some(depart.elapsed().as_millis() as u64);
    HttpResponse::build(status).json(response)
}

async fn predict_dpe(
    state: web::Data<AppState>,
    req: web::Json<DwellingFeatures>,
    request: HttpRequest,
) -> impl Responder {
    let depart = Instant::now();

    if let Some(client_ip) = request.peer_addr().map(|addr| addr.ip().to_string()) {
        if !rate_limit::autoriser(
            &format!("predict:{client_ip}"),
            state.config.rate_limit_per_min,
        ) {
            warn!("Rate limit dépassé pour IP: {}", client_ip);
            return reponse_erreur::<PredictionResult>(
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit dépassé",
                depart,
            );
        }
    }

    info!("Nouvelle requête de simulation reçue");

    if let Err(e) = req.validate() {
        error!("Validation échouée: {}", e);
        return reponse_erreur::<PredictionResult>(StatusCode::BAD_REQUEST, &e, depart);
    }

    let features = req.into_inner();
    let entree = features.encode();
    let state_clone = state.clone();

    let calcul = web::block(move || -> Result<f32, ApiError> {
        let model = state_clone.model()?;
        model
            .predict(&entree)
            .map_err(|e| ApiError::Inference(e.to_string()))
    })
    .await;

    match calcul {
        Ok(Ok(prediction)) => {
            info!("Prédiction réussie: {:.1} kWh/m²/an", prediction);
            let mut response =
                ApiResponse::success(PredictionResult::new(prediction, &features));
            response.execution_time_ms = Some(depart.elapsed().as_millis() as u64);
            HttpResponse::Ok().json(response)
        }
        Ok(Err(e)) => {
            error!("Erreur de prédiction: {}", e);
            reponse_erreur::<PredictionResult>(e.status_code(), &e.to_string(), depart)
        }
        Err(e) => {
            error!("Erreur d'exécution bloquante: {}", e);
            reponse_erreur::<PredictionResult>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erreur d'exécution",
                depart,
            )
        }
    }
}

async fn batch_predict(
    state: web::Data<AppState>,
    req: web::Json<Vec<DwellingFeatures>>,
    request: HttpRequest,
) -> impl Responder {
    let depart = Instant::now();

    if let Some(client_ip) = request.peer_addr().map(|addr| addr.ip().to_string()) {
        if !rate_limit::autoriser(
            &format!("batch:{client_ip}"),
            state.config.rate_limit_batch_per_min,
        ) {
            warn!("Rate limit batch dépassé pour IP: {}", client_ip);
            return reponse_erreur::<Vec<PredictionResult>>(
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit dépassé",
                depart,
            );
        }
    }

    info!("Nouvelle requête de batch: {} logements", req.len());

    if req.is_empty() {
        return reponse_erreur::<Vec<PredictionResult>>(
            StatusCode::BAD_REQUEST,
            "Liste de logements vide",
            depart,
        );
    }

    for (i, features) in req.iter().enumerate() {
        if let Err(e) = features.validate() {
            return reponse_erreur::<Vec<PredictionResult>>(
                StatusCode::BAD_REQUEST,
                &format!("Logement {}: {}", i + 1, e),
                depart,
            );
        }
    }

    let liste = req.into_inner();
    let state_clone = state.clone();

    let calcul = web::block(move || -> Result<Vec<PredictionResult>, ApiError> {
        let model = state_clone.model()?;
        let entrees: Vec<[f32; models::NB_FEATURES]> =
            liste.iter().map(DwellingFeatures::encode).collect();
        let predictions = model
            .batch_predict(&entrees)
            .map_err(|e| ApiError::Inference(e.to_string()))?;
        Ok(predictions
            .into_iter()
            .zip(liste.iter())
            .map(|(prediction, features)| PredictionResult::new(prediction, features))
            .collect())
    })
    .await;

    match calcul {
        Ok(Ok(resultats)) => {
            info!("Batch prédiction réussie: {} résultats", resultats.len());
            let mut response = ApiResponse::success(resultats);
            response.execution_time_ms = Some(depart.elapsed().as_millis() as u64);
            HttpResponse::Ok().json(response)
        }
        Ok(Err(e)) => {
            error!("Erreur batch prédiction: {}", e);
            reponse_erreur::<Vec<PredictionResult>>(e.status_code(), &e.to_string(), depart)
        }
        Err(e) => {
            error!("Erreur d'exécution bloquante batch: {}", e);
            reponse_erreur::<Vec<PredictionResult>>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erreur d'exécution",
                depart,
            )
        }
    }
}

async fn clear_cache(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let entrees = state.model()?.clear_cache();
    info!("Cache de prédictions vidé: {} entrées", entrees);
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!(
        "Cache nettoyé: {} entrées",
        entrees
    ))))
}

async fn pages_index() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(content::liste()))
}

async fn page_detail(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let page = content::par_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Page inconnue: {}", slug)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

async fn charts_gallery(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(charts::galerie(&state.config.img_dir)))
}

async fn simulator_options() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(SimulatorOptions::new()))
}

// Interface web
async fn index(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    match NamedFile::open_async(state.config.static_dir.join("index.html")).await {
        Ok(file) => file.into_response(&req),
        Err(_) => HttpResponse::InternalServerError().body("Erreur chargement interface"),
    }
}

fn routes_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health_check))
        .route("/api/model-info", web::get().to(model_info))
        .route("/api/stats", web::get().to(stats))
        .route("/api/predict", web::post().to(predict_dpe))
        .route("/api/batch-predict", web::post().to(batch_predict))
        .route("/api/clear-cache", web::post().to(clear_cache))
        .route("/api/pages", web::get().to(pages_index))
        .route("/api/pages/{slug}", web::get().to(page_detail))
        .route("/api/charts", web::get().to(charts_gallery))
        .route("/api/simulator-options", web::get().to(simulator_options));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Démarrage du simulateur DPE");

    let config = config::AppConfig::from_env();
    let state = web::Data::new(AppState::new(config));
    state.warm_up();

    let bind_address = format!("{}:{}", state.config.host, state.config.port);
    let workers = state.config.workers;
    let port = state.config.port;
    let static_dir = state.config.static_dir.clone();
    let img_dir = state.config.img_dir.clone();

    info!("🌐 Serveur démarré sur: http://{}", bind_address);
    info!("👷 Workers: {}", workers);
    info!("📊 Interface disponible sur: http://{}/", bind_address);
    info!("🔧 Endpoints API:");
    info!("   GET  /api/health             - Vérification santé");
    info!("   GET  /api/model-info         - Information modèle");
    info!("   GET  /api/stats              - Statistiques d'inférence");
    info!("   GET  /api/pages              - Pages éditoriales");
    info!("   GET  /api/charts             - Galerie de figures");
    info!("   GET  /api/simulator-options  - Bornes et vocabulaires du formulaire");
    info!("   POST /api/predict            - Simulation simple");
    info!("   POST /api/batch-predict      - Simulation multiple");
    info!("   POST /api/clear-cache        - Nettoyage cache");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&format!("http://localhost:{}", port))
            .allowed_origin(&format!("http://127.0.0.1:{}", port))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .configure(routes_api)
            // Interface web
            .route("/", web::get().to(index))
            // Fichiers statiques et figures pré-générées
            .service(Files::new("/img", img_dir.clone()).prefer_utf8(true))
            .service(Files::new("/static", static_dir.clone()).prefer_utf8(true))
            // Fallback 404
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ApiResponse::<String>::error("Endpoint non trouvé"))
            }))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
