//! Erreurs de l'API, rendues au format enveloppe JSON.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation échouée: {0}")]
    Validation(String),

    #[error("Modèle indisponible: {0}")]
    ModelUnavailable(String),

    #[error("Erreur lors du calcul: {0}")]
    Inference(String),

    #[error("Ressource introuvable: {0}")]
    NotFound(String),

    #[error("Rate limit dépassé")]
    RateLimited,

    #[error("Erreur d'exécution: {0}")]
    Execution(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Inference(_) | ApiError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(&self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_http() {
        assert_eq!(
            ApiError::Validation("surface".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ModelUnavailable("absent".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::NotFound("page".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn message_en_francais() {
        let e = ApiError::Validation("surface hors bornes".into());
        assert_eq!(e.to_string(), "Validation échouée: surface hors bornes");
    }
}
