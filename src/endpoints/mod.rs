use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::error::RecommendError;

pub mod index_resource;
pub mod nearby_resource;
pub mod recommend_resource;

impl ResponseError for RecommendError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecommendError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecommendError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
