use std::any::Any;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message returned for every unmatched route.
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// JSON body shared by all failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => NOT_FOUND_MESSAGE,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(_) => tracing::debug!(error = %self, "Route not found"),
            AppError::Internal(_) => tracing::error!("Internal error: {:?}", self),
        }

        let body = ErrorBody {
            message: self.message(),
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Fallback for any path or method without a handler.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {} {}", method, uri.path()))
}

/// Render a panic caught during request handling as an internal error.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let err = not_found(Method::DELETE, Uri::from_static("/things/1?x=2")).await;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Endpoint not found");
        assert_eq!(body["error"], "No route for DELETE /things/1");
    }

    #[tokio::test]
    async fn test_internal_shape() {
        let response = AppError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "disk on fire");
    }

    #[tokio::test]
    async fn test_panic_payloads() {
        let body = body_json(panic_response(Box::new(String::from("owned")))).await;
        assert_eq!(body["error"], "owned");

        let body = body_json(panic_response(Box::new("borrowed"))).await;
        assert_eq!(body["error"], "borrowed");

        let response = panic_response(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "handler panicked");
    }
}
