//! # Manejo de errores de la agenda
//!
//! Jerarquía de errores construida con thiserror. Los errores que el usuario
//! puede corregir (usuario repetido, credenciales, nombre vacío) los
//! convierten los controladores en avisos; el resto llega aquí como página
//! de error HTML.

use std::error::Error;
use std::path::{Path, PathBuf};

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::views;

/// Tipos de error de la aplicación con contexto
#[derive(Error, Debug)]
pub enum AppError {
    /// Error de entrada/salida sobre un fichero de datos
    #[error("Error de almacenamiento en operación '{operation}' ({}): {source}", .path.display())]
    Storage {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Contenido JSON ilegible o imposible de serializar
    #[error("Error de serialización en operación '{operation}': {source}")]
    Serialization {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// El nombre de usuario ya está registrado
    #[error("El usuario '{0}' ya existe")]
    DuplicateUsername(String),

    /// Usuario inexistente o contraseña incorrecta
    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    /// Error de validación con campo específico
    #[error("Error de validación en campo '{field}': {message}")]
    ValidationWithField {
        field: String,
        message: String,
    },

    /// Operación que requiere sesión iniciada
    #[error("No autorizado: {0}")]
    Unauthorized(String),

    /// Error de recurso no encontrado
    #[error("No encontrado: {resource_type} con ID '{id}'")]
    NotFoundWithId {
        resource_type: String,
        id: String,
    },

    /// Error interno con código de rastreo
    #[error("Error interno (trace: {trace_id}): {message}")]
    InternalWithTrace {
        trace_id: String,
        message: String,
    },
}

impl AppError {
    /// Crea un error de almacenamiento con la operación y el fichero afectados
    pub fn storage(operation: &str, path: &Path, source: std::io::Error) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// Crea un error de serialización con contexto de operación
    pub fn serialization(operation: &str, source: serde_json::Error) -> Self {
        Self::Serialization {
            operation: operation.to_string(),
            source,
        }
    }

    /// Crea un error de validación con campo específico
    pub fn validation_field(field: &str, message: &str) -> Self {
        Self::ValidationWithField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Crea un error de no encontrado con ID
    pub fn not_found_id(resource_type: &str, id: &str) -> Self {
        Self::NotFoundWithId {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Crea un error interno con trace ID
    pub fn internal_trace(message: &str) -> Self {
        Self::InternalWithTrace {
            trace_id: uuid::Uuid::new_v4().to_string(),
            message: message.to_string(),
        }
    }

    /// Título y mensaje visibles para el usuario
    fn public_message(&self) -> (&'static str, String) {
        match self {
            Self::Storage { .. } | Self::Serialization { .. } => (
                "Error intern",
                "No s'han pogut llegir o desar les dades.".to_string(),
            ),
            Self::InternalWithTrace { trace_id, .. } => {
                ("Error intern", format!("Error intern (traça: {})", trace_id))
            }
            Self::DuplicateUsername(_) => ("Conflicte", "Aquest usuari ja existeix.".to_string()),
            Self::InvalidCredentials => (
                "No autoritzat",
                "Usuari o contrasenya incorrectes.".to_string(),
            ),
            Self::Unauthorized(_) => (
                "No autoritzat",
                "Cal iniciar sessió per continuar.".to_string(),
            ),
            Self::ValidationWithField { field, message } => {
                ("Dades no vàlides", format!("Camp '{}': {}", field, message))
            }
            Self::NotFoundWithId { .. } => {
                ("No trobat", "Aquest restaurant ja no existeix.".to_string())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateUsername(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::ValidationWithField { .. } => StatusCode::BAD_REQUEST,
            Self::NotFoundWithId { .. } => StatusCode::NOT_FOUND,
            Self::Storage { .. }
            | Self::Serialization { .. }
            | Self::InternalWithTrace { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Log detallado del error antes de responder
        match self {
            Self::Storage { operation, path, source } => {
                tracing::error!(
                    operation = %operation,
                    path = %path.display(),
                    error = %source,
                    "Storage error occurred"
                );
            }
            Self::Serialization { operation, source } => {
                tracing::error!(
                    operation = %operation,
                    error = %source,
                    "Serialization error occurred"
                );
            }
            Self::ValidationWithField { field, message } => {
                tracing::warn!(field = %field, message = %message, "Validation error");
            }
            Self::Unauthorized(reason) => {
                tracing::warn!(reason = %reason, "Unauthorized access attempt");
            }
            Self::NotFoundWithId { resource_type, id } => {
                tracing::info!(resource_type = %resource_type, id = %id, "Resource not found");
            }
            Self::InternalWithTrace { trace_id, message } => {
                tracing::error!(trace_id = %trace_id, message = %message, "Internal error with trace");
            }
            error => {
                tracing::warn!(error = %error, error_chain = ?error.source(), "Request failed");
            }
        }

        let (title, message) = self.public_message();
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::error_page(title, &message))
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub trait ResultExt<T> {
    fn map_err_internal(self, message: &str) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn map_err_internal(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::internal_trace(&format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        assert_eq!(
            AppError::DuplicateUsername("ana".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::validation_field("valoracio", "fuera de rango").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found_id("restaurant", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            AppError::storage("save", Path::new("a.json"), io).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_error_keeps_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = AppError::storage("save_restaurants", Path::new("ana_restaurants.json"), io);
        let source = error.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk full"));
        assert!(error.to_string().contains("ana_restaurants.json"));
    }

    #[test]
    fn map_err_internal_gets_fresh_trace_id() {
        let failed: Result<(), &str> = Err("cookie too big");
        let error = failed.map_err_internal("session insert").unwrap_err();
        match error {
            AppError::InternalWithTrace { trace_id, message } => {
                assert!(uuid::Uuid::parse_str(&trace_id).is_ok());
                assert_eq!(message, "session insert: cookie too big");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_page_hides_internal_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "secret path detail");
        let response = AppError::storage("load", Path::new("/srv/x.json"), io).error_response();
        let body = response.into_body().try_into_bytes().unwrap_or_default();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Error intern"));
        assert!(!html.contains("secret path detail"));
    }
}
