//! # Módulo API
//!
//! Rutas y controladores HTTP de la agenda.
//!
//! ## Módulos principales
//!
//! - [`pages`] - Página principal y selección de vista
//! - [`account`] - Acceso, registro y cierre de sesión
//! - [`restaurant`] - Alta, edición y eliminación de restaurantes
//! - [`session`] - Estado de sesión de cada visitante
//! - [`errors`] - Manejo de errores de la aplicación

pub mod account;
pub mod errors;
pub mod middleware;
pub mod pages;
pub mod restaurant;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use errors::{AppError, AppResult, ResultExt};

use actix_web::http::header;
use actix_web::{web, HttpResponse};

/// Configura todas las rutas de la aplicación
///
/// ## Rutas configuradas
///
/// - `GET /` - Ver [`pages::routes`]
/// - `POST /entrar`, `POST /sortir` - Ver [`account::routes`]
/// - `POST /restaurants/*` - Ver [`restaurant::routes`]
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    pages::routes(cfg);
    account::routes(cfg);
    restaurant::routes(cfg);
}

/// `303 See Other` hacia `location`, para volver a pintar tras un POST
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
