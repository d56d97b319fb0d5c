//! # Registre de Restaurants
//!
//! Agenda personal de restaurantes construida con Rust y Actix Web. Cada
//! usuario inicia sesión y gestiona su propia lista privada (nombre,
//! dirección, teléfono, mapa, comentarios y valoración).
//!
//! ## Características principales
//!
//! - **Cuentas**: registro e inicio de sesión, contraseñas con sal
//! - **Lista de restaurantes**: alta, edición y eliminación
//! - **Vistas HTML**: presentación, lista y formulario, renderizadas en servidor
//! - **Persistencia en ficheros**: JSON por usuario, sin base de datos
//!
//! ## Configuración
//!
//! El servidor se configura mediante variables de entorno (archivo `.env`):
//!
//! ```env
//! BIND_ADDRESS=0.0.0.0:8080
//! DATA_DIR=./data
//! STATIC_DIR=./static
//! SESSION_KEY=<64 bytes o más>
//! COOKIE_SECURE=false
//! RUST_LOG=agenda_restaurants=debug,actix_web=info
//! ```
//!
//! ## Arquitectura
//!
//! ```text
//! Navegador (formularios HTML)
//!     ↓ HTTP POST / 303 / GET
//! Controladores (Actix Web) + sesión en cookie
//!     ↓
//! users.json, <usuario>_restaurants.json
//! ```

use std::io;

use actix_files::Files;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod db;
mod views;

use config::Settings;

/// Sesión en cookie privada (cifrada y firmada)
fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Función principal que inicia el servidor web
///
/// 1. Carga variables de entorno desde `.env`
/// 2. Configura el sistema de logging con tracing
/// 3. Lee la configuración y prepara el directorio de datos
/// 4. Arranca el servidor HTTP con sesión, logging, rutas y estáticos
///
/// # Errores
///
/// Retorna `std::io::Error` si la configuración es inválida, no se puede
/// crear el directorio de datos o no se puede bindear la dirección.
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("agenda_restaurants=debug,actix_web=info")),
        )
        .init();

    tracing::info!("Iniciando Registre de Restaurants...");

    let settings = Settings::from_env().map_err(|e| {
        tracing::error!("Configuración inválida: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if settings.session_key_generated {
        tracing::warn!("SESSION_KEY no definida, se usa una clave aleatoria: las sesiones se pierden al reiniciar");
    }

    let repo = match db::FileRepo::init(&settings.data_dir).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!("Error preparando el directorio de datos: {}", e);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Error de almacenamiento: {}", e),
            ));
        }
    };

    let Settings {
        bind_address,
        static_dir,
        session_key,
        cookie_secure,
        ..
    } = settings;

    tracing::info!("Servidor iniciando en {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .wrap(session_middleware(session_key.clone(), cookie_secure))
            .wrap(Logger::default())
            .configure(api::init_routes)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
