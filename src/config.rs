//! Configuración a partir de variables de entorno (y `.env`).

use std::env;
use std::path::PathBuf;

use actix_web::cookie::Key;
use thiserror::Error;

/// Bytes mínimos de `SESSION_KEY` (firma + cifrado de la cookie)
const SESSION_KEY_MIN_BYTES: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SESSION_KEY debe tener al menos 64 bytes (tiene {0})")]
    SessionKeyTooShort(usize),

    #[error("Valor inválido para {name}: '{value}' (use true o false)")]
    InvalidBool { name: &'static str, value: String },
}

/// Configuración del servidor
///
/// - `BIND_ADDRESS`: dirección y puerto (default: 0.0.0.0:8080)
/// - `DATA_DIR`: directorio de los ficheros JSON (default: .)
/// - `STATIC_DIR`: hoja de estilos y otros estáticos (default: ./static)
/// - `SESSION_KEY`: clave de la cookie de sesión, 64 bytes o más
/// - `COOKIE_SECURE`: marca la cookie como `Secure` (default: false)
#[derive(Clone)]
pub struct Settings {
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub session_key: Key,
    /// La clave se generó al arrancar; las sesiones no sobreviven a un reinicio
    pub session_key_generated: bool,
    pub cookie_secure: bool,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, ConfigError> {
        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./static"));

        let (session_key, session_key_generated) = match lookup("SESSION_KEY") {
            Some(raw) if raw.len() < SESSION_KEY_MIN_BYTES => {
                return Err(ConfigError::SessionKeyTooShort(raw.len()))
            }
            Some(raw) => (Key::from(raw.as_bytes()), false),
            None => (Key::generate(), true),
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        name: "COOKIE_SECURE",
                        value,
                    })
                }
            },
        };

        Ok(Settings {
            bind_address,
            data_dir,
            static_dir,
            session_key,
            session_key_generated,
            cookie_secure,
        })
    }
}
