//! Restaurantes de cada usuario, un fichero JSON por usuario.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::json_file;
use super::models::RestaurantList;
use crate::api::middleware::ErrorLogExt;
use crate::api::AppResult;

const FILE_SUFFIX: &str = "_restaurants.json";

#[derive(Debug, Clone)]
pub struct RestaurantStore {
    data_dir: PathBuf,
}

impl RestaurantStore {
    pub fn new(data_dir: &Path) -> Self {
        RestaurantStore {
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Fichero del usuario: `<usuario>_restaurants.json`
    pub fn file_for(&self, username: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", encode_username(username), FILE_SUFFIX))
    }

    /// Fichero en uso para el usuario
    ///
    /// Si ya existe un fichero con el nombre de usuario tal cual (escrito
    /// antes de codificar los nombres) se sigue usando ese.
    async fn resolve(&self, username: &str) -> PathBuf {
        let encoded = self.file_for(username);
        if !is_verbatim_safe(username) {
            return encoded;
        }
        let verbatim = self.data_dir.join(format!("{}{}", username, FILE_SUFFIX));
        if verbatim != encoded && tokio::fs::try_exists(&verbatim).await.unwrap_or(false) {
            tracing::debug!(username = %username, path = %verbatim.display(), "Using unencoded file");
            verbatim
        } else {
            encoded
        }
    }

    /// Carga la lista del usuario; sin fichero la lista está vacía
    ///
    /// Nunca escribe. Las fichas sin id reciben uno derivado de su posición
    /// y contenido, igual en cada carga.
    pub async fn load(&self, username: &str) -> AppResult<RestaurantList> {
        let path = self.resolve(username).await;
        let mut list: RestaurantList = json_file::read_or_default(&path, "load_restaurants")
            .await
            .log_error_context("loading restaurants")?;

        let derived = list.derive_missing_ids();
        if derived > 0 {
            tracing::debug!(
                username = %username,
                derived,
                "Derived ids for restaurants without one"
            );
        }

        Ok(list)
    }

    /// Sobrescribe el fichero del usuario con la lista completa
    pub async fn save(&self, username: &str, list: &RestaurantList) -> AppResult<()> {
        let path = self.resolve(username).await;
        json_file::write_atomic(&path, list, "save_restaurants")
            .await
            .log_error_context("saving restaurants")?;
        tracing::debug!(username = %username, count = list.len(), "Restaurants saved");
        Ok(())
    }
}

/// Nombre de fichero seguro y unívoco para un usuario
///
/// Se conservan los alfanuméricos ASCII, `-`, `_` y `.`; cualquier otro byte
/// se escribe como `%XX`. Como `%` también se codifica, dos usuarios
/// distintos nunca comparten fichero, y ningún nombre sale del directorio.
fn encode_username(username: &str) -> String {
    let mut encoded = String::with_capacity(username.len());
    for byte in username.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }
    encoded
}

/// Un nombre sin separadores ni `%` no puede salir del directorio ni
/// coincidir con el nombre codificado de otro usuario
fn is_verbatim_safe(username: &str) -> bool {
    !username.is_empty() && !username.contains(['/', '\\', '\0', '%'])
}
