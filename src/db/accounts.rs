//! Usuarios registrados, guardados en un único fichero JSON.

use std::path::{Path, PathBuf};

use super::json_file;
use super::models::Accounts;
use super::password;
use crate::api::middleware::ErrorLogExt;
use crate::api::{AppError, AppResult};

pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(data_dir: &Path) -> Self {
        AccountStore {
            path: data_dir.join(USERS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Carga los usuarios; sin fichero no hay usuarios todavía
    pub async fn load(&self) -> AppResult<Accounts> {
        json_file::read_or_default(&self.path, "load_users")
            .await
            .log_error_context("loading users")
    }

    /// Registra un usuario nuevo y guarda el fichero entero
    ///
    /// # Errores
    /// - `DuplicateUsername` si ya existe; `accounts` queda intacto
    /// - `Storage` si no se puede escribir
    pub async fn register(
        &self,
        accounts: &mut Accounts,
        username: &str,
        password: &str,
    ) -> AppResult<()> {
        if accounts.contains(username) {
            tracing::info!(username = %username, "Registration rejected, username taken");
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let mut updated = accounts.clone();
        updated.insert(username.to_string(), password::hash_password(password));
        json_file::write_atomic(&self.path, &updated, "save_users")
            .await
            .log_error_context("saving users")?;

        *accounts = updated;
        tracing::info!(username = %username, total = accounts.len(), "User registered");
        Ok(())
    }

    /// Comprueba usuario y contraseña. Un usuario inexistente no autentica.
    pub fn authenticate(accounts: &Accounts, username: &str, password: &str) -> bool {
        accounts
            .stored_password(username)
            .is_some_and(|stored| password::verify_password(stored, password))
    }
}
