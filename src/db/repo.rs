use std::path::Path;

use super::accounts::AccountStore;
use super::restaurants::RestaurantStore;
use crate::api::{AppError, AppResult};

/// Directorio de datos compartido por todos los controladores
#[derive(Debug, Clone)]
pub struct FileRepo {
    accounts: AccountStore,
    restaurants: RestaurantStore,
}

impl FileRepo {
    /// Prepara el directorio de datos, creándolo si no existe
    pub async fn init(data_dir: &Path) -> AppResult<FileRepo> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| AppError::storage("create_data_dir", data_dir, e))?;

        let accounts = AccountStore::new(data_dir);
        tracing::info!(
            data_dir = %data_dir.display(),
            users_file = %accounts.path().display(),
            "Directorio de datos preparado"
        );

        Ok(FileRepo {
            accounts,
            restaurants: RestaurantStore::new(data_dir),
        })
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn restaurants(&self) -> &RestaurantStore {
        &self.restaurants
    }
}
