//! Lectura y escritura de ficheros JSON completos.
//!
//! Cada operación abre, lee o escribe y cierra el fichero; ningún descriptor
//! queda abierto entre peticiones. Un fichero inexistente equivale al valor
//! por defecto. La escritura va a un temporal que luego se renombra sobre el
//! destino, así que un corte a mitad no deja el fichero a medias. No hay
//! bloqueo: si dos escriben a la vez gana el último.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::api::{AppError, AppResult};

/// Lee y deserializa `path`, o devuelve `T::default()` si no existe
pub async fn read_or_default<T>(path: &Path, operation: &str) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Data file missing, using empty value");
            return Ok(T::default());
        }
        Err(e) => return Err(AppError::storage(operation, path, e)),
    };

    serde_json::from_slice(&raw).map_err(|e| AppError::serialization(operation, e))
}

/// Serializa `value` y sustituye el contenido de `path`
pub async fn write_atomic<T>(path: &Path, value: &T, operation: &str) -> AppResult<()>
where
    T: Serialize + ?Sized,
{
    // serde_json escribe UTF-8 sin escapar caracteres no ASCII
    let bytes = serde_json::to_vec(value).map_err(|e| AppError::serialization(operation, e))?;
    let tmp = temp_path(path);

    if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
        return Err(AppError::storage(operation, &tmp, e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(AppError::storage(operation, path, e));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Data file written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn missing_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let value: Vec<String> =
            assert_ok!(read_or_default(&dir.path().join("absent.json"), "load").await);
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_returns_same_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let mut map = BTreeMap::new();
        map.insert("ana".to_string(), "x1".to_string());
        map.insert("jordi".to_string(), "àèò".to_string());

        assert_ok!(write_atomic(&path, &map, "save").await);
        let back: BTreeMap<String, String> = assert_ok!(read_or_default(&path, "load").await);
        assert_eq!(back, map);
    }

    #[tokio::test]
    async fn non_ascii_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        assert_ok!(write_atomic(&path, &vec!["Cal Pep, plaça Olles"], "save").await);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("plaça"));
    }

    #[tokio::test]
    async fn write_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        assert_ok!(write_atomic(&path, &vec![1, 2, 3], "save").await);
        assert_ok!(write_atomic(&path, &vec![4], "save").await);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, b"[{\"nom\": ").unwrap();
        let err = assert_err!(read_or_default::<Vec<String>>(&path, "load").await);
        assert!(matches!(err, AppError::Serialization { .. }));
    }

    #[tokio::test]
    async fn unwritable_target_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("data.json");
        let err = assert_err!(write_atomic(&path, &vec![1], "save").await);
        assert!(matches!(err, AppError::Storage { .. }));
    }
}
