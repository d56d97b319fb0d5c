//! # Utilidades de logging para errores
//!
//! Registra la cadena completa de causas de un error antes de propagarlo.

use std::error::Error as StdError;

/// Registra la cadena completa de errores junto a la operación que fallaba
pub fn log_error_chain<E>(error: &E, context: &str)
where
    E: StdError + 'static,
{
    let error_chain = collect_chain(error);
    tracing::error!(
        context = %context,
        error_chain = ?error_chain,
        "Error with full chain"
    );
}

fn collect_chain<E>(error: &E) -> Vec<String>
where
    E: StdError + 'static,
{
    let mut error_chain = Vec::new();
    let mut current_error: Option<&dyn StdError> = Some(error);

    while let Some(err) = current_error {
        error_chain.push(err.to_string());
        current_error = err.source();
    }

    error_chain
}

/// Extension trait para Results que añade logging automático de error chains
///
/// # Ejemplo de uso
/// ```rust,ignore
/// store.save(username, &list)
///     .await
///     .log_error_context("saving restaurants")?;
/// ```
pub trait ErrorLogExt<T, E> {
    /// Loggea la cadena de errores con contexto adicional
    fn log_error_context(self, context: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, context);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppError;
    use std::path::Path;

    #[test]
    fn chain_walks_every_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = AppError::storage("load", Path::new("users.json"), io);
        let chain = collect_chain(&error);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1], "no such file");
    }

    #[test]
    fn log_error_context_passes_result_through() {
        let ok: Result<u8, AppError> = Ok(4);
        assert_eq!(ok.log_error_context("test").ok(), Some(4));

        let err: Result<u8, AppError> = Err(AppError::InvalidCredentials);
        assert!(matches!(
            err.log_error_context("test"),
            Err(AppError::InvalidCredentials)
        ));
    }
}
