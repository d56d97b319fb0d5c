//! Estado de sesión de cada visitante.
//!
//! Envoltorio sobre la sesión de Actix (cookie privada) para que los
//! controladores sólo trabajen con operaciones del dominio: usuario
//! identificado, restaurante en edición y aviso pendiente de mostrar.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AppError, AppResult, ResultExt};

pub(crate) const USERNAME_KEY: &str = "usuari";
pub(crate) const EDITING_KEY: &str = "editant";
pub(crate) const NOTICE_KEY: &str = "avis";

/// Tipo de aviso mostrado tras una acción
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Mensaje de un solo uso que se muestra en el siguiente render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Foto del estado de sesión que reciben las vistas
/// Sin `username` el visitante es anónimo; `editing` sólo existe con sesión iniciada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub username: Option<String>,
    pub editing: Option<Uuid>,
}

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Estado actual: anónimo, identificado, o identificado y editando
    pub fn state(&self) -> AppResult<SessionState> {
        let username = self.username()?;
        let editing = match username {
            Some(_) => self.editing()?,
            None => None,
        };
        Ok(SessionState { username, editing })
    }

    /// Anónimo -> identificado
    pub fn persist_user(&self, username: &str) -> AppResult<()> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username)
            .map_err_internal("failed to persist session")
    }

    pub fn username(&self) -> AppResult<Option<String>> {
        self.0
            .get::<String>(USERNAME_KEY)
            .map_err_internal("failed to read session")
    }

    /// Usuario identificado o `401 Unauthorized`
    pub fn require_user(&self) -> AppResult<String> {
        self.username()?
            .ok_or_else(|| AppError::Unauthorized("login required".to_string()))
    }

    pub fn start_editing(&self, id: Uuid) -> AppResult<()> {
        self.0
            .insert(EDITING_KEY, id)
            .map_err_internal("failed to persist session")
    }

    pub fn editing(&self) -> AppResult<Option<Uuid>> {
        match self.0.get::<Uuid>(EDITING_KEY) {
            Ok(id) => Ok(id),
            Err(e) => {
                tracing::warn!("invalid edit target in session cookie: {e}");
                self.stop_editing();
                Ok(None)
            }
        }
    }

    pub fn stop_editing(&self) {
        self.0.remove(EDITING_KEY);
    }

    pub fn push_notice(&self, notice: Notice) -> AppResult<()> {
        self.0
            .insert(NOTICE_KEY, notice)
            .map_err_internal("failed to persist session")
    }

    /// Devuelve el aviso pendiente y lo borra
    pub fn take_notice(&self) -> Option<Notice> {
        match self.0.remove_as::<Notice>(NOTICE_KEY) {
            Some(Ok(notice)) => Some(notice),
            Some(Err(raw)) => {
                tracing::warn!(raw = %raw, "discarding unreadable notice");
                None
            }
            None => None,
        }
    }

    /// Cierra la sesión
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
