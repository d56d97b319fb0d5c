//! # API de cuentas
//!
//! Inicio de sesión, registro y cierre de sesión. Los fallos que el usuario
//! puede corregir se muestran como aviso en la página de inicio.

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use super::session::{Notice, SessionContext};
use super::{redirect, AppError, AppResult};
use crate::db::{AccountStore, Accounts, FileRepo};

/// Botón pulsado en el formulario de acceso
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum LoginAction {
    #[default]
    Entrar,
    Crear,
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    usuari: String,
    #[serde(default)]
    contrasenya: String,
    #[serde(default)]
    accio: LoginAction,
}

/// Autentica o devuelve `InvalidCredentials`
fn check_credentials(accounts: &Accounts, username: &str, password: &str) -> AppResult<()> {
    if AccountStore::authenticate(accounts, username, password) {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}

/// Entra o crea una cuenta según el botón pulsado
///
/// # Avisos
/// - `Sessió iniciada!` / `Usuari o contrasenya incorrectes.`
/// - `Compte creat! Ara pots iniciar sessió.` / `Aquest usuari ja existeix.`
/// - `Cal indicar usuari i contrasenya.` si falta algún campo
#[post("/entrar")]
async fn login_or_register(
    repo: web::Data<FileRepo>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let LoginForm {
        usuari,
        contrasenya,
        accio,
    } = form.into_inner();

    if usuari.is_empty() || contrasenya.is_empty() {
        session.push_notice(Notice::error("Cal indicar usuari i contrasenya."))?;
        return Ok(redirect("/"));
    }

    let mut accounts = repo.accounts().load().await?;

    match accio {
        LoginAction::Entrar => match check_credentials(&accounts, &usuari, &contrasenya) {
            Ok(()) => {
                session.persist_user(&usuari)?;
                session.push_notice(Notice::success("Sessió iniciada!"))?;
                tracing::info!(username = %usuari, "Login");
            }
            Err(AppError::InvalidCredentials) => {
                tracing::warn!(username = %usuari, "Login failed");
                session.push_notice(Notice::error("Usuari o contrasenya incorrectes."))?;
            }
            Err(e) => return Err(e),
        },
        LoginAction::Crear => {
            match repo
                .accounts()
                .register(&mut accounts, &usuari, &contrasenya)
                .await
            {
                Ok(()) => {
                    session.push_notice(Notice::success("Compte creat! Ara pots iniciar sessió."))?
                }
                Err(AppError::DuplicateUsername(_)) => {
                    session.push_notice(Notice::error("Aquest usuari ja existeix."))?
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(redirect("/"))
}

/// Cierra la sesión y vuelve a la pantalla de acceso
#[post("/sortir")]
async fn logout(session: SessionContext) -> AppResult<HttpResponse> {
    if let Some(username) = session.username()? {
        tracing::info!(username = %username, "Logout");
    }
    session.clear();
    Ok(redirect("/"))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_or_register);
    cfg.service(logout);
}
