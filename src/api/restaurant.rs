//! # API de restaurantes
//!
//! Todas las rutas requieren sesión iniciada. Cada acción modifica la lista
//! en memoria, la guarda entera y redirige a `GET /` para volver a pintar
//! desde el estado guardado.
//!
//! - Añadir al final de la lista
//! - Marcar un restaurante para editar
//! - Desar / cancel·lar / eliminar sobre el restaurante en edición

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use super::session::{Notice, SessionContext};
use super::{redirect, AppError, AppResult};
use crate::db::{FileRepo, RestaurantFields};
use crate::views::View;

const STALE_TARGET: &str = "Aquest restaurant ja no existeix.";

#[derive(Deserialize)]
struct ViewForm {
    vista: Option<String>,
}

/// Botón pulsado en el formulario de edición; sólo uno por envío
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum EditAction {
    Desar,
    Cancellar,
    Eliminar,
}

#[derive(Deserialize)]
struct EditForm {
    #[serde(default)]
    nom: String,
    #[serde(default)]
    adreca: String,
    #[serde(default)]
    telefon: String,
    #[serde(default)]
    mapa: String,
    #[serde(default)]
    comentaris: String,
    valoracio: u8,
    accio: EditAction,
    vista: Option<String>,
}

impl EditForm {
    fn view(&self) -> View {
        View::from_param(self.vista.as_deref())
    }

    fn into_fields(self) -> RestaurantFields {
        RestaurantFields {
            nom: self.nom,
            adreca: self.adreca,
            telefon: self.telefon,
            mapa: self.mapa,
            comentaris: self.comentaris,
            valoracio: self.valoracio,
        }
    }
}

/// Deja la edición y avisa de que el restaurante ya no está
fn report_stale_target(session: &SessionContext, id: Uuid) -> AppResult<()> {
    tracing::info!(id = %id, "Edit target no longer exists");
    session.stop_editing();
    session.push_notice(Notice::error(STALE_TARGET))
}

/// Añade un restaurante al final de la lista del usuario
///
/// # Errores
/// - Nombre vacío: aviso `Cal indicar el nom del restaurant.`, nada se guarda
/// - `400 Bad Request`: valoración fuera de 1..=5
/// - `401 Unauthorized`: sin sesión
#[post("/restaurants")]
async fn add_restaurant(
    repo: web::Data<FileRepo>,
    session: SessionContext,
    form: web::Form<RestaurantFields>,
) -> AppResult<HttpResponse> {
    let username = session.require_user()?;
    let store = repo.restaurants();
    let mut list = store.load(&username).await?;

    match list.append(form.into_inner()) {
        Ok(added) => {
            tracing::info!(username = %username, id = %added.id, nom = %added.nom, "Restaurant added");
        }
        Err(AppError::ValidationWithField { field, message }) if field == "nom" => {
            session.push_notice(Notice::error(message))?;
            return Ok(redirect(&View::Add.href()));
        }
        Err(e) => return Err(e),
    }

    store.save(&username, &list).await?;
    session.push_notice(Notice::success("Restaurant guardat!"))?;
    Ok(redirect(&View::Add.href()))
}

/// Marca el restaurante `{id}` como objetivo de edición
#[post("/restaurants/{id}/editar")]
async fn start_edit(
    repo: web::Data<FileRepo>,
    session: SessionContext,
    path: web::Path<Uuid>,
    form: web::Form<ViewForm>,
) -> AppResult<HttpResponse> {
    let username = session.require_user()?;
    let id = path.into_inner();
    let list = repo.restaurants().load(&username).await?;

    if list.get(id).is_some() {
        session.start_editing(id)?;
    } else {
        report_stale_target(&session, id)?;
    }

    Ok(redirect(&View::from_param(form.vista.as_deref()).href()))
}

/// Aplica una de las tres acciones del formulario de edición
///
/// - `desar`: sobrescribe la ficha y guarda
/// - `cancellar`: descarta los cambios, no guarda
/// - `eliminar`: quita la ficha y guarda
///
/// En los tres casos la edición termina.
#[post("/restaurants/{id}")]
async fn finish_edit(
    repo: web::Data<FileRepo>,
    session: SessionContext,
    path: web::Path<Uuid>,
    form: web::Form<EditForm>,
) -> AppResult<HttpResponse> {
    let username = session.require_user()?;
    let id = path.into_inner();
    let form = form.into_inner();
    let view = form.view();

    match form.accio {
        EditAction::Cancellar => {
            session.stop_editing();
        }
        EditAction::Desar => {
            let store = repo.restaurants();
            let mut list = store.load(&username).await?;
            match list.update(id, form.into_fields()) {
                Ok(updated) => {
                    tracing::info!(username = %username, id = %updated.id, "Restaurant updated")
                }
                Err(AppError::NotFoundWithId { .. }) => {
                    report_stale_target(&session, id)?;
                    return Ok(redirect(&view.href()));
                }
                Err(e) => return Err(e),
            }
            store.save(&username, &list).await?;
            session.stop_editing();
            session.push_notice(Notice::success("Restaurant actualitzat!"))?;
        }
        EditAction::Eliminar => {
            let store = repo.restaurants();
            let mut list = store.load(&username).await?;
            match list.remove(id) {
                Ok(removed) => {
                    tracing::info!(username = %username, id = %removed.id, "Restaurant deleted")
                }
                Err(AppError::NotFoundWithId { .. }) => {
                    report_stale_target(&session, id)?;
                    return Ok(redirect(&view.href()));
                }
                Err(e) => return Err(e),
            }
            store.save(&username, &list).await?;
            session.stop_editing();
            session.push_notice(Notice::success("Restaurant eliminat!"))?;
        }
    }

    Ok(redirect(&view.href()))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_restaurant);
    cfg.service(start_edit);
    cfg.service(finish_edit);
}
