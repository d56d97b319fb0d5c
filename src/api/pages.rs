//! # Página principal
//!
//! `GET /` decide entre la pantalla de acceso y la aplicación, carga la lista
//! del usuario y la entrega a la vista elegida en el menú lateral.

use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use super::session::SessionContext;
use super::AppResult;
use crate::db::FileRepo;
use crate::views::{self, AppView, View};

#[derive(Deserialize)]
struct PageQuery {
    vista: Option<String>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[get("/")]
async fn index(
    repo: web::Data<FileRepo>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let notice = session.take_notice();
    let state = session.state()?;

    let Some(username) = state.username.as_deref() else {
        return Ok(html(views::login_page(notice.as_ref())));
    };

    let restaurants = repo.restaurants().load(username).await?;

    // El objetivo de edición puede haber desaparecido desde otra sesión
    let editing = match state.editing {
        Some(id) => {
            let found = restaurants.get(id);
            if found.is_none() {
                tracing::info!(username = %username, id = %id, "Dropping stale edit target");
                session.stop_editing();
            }
            found
        }
        None => None,
    };

    let page = views::app_page(&AppView {
        username,
        view: View::from_param(query.vista.as_deref()),
        restaurants: &restaurants,
        editing,
        notice: notice.as_ref(),
    });

    Ok(html(page))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
