//! # Vistas HTML
//!
//! Cada vista es una función pura: recibe una foto del estado (lista de
//! restaurantes, sesión, aviso) y devuelve el HTML. Ninguna vista toca el
//! almacenamiento ni la sesión.
//!
//! - [`login`] - Inicio de sesión / registro
//! - [`intro`] - Presentación
//! - [`list`] - Restaurantes registrados
//! - [`add`] - Formulario para añadir
//! - [`edit`] - Formulario de edición, visible en cualquier vista mientras haya edición

pub mod add;
pub mod edit;
mod fields;
pub mod intro;
pub mod list;
pub mod login;

use crate::api::session::{Notice, NoticeKind};
use crate::db::{Restaurant, RestaurantList};

const APP_TITLE: &str = "🍽️ Registre de Restaurants";

/// Secciones del menú lateral
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Intro,
    List,
    Add,
}

impl View {
    pub const ALL: [View; 3] = [View::Intro, View::List, View::Add];

    /// Valor del parámetro `vista`; cualquier otro valor lleva a la presentación
    pub fn from_param(param: Option<&str>) -> View {
        match param {
            Some("restaurants") => View::List,
            Some("afegir") => View::Add,
            _ => View::Intro,
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            View::Intro => "presentacio",
            View::List => "restaurants",
            View::Add => "afegir",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Intro => "Presentació",
            View::List => "Restaurants registrats",
            View::Add => "Afegir restaurant",
        }
    }

    /// Ruta de la página principal con esta vista seleccionada
    pub fn href(self) -> String {
        format!("/?vista={}", self.param())
    }
}

/// Todo lo que necesita la página de la aplicación para pintarse
#[derive(Debug)]
pub struct AppView<'a> {
    pub username: &'a str,
    pub view: View,
    pub restaurants: &'a RestaurantList,
    pub editing: Option<&'a Restaurant>,
    pub notice: Option<&'a Notice>,
}

/// Página de la aplicación para un usuario identificado
pub fn app_page(page: &AppView<'_>) -> String {
    let mut body = match page.view {
        View::Intro => intro::render(),
        View::List => list::render(page.restaurants, page.view),
        View::Add => add::render(),
    };

    if let Some(restaurant) = page.editing {
        body.push_str(&edit::render(restaurant, page.view));
    }

    let nav = sidebar(page.username, page.view);
    layout(page.view.label(), Some(nav.as_str()), page.notice, &body)
}

/// Página de inicio de sesión
pub fn login_page(notice: Option<&Notice>) -> String {
    layout("Inici de sessió", None, notice, &login::render())
}

/// Página de error para respuestas fallidas
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<section class=\"error\"><h2>{}</h2><p>{}</p><p><a href=\"/\">Tornar a l'inici</a></p></section>",
        escape(title),
        escape(message)
    );
    layout(title, None, None, &body)
}

fn sidebar(username: &str, current: View) -> String {
    let mut html = String::from("<nav class=\"sidebar\"><h3>Menú</h3><ul>");
    for view in View::ALL {
        let class = if view == current { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<li{}><a href=\"{}\">{}</a></li>",
            class,
            view.href(),
            view.label()
        ));
    }
    html.push_str(&format!(
        "</ul><p class=\"user\">{}</p>\
         <form method=\"post\" action=\"/sortir\"><button type=\"submit\">Sortir</button></form></nav>",
        escape(username)
    ));
    html
}

fn notice_html(notice: &Notice) -> String {
    let class = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    };
    format!(
        "<div class=\"notice {}\" role=\"status\">{}</div>",
        class,
        escape(&notice.text)
    )
}

fn layout(title: &str, sidebar: Option<&str>, notice: Option<&Notice>, body: &str) -> String {
    let notice = notice.map(notice_html).unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"ca\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · Registre de Restaurants</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n\
         {sidebar}<main>\n<h1>{app}</h1>\n{notice}{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        sidebar = sidebar.unwrap_or(""),
        app = APP_TITLE,
        notice = notice,
        body = body,
    )
}

/// Escapa texto para insertarlo en HTML, también dentro de atributos
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RestaurantFields;

    fn list_with(names: &[&str]) -> RestaurantList {
        let mut list = RestaurantList::default();
        for nom in names {
            list.append(RestaurantFields {
                nom: nom.to_string(),
                valoracio: 4,
                ..Default::default()
            })
            .unwrap();
        }
        list
    }

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("Plaça d'Or"), "Plaça d&#39;Or");
    }

    #[test]
    fn unknown_view_param_falls_back_to_intro() {
        assert_eq!(View::from_param(None), View::Intro);
        assert_eq!(View::from_param(Some("xyz")), View::Intro);
        for view in View::ALL {
            assert_eq!(View::from_param(Some(view.param())), view);
        }
    }

    #[test]
    fn app_page_marks_current_view_and_user() {
        let list = RestaurantList::default();
        let html = app_page(&AppView {
            username: "ana",
            view: View::Add,
            restaurants: &list,
            editing: None,
            notice: None,
        });
        assert!(html.contains("<li class=\"active\"><a href=\"/?vista=afegir\">"));
        assert!(html.contains("<p class=\"user\">ana</p>"));
        assert!(html.contains("action=\"/restaurants\""));
        assert!(!html.contains("Edita el restaurant"));
    }

    #[test]
    fn edit_form_shows_on_any_view() {
        let list = list_with(&["Sushi Ken"]);
        let target = list.iter().next();
        for view in View::ALL {
            let html = app_page(&AppView {
                username: "ana",
                view,
                restaurants: &list,
                editing: target,
                notice: None,
            });
            assert!(html.contains("Edita el restaurant: Sushi Ken"), "{view:?}");
        }
    }

    #[test]
    fn notice_is_rendered_escaped() {
        let notice = Notice::error("<b>Usuari</b> o contrasenya incorrectes.");
        let html = login_page(Some(&notice));
        assert!(html.contains("class=\"notice error\""));
        assert!(html.contains("&lt;b&gt;Usuari&lt;/b&gt;"));
    }

    #[test]
    fn login_page_has_no_sidebar() {
        let html = login_page(None);
        assert!(!html.contains("class=\"sidebar\""));
        assert!(html.contains("action=\"/entrar\""));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page("Error", "<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
