use super::{escape, View};
use crate::db::{Restaurant, RestaurantList};

/// Lista de restaurantes en orden de inserción, cada uno con su botón de edición
pub fn render(restaurants: &RestaurantList, view: View) -> String {
    let mut html = String::from("<section><h2>Restaurants registrats</h2>");

    if restaurants.is_empty() {
        html.push_str("<div class=\"notice info\">Encara no has registrat cap restaurant.</div>");
    }

    for (idx, restaurant) in restaurants.iter().enumerate() {
        html.push_str(&card(idx, restaurant, view));
    }

    html.push_str("</section>");
    html
}

fn card(idx: usize, r: &Restaurant, view: View) -> String {
    let mut html = format!(
        "<article class=\"restaurant\" data-index=\"{idx}\">\
         <p><strong>{}</strong> ({}/5)</p>\
         <p>Adreça: {}</p>\
         <p>Telèfon: {}</p>",
        escape(&r.nom),
        r.valoracio.value(),
        escape(&r.adreca),
        escape(&r.telefon),
    );

    if let Some(link) = map_link(&r.mapa) {
        html.push_str(&link);
    }

    html.push_str(&format!(
        "<p>Comentaris: {}</p>\
         <form method=\"post\" action=\"/restaurants/{}/editar\">\
         <input type=\"hidden\" name=\"vista\" value=\"{}\">\
         <button type=\"submit\">Editar</button></form>\
         </article><hr>",
        escape(&r.comentaris),
        r.id,
        view.param(),
    ));
    html
}

/// Enlace al mapa. Las URLs http(s) se usan tal cual y las que no llevan
/// esquema (`maps.app.goo.gl/...`) se completan con `https://`; cualquier
/// otro esquema (`javascript:`, `data:`) no se enlaza.
fn map_link(mapa: &str) -> Option<String> {
    let href = map_href(mapa.trim())?;
    Some(format!(
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Veure al mapa</a></p>",
        escape(&href)
    ))
}

fn map_href(mapa: &str) -> Option<String> {
    if mapa.is_empty() {
        return None;
    }
    let lower = mapa.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Some(mapa.to_string());
    }
    if has_scheme(mapa) || mapa.starts_with('/') {
        return None;
    }
    Some(format!("https://{mapa}"))
}

/// `esquema:` según RFC 3986, antes de cualquier `/`, `?` o `#`
fn has_scheme(mapa: &str) -> bool {
    let Some(colon) = mapa.find(':') else {
        return false;
    };
    let scheme = &mapa[..colon];
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_chars = scheme
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let is_host_port = scheme.contains('.')
        && mapa[colon + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
    starts_alpha && scheme_chars && !is_host_port
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RestaurantFields;

    fn sample() -> RestaurantList {
        let mut list = RestaurantList::default();
        list.append(RestaurantFields {
            nom: "Pizza Roma".into(),
            adreca: "Via Augusta 3".into(),
            telefon: "930000000".into(),
            mapa: "https://maps.google.com/?q=roma".into(),
            comentaris: "Massa fina".into(),
            valoracio: 4,
        })
        .unwrap();
        list.append(RestaurantFields {
            nom: "Sushi Ken".into(),
            mapa: "javascript:alert(1)".into(),
            valoracio: 5,
            ..Default::default()
        })
        .unwrap();
        list
    }

    #[test]
    fn empty_list_shows_info_message() {
        let html = render(&RestaurantList::default(), View::List);
        assert!(html.contains("Encara no has registrat cap restaurant."));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn cards_follow_insertion_order_with_index() {
        let list = sample();
        let html = render(&list, View::List);
        let roma = html.find("Pizza Roma").unwrap();
        let ken = html.find("Sushi Ken").unwrap();
        assert!(roma < ken);
        assert!(html.contains("data-index=\"0\""));
        assert!(html.contains("data-index=\"1\""));
        assert!(html.contains("<strong>Pizza Roma</strong> (4/5)"));
    }

    #[test]
    fn edit_buttons_target_record_ids() {
        let list = sample();
        let html = render(&list, View::List);
        for r in &list {
            assert!(html.contains(&format!("action=\"/restaurants/{}/editar\"", r.id)));
        }
    }

    #[test]
    fn map_link_only_for_http_urls() {
        let html = render(&sample(), View::List);
        assert_eq!(html.matches("Veure al mapa").count(), 1);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn bare_map_links_get_https() {
        assert_eq!(
            map_href("maps.app.goo.gl/abc123").as_deref(),
            Some("https://maps.app.goo.gl/abc123")
        );
        assert_eq!(
            map_href("maps.example.com:8080/x").as_deref(),
            Some("https://maps.example.com:8080/x")
        );
        assert_eq!(
            map_href("HTTP://maps.google.com").as_deref(),
            Some("HTTP://maps.google.com")
        );
        assert_eq!(map_href(""), None);
        assert_eq!(map_href("JavaScript:alert(1)"), None);
        assert_eq!(map_href("data:text/html,x"), None);
        assert_eq!(map_href("//evil.example"), None);
    }

    #[test]
    fn bare_map_link_is_rendered() {
        let mut list = RestaurantList::default();
        list.append(RestaurantFields {
            nom: "Bar Pinotxo".into(),
            mapa: "maps.app.goo.gl/xyz".into(),
            valoracio: 4,
            ..Default::default()
        })
        .unwrap();
        let html = render(&list, View::List);
        assert!(html.contains("href=\"https://maps.app.goo.gl/xyz\""));
    }
}
