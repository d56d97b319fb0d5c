use super::fields::{self, FieldValues};

/// Formulario para añadir un restaurante al final de la lista
pub fn render() -> String {
    format!(
        "<section class=\"card\"><h2>Afegeix un restaurant</h2>\
         <form method=\"post\" action=\"/restaurants\">{}\
         <div class=\"buttons\"><button type=\"submit\">Guardar</button></div>\
         </form></section>",
        fields::render("afegir", &FieldValues::empty())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_starts_empty_with_default_rating() {
        let html = render();
        assert!(html.contains("name=\"nom\" value=\"\""));
        assert!(html.contains("name=\"valoracio\" min=\"1\" max=\"5\" step=\"1\" value=\"3\""));
        for name in ["nom", "adreca", "telefon", "mapa", "comentaris", "valoracio"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "{name}");
        }
    }
}
