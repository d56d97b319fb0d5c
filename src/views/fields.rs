//! Campos comunes de los formularios de alta y edición.

use super::escape;
use crate::db::{Rating, Restaurant};

/// Valores iniciales de los campos
pub(super) struct FieldValues<'a> {
    pub nom: &'a str,
    pub adreca: &'a str,
    pub telefon: &'a str,
    pub mapa: &'a str,
    pub comentaris: &'a str,
    pub valoracio: u8,
}

impl<'a> FieldValues<'a> {
    pub fn empty() -> Self {
        FieldValues {
            nom: "",
            adreca: "",
            telefon: "",
            mapa: "",
            comentaris: "",
            valoracio: Rating::default().value(),
        }
    }

    pub fn from_restaurant(r: &'a Restaurant) -> Self {
        FieldValues {
            nom: &r.nom,
            adreca: &r.adreca,
            telefon: &r.telefon,
            mapa: &r.mapa,
            comentaris: &r.comentaris,
            valoracio: r.valoracio.value(),
        }
    }
}

/// Entradas del formulario; `prefix` hace únicos los id de cada formulario
pub(super) fn render(prefix: &str, values: &FieldValues<'_>) -> String {
    let mut html = String::new();
    html.push_str(&text_input(prefix, "nom", "Nom del restaurant", values.nom));
    html.push_str(&text_input(prefix, "adreca", "Adreça", values.adreca));
    html.push_str(&text_input(prefix, "telefon", "Telèfon reserves", values.telefon));
    html.push_str(&text_input(prefix, "mapa", "Enllaç de mapa (Google Maps)", values.mapa));
    html.push_str(&format!(
        "<label for=\"{prefix}-comentaris\">Comentaris</label>\
         <textarea id=\"{prefix}-comentaris\" name=\"comentaris\" rows=\"3\">{}</textarea>",
        escape(values.comentaris)
    ));
    html.push_str(&format!(
        "<label for=\"{prefix}-valoracio\">Valoració</label>\
         <input type=\"range\" id=\"{prefix}-valoracio\" name=\"valoracio\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\">\
         <output>{value}</output>",
        min = Rating::MIN,
        max = Rating::MAX,
        value = values.valoracio,
    ));
    html
}

fn text_input(prefix: &str, name: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{prefix}-{name}\">{label}</label>\
         <input type=\"text\" id=\"{prefix}-{name}\" name=\"{name}\" value=\"{}\">",
        escape(value)
    )
}
