use super::fields::{self, FieldValues};
use super::{escape, View};
use crate::db::Restaurant;

/// Formulario de edición con tres acciones excluyentes: desar, cancel·lar, eliminar
///
/// `view` viaja en un campo oculto para volver a la misma sección.
pub fn render(restaurant: &Restaurant, view: View) -> String {
    format!(
        "<section class=\"card edit\"><h2>Edita el restaurant: {}</h2>\
         <form method=\"post\" action=\"/restaurants/{}\">\
         <input type=\"hidden\" name=\"vista\" value=\"{}\">{}\
         <div class=\"buttons\">\
         <button type=\"submit\" name=\"accio\" value=\"desar\">Desar canvis</button>\
         <button type=\"submit\" name=\"accio\" value=\"cancellar\">Cancel·lar</button>\
         <button type=\"submit\" name=\"accio\" value=\"eliminar\">Eliminar</button>\
         </div></form></section>",
        escape(&restaurant.nom),
        restaurant.id,
        view.param(),
        fields::render("editar", &FieldValues::from_restaurant(restaurant)),
    )
}
