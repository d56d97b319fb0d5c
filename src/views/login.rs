/// Formulario de inicio de sesión / registro. Los dos botones comparten
/// formulario y se distinguen por el valor de `accio`.
pub fn render() -> String {
    String::from(
        "<section class=\"card\"><h2>Inici de sessió / Registre</h2>\
         <form method=\"post\" action=\"/entrar\">\
         <label for=\"usuari\">Usuari</label>\
         <input type=\"text\" id=\"usuari\" name=\"usuari\" autocomplete=\"username\">\
         <label for=\"contrasenya\">Contrasenya</label>\
         <input type=\"password\" id=\"contrasenya\" name=\"contrasenya\" autocomplete=\"current-password\">\
         <div class=\"buttons\">\
         <button type=\"submit\" name=\"accio\" value=\"entrar\">Entrar</button>\
         <button type=\"submit\" name=\"accio\" value=\"crear\">Crear compte</button>\
         </div></form></section>",
    )
}
