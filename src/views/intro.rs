const COVER_URL: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=800&q=80";

/// Presentación: contenido estático
pub fn render() -> String {
    format!(
        "<figure class=\"cover\"><img src=\"{}\" alt=\"\">\
         <figcaption>Benvingut/da a la teva agenda de restaurants!</figcaption></figure>\
         <section class=\"intro\">\
         <h3>Què pots fer amb aquesta aplicació?</h3><ul>\
         <li><strong>Registrar</strong> restaurants que visites amb tota la informació rellevant.</li>\
         <li><strong>Valorar</strong> i afegir comentaris personals.</li>\
         <li><strong>Consultar</strong> la teva llista privada de restaurants.</li>\
         <li><strong>Editar o eliminar</strong> qualsevol fitxa.</li>\
         <li>Les dades són privades per cada usuari.</li></ul>\
         <h4>Com funciona?</h4><ol>\
         <li>Accedeix amb el teu usuari.</li>\
         <li>Utilitza el menú lateral per afegir o consultar restaurants.</li>\
         <li>Pots editar o eliminar qualsevol restaurant des de la llista.</li></ol>\
         <hr></section>",
        super::escape(COVER_URL)
    )
}
