use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{AppError, AppResult};

/// Valoración de un restaurante, siempre entre 1 y 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(3)
    }
}

impl TryFrom<u8> for Rating {
    type Error = AppError;

    fn try_from(value: u8) -> AppResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(AppError::validation_field(
                "valoracio",
                &format!("ha d'estar entre {} i {}, rebut {}", Self::MIN, Self::MAX, value),
            ))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Campos editables de un restaurante, tal como llegan de los formularios
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RestaurantFields {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub adreca: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub mapa: String,
    #[serde(default)]
    pub comentaris: String,
    pub valoracio: u8,
}

impl RestaurantFields {
    pub fn rating(&self) -> AppResult<Rating> {
        Rating::try_from(self.valoracio)
    }
}

/// Ficha de un restaurante guardada en el fichero del usuario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    // Los ficheros antiguos no tienen id; se asigna al cargar
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub nom: String,
    pub adreca: String,
    pub telefon: String,
    pub mapa: String,
    pub comentaris: String,
    pub valoracio: Rating,
}

impl Restaurant {
    /// Crea una ficha nueva con id propio a partir de los campos del formulario
    pub fn new(fields: RestaurantFields) -> AppResult<Self> {
        let valoracio = fields.rating()?;
        Ok(Restaurant {
            id: Uuid::new_v4(),
            nom: fields.nom,
            adreca: fields.adreca,
            telefon: fields.telefon,
            mapa: fields.mapa,
            comentaris: fields.comentaris,
            valoracio,
        })
    }

    /// Sobrescribe los campos editables conservando el id
    fn overwrite(&mut self, fields: RestaurantFields) -> AppResult<()> {
        let valoracio = fields.rating()?;
        self.nom = fields.nom;
        self.adreca = fields.adreca;
        self.telefon = fields.telefon;
        self.mapa = fields.mapa;
        self.comentaris = fields.comentaris;
        self.valoracio = valoracio;
        Ok(())
    }
}

/// Lista ordenada de restaurantes de un usuario (orden de inserción = orden de visualización)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantList {
    items: Vec<Restaurant>,
}

impl RestaurantList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restaurant> {
        self.items.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Restaurant> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|r| r.id == id)
    }

    /// Añade una ficha al final. El nombre es obligatorio sólo al crear.
    pub fn append(&mut self, fields: RestaurantFields) -> AppResult<&Restaurant> {
        if fields.nom.is_empty() {
            return Err(AppError::validation_field(
                "nom",
                "Cal indicar el nom del restaurant.",
            ));
        }
        let restaurant = Restaurant::new(fields)?;
        self.items.push(restaurant);
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Sustituye en su sitio la ficha con el id indicado
    pub fn update(&mut self, id: Uuid, fields: RestaurantFields) -> AppResult<&Restaurant> {
        let idx = self
            .position(id)
            .ok_or_else(|| AppError::not_found_id("restaurant", &id.to_string()))?;
        self.items[idx].overwrite(fields)?;
        Ok(&self.items[idx])
    }

    /// Elimina la ficha con el id indicado; las siguientes se desplazan una posición
    pub fn remove(&mut self, id: Uuid) -> AppResult<Restaurant> {
        let idx = self
            .position(id)
            .ok_or_else(|| AppError::not_found_id("restaurant", &id.to_string()))?;
        Ok(self.items.remove(idx))
    }

    /// Da id en memoria a las fichas que no lo tienen. Devuelve cuántas se han tocado.
    ///
    /// El id depende sólo de la posición y del contenido de la ficha, así que
    /// cada carga del mismo fichero produce los mismos ids sin reescribirlo.
    /// Quedan guardados la próxima vez que se guarde la lista.
    pub(crate) fn derive_missing_ids(&mut self) -> usize {
        let mut derived = 0;
        for (idx, restaurant) in self.items.iter_mut().enumerate() {
            if restaurant.id.is_nil() {
                restaurant.id = legacy_id(idx, restaurant);
                derived += 1;
            }
        }
        derived
    }
}

fn legacy_id(idx: usize, r: &Restaurant) -> Uuid {
    let key = format!(
        "{idx}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}",
        r.nom,
        r.adreca,
        r.telefon,
        r.mapa,
        r.comentaris,
        r.valoracio.value()
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}

impl<'a> IntoIterator for &'a RestaurantList {
    type Item = &'a Restaurant;
    type IntoIter = std::slice::Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Usuarios registrados: nombre de usuario -> contraseña almacenada
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accounts {
    users: BTreeMap<String, String>,
}

impl Accounts {
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn stored_password(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub(crate) fn insert(&mut self, username: String, stored: String) {
        self.users.insert(username, stored);
    }
}
