// src/db/mod.rs
pub mod accounts;
pub mod json_file;
pub mod models;
pub mod password;
pub mod repo;
pub mod restaurants;

pub use accounts::AccountStore;
pub use models::{Accounts, Rating, Restaurant, RestaurantFields, RestaurantList};
pub use repo::FileRepo;
