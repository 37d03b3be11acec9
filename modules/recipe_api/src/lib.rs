//! Recipe Box API: user accounts, token authentication, and owner-scoped
//! recipe/tag resources over a relational store.
//!
//! The crate is split the usual way: `api` holds the REST surface (DTOs,
//! handlers, router assembly), `domain` holds the services and business
//! rules, `infra` holds the SeaORM entities and migrations. Services are
//! plain structs over a [`sea_orm::DatabaseConnection`]; the binary wires
//! them into the router explicitly, there is no global registry.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;

pub use api::rest::routes::{router, ApiServices, RouterOptions};
pub use config::AppConfig;
