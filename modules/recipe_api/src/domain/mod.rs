//! Domain services and business rules, independent of the REST layer.

pub mod error;
pub mod model;
pub mod password;
pub mod recipes;
pub mod tags;
pub mod tokens;
pub mod users;
