pub mod dto;
pub mod error;
pub mod extract;
pub mod recipes;
pub mod routes;
pub mod tags;
pub mod users;
pub mod web;
