// src/handlers/mod.rs

pub mod health;
pub mod participation;
pub mod questions;
pub mod trivias;
pub mod users;
