// src/models/mod.rs

pub mod post;
pub mod profile;
pub mod user;
