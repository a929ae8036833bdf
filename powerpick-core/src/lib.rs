pub mod error;
pub mod frequency;
pub mod game;
pub mod generator;
pub mod models;
