#[macro_use]
mod par;

pub mod chunk;
pub mod chunk_generator;
pub mod config;
pub mod content;
pub mod layer;
pub mod layout;
pub mod paths;
pub mod poisson;
pub mod random;
pub mod rivers;
pub mod save;
pub mod terrain;
