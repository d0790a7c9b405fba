#![warn(clippy::pedantic)]
pub mod arena;
pub mod builder;
pub mod clone;
pub mod debug;
pub mod errors;
pub mod kind;
pub mod node;
pub mod position;
pub mod properties;
pub mod source_map;
pub mod traverse;
