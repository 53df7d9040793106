//! A small editor for binary tile maps: paint cells on and off, pick the map
//! size, and save to the plain-text `*.map` format.

pub mod config;
pub mod dialogs;
pub mod graphics;
pub mod grid;
pub mod input;
pub mod layout;
pub mod map_file;
pub mod render;
pub mod session;
pub mod tools;
