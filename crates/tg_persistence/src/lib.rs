//! RON presets for generation configs.
//!
//! Only configs are saved; generated maps live in memory and are lost on exit.

pub mod preset_io;

pub use preset_io::{load_preset, save_preset, PresetIoError};
