// Lernova shared type definitions
// Each submodule defines types used across the shell.

pub mod download;
pub mod errors;
pub mod settings;
pub mod window;
