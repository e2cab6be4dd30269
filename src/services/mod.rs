// Lernova services
// Services talk to things outside the process: the downloads API, the settings file,
// and the built frontend on disk.

pub mod downloads_api;
pub mod frontend_assets;
pub mod settings_engine;
