pub mod logging;
pub mod screen;
pub mod settings;
