// Configuration loading

pub mod recents;
pub mod settings;
