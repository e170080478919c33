pub mod assets;
pub mod popups;
