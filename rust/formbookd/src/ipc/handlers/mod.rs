pub mod assets;
pub mod config;
pub mod core;
pub mod documents;
pub mod layout;
pub mod pedagogy;
pub mod print;
pub mod roster;
pub mod workflow;
