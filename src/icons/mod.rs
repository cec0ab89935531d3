pub mod error;
pub mod icon;
pub mod loader;
pub mod resolver;
