pub mod base;
pub mod components;
pub mod styles;
