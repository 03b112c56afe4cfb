pub mod auth;
pub mod content;
pub mod entity;
pub mod form;
pub mod health;
pub mod settings;
