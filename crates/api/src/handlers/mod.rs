pub mod app_links;
pub mod auth;
pub mod config;
pub mod devices;
pub mod events;
pub mod health;
pub mod support;
pub mod trends;
