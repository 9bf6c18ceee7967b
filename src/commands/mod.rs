pub mod config;
pub mod handle;
pub mod profile;
pub mod route;
pub mod show;
