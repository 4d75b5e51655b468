pub mod app_config;
pub mod domain;
pub mod solax;
