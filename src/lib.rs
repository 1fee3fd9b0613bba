pub mod client;
pub mod columns;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod formatting;
pub mod session;
pub mod sort;
pub mod table;
pub mod tui;
pub mod types;

#[cfg(any(test, feature = "development"))]
pub mod dev;
#[cfg(any(test, feature = "development"))]
pub mod fixtures;
