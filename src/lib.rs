//! Library crate for tally-bot, exposing modules for the binary and integration tests.

pub mod bot;
pub mod config;
/// Data file and media directory access.
pub mod dao;
pub mod dto;
pub mod error;
/// HTTP routes.
pub mod routes;
/// Command dispatch, reply templates and HTTP projections.
pub mod services;
/// Shared application state and the tally store.
pub mod state;
