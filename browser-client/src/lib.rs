//! Terminal browser for the book search relay.
//!
//! User actions go through [`app::App`], which drives the pure state machine in
//! [`models::session`] and renders it with [`utils::render`]. Recent searches persist
//! through a [`services::history_store::HistoryStore`].

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
