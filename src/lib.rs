//! GraphQL API for user authentication and appointment scheduling.
//!
//! Services sit behind the [`store`] traits; the [`api`] module exposes them
//! as a GraphQL schema served over axum.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod store;
