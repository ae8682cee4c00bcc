//! # Services
//!
//! Concrete collaborators behind the [`crate::core::service`] traits.
//!
//! - [`api`]: market data API client (catalog + market summary)
//! - [`portfolio`]: JSON file and in-memory portfolio stores

pub mod api;
pub mod portfolio;
