//! # Async Tasks
//!
//! Fetch triggers. Each function spawns a Tokio task that calls one
//! collaborator and sends the outcome back to the update loop as an
//! [`AppEvent`](crate::app::AppEvent). Nothing here touches derived state.

pub mod market;
pub mod portfolio;
