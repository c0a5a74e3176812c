//! Axum surface of the forums slice.

mod handlers;
mod response;
pub mod router;
