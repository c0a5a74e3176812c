//! # Domain Models
//!
//! Pure data for the forum service: entities, role claims, configuration and the
//! feature-slice registry. Keep it lean: no I/O, networking, or heavy logic.

pub mod config;
pub mod constants;
pub mod forums;
pub mod registry;
pub mod roles;
