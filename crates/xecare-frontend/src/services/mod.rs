//! Client-side services: REST wrappers, journey animation, validation.

pub mod address;
pub mod api;
pub mod journey;
pub mod session;
