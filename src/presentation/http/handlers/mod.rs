//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Each handler builds its service
//! over the shared pool and converts the result into a response DTO.

pub mod auth;
pub mod basic_info;
pub mod booking;
pub mod checklist;
pub mod file;
pub mod health;
pub mod lookup;
pub mod place;
pub mod plan;
pub mod plan_place;
pub mod user;
