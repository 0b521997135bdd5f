//! Infrastructure Layer
//!
//! Implementations for external concerns:
//! - Database pool and migrations (PostgreSQL)
//! - Repositories over that pool
//! - Local disk storage for uploaded images
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
