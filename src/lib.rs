//! # Travel Planner Library
//!
//! REST backend for planning trips:
//! - Accounts with JWT access tokens and rotating refresh tokens
//! - Plans with statuses, visibility and basic trip details
//! - A shared place catalogue and per-plan place hierarchies
//! - Bookings, checklists and image uploads
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, value objects, repository traits
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: PostgreSQL, disk storage, metrics
//! - **Presentation Layer**: Axum routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! travel_planner/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects and traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Database, storage and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
