//! REST API tests against the full router.

mod auth_tests;
mod file_tests;
mod health_tests;
mod plan_tests;
