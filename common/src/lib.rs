//! Shared, target-independent core of the Swiple console.
//!
//! Everything in this crate compiles both natively and to `wasm32`, so the
//! browser frontend and the native test-suite exercise the same code:
//!
//! - `api`: the gateway client. Normalizes transport failures into a uniform
//!   `ApiResponse` and turns a 401 into a redirect to the login screen.
//! - `validator`: JSON-Schema validation of single form values with
//!   human-readable error messages.
//! - `form`: the schema-driven form renderer (field interpreter, resource
//!   families, payload shaping) and the modal state machine that drives it.
//! - `auth`, `overview`, `routes`: root-level application state transitions.
//! - `model`: transport DTOs exchanged with the REST backend.

pub mod api;
pub mod auth;
pub mod form;
pub mod model;
pub mod overview;
pub mod routes;
pub mod validator;
