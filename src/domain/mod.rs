//! Domain layer - framework-agnostic error taxonomy
//!
//! Services return these; the API layer maps them to HTTP statuses. The
//! unauthenticated case never reaches a service: the `Claims` extractor
//! rejects the request first.

pub mod errors;

pub use errors::DomainError;
