//! Business logic without the HTTP layer.
//!
//! Every function takes the database connection explicitly and an owning
//! user id; all queries carry an equality filter on that id, so a caller
//! can never reach another user's rows regardless of what the handler does.

pub mod book_service;
pub mod goal_service;
pub mod profile_service;
pub mod record_service;
pub mod session_service;
pub mod stats_service;
