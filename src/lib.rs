pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod google_books;
pub mod models;
pub mod seed;
pub mod services;
