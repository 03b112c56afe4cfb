//! Atrium database layer
//!
//! Postgres repositories for the content entities and back-office users.

pub mod db;

pub use db::*;
