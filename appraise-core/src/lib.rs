//! Core of the appraise review client: data model, rating algorithm,
//! controllers, HTTP collaborator client and the persisted session slot.
//!
//! Nothing in this crate touches the terminal. The binary crate owns the event
//! loop and feeds user intents and network completions into a
//! [`coordinator::Coordinator`].

pub mod api;
pub mod controller;
pub mod coordinator;
pub mod db;
pub mod error;
pub mod rating;
pub mod schema;
pub mod session;
pub mod types;

pub use error::{Error, Result};
