//! HTTP handlers.

pub mod films;
pub mod genres;
pub mod persons;
