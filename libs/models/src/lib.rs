//! Domain records for the kinoteka catalog.
//!
//! Every type in this crate is a read-only projection of a document stored in
//! the search index. Records are constructed when a document is decoded (or,
//! for [`FilmSummary`], projected from an already-decoded [`Film`]) and are
//! never mutated afterwards.
//!
//! # Example
//!
//! ```rust
//! use kinoteka_models::Film;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "id": "f1",
//!     "title": "Solaris",
//!     "imdb_rating": 8.1,
//!     "description": null,
//!     "genres_list": [{"id": "g1", "name": "Sci-Fi"}]
//! });
//!
//! let film: Film = serde_json::from_value(doc).unwrap();
//! assert_eq!(film.title, "Solaris");
//! ```

pub mod film;
pub mod genre;
pub mod page;
pub mod person;

// Re-export commonly used types
pub use film::{Film, FilmSummary};
pub use genre::Genre;
pub use page::Paginated;
pub use person::{Person, PersonFilm, PersonRole};
