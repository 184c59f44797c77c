//! Domain services.
//!
//! Each service owns its gateway handles and decides which reads go through
//! the cache: lookups by id and the genre listing are cached, full-text
//! search and filmographies always hit the index.

pub mod film;
pub mod genre;
pub mod person;

pub use film::FilmService;
pub use genre::GenreService;
pub use person::PersonService;
