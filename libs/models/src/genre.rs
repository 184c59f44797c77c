//! Genre record

use serde::{Deserialize, Serialize};

/// A film genre. Flat, no nested relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}
