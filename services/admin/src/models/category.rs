//! Category model

use serde::{Deserialize, Serialize};

/// Product category, read-only from the admin's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
