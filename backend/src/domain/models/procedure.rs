//! Domain model for a procedure catalog entry.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service template from the studio's catalog.
///
/// Templates only seed defaults onto newly configured appointments; editing a
/// template never changes appointments that were seeded from it earlier.
/// Names are unique by convention, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub default_price: f64,
    #[serde(default)]
    pub default_cost: f64,
    pub default_duration_minutes: i64,
    /// Default post-care instructions handed to the client
    #[serde(default)]
    pub post_care: String,
    pub is_active: bool,
}

impl Procedure {
    pub fn new(name: impl Into<String>, default_price: f64, default_duration_minutes: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: String::new(),
            default_price,
            default_cost: 0.0,
            default_duration_minutes,
            post_care: String::new(),
            is_active: true,
        }
    }
}
