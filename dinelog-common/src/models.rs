//! Visit models
//!
//! These types are also the JSON wire format of the visit service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visit as submitted by the user, before the store assigns an id
///
/// No field is validated: rating is expected in 1..=5 and name to be
/// non-empty, but neither is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitDraft {
    pub name: String,
    pub location: String,
    pub dish: String,
    pub rating: f64,
    /// ISO `YYYY-MM-DD` on the wire
    pub date: NaiveDate,
}

impl VisitDraft {
    /// Blank draft dated `date`, rated 5
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            dish: String::new(),
            rating: 5.0,
            date,
        }
    }
}

/// A stored visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Assigned once by the store; `_id` is accepted when reading
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub dish: String,
    pub rating: f64,
    pub date: NaiveDate,
}

impl VisitRecord {
    /// Attach a store-assigned id to a draft
    pub fn from_draft(id: Uuid, draft: VisitDraft) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            dish: draft.dish,
            rating: draft.rating,
            date: draft.date,
        }
    }

    /// The user-supplied part of this record
    pub fn draft(&self) -> VisitDraft {
        VisitDraft {
            name: self.name.clone(),
            location: self.location.clone(),
            dish: self.dish.clone(),
            rating: self.rating,
            date: self.date,
        }
    }
}
