//! # Content Types
//!
//! Blog posts (admin-authored) and customer reviews.

use crate::document::{DocumentId, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Document id
    pub id: DocumentId,

    /// Post title
    pub title: String,

    /// Post body
    pub body: String,

    /// Author display name
    pub author: String,

    /// Publication timestamp
    pub published_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            title: title.into(),
            body: body.into(),
            author: author.into(),
            published_at: Utc::now(),
        }
    }
}

impl Record for Blog {
    fn id(&self) -> DocumentId {
        self.id
    }
}

/// A customer review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Document id
    pub id: DocumentId,

    /// Reviewer (verified token identity)
    pub email: String,

    /// Reviewer display name
    pub reviewer_name: String,

    /// Star rating, clamped to 1..=5
    pub rating: u8,

    /// Review text
    pub comment: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        email: impl Into<String>,
        reviewer_name: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            email: email.into(),
            reviewer_name: reviewer_name.into(),
            rating: rating.clamp(1, 5),
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }
}

impl Record for Review {
    fn id(&self) -> DocumentId {
        self.id
    }
}
