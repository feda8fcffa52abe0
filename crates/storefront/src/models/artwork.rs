//! Catalog snapshot of an artwork.
//!
//! Callers resolve these fields from the catalog before touching a store; the
//! stores copy what they need and never look the artwork up again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gallery_core::{ArtworkId, Availability};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkSummary {
    pub id: ArtworkId,
    pub title: String,
    pub artist: String,
    /// `None` means "price on request".
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub year: Option<i32>,
    pub availability: Availability,
}

impl ArtworkSummary {
    /// Minimal summary; the optional fields start empty.
    #[must_use]
    pub fn new(id: impl Into<ArtworkId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            price: None,
            image_url: None,
            medium: None,
            dimensions: None,
            year: None,
            availability: Availability::default(),
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}
