use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::User;

/// Legal verification state of a listing, decided by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<User>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
    pub country: String,
    pub price_per_night: Decimal,
    pub max_guests: u32,
    pub legal_status: LegalStatus,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Property {
    /// Only active, legally verified listings can be booked.
    pub fn is_bookable(&self) -> bool {
        self.is_active && self.legal_status == LegalStatus::Verified
    }
}

/// Listing creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub price_per_night: Decimal,
    pub max_guests: u32,
}

/// Search filters. Unset filters are not sent at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub country: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub guests: Option<u32>,
}

impl PropertySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn guests(mut self, guests: u32) -> Self {
        self.guests = Some(guests);
        self
    }

    /// Query pairs for `GET properties/search`. Blank strings and zero values
    /// count as unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("city", city.to_string()));
        }
        if let Some(country) = self
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            pairs.push(("country", country.to_string()));
        }
        if let Some(min) = self.min_price.filter(|p| !p.is_zero()) {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price.filter(|p| !p.is_zero()) {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(guests) = self.guests.filter(|g| *g > 0) {
            pairs.push(("guests", guests.to_string()));
        }
        pairs
    }
}
