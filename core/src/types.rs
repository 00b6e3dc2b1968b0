//! Per-endpoint option structs.
//!
//! # Design
//! Every optional argument an endpoint accepts is a field here, and every
//! field defaults to "not sent". They are flattened into query parameters
//! by [`QueryParams::from_options`](crate::params::QueryParams::from_options),
//! so field names are the exact Untappd parameter names.

use serde::{Serialize, Serializer};

use crate::error::ApiError;

/// Longest check-in shout Untappd accepts, in characters.
pub const MAX_SHOUT_CHARS: usize = 256;
/// Longest check-in comment Untappd accepts, in characters.
pub const MAX_COMMENT_CHARS: usize = 140;
/// Highest check-in rating.
pub const MAX_RATING: f64 = 5.0;

/// Cursor options for the friend and user check-in feeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedOptions {
    /// Check-in id the results start from.
    pub max_id: Option<u64>,
    pub limit: Option<u32>,
}

/// Cursor options for venue, beer and brewery check-in feeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckinRange {
    /// Most recent check-in id already seen; only newer ones are returned.
    pub min_id: Option<u64>,
    pub max_id: Option<u64>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Miles,
    #[serde(rename = "km")]
    Kilometers,
}

/// Options for the local pub feed around a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PubFeedOptions {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<u32>,
    pub dist_pref: Option<DistanceUnit>,
    pub min_id: Option<u64>,
    pub max_id: Option<u64>,
    pub limit: Option<u32>,
}

/// Options for search endpoints and sortable user lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListOptions {
    pub sort: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Plain offset/limit paging.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageOptions {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Options for the `*/info/*` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoOptions {
    /// Ask for the compact listing without check-ins and media.
    pub compact: bool,
}

impl InfoOptions {
    pub fn compact() -> Self {
        Self { compact: true }
    }
}

/// A new check-in. `gmt_offset`, `timezone` and `bid` are required by
/// Untappd; everything else is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Checkin {
    pub gmt_offset: i32,
    pub timezone: String,
    pub bid: String,
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub geolat: Option<f64>,
    #[serde(skip_serializing_if = "is_unset")]
    pub geolng: Option<f64>,
    pub shout: Option<String>,
    /// A rating of zero means "not rated" and is not sent.
    #[serde(skip_serializing_if = "is_unset")]
    pub rating: Option<f64>,
    #[serde(serialize_with = "share_flag", skip_serializing_if = "is_false")]
    pub facebook: bool,
    #[serde(serialize_with = "share_flag", skip_serializing_if = "is_false")]
    pub twitter: bool,
    #[serde(serialize_with = "share_flag", skip_serializing_if = "is_false")]
    pub foursquare: bool,
    #[serde(serialize_with = "share_flag", skip_serializing_if = "is_false")]
    pub instagram: bool,
}

impl Checkin {
    pub fn new(gmt_offset: i32, timezone: impl Into<String>, bid: impl ToString) -> Self {
        Self {
            gmt_offset,
            timezone: timezone.into(),
            bid: bid.to_string(),
            ..Self::default()
        }
    }

    pub fn shout(mut self, shout: impl Into<String>) -> Self {
        self.shout = Some(shout.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach the check-in to a Foursquare venue.
    pub fn at_venue(mut self, foursquare_id: impl Into<String>, lat: f64, lng: f64) -> Self {
        self.foursquare_id = Some(foursquare_id.into());
        self.geolat = Some(lat);
        self.geolng = Some(lng);
        self
    }

    /// Rejects shouts over [`MAX_SHOUT_CHARS`] and ratings outside `0..=5`.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(shout) = &self.shout {
            check_length("shout", shout, MAX_SHOUT_CHARS)?;
        }
        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ApiError::InvalidRating(rating));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_length(field: &'static str, text: &str, limit: usize) -> Result<(), ApiError> {
    let length = text.chars().count();
    if length > limit {
        return Err(ApiError::TooLong {
            field,
            length,
            limit,
        });
    }
    Ok(())
}

// Untappd expects "on" for each social network to cross-post to.
fn share_flag<S: Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("on")
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_unset(value: &Option<f64>) -> bool {
    value.map_or(true, |v| v == 0.0)
}
