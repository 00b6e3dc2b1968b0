//! Actions taken as the authenticated user: check-ins, comments, toasts and
//! wishlist edits. All require an access token.

use std::fmt::Display;

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;
use crate::types::{check_length, Checkin, MAX_COMMENT_CHARS};

pub struct UserActions<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> UserActions<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// Checks a beer in. Over-long shouts and out-of-range ratings are
    /// rejected before anything is sent.
    pub fn checkin(&self, checkin: &Checkin) -> Result<Value, ApiError> {
        checkin.validate()?;
        let auth = self.client.bearer_fragment()?;
        self.client
            .post("checkin/add", &auth, &QueryParams::from_options(checkin)?, None)
    }

    /// Comments on a check-in; at most 140 characters.
    pub fn add_comment(&self, checkin_id: impl Display, comment: &str) -> Result<Value, ApiError> {
        check_length("comment", comment, MAX_COMMENT_CHARS)?;
        let auth = self.client.bearer_fragment()?;
        self.client.post(
            &format!("checkin/addcomment/{}", path_segment(checkin_id)),
            &auth,
            &QueryParams::new().with("comment", comment),
            None,
        )
    }

    pub fn remove_comment(&self, comment_id: impl Display) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client.post(
            &format!("checkin/deletecomment/{}", path_segment(comment_id)),
            &auth,
            &QueryParams::new(),
            None,
        )
    }

    /// Toggles the user's toast on a check-in.
    pub fn toast(&self, checkin_id: impl Display) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client.post(
            &format!("checkin/toast/{}", path_segment(checkin_id)),
            &auth,
            &QueryParams::new(),
            None,
        )
    }

    pub fn add_to_wishlist(&self, beer_id: impl Display) -> Result<Value, ApiError> {
        self.wishlist("user/wishlist/add", beer_id)
    }

    pub fn remove_from_wishlist(&self, beer_id: impl Display) -> Result<Value, ApiError> {
        self.wishlist("user/wishlist/delete", beer_id)
    }

    // Untappd exposes wishlist edits as GETs.
    fn wishlist(&self, path: &str, beer_id: impl Display) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client
            .get(path, &auth, &QueryParams::new().with("bid", beer_id), None)
    }
}
