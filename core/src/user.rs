//! Per-user lists: badges, friends, wishlist, distinct beers, notifications.

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;
use crate::types::{ListOptions, PageOptions};

pub struct UserInfo<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> UserInfo<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// Requires a token.
    pub fn user_badges(&self, username: &str, options: &PageOptions) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client.get(
            &format!("user/badges/{}", path_segment(username)),
            &auth,
            &QueryParams::from_options(options)?,
            None,
        )
    }

    pub fn user_friends(&self, username: &str, options: &PageOptions) -> Result<Value, ApiError> {
        self.client.get(
            &format!("user/friends/{}", path_segment(username)),
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }

    pub fn user_wishlist(&self, username: &str, options: &ListOptions) -> Result<Value, ApiError> {
        self.client.get(
            &format!("user/wishlist/{}", path_segment(username)),
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }

    pub fn user_distinct_beers(&self, username: &str, options: &ListOptions) -> Result<Value, ApiError> {
        self.client.get(
            &format!("user/beers/{}", path_segment(username)),
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }

    /// The authenticated user's notifications. Requires a token.
    pub fn user_notifications(&self, options: &PageOptions) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client
            .get("notifications", &auth, &QueryParams::from_options(options)?, None)
    }
}
