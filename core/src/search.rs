//! Search and lookup endpoints. All accept either authorization mode.

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;
use crate::types::ListOptions;

pub struct Search<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> Search<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// `search/brewery`
    pub fn brewery_search(
        &self,
        query: &str,
        options: &ListOptions,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        self.query("search/brewery", query, options, fields)
    }

    /// `search/beer`; `sort` accepts e.g. `checkin` or `name`.
    pub fn beer_search(
        &self,
        query: &str,
        options: &ListOptions,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        self.query("search/beer", query, options, fields)
    }

    /// `search/venue`
    pub fn venue_search(
        &self,
        query: &str,
        options: &ListOptions,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        self.query("search/venue", query, options, fields)
    }

    /// Converts a Foursquare v2 venue id into an Untappd venue id.
    pub fn foursquare_venue_lookup(&self, foursquare_id: &str) -> Result<Value, ApiError> {
        self.client.get(
            &format!("venue/foursquare_lookup/{}", path_segment(foursquare_id)),
            &self.client.auth_fragment(),
            &QueryParams::new(),
            None,
        )
    }

    /// Trending macro and micro beers.
    pub fn beer_trending(&self) -> Result<Value, ApiError> {
        self.client.get(
            "beer/trending",
            &self.client.auth_fragment(),
            &QueryParams::new(),
            None,
        )
    }

    fn query(
        &self,
        path: &str,
        query: &str,
        options: &ListOptions,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        let mut params = QueryParams::from_options(options)?;
        params.insert("q", query);
        self.client
            .get(path, &self.client.auth_fragment(), &params, fields)
    }
}
