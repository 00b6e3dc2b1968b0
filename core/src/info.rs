//! Brewery, beer, venue, check-in and user details.

use std::fmt::Display;

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;
use crate::types::InfoOptions;

pub struct GeneralInfo<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> GeneralInfo<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    pub fn brewery_info_id(&self, brewery_id: impl Display, options: &InfoOptions) -> Result<Value, ApiError> {
        self.details(&format!("brewery/info/{}", path_segment(brewery_id)), options)
    }

    pub fn brewery_info_name(&self, brewery_name: &str, options: &InfoOptions) -> Result<Value, ApiError> {
        let brewery_id = self.client.resolver().resolve_brewery_id(brewery_name)?;
        self.brewery_info_id(brewery_id, options)
    }

    pub fn beer_info_id(&self, beer_id: impl Display, options: &InfoOptions) -> Result<Value, ApiError> {
        self.details(&format!("beer/info/{}", path_segment(beer_id)), options)
    }

    pub fn beer_info_name(
        &self,
        beer_name: &str,
        brewery_name: &str,
        options: &InfoOptions,
    ) -> Result<Value, ApiError> {
        let beer_id = self.client.resolver().resolve_beer_id(beer_name, brewery_name)?;
        self.beer_info_id(beer_id, options)
    }

    pub fn venue_info_id(&self, venue_id: impl Display, options: &InfoOptions) -> Result<Value, ApiError> {
        self.details(&format!("venue/info/{}", path_segment(venue_id)), options)
    }

    pub fn venue_info_name(
        &self,
        venue_name: &str,
        address: &str,
        options: &InfoOptions,
    ) -> Result<Value, ApiError> {
        let venue_id = self.client.resolver().resolve_venue_id(venue_name, address)?;
        self.venue_info_id(venue_id, options)
    }

    pub fn checkin_info(&self, checkin_id: impl Display) -> Result<Value, ApiError> {
        self.client.get(
            &format!("checkin/view/{}", path_segment(checkin_id)),
            &self.client.auth_fragment(),
            &QueryParams::new(),
            None,
        )
    }

    pub fn user_info(&self, username: &str, options: &InfoOptions) -> Result<Value, ApiError> {
        self.details(&format!("user/info/{}", path_segment(username)), options)
    }

    fn details(&self, path: &str, options: &InfoOptions) -> Result<Value, ApiError> {
        self.client.get(
            path,
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }
}
