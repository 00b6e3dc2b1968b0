//! Check-in feeds. The `*_name` variants resolve the id first and so cost an
//! extra search round trip.

use std::fmt::Display;

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;
use crate::types::{CheckinRange, FeedOptions, PubFeedOptions};

pub struct Feed<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> Feed<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// Check-ins of the authenticated user's friends. Requires a token.
    pub fn friend_feed(&self, options: &FeedOptions) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client
            .get("checkin/recent", &auth, &QueryParams::from_options(options)?, None)
    }

    pub fn user_feed(&self, username: &str, options: &FeedOptions) -> Result<Value, ApiError> {
        self.client.get(
            &format!("user/checkin/{}", path_segment(username)),
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }

    /// Public check-ins around a location.
    pub fn pub_feed(&self, options: &PubFeedOptions) -> Result<Value, ApiError> {
        self.client.get(
            "thepub/local",
            &self.client.auth_fragment(),
            &QueryParams::from_options(options)?,
            None,
        )
    }

    pub fn venue_feed_id(
        &self,
        venue_id: impl Display,
        range: &CheckinRange,
    ) -> Result<Value, ApiError> {
        self.checkins(&format!("venue/checkins/{}", path_segment(venue_id)), range)
    }

    pub fn venue_feed_name(
        &self,
        venue_name: &str,
        address: &str,
        range: &CheckinRange,
    ) -> Result<Value, ApiError> {
        let venue_id = self.client.resolver().resolve_venue_id(venue_name, address)?;
        self.venue_feed_id(venue_id, range)
    }

    pub fn beer_feed_id(&self, beer_id: impl Display, range: &CheckinRange) -> Result<Value, ApiError> {
        self.checkins(&format!("beer/checkins/{}", path_segment(beer_id)), range)
    }

    pub fn beer_feed_name(
        &self,
        beer_name: &str,
        brewery_name: &str,
        range: &CheckinRange,
    ) -> Result<Value, ApiError> {
        let beer_id = self.client.resolver().resolve_beer_id(beer_name, brewery_name)?;
        self.beer_feed_id(beer_id, range)
    }

    pub fn brewery_feed_id(
        &self,
        brewery_id: impl Display,
        range: &CheckinRange,
    ) -> Result<Value, ApiError> {
        self.checkins(&format!("brewery/checkins/{}", path_segment(brewery_id)), range)
    }

    pub fn brewery_feed_name(&self, brewery_name: &str, range: &CheckinRange) -> Result<Value, ApiError> {
        let brewery_id = self.client.resolver().resolve_brewery_id(brewery_name)?;
        self.brewery_feed_id(brewery_id, range)
    }

    fn checkins(&self, path: &str, range: &CheckinRange) -> Result<Value, ApiError> {
        self.client.get(
            path,
            &self.client.auth_fragment(),
            &QueryParams::from_options(range)?,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{authed_client, client, FakeTransport};
    use crate::types::DistanceUnit;

    #[test]
    fn friend_feed_without_token_sends_nothing() {
        let fake = FakeTransport::new();
        let err = client(&fake).feed().friend_feed(&FeedOptions::default()).unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn friend_feed_with_cursor() {
        let fake = FakeTransport::new();
        let options = FeedOptions {
            max_id: Some(900),
            limit: Some(10),
        };
        authed_client(&fake).feed().friend_feed(&options).unwrap();
        assert_eq!(
            fake.single_url(),
            "https://api.untappd.com/v4/checkin/recent?access_token=tok&limit=10&max_id=900"
        );
    }

    #[test]
    fn user_feed_uses_app_credentials_without_token() {
        let fake = FakeTransport::new();
        client(&fake)
            .feed()
            .user_feed("hopper", &FeedOptions::default())
            .unwrap();
        assert_eq!(
            fake.single_url(),
            "https://api.untappd.com/v4/user/checkin/hopper?client_id=app-id&client_secret=app-secret"
        );
    }

    #[test]
    fn pub_feed_sends_only_supplied_options() {
        let fake = FakeTransport::new();
        let options = PubFeedOptions {
            lat: Some(38.72),
            lng: Some(-75.08),
            radius: Some(5),
            dist_pref: Some(DistanceUnit::Miles),
            ..PubFeedOptions::default()
        };
        client(&fake).feed().pub_feed(&options).unwrap();
        let url = fake.single_url();
        assert!(url.contains("thepub/local?client_id=app-id&client_secret=app-secret&"));
        assert!(url.contains("lat=38.72"));
        assert!(url.contains("lng=-75.08"));
        assert!(url.contains("radius=5"));
        assert!(url.contains("dist_pref=m"));
        assert!(!url.contains("min_id"));
        assert!(!url.contains("max_id"));
        assert!(!url.contains("limit"));
    }

    #[test]
    fn venue_feed_by_id() {
        let fake = FakeTransport::new();
        let range = CheckinRange {
            min_id: Some(5),
            ..CheckinRange::default()
        };
        authed_client(&fake).feed().venue_feed_id(107565, &range).unwrap();
        assert_eq!(
            fake.single_url(),
            "https://api.untappd.com/v4/venue/checkins/107565?access_token=tok&min_id=5"
        );
    }

    #[test]
    fn brewery_feed_by_name_resolves_then_fetches() {
        let fake = FakeTransport::new()
            .respond(200, r#"{"response":{"brewery":{"items":[{"brewery":{"brewery_id":5331}}]}}}"#)
            .respond(200, r#"{"response":{"checkins":{"count":0,"items":[]}}}"#);
        let value = client(&fake)
            .feed()
            .brewery_feed_name("Dogfish Head", &CheckinRange::default())
            .unwrap();
        assert_eq!(value["response"]["checkins"]["count"], 0);

        let requests = fake.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.contains("search/brewery?"));
        assert_eq!(
            requests[1].url,
            "https://api.untappd.com/v4/brewery/checkins/5331?client_id=app-id&client_secret=app-secret"
        );
    }

    #[test]
    fn beer_feed_by_name_stops_when_resolution_fails() {
        let fake = FakeTransport::new().respond(200, r#"{"response":{"beers":{"items":[]}}}"#);
        let err = client(&fake)
            .feed()
            .beer_feed_name("Nothing", "Nobody", &CheckinRange::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "beer", .. }));
        assert_eq!(fake.requests().len(), 1);
    }

    #[test]
    fn venue_feed_by_name_uses_matched_venue() {
        let fake = FakeTransport::new().respond(
            200,
            r#"{"response":{"venues":{"items":[{"venue_id":"42","venue_address":"1 Dock St"}]}}}"#,
        );
        authed_client(&fake)
            .feed()
            .venue_feed_name("Dock", "1 Dock St", &CheckinRange::default())
            .unwrap();
        let requests = fake.requests();
        assert_eq!(
            requests[1].url,
            "https://api.untappd.com/v4/venue/checkins/42?access_token=tok"
        );
    }
}
