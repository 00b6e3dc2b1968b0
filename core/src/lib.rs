//! Blocking client for the Untappd v4 REST API.
//!
//! # Overview
//! Turns method calls into authenticated requests against Untappd's endpoint
//! templates and hands back the parsed JSON (`serde_json::Value`) unchanged.
//!
//! # Design
//! - `UntappdClient` is the request core: credentials, optional access
//!   token, `get`/`post` dispatch through a [`Transport`].
//! - Request construction (`build_request`) and response parsing
//!   (`parse_response`) are pure; only the transport does I/O.
//! - Endpoint groups (`search`, `feed`, `friends`, `info`, `actions`,
//!   `user`) borrow the client. `*_name` variants go through the
//!   [`Resolver`] first and cost one extra round trip.
//! - Optional arguments are option structs whose fields default to "not
//!   sent".
//!
//! ```no_run
//! use untappd_core::{InfoOptions, UntappdClient};
//!
//! let client = UntappdClient::new("client-id", "client-secret");
//! let beer = client.info().beer_info_name("60 Minute IPA", "Dogfish Head", &InfoOptions::default())?;
//! println!("{}", beer["response"]["beer"]["beer_name"]);
//! # Ok::<(), untappd_core::ApiError>(())
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod friends;
pub mod http;
pub mod info;
pub mod params;
pub mod resolver;
pub mod search;
pub mod transport;
pub mod types;
pub mod user;

#[cfg(test)]
mod testing;

pub use actions::UserActions;
pub use client::UntappdClient;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use feed::Feed;
pub use friends::Friends;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use info::GeneralInfo;
pub use params::QueryParams;
pub use resolver::Resolver;
pub use search::Search;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Checkin, CheckinRange, DistanceUnit, FeedOptions, InfoOptions, ListOptions, PageOptions,
    PubFeedOptions, MAX_COMMENT_CHARS, MAX_RATING, MAX_SHOUT_CHARS,
};
pub use user::UserInfo;
