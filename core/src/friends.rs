//! Friend relationship endpoints. Every call here requires an access token.

use serde_json::Value;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::{path_segment, QueryParams};
use crate::transport::Transport;

pub struct Friends<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> Friends<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// Friend requests waiting on the authenticated user.
    pub fn pending_friends(&self) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client.get("user/pending", &auth, &QueryParams::new(), None)
    }

    pub fn accept_friend(&self, username: &str) -> Result<Value, ApiError> {
        self.relationship("accept", username)
    }

    pub fn reject_friend(&self, username: &str) -> Result<Value, ApiError> {
        self.relationship("reject", username)
    }

    pub fn remove_friend(&self, username: &str) -> Result<Value, ApiError> {
        self.relationship("remove", username)
    }

    pub fn request_friend(&self, username: &str) -> Result<Value, ApiError> {
        self.relationship("request", username)
    }

    fn relationship(&self, action: &str, username: &str) -> Result<Value, ApiError> {
        let auth = self.client.bearer_fragment()?;
        self.client.post(
            &format!("friend/{action}/{}", path_segment(username)),
            &auth,
            &QueryParams::new(),
            None,
        )
    }
}
