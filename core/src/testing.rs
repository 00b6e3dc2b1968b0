//! Recording fake transport shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::client::UntappdClient;
use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

type Reply = Result<HttpResponse, String>;

/// Answers with queued replies in order, then with `{}`; records every
/// request it sees.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// URL of the only request sent; panics otherwise.
    pub(crate) fn single_url(&self) -> String {
        let requests = self.requests.borrow();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].url.clone()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Ok(HttpResponse::new(200, "{}")),
        }
    }
}

pub(crate) fn client(fake: &FakeTransport) -> UntappdClient<&FakeTransport> {
    UntappdClient::with_transport(
        Credentials::new("app-id", "app-secret"),
        ClientConfig::default(),
        fake,
    )
}

pub(crate) fn authed_client(fake: &FakeTransport) -> UntappdClient<&FakeTransport> {
    let mut c = client(fake);
    c.set_token("tok");
    c
}
