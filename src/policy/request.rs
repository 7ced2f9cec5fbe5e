// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outbound request representation
//!
//! Each interceptor pathway normalizes its parameters into an
//! [`OutboundRequest`] before evaluation. Requests are transient: built,
//! evaluated, and discarded within a single call.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::{Origin, Url};

/// Methods conventionally used to mutate server state
pub const WRITE_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// The page on whose behalf an outbound request is issued
#[derive(Debug, Clone)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    /// Create a page context from the page URL
    pub fn new(url: impl AsRef<str>) -> crate::error::Result<Self> {
        Ok(Self {
            url: Url::parse(url.as_ref())?,
        })
    }

    /// The page URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The page URL as a string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// The page origin (scheme + host + port)
    pub fn origin(&self) -> Origin {
        self.url.origin()
    }

    /// Resolve a possibly-relative destination against this page
    pub fn resolve(&self, destination: &str) -> Option<Url> {
        self.url.join(destination).ok()
    }
}

impl From<Url> for PageContext {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

/// Request body, dispatched by tag rather than runtime type probing
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// Raw text (JSON, urlencoded, anything)
    Text(String),
    /// Structured key/value entries, in submission order
    Form(Vec<(String, String)>),
    /// An opaque structured value serialized at send time
    Opaque(serde_json::Value),
}

impl Body {
    /// Build a form body from field entries
    pub fn form<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a text body
    pub fn text(text: impl Into<String>) -> Self {
        Body::Text(text.into())
    }

    /// Whether there is no body
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

/// The send pathway a request was intercepted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathwayKind {
    /// Declarative form submission (user-triggered submit)
    FormSubmit,
    /// Programmatic form submission (API call, no event)
    FormSubmitCall,
    /// Fetch-style request
    Fetch,
    /// XMLHttpRequest-style request
    Xhr,
    /// Fire-and-forget beacon
    Beacon,
}

impl fmt::Display for PathwayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathwayKind::FormSubmit => "form_submit",
            PathwayKind::FormSubmitCall => "form_submit_call",
            PathwayKind::Fetch => "fetch",
            PathwayKind::Xhr => "xhr",
            PathwayKind::Beacon => "beacon",
        };
        f.write_str(s)
    }
}

/// A candidate outbound request, as seen before the send is issued
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Raw destination, possibly relative to the page
    pub url: String,
    /// HTTP method, upper-cased
    pub method: String,
    /// Request body
    pub body: Body,
    /// Initiating page
    pub initiator: PageContext,
}

impl OutboundRequest {
    /// Create a request with no body
    pub fn new(url: impl Into<String>, method: impl AsRef<str>, initiator: PageContext) -> Self {
        Self {
            url: url.into(),
            method: method.as_ref().to_uppercase(),
            body: Body::Empty,
            initiator,
        }
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Resolve the destination against the initiator page
    pub fn resolve(&self) -> Option<Url> {
        self.initiator.resolve(&self.url)
    }

    /// Whether the method is a write method (POST/PUT/PATCH/DELETE)
    pub fn is_write(&self) -> bool {
        WRITE_METHODS.contains(&self.method.as_str())
    }
}
