// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Default reqwest-backed send primitives

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use url::Url;

use super::{BeaconSend, HttpSend, SendReceipt, SpawnSend};
use crate::error::{Error, Result};
use crate::policy::{Body, OutboundRequest};

/// Shared HTTP sender behind all default capabilities
///
/// Fire-and-forget seams (programmatic form submit, beacon) spawn the send and
/// drop the outcome, matching their pathways' native semantics.
#[derive(Clone)]
pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    /// Create a sender with default settings
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Create a sender around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build(&self, request: &OutboundRequest) -> Result<reqwest::RequestBuilder> {
        let url: Url = request
            .resolve()
            .ok_or_else(|| Error::other(format!("unresolvable destination: {}", request.url)))?;
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::other(format!("invalid method: {}", request.method)))?;

        let mut builder = self.client.request(method, url);
        builder = match &request.body {
            Body::Empty => builder,
            Body::Text(text) => builder.body(text.clone()),
            Body::Form(entries) => builder.form(entries),
            Body::Opaque(value) => builder.json(value),
        };
        Ok(builder)
    }
}

#[async_trait]
impl HttpSend for HttpSender {
    async fn send(&self, request: &OutboundRequest) -> Result<SendReceipt> {
        let response = self.build(request)?.send().await?;
        Ok(SendReceipt {
            status: response.status().as_u16(),
        })
    }
}

impl SpawnSend for HttpSender {
    fn send(&self, request: OutboundRequest) {
        let sender = self.clone();
        tokio::spawn(async move {
            if let Err(e) = HttpSend::send(&sender, &request).await {
                tracing::debug!(url = %request.url, error = %e, "fire-and-forget send failed");
            }
        });
    }
}

impl BeaconSend for HttpSender {
    fn send(&self, url: &Url, data: Option<Bytes>) -> bool {
        let client = self.client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            let mut builder = client.post(url.clone());
            if let Some(data) = data {
                builder = builder.body(data);
            }
            if let Err(e) = builder.send().await {
                tracing::debug!(url = %url, error = %e, "beacon send failed");
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PageContext;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_send() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_string("hello"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let sender = HttpSender::new().unwrap();
        let page = PageContext::new(server.uri()).unwrap();
        let request = OutboundRequest::new(format!("{}/submit", server.uri()), "POST", page)
            .body(Body::text("hello"));

        let receipt = HttpSend::send(&sender, &request).await.unwrap();
        assert_eq!(receipt.status, 201);
    }

    #[tokio::test]
    async fn test_send_rejects_unresolvable_url() {
        let sender = HttpSender::new().unwrap();
        let page = PageContext::new("https://bank.example/").unwrap();
        let request = OutboundRequest::new("http://[broken", "GET", page);

        assert!(HttpSend::send(&sender, &request).await.is_err());
    }

    #[tokio::test]
    async fn test_beacon_send_queues() {
        let sender = HttpSender::new().unwrap();
        let url = Url::parse("https://bank.example/metrics").unwrap();
        assert!(BeaconSend::send(&sender, &url, Some(Bytes::from_static(b"ping"))));
    }
}
