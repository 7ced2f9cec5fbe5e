// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy evaluation
//!
//! Pure function of the request and the supplied config. Rules run in a fixed
//! order and the first match wins; anything the evaluator cannot parse or
//! estimate fails open rather than inventing suspicion.

use std::collections::HashSet;

use serde_json::{json, Value};

use super::config::PolicyConfig;
use super::decision::{Decision, ReasonCode};
use super::request::{Body, OutboundRequest};

/// Evaluate an outbound request against a policy configuration
///
/// Rule order, first match wins:
/// 1. unresolvable destination -> allow (`invalid_url`)
/// 2. allowlisted host -> allow, overriding every later rule
/// 3. cross-origin write method -> block (`cross_origin_write`)
/// 4. estimated body over `max_body_bytes` -> block (`body_too_large`)
/// 5. suspicious field name in a cross-origin write -> block
///    (`suspicious_keys_external`)
/// 6. otherwise -> allow (`ok`)
pub fn evaluate(request: &OutboundRequest, config: &PolicyConfig) -> Decision {
    let Some(destination) = request.resolve() else {
        return Decision::allow(ReasonCode::InvalidUrl);
    };

    if let Some(host) = destination.host_str() {
        if config.is_host_allowed(host) {
            return Decision::allow(ReasonCode::Allowlisted);
        }
    }

    let same_origin = destination.origin() == request.initiator.origin();

    if config.block_cross_origin_writes && !same_origin && request.is_write() {
        return Decision::block(ReasonCode::CrossOriginWrite)
            .with_details(json!({ "origin": destination.origin().ascii_serialization() }));
    }

    let bytes = estimate_bytes(&request.body);
    if bytes > config.max_body_bytes {
        return Decision::block(ReasonCode::BodyTooLarge).with_details(json!({ "bytes": bytes }));
    }

    let keys = extract_keys(&request.body);
    for name in &config.suspicious_field_names {
        if keys.contains(name.as_str()) && !same_origin && request.is_write() {
            return Decision::block(ReasonCode::SuspiciousKeysExternal)
                .with_details(json!({ "key": name }));
        }
    }

    Decision::allow(ReasonCode::Ok)
}

/// Approximate the wire size of a body in bytes
///
/// Form bodies are reconstructed as `key=value&` pairs; opaque values use
/// their JSON serialization. A value that fails to serialize counts as zero.
pub fn estimate_bytes(body: &Body) -> u64 {
    match body {
        Body::Empty => 0,
        Body::Text(text) => text.len() as u64,
        Body::Form(entries) => entries
            .iter()
            .map(|(k, v)| k.len() as u64 + v.len() as u64 + 2)
            .sum(),
        Body::Opaque(value) => serde_json::to_string(value)
            .map(|s| s.len() as u64)
            .unwrap_or(0),
    }
}

/// Extract the lower-cased top-level field names present in a body
///
/// Raw text only contributes keys when it trims to a JSON object; any parse
/// failure yields the empty set.
pub fn extract_keys(body: &Body) -> HashSet<String> {
    let mut keys = HashSet::new();
    match body {
        Body::Empty => {}
        Body::Form(entries) => {
            for (k, _) in entries {
                keys.insert(k.to_lowercase());
            }
        }
        Body::Text(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('{') && trimmed.ends_with('}') {
                if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
                    for k in map.keys() {
                        keys.insert(k.to_lowercase());
                    }
                }
            }
        }
        Body::Opaque(value) => {
            if let Value::Object(map) = value {
                for k in map.keys() {
                    keys.insert(k.to_lowercase());
                }
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::request::PageContext;

    fn page() -> PageContext {
        PageContext::new("https://bank.example/login").unwrap()
    }

    fn post(url: &str, body: Body) -> OutboundRequest {
        OutboundRequest::new(url, "POST", page()).body(body)
    }

    #[test]
    fn test_cross_origin_write_blocked() {
        // Scenario A: rule 3 fires before the suspicious-key rule
        let req = post(
            "https://evil.example/collect",
            Body::text(r#"{"password":"x"}"#),
        );
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(decision.block);
        assert_eq!(decision.reason, ReasonCode::CrossOriginWrite);
        assert_eq!(
            decision.details.unwrap()["origin"],
            serde_json::json!("https://evil.example")
        );
    }

    #[test]
    fn test_same_origin_write_allowed() {
        // Scenario B
        let req = post("https://bank.example/api", Body::text(r#"{"password":"x"}"#));
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(!decision.block);
        assert_eq!(decision.reason, ReasonCode::Ok);
    }

    #[test]
    fn test_cross_origin_get_allowed() {
        // Scenario C: GET is not a write method
        let req = OutboundRequest::new("https://evil.example/collect", "GET", page());
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(!decision.block);
        assert_eq!(decision.reason, ReasonCode::Ok);
    }

    #[test]
    fn test_oversized_body_blocked() {
        // Scenario D: size rule still applies with cross-origin blocking off
        let config = PolicyConfig::new().block_cross_origin_writes(false);
        let req = post("https://evil.example/collect", Body::text("x".repeat(300_000)));
        let decision = evaluate(&req, &config);
        assert!(decision.block);
        assert_eq!(decision.reason, ReasonCode::BodyTooLarge);
        assert_eq!(decision.details.unwrap()["bytes"], serde_json::json!(300_000));
    }

    #[test]
    fn test_allowlist_overrides_everything() {
        // Scenario E
        let config = PolicyConfig::new().allow_host("evil.example");
        let req = post(
            "https://evil.example/collect",
            Body::text(r#"{"password":"x"}"#),
        );
        let decision = evaluate(&req, &config);
        assert!(!decision.block);
        assert_eq!(decision.reason, ReasonCode::Allowlisted);

        // Even an oversized body to an allowlisted host passes
        let req = post("https://evil.example/collect", Body::text("x".repeat(500_000)));
        assert_eq!(evaluate(&req, &config).reason, ReasonCode::Allowlisted);
    }

    #[test]
    fn test_invalid_url_fails_open() {
        let req = OutboundRequest::new("http://[broken", "POST", page())
            .body(Body::text("x".repeat(500_000)));
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(!decision.block);
        assert_eq!(decision.reason, ReasonCode::InvalidUrl);
    }

    #[test]
    fn test_suspicious_keys_cross_origin() {
        let config = PolicyConfig::new().block_cross_origin_writes(false);

        // Form body
        let req = post(
            "https://evil.example/collect",
            Body::form([("Password", "hunter2"), ("note", "hi")]),
        );
        let decision = evaluate(&req, &config);
        assert!(decision.block);
        assert_eq!(decision.reason, ReasonCode::SuspiciousKeysExternal);
        assert_eq!(decision.details.unwrap()["key"], serde_json::json!("password"));

        // Opaque body
        let req = post(
            "https://evil.example/collect",
            Body::Opaque(serde_json::json!({"token": "abc"})),
        );
        assert_eq!(
            evaluate(&req, &config).reason,
            ReasonCode::SuspiciousKeysExternal
        );
    }

    #[test]
    fn test_suspicious_keys_same_origin_allowed() {
        let req = post("https://bank.example/api", Body::form([("password", "x")]));
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(!decision.block);
    }

    #[test]
    fn test_suspicious_keys_first_match_in_config_order() {
        let config = PolicyConfig::new().block_cross_origin_writes(false);
        // Body carries both "token" and "password"; config lists password first
        let req = post(
            "https://evil.example/collect",
            Body::form([("token", "t"), ("password", "p")]),
        );
        let decision = evaluate(&req, &config);
        assert_eq!(decision.details.unwrap()["key"], serde_json::json!("password"));
    }

    #[test]
    fn test_unparseable_text_yields_no_keys() {
        let config = PolicyConfig::new().block_cross_origin_writes(false);
        let req = post(
            "https://evil.example/collect",
            Body::text("password=x&token=y"),
        );
        // Not a JSON object, so no key extraction happens
        let decision = evaluate(&req, &config);
        assert!(!decision.block);
        assert_eq!(decision.reason, ReasonCode::Ok);
    }

    #[test]
    fn test_idempotent() {
        let req = post(
            "https://evil.example/collect",
            Body::form([("password", "x")]),
        );
        let config = PolicyConfig::default();
        assert_eq!(evaluate(&req, &config), evaluate(&req, &config));
    }

    #[test]
    fn test_port_counts_for_origin() {
        // Same host, different port: cross-origin
        let req = post("https://bank.example:8443/api", Body::Empty);
        let decision = evaluate(&req, &PolicyConfig::default());
        assert!(decision.block);
        assert_eq!(decision.reason, ReasonCode::CrossOriginWrite);
    }

    #[test]
    fn test_estimate_bytes() {
        assert_eq!(estimate_bytes(&Body::Empty), 0);
        assert_eq!(estimate_bytes(&Body::text("abcd")), 4);
        // "a=1&" + "bb=22&" reconstruction
        assert_eq!(estimate_bytes(&Body::form([("a", "1"), ("bb", "22")])), 10);
        assert_eq!(
            estimate_bytes(&Body::Opaque(serde_json::json!({"a": 1}))),
            7
        );
    }

    #[test]
    fn test_extract_keys_shapes() {
        assert!(extract_keys(&Body::Empty).is_empty());
        assert!(extract_keys(&Body::text("not json")).is_empty());
        assert!(extract_keys(&Body::text("[1,2]")).is_empty());
        assert!(extract_keys(&Body::text("{broken")).is_empty());
        assert!(extract_keys(&Body::Opaque(serde_json::json!([1, 2]))).is_empty());

        let keys = extract_keys(&Body::text(r#" {"Password": "x", "User": "y"} "#));
        assert!(keys.contains("password"));
        assert!(keys.contains("user"));
    }
}
