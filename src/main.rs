// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Sendguard CLI
//!
//! Example usage and demonstration of the sendguard library: evaluate a
//! candidate outbound request from the command line.

use std::env;
use std::process::ExitCode;

use sendguard::{evaluate, Body, OutboundRequest, PageContext, PolicyConfig};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sendguard=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "check" => {
            if args.len() < 5 {
                eprintln!("Usage: sendguard check <initiator> <method> <url> [body]");
                return ExitCode::from(1);
            }
            check(&args[2], &args[3], &args[4], args.get(5).map(String::as_str))
        }
        "config" => {
            match serde_json::to_string_pretty(&PolicyConfig::default()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to render config: {}", e);
                    ExitCode::from(1)
                }
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("sendguard {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn check(initiator: &str, method: &str, url: &str, body: Option<&str>) -> ExitCode {
    let page = match PageContext::new(initiator) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Invalid initiator URL: {}", e);
            return ExitCode::from(1);
        }
    };

    let body = body.map(Body::text).unwrap_or_default();
    let request = OutboundRequest::new(url, method, page).body(body);
    let decision = evaluate(&request, &PolicyConfig::default());

    match serde_json::to_string_pretty(&decision) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to render decision: {}", e);
            return ExitCode::from(1);
        }
    }

    if decision.block {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_usage() {
    println!(
        r#"Sendguard - Outbound Request Interception

USAGE:
    sendguard <COMMAND> [OPTIONS]

COMMANDS:
    check <initiator> <method> <url> [body]
                      Evaluate a candidate request against the default policy
                      (exit code 2 when the request would be blocked)
    config            Print the default policy configuration as JSON
    help              Show this help
    version           Show version

EXAMPLES:
    sendguard check https://bank.example POST https://evil.example/collect '{{"password":"x"}}'
    sendguard config"#
    );
}
