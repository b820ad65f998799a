//! Cashlink Submit - Invoice upload from the command line
//!
//! Runs local files through the intake rules, encodes them to base64 and
//! submits them as one multipart call through the Cashlink proxy.

use anyhow::{bail, Context, Result};
use cashlink_domain::intake::{format_file_size, FileSource, IntakeService};
use cashlink_domain::relay::EncodedFile;
use cashlink_http::TokioFileSource;
use clap::Parser;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "cashlink-submit")]
#[command(about = "Validate invoice files and submit them through the Cashlink proxy")]
struct Args {
    /// Base URL of the Cashlink proxy
    #[arg(long, env = "CASHLINK_PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: String,

    /// Upstream endpoint the submission is sent to
    #[arg(long, default_value = "/v1/invoices")]
    endpoint: String,

    /// HTTP method of the upstream call
    #[arg(long, default_value = "POST")]
    method: String,

    /// Access token of the signed-in user
    #[arg(long, env = "CASHLINK_USER_TOKEN")]
    token: Option<String>,

    /// Form field as key=value, repeatable
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// File to upload, repeatable
    #[arg(long = "file", value_name = "PATH", required = true)]
    files: Vec<PathBuf>,

    /// Form field name used for every file
    #[arg(long, default_value = "invoice")]
    file_field: String,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn submission_body(args: &Args, files: Vec<EncodedFile>) -> Value {
    let form_fields: Map<String, Value> = args
        .fields
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    let files: Vec<Value> = files
        .into_iter()
        .map(|file| {
            json!({
                "name": file.field_name,
                "data": file.data,
                "filename": file.filename,
                "contentType": file.content_type,
            })
        })
        .collect();

    json!({
        "endpoint": args.endpoint,
        "method": args.method,
        "userAccessToken": args.token,
        "isMultipart": true,
        "formFields": form_fields,
        "files": files,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut sources = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let source = TokioFileSource::open(path)
            .await
            .with_context(|| format!("Cannot open {}", path.display()))?;
        sources.push(source);
    }

    let payloads = IntakeService::default()
        .prepare_submission(&sources)
        .await
        .context("Files rejected")?;

    for source in &sources {
        let descriptor = source.descriptor();
        info!(
            filename = %descriptor.filename,
            mime_type = %descriptor.mime_type,
            size = %format_file_size(descriptor.size_bytes),
            "File accepted"
        );
    }

    let files = payloads
        .into_iter()
        .map(|payload| EncodedFile::from_payload(args.file_field.clone(), payload))
        .collect();
    let body = submission_body(&args, files);

    let url = format!("{}/api/proxy", args.proxy_url.trim_end_matches('/'));
    info!(url = %url, endpoint = %args.endpoint, "Submitting files");

    let response = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach proxy at {}", url))?;

    let status = response.status();
    let answer: Value = response
        .json()
        .await
        .context("Proxy answered with a non-JSON body")?;

    println!("{}", serde_json::to_string_pretty(&answer)?);

    if !status.is_success() {
        error!(status = status.as_u16(), "Proxy failed");
        bail!("Proxy failed with status {}", status);
    }
    if answer.get("error") == Some(&Value::Bool(true)) {
        let upstream = answer.get("status").and_then(Value::as_u64).unwrap_or(0);
        bail!("Upstream rejected the submission with status {}", upstream);
    }

    Ok(())
}
