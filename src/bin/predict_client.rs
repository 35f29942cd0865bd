//! Command-line client for the prediction API.
//!
//! # Usage
//! ```sh
//! API_URL=http://localhost:8000 cargo run --bin predict-client -- --sqft 2100 --bedrooms 4
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use house_price_api::domain::valuation::PredictionRequest;
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query a running house price API", long_about = None)]
struct Args {
    /// Base URL of the service (falls back to $API_URL, then http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Only query /health
    #[arg(long)]
    health: bool,

    #[arg(long, default_value_t = 1500.0)]
    sqft: f64,

    #[arg(long, default_value_t = 3)]
    bedrooms: u32,

    #[arg(long, default_value_t = 2.0)]
    bathrooms: f64,

    #[arg(long, default_value = "suburban")]
    location: String,

    #[arg(long, default_value_t = 2000)]
    year_built: i32,

    #[arg(long, default_value = "Good")]
    condition: String,

    /// Send N copies of the request to /batch-predict instead of /predict
    #[arg(long, default_value_t = 0)]
    batch: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let base_url = args
        .api_url
        .clone()
        .or_else(|| std::env::var("API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let base_url = base_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    if args.health {
        let response = client
            .get(format!("{}/health", base_url))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", base_url))?;
        let body: Value = response.json().await.context("Invalid health response")?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let request = PredictionRequest {
        sqft: args.sqft,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        location: args.location.to_lowercase(),
        year_built: args.year_built,
        condition: args.condition,
    };

    let builder = if args.batch > 0 {
        client
            .post(format!("{}/batch-predict", base_url))
            .json(&vec![request; args.batch])
    } else {
        client.post(format!("{}/predict", base_url)).json(&request)
    };

    let response = builder
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", base_url))?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    let detail = body
        .get("detail")
        .and_then(Value::as_str)
        .unwrap_or("no detail provided")
        .to_string();

    match status {
        s if s.is_success() => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            eprintln!("The prediction service is warming up or misconfigured (model not loaded).");
            eprintln!("  {}", detail);
            std::process::exit(2);
        }
        s => bail!("Request rejected ({}): {}", s, detail),
    }
}
