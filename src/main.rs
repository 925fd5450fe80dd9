//! pwinty
//!
//! Command-line access to the Pwinty API for quick lookups. Credentials and
//! environment come from `config/*.toml`, `.env` and `PWINTY_*` variables.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pwinty::{ClientSettings, ListOptions, PwintyClient};

const USAGE: &str = "usage: pwinty <command>

commands:
  countries                      list supported countries
  orders [limit] [start]         list orders
  order <id>                     show one order
  validate <id>                  show an order's submission status
  prices <country> <sku>...      quote SKUs for a destination";

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_number(value: Option<&&str>, name: &str) -> Result<Option<u32>> {
    value
        .map(|raw| raw.parse::<u32>().with_context(|| format!("{} must be a number, got {:?}", name, raw)))
        .transpose()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pwinty=info".parse()?))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let settings = ClientSettings::load().context("Failed to load configuration")?;
    let client = PwintyClient::new(&settings)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["countries"] => print_json(&client.countries().list().await?),
        ["orders", rest @ ..] if rest.len() <= 2 => {
            let options = ListOptions {
                limit: parse_number(rest.first(), "limit")?,
                start: parse_number(rest.get(1), "start")?,
            };
            print_json(&client.orders().list(options).await?)
        }
        ["order", id] => print_json(&client.orders().get(id).await?),
        ["validate", id] => print_json(&client.orders().validate(id).await?),
        ["prices", country, skus @ ..] if !skus.is_empty() => {
            print_json(&client.catalogue().prices(country, skus).await?)
        }
        _ => bail!(USAGE),
    }
}
