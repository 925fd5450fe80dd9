//! Pwinty
//!
//! Typed async client for the Pwinty print-fulfillment API: create orders,
//! attach images, validate and submit them, follow shipments and look up
//! countries and catalogue prices.
//!
//! ```no_run
//! use pwinty::{ClientSettings, OrderParameters, PwintyClient, ShippingMethod};
//!
//! # async fn run() -> pwinty::PwintyResult<()> {
//! let settings = ClientSettings::load()?.with_credentials("merchant", "key");
//! let client = PwintyClient::new(&settings)?;
//!
//! let params = OrderParameters::new("Ada Lovelace", "GB", ShippingMethod::Standard);
//! let order = client.orders().create(&params).await?;
//! client.orders().submit(order.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod resources;
pub mod transport;

pub use crate::client::PwintyClient;
pub use crate::config::{ClientSettings, PwintyEnvironment};
pub use crate::domain::*;
pub use crate::error::{PwintyError, PwintyResult};
pub use crate::resources::ListOptions;
pub use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
