//! Catalogue pricing

use serde::{Deserialize, Serialize};

use crate::client::dispatcher::{segment, Dispatcher, API_PREFIX};
use crate::domain::CatalogItem;
use crate::error::PwintyResult;

/// Catalogue all prices are quoted from
pub const CATALOGUE_NAME: &str = "prodigi direct";

#[derive(Deserialize)]
struct PricesEnvelope {
    prices: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Copy)]
pub struct Catalogue<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Catalogue<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Catalogue { dispatcher }
    }

    /// Quote `skus` for delivery to `country_code`.
    ///
    /// SKUs the service does not recognise are left out of the result, so
    /// match quotes by SKU (see [`crate::domain::missing_skus`]).
    pub async fn prices<S>(&self, country_code: &str, skus: &[S]) -> PwintyResult<Vec<CatalogItem>>
    where
        S: AsRef<str> + Serialize,
    {
        let path = format!(
            "{}/catalogue/{}/destination/{}/prices",
            API_PREFIX,
            segment(CATALOGUE_NAME),
            segment(country_code)
        );

        let envelope: PricesEnvelope = self.dispatcher.post(&path, skus).await?;
        Ok(envelope.prices)
    }
}
