//! Reference and pricing data: countries and catalogue quotes

use serde::{Deserialize, Serialize};

/// A destination country the service ships to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Two-letter country code
    pub country_code: String,
    pub name: String,
}

/// Price quote for one SKU shipped to the queried country.
///
/// Only valid for the country it was requested for; not cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    pub sku: String,
    /// Minor currency units
    pub price: i64,
    /// ISO currency code of `price`
    pub currency: String,
}

/// Find the quote for `sku`.
///
/// The service drops SKUs it does not recognise, so quotes must be matched
/// by SKU and never by position.
pub fn find_quote<'a>(quotes: &'a [CatalogItem], sku: &str) -> Option<&'a CatalogItem> {
    quotes.iter().find(|item| item.sku == sku)
}

/// Requested SKUs that came back without a quote, in request order
pub fn missing_skus<'a, S: AsRef<str>>(requested: &'a [S], quotes: &[CatalogItem]) -> Vec<&'a str> {
    requested
        .iter()
        .map(|sku| -> &'a str { sku.as_ref() })
        .filter(|sku| find_quote(quotes, sku).is_none())
        .collect()
}
