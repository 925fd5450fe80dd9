//! Image line items
//!
//! An image is one printed product within an order: a source file, a SKU and
//! a number of copies. The service downloads and validates the file and
//! reports progress through [`ImageStatus`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Status & Sizing
// ============================================================================

/// Download/validation state of an image.
///
/// `AwaitingUrlOrData` and `NotYetDownloaded` are the only states before the
/// file is resolved; the rest are final. Failed images are not retried by
/// the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageStatus {
    AwaitingUrlOrData,
    NotYetDownloaded,
    Ok,
    FileNotFoundAtUrl,
    Invalid,
    /// A value this client version does not know
    #[serde(other)]
    Unrecognized,
}

impl ImageStatus {
    /// The service has not looked at the file yet
    pub fn is_pending(&self) -> bool {
        matches!(self, ImageStatus::AwaitingUrlOrData | ImageStatus::NotYetDownloaded)
    }

    /// Downloaded and accepted, or failed for good
    pub fn is_resolved(&self) -> bool {
        matches!(self, ImageStatus::Ok) || self.is_failure()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ImageStatus::FileNotFoundAtUrl | ImageStatus::Invalid)
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageStatus::AwaitingUrlOrData => "AwaitingUrlOrData",
            ImageStatus::NotYetDownloaded => "NotYetDownloaded",
            ImageStatus::Ok => "Ok",
            ImageStatus::FileNotFoundAtUrl => "FileNotFoundAtUrl",
            ImageStatus::Invalid => "Invalid",
            ImageStatus::Unrecognized => "Unrecognized",
        };
        f.write_str(s)
    }
}

/// How the image is fitted to the print area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResizingType {
    #[default]
    Crop,
    ShrinkToFit,
    ShrinkToExactFit,
    #[serde(other)]
    Unrecognized,
}

// ============================================================================
// Image
// ============================================================================

/// An image line item as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: u64,

    /// Source URL the service downloads from
    #[serde(default)]
    pub url: Option<String>,

    pub status: ImageStatus,

    pub copies: u32,

    pub sizing: ResizingType,

    /// What the merchant is charged, in minor units
    #[serde(default)]
    pub price: i64,

    /// Resale price per item when the recipient is invoiced
    #[serde(default)]
    pub price_to_user: Option<i64>,

    #[serde(default)]
    pub md5_hash: Option<String>,

    /// Image after cropping
    #[serde(default)]
    pub preview_url: Option<String>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    pub sku: String,

    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Body for adding an image to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub sku: String,
    pub url: String,
    pub copies: u32,
    pub sizing: ResizingType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price_to_user: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub md5_hash: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ImageParameters {
    /// One cropped copy of `url` printed as `sku`
    pub fn new(sku: impl Into<String>, url: impl Into<String>) -> Self {
        ImageParameters {
            sku: sku.into(),
            url: url.into(),
            copies: 1,
            sizing: ResizingType::Crop,
            price_to_user: None,
            md5_hash: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    pub fn with_sizing(mut self, sizing: ResizingType) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
