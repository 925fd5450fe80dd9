//! Order, shipment and validation models
//!
//! Orders are decoded from service responses and never mutated locally. To
//! change an order, send new [`OrderParameters`] and use the order that comes
//! back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::image::Image;
use super::wire::{string_or_number, timestamp, timestamp_opt};
use crate::error::{PwintyError, PwintyResult};

// ============================================================================
// Vocabularies
// ============================================================================

/// Order lifecycle as reported by the service.
///
/// `NotYetSubmitted -> Submitted -> Complete`, with `Cancelled` reachable from
/// either of the first two. The service decides whether a transition happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    NotYetSubmitted,
    Submitted,
    Complete,
    Cancelled,
    #[serde(other)]
    Unrecognized,
}

impl OrderStatus {
    /// No further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Complete | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::NotYetSubmitted => "NotYetSubmitted",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Complete => "Complete",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unrecognized => "Unrecognized",
        };
        f.write_str(s)
    }
}

/// Shipment progress. One-way: `InProgress -> Shipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    InProgress,
    Shipped,
    #[serde(other)]
    Unrecognized,
}

impl ShipmentStatus {
    /// Position along the one-way progression
    pub(crate) fn progress(&self) -> u8 {
        match self {
            ShipmentStatus::Unrecognized => 0,
            ShipmentStatus::InProgress => 1,
            ShipmentStatus::Shipped => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    Budget,
    Standard,
    Express,
    Overnight,
    #[serde(other)]
    Unrecognized,
}

/// Who pays for the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentType {
    /// The merchant's account is charged
    #[default]
    InvoiceMe,
    /// The recipient is sent to `payment_url` to pay
    InvoiceRecipient,
    #[serde(other)]
    Unrecognized,
}

/// Carrier used once a shipment is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    RoyalMail,
    RoyalMailFirstClass,
    RoyalMailSecondClass,
    FedEx,
    #[serde(rename = "FedExUK")]
    FedExUk,
    FedExIntl,
    Interlink,
    #[serde(rename = "UPS")]
    Ups,
    UpsTwoDay,
    #[serde(rename = "UKMail")]
    UkMail,
    #[serde(rename = "TNT")]
    Tnt,
    ParcelForce,
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "UPSMI")]
    UpsMi,
    DpdNextDay,
    EuPostal,
    AuPost,
    AirMail,
    /// The service itself does not know the carrier
    NotKnown,
    /// A carrier this client version does not know
    #[serde(other)]
    Unrecognized,
}

// ============================================================================
// Shipping
// ============================================================================

/// A physical parcel. Orders with several product types may be split into
/// several shipments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// `None` until the order is submitted and shipments are allocated
    #[serde(default)]
    pub shipment_id: Option<String>,

    #[serde(default)]
    pub is_tracked: bool,

    #[serde(default)]
    pub tracking_number: Option<String>,

    #[serde(default)]
    pub tracking_url: Option<String>,

    #[serde(with = "timestamp_opt", default)]
    pub earliest_estimated_arrival_date: Option<DateTime<Utc>>,

    #[serde(with = "timestamp_opt", default)]
    pub latest_estimated_arrival_date: Option<DateTime<Utc>>,

    /// `None` until shipped
    #[serde(with = "timestamp_opt", default)]
    pub shipped_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub carrier: Option<Carrier>,

    /// Ids of the order's images packed in this shipment
    #[serde(default)]
    pub photo_ids: Vec<String>,
}

impl Shipment {
    pub fn status(&self) -> ShipmentStatus {
        if self.shipped_on.is_some() {
            ShipmentStatus::Shipped
        } else {
            ShipmentStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Cost of shipping the whole order, in minor units
    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub shipments: Vec<Shipment>,
}

// ============================================================================
// Order
// ============================================================================

/// An order as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,

    pub status: OrderStatus,

    pub recipient_name: String,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address_town_or_city: Option<String>,
    /// State (US), county (UK) or region
    #[serde(default)]
    pub state_or_county: Option<String>,
    #[serde(default)]
    pub postal_or_zip_code: Option<String>,
    /// Two-letter country code
    pub country_code: String,
    #[serde(default)]
    pub mobile_telephone: Option<String>,

    /// What the merchant is charged, in minor units
    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub shipping_info: ShippingInfo,

    /// `None` when the service did not report it
    #[serde(default)]
    pub payment: Option<PaymentType>,

    /// Only set when `payment` is `InvoiceRecipient`
    #[serde(default)]
    pub payment_url: Option<String>,

    #[serde(default)]
    pub images: Vec<Image>,

    /// Merchant's own reference
    #[serde(default)]
    pub merchant_order_id: Option<String>,

    pub preferred_shipping_method: ShippingMethod,

    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,

    // Only required for some destinations (e.g. the Middle East)
    #[serde(default)]
    pub invoice_amount_net: Option<i64>,
    #[serde(default)]
    pub invoice_tax: Option<i64>,
    #[serde(default)]
    pub invoice_currency: Option<String>,

    // Computed by the service from fulfilment partner and order state.
    #[serde(default)]
    pub can_cancel: bool,
    #[serde(default)]
    pub can_hold: bool,
    #[serde(default)]
    pub can_update_shipping: bool,
    #[serde(default)]
    pub can_update_images: bool,
}

impl Order {
    /// Editable fields of this order, ready to be changed and sent to
    /// `update`. Fields the service owns are left out.
    ///
    /// Fails if the shipping method is one this client cannot name; an
    /// unrecognized payment type is left out so the service keeps its own.
    pub fn to_parameters(&self) -> PwintyResult<OrderParameters> {
        if self.preferred_shipping_method == ShippingMethod::Unrecognized {
            return Err(PwintyError::Unrepresentable("preferredShippingMethod"));
        }

        Ok(OrderParameters {
            merchant_order_id: self.merchant_order_id.clone(),
            recipient_name: self.recipient_name.clone(),
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            address_town_or_city: self.address_town_or_city.clone(),
            state_or_county: self.state_or_county.clone(),
            postal_or_zip_code: self.postal_or_zip_code.clone(),
            country_code: self.country_code.clone(),
            mobile_telephone: self.mobile_telephone.clone(),
            telephone: None,
            email: None,
            preferred_shipping_method: self.preferred_shipping_method,
            payment: self.payment.filter(|payment| *payment != PaymentType::Unrecognized),
            packing_slip_url: None,
            invoice_amount_net: self.invoice_amount_net,
            invoice_tax: self.invoice_tax,
            invoice_currency: self.invoice_currency.clone(),
        })
    }

    /// Image ids not yet allocated to any shipment
    pub fn unshipped_image_ids(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| image.id.to_string())
            .filter(|id| {
                !self
                    .shipping_info
                    .shipments
                    .iter()
                    .any(|shipment| shipment.photo_ids.contains(id))
            })
            .collect()
    }
}

/// Body for creating or fully replacing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParameters {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merchant_order_id: Option<String>,
    pub recipient_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address_town_or_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state_or_county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub postal_or_zip_code: Option<String>,
    pub country_code: String,
    /// For shipping updates and courier contact
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mobile_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    pub preferred_shipping_method: ShippingMethod,
    /// Service default is `InvoiceMe`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payment: Option<PaymentType>,
    /// PNG packing slip, A4 recommended. Not every facility supports it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub packing_slip_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invoice_amount_net: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invoice_tax: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invoice_currency: Option<String>,
}

impl OrderParameters {
    pub fn new(
        recipient_name: impl Into<String>,
        country_code: impl Into<String>,
        preferred_shipping_method: ShippingMethod,
    ) -> Self {
        OrderParameters {
            merchant_order_id: None,
            recipient_name: recipient_name.into(),
            address1: None,
            address2: None,
            address_town_or_city: None,
            state_or_county: None,
            postal_or_zip_code: None,
            country_code: country_code.into(),
            mobile_telephone: None,
            telephone: None,
            email: None,
            preferred_shipping_method,
            payment: None,
            packing_slip_url: None,
            invoice_amount_net: None,
            invoice_tax: None,
            invoice_currency: None,
        }
    }
}

/// One page of `orders().list()`. The client never fetches further pages on
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    #[serde(rename = "has_more", alias = "hasMore", default)]
    pub has_more: bool,
    #[serde(default)]
    pub data: Vec<Order>,
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageError {
    FileCouldNotBeDownloaded,
    NoImageFile,
    InvalidImageFile,
    ZeroCopies,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageWarning {
    CroppingWillOccur,
    PictureSizeTooSmall,
    CouldNotValidateImageSize,
    CouldNotValidateAspectRatio,
    AttributeNotValid,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneralError {
    AccountBalanceInsufficient,
    ItemsContainingErrors,
    NoItemsInOrder,
    PostalAddressNotSet,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageValidation {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    #[serde(default)]
    pub errors: Vec<ImageError>,
    #[serde(default)]
    pub warnings: Vec<ImageWarning>,
}

/// Point-in-time submission check for an order. Not part of the order itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderValidation {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    /// Submission will succeed if this is true
    pub is_valid: bool,
    #[serde(default)]
    pub photos: Vec<ImageValidation>,
    #[serde(default)]
    pub general_errors: Vec<GeneralError>,
}

impl OrderValidation {
    pub fn image(&self, image_id: &str) -> Option<&ImageValidation> {
        self.photos.iter().find(|photo| photo.id == image_id)
    }

    /// Images that carry at least one error
    pub fn failing_images(&self) -> impl Iterator<Item = &ImageValidation> {
        self.photos.iter().filter(|photo| !photo.errors.is_empty())
    }
}
