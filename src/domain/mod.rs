//! Domain types and models

pub mod catalog;
pub mod image;
pub mod order;
pub mod webhook;
mod wire;

pub use catalog::{find_quote, missing_skus, CatalogItem, Country};
pub use image::{Image, ImageParameters, ImageStatus, ResizingType};
pub use order::{
    Carrier, GeneralError, ImageError, ImageValidation, ImageWarning, Order, OrderPage,
    OrderParameters, OrderStatus, OrderValidation, PaymentType, Shipment, ShipmentStatus,
    ShippingInfo, ShippingMethod,
};
pub use webhook::{ShipmentLedger, WebhookEnvironment, WebhookPayload, WebhookShipment};
pub use wire::parse_timestamp;
