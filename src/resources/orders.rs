//! Orders resource
//!
//! Lifecycle requests (`submit`, `cancel`) ask the service for a transition;
//! eligibility is decided remotely and a refusal comes back as
//! [`PwintyError::Api`](crate::error::PwintyError::Api).

use serde::{de::IgnoredAny, Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

use crate::client::dispatcher::{segment, Dispatcher, API_PREFIX};
use crate::domain::{
    Image, ImageParameters, Order, OrderPage, OrderParameters, OrderStatus, OrderValidation,
};
use crate::error::PwintyResult;

/// Page size used when `limit` is not given. The service caps it at 250.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Paging for [`Orders::list`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub start: Option<u32>,
}

impl ListOptions {
    pub fn new(limit: u32, start: u32) -> Self {
        ListOptions {
            limit: Some(limit),
            start: Some(start),
        }
    }
}

#[derive(Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Deserialize)]
struct ItemsEnvelope<T> {
    items: Vec<T>,
}

/// Operations on orders
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Orders { dispatcher }
    }

    fn path(order_id: impl fmt::Display) -> String {
        format!("{}/orders/{}", API_PREFIX, segment(order_id))
    }

    pub async fn get(&self, order_id: impl fmt::Display) -> PwintyResult<Order> {
        self.dispatcher.get(&Self::path(order_id)).await
    }

    /// Fetch one page of orders. Defaults: `limit` 100, `start` 0.
    pub async fn list(&self, options: ListOptions) -> PwintyResult<OrderPage> {
        let limit = options.limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIST_LIMIT);
        let start = options.start.unwrap_or(0);

        self.dispatcher
            .get(&format!("{}/orders?limit={}&start={}", API_PREFIX, limit, start))
            .await
    }

    /// Create an order in `NotYetSubmitted` status
    #[instrument(level = "debug", skip_all, fields(country = %params.country_code))]
    pub async fn create(&self, params: &OrderParameters) -> PwintyResult<Order> {
        let order: Order = self.dispatcher.post(&format!("{}/orders", API_PREFIX), params).await?;
        info!(order_id = order.id, "Order created");
        Ok(order)
    }

    /// Replace the order's editable fields
    pub async fn update(&self, order_id: impl fmt::Display, params: &OrderParameters) -> PwintyResult<Order> {
        self.dispatcher.put(&Self::path(order_id), params).await
    }

    /// Check whether the order would be accepted for submission
    pub async fn validate(&self, order_id: impl fmt::Display) -> PwintyResult<OrderValidation> {
        self.dispatcher
            .get(&format!("{}/SubmissionStatus", Self::path(order_id)))
            .await
    }

    pub async fn submit(&self, order_id: impl fmt::Display) -> PwintyResult<()> {
        self.change_status(order_id, OrderStatus::Submitted).await
    }

    pub async fn cancel(&self, order_id: impl fmt::Display) -> PwintyResult<()> {
        self.change_status(order_id, OrderStatus::Cancelled).await
    }

    async fn change_status(&self, order_id: impl fmt::Display, status: OrderStatus) -> PwintyResult<()> {
        let path = format!("{}/status", Self::path(&order_id));
        let _: IgnoredAny = self.dispatcher.post(&path, &StatusChange { status }).await?;

        info!(order_id = %order_id, status = %status, "Order status change accepted");
        Ok(())
    }

    pub async fn add_image(&self, order_id: impl fmt::Display, image: &ImageParameters) -> PwintyResult<Image> {
        self.dispatcher
            .post(&format!("{}/images", Self::path(order_id)), image)
            .await
    }

    /// Add several images in one request. The returned images are in the
    /// same order as `images`. Per-item problems are reported in the images'
    /// statuses, not as an error.
    pub async fn add_images(&self, order_id: impl fmt::Display, images: &[ImageParameters]) -> PwintyResult<Vec<Image>> {
        let envelope: ItemsEnvelope<Image> = self
            .dispatcher
            .post(&format!("{}/images/batch", Self::path(order_id)), images)
            .await?;

        Ok(envelope.items)
    }
}
