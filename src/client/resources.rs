//! Per-resource convenience methods
//!
//! Thin, operation-specific argument shaping over [`Client::execute`].

use super::Client;
use crate::error::Result;
use crate::registry::Operation;
use crate::store::SyncOutcome;
use crate::template::RequestContext;
use serde_json::{json, Value};

impl Client {
    /// Context carrying the configured customer identifier
    fn customer_context(&self) -> RequestContext {
        RequestContext::new().with("customer_id", self.config.auth.customer_id.clone())
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// List the customer's subscriptions
    pub async fn subscriptions(&self) -> Result<SyncOutcome> {
        self.execute(Operation::ListSubscriptions, None, &self.customer_context())
            .await
    }

    /// Fetch one subscription
    pub async fn subscription(&self, id: impl Into<Value>) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("subscription_id", id);
        self.execute(Operation::GetSubscription, None, &ctx).await
    }

    /// Create a subscription
    pub async fn create_subscription(&self, attributes: Value) -> Result<SyncOutcome> {
        let data = json!({ "subscription": attributes });
        self.execute(Operation::CreateSubscription, Some(data), &RequestContext::new())
            .await
    }

    /// Update a subscription
    pub async fn update_subscription(
        &self,
        id: impl Into<Value>,
        attributes: Value,
    ) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("subscription_id", id);
        let data = json!({ "subscription": attributes });
        self.execute(Operation::UpdateSubscription, Some(data), &ctx)
            .await
    }

    /// Cancel a subscription
    pub async fn cancel_subscription(&self, id: impl Into<Value>) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("subscription_id", id);
        self.execute(Operation::CancelSubscription, None, &ctx).await
    }

    /// Reactivate a cancelled subscription
    pub async fn activate_subscription(&self, id: impl Into<Value>) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("subscription_id", id);
        self.execute(Operation::ActivateSubscription, None, &ctx)
            .await
    }

    /// Apply the same update to many subscriptions at once
    pub async fn bulk_update_subscriptions(
        &self,
        subscription_ids: &[i64],
        subscription: Value,
    ) -> Result<SyncOutcome> {
        let data = json!({
            "bulk_update": {
                "subscription_ids": subscription_ids,
                "subscription": subscription,
            }
        });
        self.execute(
            Operation::BulkUpdateSubscriptions,
            Some(data),
            &RequestContext::new(),
        )
        .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// List the customer's orders
    pub async fn orders(&self) -> Result<SyncOutcome> {
        self.execute(Operation::ListOrders, None, &self.customer_context())
            .await
    }

    /// Fetch one order
    pub async fn order(&self, id: impl Into<Value>) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("order_id", id);
        self.execute(Operation::GetOrder, None, &ctx).await
    }

    // ========================================================================
    // Customer
    // ========================================================================

    /// Fetch the configured customer
    pub async fn customer(&self) -> Result<SyncOutcome> {
        self.execute(Operation::GetCustomer, None, &self.customer_context())
            .await
    }

    // ========================================================================
    // Payment Methods
    // ========================================================================

    /// List the customer's payment methods
    pub async fn payment_methods(&self) -> Result<SyncOutcome> {
        self.execute(Operation::ListPaymentMethods, None, &self.customer_context())
            .await
    }

    /// Fetch one payment method
    pub async fn payment_method(&self, id: impl Into<Value>) -> Result<SyncOutcome> {
        let ctx = RequestContext::new().with("payment_method_id", id);
        self.execute(Operation::GetPaymentMethod, None, &ctx).await
    }

    /// Create a preliminary payment method (pre-session: the customer
    /// identifier is suppressed from the query by the registry)
    pub async fn create_payment_method(&self, attributes: Value) -> Result<SyncOutcome> {
        let data = json!({ "payment_method": attributes });
        self.execute(
            Operation::CreatePaymentMethod,
            Some(data),
            &RequestContext::new(),
        )
        .await
    }

    /// Generate a client token for the given payment processor (pre-session)
    pub async fn processor_client_token(&self, processor: &str) -> Result<SyncOutcome> {
        let data = json!({ "payment_processor": processor });
        self.execute(
            Operation::ProcessorClientToken,
            Some(data),
            &RequestContext::new(),
        )
        .await
    }
}
