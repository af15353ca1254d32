//! Endpoint registry
//!
//! Static table mapping each operation to its HTTP verb, path template,
//! and query-override rules. Pure data: the operation set is closed and
//! known at build time, with no registration API.

use serde::{Deserialize, Serialize};

// ============================================================================
// HTTP Method
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Read operations carry request data in the query string
    pub fn is_read(self) -> bool {
        self == Method::GET
    }

    /// Whether request data travels as the wire payload
    pub fn sends_body(self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::PATCH)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Query Overrides
// ============================================================================

/// Per-operation query-parameter override rule. Applied last when building
/// a query string, so it wins over the authentication descriptor and the
/// request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOverride {
    /// Delete the parameter entirely, regardless of what earlier layers set
    Omit,
    /// Force the parameter to a fixed value
    Set(&'static str),
}

// ============================================================================
// Operation Descriptor
// ============================================================================

/// Immutable description of one operation: verb, path template, overrides
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    /// HTTP verb
    pub method: Method,
    /// Path template with `{{ placeholder }}` markers
    pub path: &'static str,
    /// Query override rules, applied after auth and request data
    pub overrides: &'static [(&'static str, QueryOverride)],
}

/// Override set for operations that occur outside an authenticated customer
/// session (e.g. mid-checkout before a customer record exists).
const PRE_SESSION: &[(&str, QueryOverride)] = &[("customer_id", QueryOverride::Omit)];

// ============================================================================
// Operations
// ============================================================================

/// The closed set of operations the client can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListSubscriptions,
    GetSubscription,
    CreateSubscription,
    UpdateSubscription,
    CancelSubscription,
    ActivateSubscription,
    BulkUpdateSubscriptions,
    ListOrders,
    GetOrder,
    GetCustomer,
    ListPaymentMethods,
    GetPaymentMethod,
    CreatePaymentMethod,
    ProcessorClientToken,
}

impl Operation {
    /// All registered operations
    pub const ALL: &'static [Operation] = &[
        Operation::ListSubscriptions,
        Operation::GetSubscription,
        Operation::CreateSubscription,
        Operation::UpdateSubscription,
        Operation::CancelSubscription,
        Operation::ActivateSubscription,
        Operation::BulkUpdateSubscriptions,
        Operation::ListOrders,
        Operation::GetOrder,
        Operation::GetCustomer,
        Operation::ListPaymentMethods,
        Operation::GetPaymentMethod,
        Operation::CreatePaymentMethod,
        Operation::ProcessorClientToken,
    ];

    /// The operation's registry entry
    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Operation::ListSubscriptions => &OperationDescriptor {
                method: Method::GET,
                path: "/customers/{{ customer_id }}/subscriptions",
                overrides: &[],
            },
            Operation::GetSubscription => &OperationDescriptor {
                method: Method::GET,
                path: "/subscriptions/{{ subscription_id }}",
                overrides: &[],
            },
            Operation::CreateSubscription => &OperationDescriptor {
                method: Method::POST,
                path: "/subscriptions",
                overrides: &[],
            },
            Operation::UpdateSubscription => &OperationDescriptor {
                method: Method::PUT,
                path: "/subscriptions/{{ subscription_id }}",
                overrides: &[],
            },
            Operation::CancelSubscription => &OperationDescriptor {
                method: Method::POST,
                path: "/subscriptions/{{ subscription_id }}/cancel",
                overrides: &[],
            },
            Operation::ActivateSubscription => &OperationDescriptor {
                method: Method::POST,
                path: "/subscriptions/{{ subscription_id }}/activate",
                overrides: &[],
            },
            Operation::BulkUpdateSubscriptions => &OperationDescriptor {
                method: Method::POST,
                path: "/subscriptions/bulk_update",
                overrides: &[],
            },
            Operation::ListOrders => &OperationDescriptor {
                method: Method::GET,
                path: "/customers/{{ customer_id }}/orders",
                overrides: &[],
            },
            Operation::GetOrder => &OperationDescriptor {
                method: Method::GET,
                path: "/orders/{{ order_id }}",
                overrides: &[],
            },
            Operation::GetCustomer => &OperationDescriptor {
                method: Method::GET,
                path: "/customers/{{ customer_id }}",
                overrides: &[],
            },
            Operation::ListPaymentMethods => &OperationDescriptor {
                method: Method::GET,
                path: "/customers/{{ customer_id }}/payment_methods",
                overrides: &[],
            },
            Operation::GetPaymentMethod => &OperationDescriptor {
                method: Method::GET,
                path: "/payment_methods/{{ payment_method_id }}",
                overrides: &[],
            },
            // Preliminary payment methods are created before a customer
            // record exists, so the customer identifier is suppressed.
            Operation::CreatePaymentMethod => &OperationDescriptor {
                method: Method::POST,
                path: "/payment_methods",
                overrides: PRE_SESSION,
            },
            Operation::ProcessorClientToken => &OperationDescriptor {
                method: Method::POST,
                path: "/payments/client_token",
                overrides: PRE_SESSION,
            },
        }
    }

    /// Stable name for logging
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListSubscriptions => "list_subscriptions",
            Operation::GetSubscription => "get_subscription",
            Operation::CreateSubscription => "create_subscription",
            Operation::UpdateSubscription => "update_subscription",
            Operation::CancelSubscription => "cancel_subscription",
            Operation::ActivateSubscription => "activate_subscription",
            Operation::BulkUpdateSubscriptions => "bulk_update_subscriptions",
            Operation::ListOrders => "list_orders",
            Operation::GetOrder => "get_order",
            Operation::GetCustomer => "get_customer",
            Operation::ListPaymentMethods => "list_payment_methods",
            Operation::GetPaymentMethod => "get_payment_method",
            Operation::CreatePaymentMethod => "create_payment_method",
            Operation::ProcessorClientToken => "processor_client_token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_predicates() {
        assert!(Method::GET.is_read());
        assert!(!Method::POST.is_read());

        assert!(Method::POST.sends_body());
        assert!(Method::PUT.sends_body());
        assert!(!Method::GET.sends_body());
        assert!(!Method::DELETE.sends_body());
    }

    #[test]
    fn test_method_conversion() {
        let put: reqwest::Method = Method::PUT.into();
        assert_eq!(reqwest::Method::PUT, put);
    }

    #[test]
    fn test_registry_is_closed_over_all() {
        // Every operation has a descriptor and a logging name.
        for op in Operation::ALL {
            let descriptor = op.descriptor();
            assert!(descriptor.path.starts_with('/'), "{}", op.name());
            assert!(!op.name().is_empty());
        }
    }

    #[test]
    fn test_pre_session_operations_omit_customer_id() {
        for op in [Operation::ProcessorClientToken, Operation::CreatePaymentMethod] {
            let overrides = op.descriptor().overrides;
            assert!(overrides
                .iter()
                .any(|(key, rule)| *key == "customer_id" && *rule == QueryOverride::Omit));
        }
    }

    #[test]
    fn test_customer_scoped_operations_have_no_overrides() {
        assert!(Operation::ListSubscriptions.descriptor().overrides.is_empty());
        assert!(Operation::BulkUpdateSubscriptions.descriptor().overrides.is_empty());
    }
}
