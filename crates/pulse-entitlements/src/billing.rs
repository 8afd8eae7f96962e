//! Billing provider seam
//!
//! The subscription SDK is treated as an opaque snapshot source.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;

use crate::model::{CustomerInfo, Entitlement, Package};

/// Billing operation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// User dismissed the store sheet
    #[error("purchase cancelled")]
    Cancelled,

    /// Transport failure talking to the provider
    #[error("network error: {0}")]
    Network(String),

    /// Provider rejected the request
    #[error("billing provider error: {0}")]
    Provider(String),

    /// SDK not configured (missing API key, no user)
    #[error("billing not configured")]
    NotConfigured,
}

impl BillingError {
    /// Whether the user cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BillingError::Cancelled)
    }

    /// Message for the invoking screen
    pub fn user_message(&self) -> String {
        match self {
            BillingError::Cancelled => "Purchase was cancelled.".into(),
            BillingError::Network(_) => {
                "Could not reach the store. Check your connection and try again.".into()
            }
            BillingError::Provider(msg) => format!("The store could not complete the request: {msg}"),
            BillingError::NotConfigured => "Subscriptions are not available right now.".into(),
        }
    }
}

/// Billing result type
pub type BillingResult<T> = Result<T, BillingError>;

/// Subscription billing provider
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Current customer-info snapshot
    async fn get_customer_info(&self) -> BillingResult<CustomerInfo>;

    /// Purchase a package; returns the refreshed snapshot
    async fn purchase_package(&self, package: &Package) -> BillingResult<CustomerInfo>;

    /// Restore previous purchases; returns the refreshed snapshot
    async fn restore_purchases(&self) -> BillingResult<CustomerInfo>;

    /// Drop the provider's user session
    async fn log_out(&self) -> BillingResult<()>;
}

/// Scripted in-memory provider for development and testing
#[derive(Default)]
pub struct InMemoryBillingProvider {
    customer: RwLock<CustomerInfo>,
    /// Entitlements granted by purchasable packages, keyed by package id
    grants: RwLock<Vec<(String, Entitlement)>>,
    /// Entitlements the store will "restore"
    restorable: RwLock<Vec<Entitlement>>,
    /// Errors returned by the next calls, in order
    failures: Mutex<VecDeque<BillingError>>,
    purchases: Mutex<Vec<String>>,
}

impl InMemoryBillingProvider {
    /// Create provider with no entitlements
    pub fn new() -> Self {
        Self::default()
    }

    /// Create provider with a starting snapshot
    pub fn with_customer(info: CustomerInfo) -> Self {
        let provider = Self::new();
        *provider.customer.write() = info;
        provider
    }

    /// Make `package_id` grant `entitlement` when purchased
    pub fn offer(&self, package_id: &str, entitlement: Entitlement) {
        self.grants.write().push((package_id.to_string(), entitlement));
    }

    /// Entitlement returned by the next restore
    pub fn add_restorable(&self, entitlement: Entitlement) {
        self.restorable.write().push(entitlement);
    }

    /// Replace the snapshot
    pub fn set_customer(&self, info: CustomerInfo) {
        *self.customer.write() = info;
    }

    /// Fail the next call with `err`
    pub fn fail_next(&self, err: BillingError) {
        self.failures.lock().push_back(err);
    }

    /// Package ids purchased so far
    pub fn purchases(&self) -> Vec<String> {
        self.purchases.lock().clone()
    }

    fn take_failure(&self) -> BillingResult<()> {
        match self.failures.lock().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn grant(&self, entitlement: Entitlement) {
        self.customer
            .write()
            .entitlements
            .active
            .insert(entitlement.identifier.clone(), entitlement);
    }
}

#[async_trait]
impl BillingProvider for InMemoryBillingProvider {
    async fn get_customer_info(&self) -> BillingResult<CustomerInfo> {
        self.take_failure()?;
        Ok(self.customer.read().clone())
    }

    async fn purchase_package(&self, package: &Package) -> BillingResult<CustomerInfo> {
        self.take_failure()?;
        let entitlement = self
            .grants
            .read()
            .iter()
            .find(|(id, _)| *id == package.identifier)
            .map(|(_, e)| e.clone())
            .ok_or_else(|| BillingError::Provider(format!("unknown package {}", package.identifier)))?;

        self.grant(entitlement);
        self.purchases.lock().push(package.identifier.clone());
        Ok(self.customer.read().clone())
    }

    async fn restore_purchases(&self) -> BillingResult<CustomerInfo> {
        self.take_failure()?;
        let restored: Vec<Entitlement> = self.restorable.write().drain(..).collect();
        for entitlement in restored {
            self.grant(entitlement);
        }
        Ok(self.customer.read().clone())
    }

    async fn log_out(&self) -> BillingResult<()> {
        self.take_failure()?;
        *self.customer.write() = CustomerInfo::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_purchase_grants_entitlement() {
        let provider = InMemoryBillingProvider::new();
        provider.offer("gold_monthly", Entitlement::new("gold_access", "pulse_gold_monthly"));

        let info = provider
            .purchase_package(&Package::new("gold_monthly", "pulse_gold_monthly", "$4.99"))
            .await
            .unwrap();

        assert!(info.entitlements.active.contains_key("gold_access"));
        assert_eq!(provider.purchases(), vec!["gold_monthly".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_package() {
        let provider = InMemoryBillingProvider::new();
        let err = provider
            .purchase_package(&Package::new("nope", "nope", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::Provider(_)));
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed() {
        let provider = InMemoryBillingProvider::new();
        provider.fail_next(BillingError::Network("offline".into()));

        assert!(provider.get_customer_info().await.is_err());
        assert!(provider.get_customer_info().await.is_ok());
    }

    #[test]
    fn test_user_message() {
        assert!(BillingError::Cancelled.is_cancelled());
        assert_eq!(BillingError::Cancelled.user_message(), "Purchase was cancelled.");
        assert!(BillingError::Provider("declined".into())
            .user_message()
            .contains("declined"));
    }
}
