//! Subscription store
//!
//! Process-wide entitlement snapshot, passed explicitly to whoever needs it.
//! Many readers, one writer path: `refresh`, `purchase`, `restore`, `logout`.
//! Writers are not coordinated with each other; the last one to finish wins.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::access::{self, AccessDecision};
use crate::billing::{BillingProvider, BillingResult};
use crate::features::Feature;
use crate::model::{ActiveEntitlements, CustomerInfo, Package};
use crate::resolver::{EntitlementResolver, Resolution};
use crate::tier::Tier;

/// Immutable view of the user's subscription state
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionSnapshot {
    /// Current tier
    pub tier: Tier,
    /// How the tier was decided
    pub resolution: Resolution,
    /// Active, unexpired entitlements
    pub entitlements: ActiveEntitlements,
    /// When the snapshot was built (`None` for the initial empty state)
    pub updated_at: Option<DateTime<Utc>>,
}

impl SubscriptionSnapshot {
    /// Build from a provider snapshot
    pub fn from_customer_info(
        info: &CustomerInfo,
        resolver: &EntitlementResolver,
        now: DateTime<Utc>,
    ) -> Self {
        let entitlements = info.active_at(now);
        let resolution = resolver.resolve(&entitlements);
        Self {
            tier: resolution.tier,
            resolution,
            entitlements,
            updated_at: Some(now),
        }
    }

    /// Empty snapshot stamped at `now`
    pub fn empty_at(now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            ..Self::default()
        }
    }
}

/// Subscription state store
pub struct SubscriptionStore {
    provider: Arc<dyn BillingProvider>,
    resolver: EntitlementResolver,
    snapshot: ArcSwap<SubscriptionSnapshot>,
    version: AtomicU64,
}

impl SubscriptionStore {
    /// Create store in the None state
    pub fn new(provider: Arc<dyn BillingProvider>, resolver: EntitlementResolver) -> Self {
        Self {
            provider,
            resolver,
            snapshot: ArcSwap::from_pointee(SubscriptionSnapshot::default()),
            version: AtomicU64::new(0),
        }
    }

    /// Current snapshot
    #[inline]
    pub fn snapshot(&self) -> Arc<SubscriptionSnapshot> {
        self.snapshot.load_full()
    }

    /// Current tier
    #[inline]
    pub fn tier(&self) -> Tier {
        self.snapshot.load().tier
    }

    /// Number of writes applied so far
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Gate a feature against the current tier
    pub fn gate(&self, feature: Feature) -> AccessDecision {
        access::gate(feature, self.tier())
    }

    /// Whether a feature is available right now
    pub fn can_access(&self, feature: Feature) -> bool {
        self.gate(feature).is_granted()
    }

    /// Re-fetch entitlements. Fetch failures degrade to the None tier.
    pub async fn refresh(&self) -> Arc<SubscriptionSnapshot> {
        match self.provider.get_customer_info().await {
            Ok(info) => self.apply(&info),
            Err(err) => {
                tracing::warn!(error = %err, "entitlement refresh failed, treating as no subscription");
                self.store(SubscriptionSnapshot::empty_at(Utc::now()))
            }
        }
    }

    /// Buy a package. Failures, including cancellation, are returned and not retried.
    pub async fn purchase(&self, package: &Package) -> BillingResult<Arc<SubscriptionSnapshot>> {
        let info = self.provider.purchase_package(package).await.map_err(|err| {
            tracing::info!(package = %package.identifier, error = %err, "purchase failed");
            err
        })?;
        Ok(self.apply(&info))
    }

    /// Restore purchases. Failures are returned and not retried.
    pub async fn restore(&self) -> BillingResult<Arc<SubscriptionSnapshot>> {
        let info = self.provider.restore_purchases().await.map_err(|err| {
            tracing::info!(error = %err, "restore failed");
            err
        })?;
        Ok(self.apply(&info))
    }

    /// Log out and drop to the None tier. Provider errors are logged only.
    pub async fn logout(&self) -> Arc<SubscriptionSnapshot> {
        if let Err(err) = self.provider.log_out().await {
            tracing::warn!(error = %err, "billing logout failed");
        }
        self.store(SubscriptionSnapshot::empty_at(Utc::now()))
    }

    fn apply(&self, info: &CustomerInfo) -> Arc<SubscriptionSnapshot> {
        let snapshot = SubscriptionSnapshot::from_customer_info(info, &self.resolver, Utc::now());
        self.store(snapshot)
    }

    fn store(&self, snapshot: SubscriptionSnapshot) -> Arc<SubscriptionSnapshot> {
        let previous = self.tier();
        let snapshot = Arc::new(snapshot);
        self.snapshot.store(snapshot.clone());
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;

        if previous != snapshot.tier {
            tracing::info!(from = %previous, to = %snapshot.tier, version, "subscription tier changed");
        }
        snapshot
    }
}
