//! Billing snapshot data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tier::Tier;

/// Active entitlements keyed by entitlement id.
///
/// Ordered map so "first available entitlement" is deterministic.
pub type ActiveEntitlements = BTreeMap<String, Entitlement>;

/// One active grant from the billing provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    /// Entitlement id (may be omitted on the wire; the map key is authoritative)
    #[serde(default)]
    pub identifier: String,
    /// Store product that granted it
    pub product_identifier: String,
    /// Expiry, `None` for lifetime grants
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Auto-renew flag
    #[serde(default)]
    pub will_renew: bool,
}

impl Entitlement {
    /// Create a lifetime, non-renewing entitlement
    pub fn new(identifier: &str, product_identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            product_identifier: product_identifier.to_string(),
            expiration_date: None,
            will_renew: false,
        }
    }

    /// Set expiry
    pub fn expiring(mut self, at: DateTime<Utc>) -> Self {
        self.expiration_date = Some(at);
        self
    }

    /// Set auto-renew
    pub fn renewing(mut self) -> Self {
        self.will_renew = true;
        self
    }

    /// Whether the grant is still valid at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.map_or(true, |exp| exp > now)
    }
}

/// Entitlement section of a customer-info snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementInfos {
    /// Currently active grants
    #[serde(default)]
    pub active: ActiveEntitlements,
}

/// Customer-info snapshot returned by the billing provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Billing user id
    #[serde(default)]
    pub app_user_id: Option<String>,
    /// Entitlements
    #[serde(default)]
    pub entitlements: EntitlementInfos,
}

impl CustomerInfo {
    /// Snapshot with the given active entitlements
    pub fn with_active<I>(entitlements: I) -> Self
    where
        I: IntoIterator<Item = Entitlement>,
    {
        let active = entitlements
            .into_iter()
            .map(|e| (e.identifier.clone(), e))
            .collect();
        Self {
            app_user_id: None,
            entitlements: EntitlementInfos { active },
        }
    }

    /// Active entitlements with ids filled from their keys and expired grants removed
    pub fn active_at(&self, now: DateTime<Utc>) -> ActiveEntitlements {
        self.entitlements
            .active
            .iter()
            .filter(|(_, e)| e.is_active_at(now))
            .map(|(key, e)| {
                let mut e = e.clone();
                if e.identifier.is_empty() {
                    e.identifier = key.clone();
                }
                (key.clone(), e)
            })
            .collect()
    }
}

/// Purchasable package from the billing provider's offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package id (`$rc_monthly`, `platinum_annual`, ...)
    pub identifier: String,
    /// Store product id
    pub product_identifier: String,
    /// Localized price for display
    #[serde(default)]
    pub price_string: String,
}

impl Package {
    /// Create package
    pub fn new(identifier: &str, product_identifier: &str, price_string: &str) -> Self {
        Self {
            identifier: identifier.into(),
            product_identifier: product_identifier.into(),
            price_string: price_string.into(),
        }
    }

    /// Tier this package grants, derived from its product id
    pub fn tier(&self) -> Tier {
        Tier::from_identifier(&self.product_identifier)
            .or_else(|| Tier::from_identifier(&self.identifier))
            .unwrap_or(Tier::None)
    }
}
