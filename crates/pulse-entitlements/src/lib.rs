//! MarketPulse Entitlements
//!
//! Tier resolution and feature gating for premium subscriptions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    ENTITLEMENT GATING                           │
//! │                                                                 │
//! │  ┌──────────────┐  snapshot  ┌─────────────┐  tier  ┌────────┐ │
//! │  │   Billing    │──────────► │ Entitlement │──────► │ Sub.   │ │
//! │  │   Provider   │            │  Resolver   │        │ Store  │ │
//! │  └──────────────┘            └─────────────┘        └───┬────┘ │
//! │                                                          │      │
//! │  ┌──────────────┐  required tier  ┌─────────────────┐   │      │
//! │  │   Feature    │───────────────► │ Access Decision │◄──┘      │
//! │  │   Table      │                 │ Granted/Upsell  │          │
//! │  └──────────────┘                 └─────────────────┘          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod access;
pub mod billing;
pub mod features;
pub mod model;
pub mod resolver;
pub mod store;
pub mod tier;

pub use access::{can_access, gate, upsell_packages, AccessDecision};
pub use billing::{BillingError, BillingProvider, BillingResult, InMemoryBillingProvider};
pub use features::{features_for, required_tier_for, Feature, FEATURE_REQUIREMENTS};
pub use model::{ActiveEntitlements, CustomerInfo, Entitlement, EntitlementInfos, Package};
pub use resolver::{resolve_tier, EntitlementResolver, Resolution, ResolutionSource};
pub use store::{SubscriptionSnapshot, SubscriptionStore};
pub use tier::Tier;

pub use pulse_common::UnknownEntitlementPolicy;
