//! Screener filter model
//!
//! Each filter has a fixed option list of human-readable bucket labels. Labels
//! are parsed into typed buckets with explicit `Any` and `Unknown` variants so
//! the compiler matches exhaustively instead of falling through.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::query::Bounds;

/// Label meaning "no constraint"
pub const ANY_LABEL: &str = "Any";

/// Normalize a label for comparison: lowercase, no whitespace, en/em-dashes as `-`
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

macro_rules! buckets {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            /// No constraint
            Any,
            $( $(#[$vmeta])* $variant, )+
            /// Label outside the option list; contributes nothing
            Unknown(String),
        }

        impl $name {
            /// Option list, excluding `Any`
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Parse a display label
            pub fn from_label(label: &str) -> Self {
                let key = normalize_label(label);
                if key.is_empty() || key == "any" {
                    return Self::Any;
                }
                $(
                    if key == normalize_label($label) {
                        return Self::$variant;
                    }
                )+
                Self::Unknown(label.to_string())
            }

            /// Display label
            pub fn label(&self) -> &str {
                match self {
                    Self::Any => ANY_LABEL,
                    $( Self::$variant => $label, )+
                    Self::Unknown(label) => label,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

buckets! {
    /// Market capitalization buckets
    MarketCapBucket {
        Mega => "Mega ($200B+)",
        Large => "Large ($10B-$200B)",
        Mid => "Mid ($2B-$10B)",
        Small => "Small ($300M-$2B)",
        Micro => "Micro ($50M-$300M)",
        Nano => "Nano (Under $50M)",
    }
}

impl MarketCapBucket {
    /// Numeric range
    pub fn bounds(&self) -> Option<Bounds> {
        const B: f64 = 1_000_000_000.0;
        const M: f64 = 1_000_000.0;
        match self {
            Self::Mega => Some(Bounds::at_least(200.0 * B)),
            Self::Large => Some(Bounds::between(10.0 * B, 200.0 * B)),
            Self::Mid => Some(Bounds::between(2.0 * B, 10.0 * B)),
            Self::Small => Some(Bounds::between(300.0 * M, 2.0 * B)),
            Self::Micro => Some(Bounds::between(50.0 * M, 300.0 * M)),
            Self::Nano => Some(Bounds::below(50.0 * M)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Share price buckets
    PriceBucket {
        Under10 => "Under $10",
        From10To50 => "$10 - $50",
        From50To100 => "$50 - $100",
        From100To500 => "$100 - $500",
        Over500 => "Over $500",
    }
}

impl PriceBucket {
    /// Numeric range
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Under10 => Some(Bounds::below(10.0)),
            Self::From10To50 => Some(Bounds::between(10.0, 50.0)),
            Self::From50To100 => Some(Bounds::between(50.0, 100.0)),
            Self::From100To500 => Some(Bounds::between(100.0, 500.0)),
            Self::Over500 => Some(Bounds::at_least(500.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Price/earnings buckets. Every bucket excludes negative (loss-making) P/E;
    /// "Profitable" starts at 0.01 so a zero P/E is not counted.
    PeBucket {
        Profitable => "Profitable (>0)",
        Under10 => "Under 10",
        From10To15 => "10 - 15",
        From15To20 => "15 - 20",
        From20To30 => "20 - 30",
        From30To50 => "30 - 50",
        Over50 => "Over 50",
    }
}

impl PeBucket {
    /// Numeric range
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Profitable => Some(Bounds::at_least(0.01)),
            Self::Under10 => Some(Bounds::between(0.0, 10.0)),
            Self::From10To15 => Some(Bounds::between(10.0, 15.0)),
            Self::From15To20 => Some(Bounds::between(15.0, 20.0)),
            Self::From20To30 => Some(Bounds::between(20.0, 30.0)),
            Self::From30To50 => Some(Bounds::between(30.0, 50.0)),
            Self::Over50 => Some(Bounds::at_least(50.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Dividend yield buckets (percent)
    DividendYieldBucket {
        NoDividend => "None (0%)",
        Positive => "Positive (>0%)",
        Over1 => "Over 1%",
        Over2 => "Over 2%",
        Over3 => "Over 3%",
        Over5 => "Over 5%",
    }
}

impl DividendYieldBucket {
    /// Numeric range. Zero is matched as `< 0.01` to absorb float noise.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::NoDividend => Some(Bounds::below(0.01)),
            Self::Positive => Some(Bounds::at_least(0.01)),
            Self::Over1 => Some(Bounds::at_least(1.0)),
            Self::Over2 => Some(Bounds::at_least(2.0)),
            Self::Over3 => Some(Bounds::at_least(3.0)),
            Self::Over5 => Some(Bounds::at_least(5.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Debt/equity buckets
    DebtToEquityBucket {
        NoDebt => "No Debt",
        Low => "Low (Under 0.5)",
        Moderate => "Moderate (0.5 - 1)",
        High => "High (1 - 2)",
        VeryHigh => "Very High (Over 2)",
    }
}

impl DebtToEquityBucket {
    /// Numeric range. "No Debt" is `< 0.01`, not `== 0`.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::NoDebt => Some(Bounds::below(0.01)),
            Self::Low => Some(Bounds::below(0.5)),
            Self::Moderate => Some(Bounds::between(0.5, 1.0)),
            Self::High => Some(Bounds::between(1.0, 2.0)),
            Self::VeryHigh => Some(Bounds::at_least(2.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Beta buckets
    BetaBucket {
        Low => "Low (Under 0.5)",
        Moderate => "Moderate (0.5 - 1)",
        Market => "Market (1 - 1.5)",
        High => "High (1.5 - 2)",
        VeryHigh => "Very High (Over 2)",
    }
}

impl BetaBucket {
    /// Numeric range
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Low => Some(Bounds::below(0.5)),
            Self::Moderate => Some(Bounds::between(0.5, 1.0)),
            Self::Market => Some(Bounds::between(1.0, 1.5)),
            Self::High => Some(Bounds::between(1.5, 2.0)),
            Self::VeryHigh => Some(Bounds::at_least(2.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Average volume buckets
    VolumeBucket {
        Under100K => "Under 100K",
        From100KTo500K => "100K - 500K",
        From500KTo1M => "500K - 1M",
        From1MTo10M => "1M - 10M",
        Over10M => "Over 10M",
    }
}

impl VolumeBucket {
    /// Numeric range
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Under100K => Some(Bounds::below(100_000.0)),
            Self::From100KTo500K => Some(Bounds::between(100_000.0, 500_000.0)),
            Self::From500KTo1M => Some(Bounds::between(500_000.0, 1_000_000.0)),
            Self::From1MTo10M => Some(Bounds::between(1_000_000.0, 10_000_000.0)),
            Self::Over10M => Some(Bounds::at_least(10_000_000.0)),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Sectors; the label is also the wire value
    Sector {
        Technology => "Technology",
        Healthcare => "Healthcare",
        FinancialServices => "Financial Services",
        ConsumerCyclical => "Consumer Cyclical",
        ConsumerDefensive => "Consumer Defensive",
        CommunicationServices => "Communication Services",
        Industrials => "Industrials",
        Energy => "Energy",
        BasicMaterials => "Basic Materials",
        RealEstate => "Real Estate",
        Utilities => "Utilities",
    }
}

impl Sector {
    /// Wire value
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Any | Self::Unknown(_) => None,
            known => Some(known.label()),
        }
    }
}

buckets! {
    /// Listing exchanges
    Exchange {
        Nasdaq => "NASDAQ",
        Nyse => "NYSE",
        Amex => "AMEX",
    }
}

impl Exchange {
    /// Wire value
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Any | Self::Unknown(_) => None,
            known => Some(known.label()),
        }
    }
}

buckets! {
    /// Countries of listing
    Country {
        UnitedStates => "United States",
        Canada => "Canada",
        UnitedKingdom => "United Kingdom",
        Germany => "Germany",
        Japan => "Japan",
        China => "China",
        India => "India",
    }
}

impl Country {
    /// ISO 3166 alpha-2 wire value
    pub fn value(&self) -> Option<&'static str> {
        match self {
            Self::UnitedStates => Some("US"),
            Self::Canada => Some("CA"),
            Self::UnitedKingdom => Some("GB"),
            Self::Germany => Some("DE"),
            Self::Japan => Some("JP"),
            Self::China => Some("CN"),
            Self::India => Some("IN"),
            Self::Any | Self::Unknown(_) => None,
        }
    }
}

buckets! {
    /// Instrument type
    AssetType {
        Stocks => "Stocks",
        Etfs => "ETFs",
        Funds => "Funds",
    }
}

/// Recognized filter ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterId {
    /// `marketCap`
    MarketCap,
    /// `price`
    Price,
    /// `pe`
    Pe,
    /// `dividendYield`
    DividendYield,
    /// `debtToEquity`
    DebtToEquity,
    /// `beta`
    Beta,
    /// `volume`
    Volume,
    /// `sector`
    Sector,
    /// `exchange`
    Exchange,
    /// `country`
    Country,
    /// `assetType`
    AssetType,
}

impl FilterId {
    /// All ids in screen order
    pub const ALL: [FilterId; 11] = [
        FilterId::MarketCap,
        FilterId::Price,
        FilterId::Pe,
        FilterId::DividendYield,
        FilterId::DebtToEquity,
        FilterId::Beta,
        FilterId::Volume,
        FilterId::Sector,
        FilterId::Exchange,
        FilterId::Country,
        FilterId::AssetType,
    ];

    /// Wire id
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterId::MarketCap => "marketCap",
            FilterId::Price => "price",
            FilterId::Pe => "pe",
            FilterId::DividendYield => "dividendYield",
            FilterId::DebtToEquity => "debtToEquity",
            FilterId::Beta => "beta",
            FilterId::Volume => "volume",
            FilterId::Sector => "sector",
            FilterId::Exchange => "exchange",
            FilterId::Country => "country",
            FilterId::AssetType => "assetType",
        }
    }

    /// Lookup by wire id (case-insensitive)
    pub fn from_id(id: &str) -> Option<FilterId> {
        Self::ALL.into_iter().find(|f| f.as_str().eq_ignore_ascii_case(id.trim()))
    }

    /// Fundamentals filters gated behind a paid tier
    pub const fn is_advanced(self) -> bool {
        matches!(
            self,
            FilterId::Pe | FilterId::DividendYield | FilterId::DebtToEquity | FilterId::Beta
        )
    }

    /// Option list for the filter, excluding `Any`
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            FilterId::MarketCap => MarketCapBucket::LABELS,
            FilterId::Price => PriceBucket::LABELS,
            FilterId::Pe => PeBucket::LABELS,
            FilterId::DividendYield => DividendYieldBucket::LABELS,
            FilterId::DebtToEquity => DebtToEquityBucket::LABELS,
            FilterId::Beta => BetaBucket::LABELS,
            FilterId::Volume => VolumeBucket::LABELS,
            FilterId::Sector => Sector::LABELS,
            FilterId::Exchange => Exchange::LABELS,
            FilterId::Country => Country::LABELS,
            FilterId::AssetType => AssetType::LABELS,
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed filter selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScreenerFilter {
    /// Market cap bucket
    MarketCap(MarketCapBucket),
    /// Price bucket
    Price(PriceBucket),
    /// P/E bucket
    Pe(PeBucket),
    /// Dividend yield bucket
    DividendYield(DividendYieldBucket),
    /// Debt/equity bucket
    DebtToEquity(DebtToEquityBucket),
    /// Beta bucket
    Beta(BetaBucket),
    /// Volume bucket
    Volume(VolumeBucket),
    /// Sector
    Sector(Sector),
    /// Exchange
    Exchange(Exchange),
    /// Country
    Country(Country),
    /// Asset type
    AssetType(AssetType),
    /// Filter id this build does not know; ignored by the compiler
    Unrecognized {
        /// Raw filter id
        id: String,
        /// Raw label
        label: String,
    },
}

impl ScreenerFilter {
    /// Parse a `(filter id, label)` pair
    pub fn parse(id: &str, label: &str) -> Self {
        match FilterId::from_id(id) {
            Some(FilterId::MarketCap) => Self::MarketCap(MarketCapBucket::from_label(label)),
            Some(FilterId::Price) => Self::Price(PriceBucket::from_label(label)),
            Some(FilterId::Pe) => Self::Pe(PeBucket::from_label(label)),
            Some(FilterId::DividendYield) => {
                Self::DividendYield(DividendYieldBucket::from_label(label))
            }
            Some(FilterId::DebtToEquity) => {
                Self::DebtToEquity(DebtToEquityBucket::from_label(label))
            }
            Some(FilterId::Beta) => Self::Beta(BetaBucket::from_label(label)),
            Some(FilterId::Volume) => Self::Volume(VolumeBucket::from_label(label)),
            Some(FilterId::Sector) => Self::Sector(Sector::from_label(label)),
            Some(FilterId::Exchange) => Self::Exchange(Exchange::from_label(label)),
            Some(FilterId::Country) => Self::Country(Country::from_label(label)),
            Some(FilterId::AssetType) => Self::AssetType(AssetType::from_label(label)),
            None => Self::Unrecognized {
                id: id.to_string(),
                label: label.to_string(),
            },
        }
    }

    /// Filter id, `None` when unrecognized
    pub fn id(&self) -> Option<FilterId> {
        match self {
            Self::MarketCap(_) => Some(FilterId::MarketCap),
            Self::Price(_) => Some(FilterId::Price),
            Self::Pe(_) => Some(FilterId::Pe),
            Self::DividendYield(_) => Some(FilterId::DividendYield),
            Self::DebtToEquity(_) => Some(FilterId::DebtToEquity),
            Self::Beta(_) => Some(FilterId::Beta),
            Self::Volume(_) => Some(FilterId::Volume),
            Self::Sector(_) => Some(FilterId::Sector),
            Self::Exchange(_) => Some(FilterId::Exchange),
            Self::Country(_) => Some(FilterId::Country),
            Self::AssetType(_) => Some(FilterId::AssetType),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Label that failed to parse, if any
    pub fn unknown_label(&self) -> Option<&str> {
        match self {
            Self::MarketCap(MarketCapBucket::Unknown(l))
            | Self::Price(PriceBucket::Unknown(l))
            | Self::Pe(PeBucket::Unknown(l))
            | Self::DividendYield(DividendYieldBucket::Unknown(l))
            | Self::DebtToEquity(DebtToEquityBucket::Unknown(l))
            | Self::Beta(BetaBucket::Unknown(l))
            | Self::Volume(VolumeBucket::Unknown(l))
            | Self::Sector(Sector::Unknown(l))
            | Self::Exchange(Exchange::Unknown(l))
            | Self::Country(Country::Unknown(l))
            | Self::AssetType(AssetType::Unknown(l)) => Some(l.as_str()),
            _ => None,
        }
    }
}

/// Human-readable filter selection: filter id -> bucket label.
///
/// This is what gets persisted in presets, never the compiled query, so the
/// bucket-to-range mapping can change without invalidating saved presets.
/// Recognized ids are keyed by their canonical spelling (`PRICE` -> `price`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScreenerFilterSelection(BTreeMap<String, String>);

fn canonical_id(id: &str) -> String {
    FilterId::from_id(id).map_or_else(|| id.to_string(), |f| f.as_str().to_string())
}

impl ScreenerFilterSelection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a label for a filter. `Any` removes the filter.
    pub fn set(&mut self, id: impl Into<String>, label: impl Into<String>) -> &mut Self {
        let id = canonical_id(&id.into());
        let label = label.into();
        if normalize_label(&label) == "any" {
            self.0.remove(&id);
        } else {
            self.0.insert(id, label);
        }
        self
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.set(id, label);
        self
    }

    /// Selected label
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(&canonical_id(id)).map(String::as_str)
    }

    /// Remove a filter
    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.0.remove(&canonical_id(id))
    }

    /// Clear all filters
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of selected filters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No filters selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(id, label)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parsed filters in id order
    pub fn parsed(&self) -> impl Iterator<Item = ScreenerFilter> + '_ {
        self.iter().map(|(id, label)| ScreenerFilter::parse(id, label))
    }

    /// Copy without fundamentals filters
    pub fn without_advanced(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(id, _)| !FilterId::from_id(id).is_some_and(FilterId::is_advanced))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Ids of the selected fundamentals filters
    pub fn advanced_ids(&self) -> Vec<FilterId> {
        self.0
            .keys()
            .filter_map(|id| FilterId::from_id(id))
            .filter(|id| id.is_advanced())
            .collect()
    }
}

impl<'de> Deserialize<'de> for ScreenerFilterSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer).map(|raw| raw.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScreenerFilterSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (id, label) in iter {
            selection.set(id, label);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dashes_and_spacing() {
        assert_eq!(normalize_label("$10 - $50"), "$10-$50");
        assert_eq!(normalize_label("$10\u{2013}$50"), "$10-$50");
        assert_eq!(PriceBucket::from_label("$10–$50"), PriceBucket::From10To50);
        assert_eq!(PeBucket::from_label("10–15"), PeBucket::From10To15);
    }

    #[test]
    fn test_any_and_unknown() {
        assert_eq!(PriceBucket::from_label("Any"), PriceBucket::Any);
        assert_eq!(PriceBucket::from_label(""), PriceBucket::Any);
        assert_eq!(
            PriceBucket::from_label("Under $5"),
            PriceBucket::Unknown("Under $5".into())
        );
        assert!(PriceBucket::Unknown("x".into()).bounds().is_none());
    }

    #[test]
    fn test_every_label_parses_to_known_bucket() {
        for id in FilterId::ALL {
            for label in id.labels() {
                let filter = ScreenerFilter::parse(id.as_str(), label);
                assert_eq!(filter.id(), Some(id));
                assert!(filter.unknown_label().is_none(), "{id}: {label}");
            }
        }
    }

    #[test]
    fn test_label_round_trip() {
        assert_eq!(MarketCapBucket::Mid.label(), "Mid ($2B-$10B)");
        assert_eq!(
            MarketCapBucket::from_label(MarketCapBucket::Mid.label()),
            MarketCapBucket::Mid
        );
        assert_eq!(Country::from_label("united states").value(), Some("US"));
        assert_eq!(Sector::from_label("Real Estate").value(), Some("Real Estate"));
    }

    #[test]
    fn test_unrecognized_filter_id() {
        let filter = ScreenerFilter::parse("esgScore", "High");
        assert_eq!(filter.id(), None);
        assert!(matches!(filter, ScreenerFilter::Unrecognized { .. }));
        assert_eq!(ScreenerFilter::parse("MARKETCAP", "Any").id(), Some(FilterId::MarketCap));
    }

    #[test]
    fn test_selection_any_removes() {
        let mut selection = ScreenerFilterSelection::new();
        selection.set("price", "Under $10");
        assert_eq!(selection.get("price"), Some("Under $10"));
        selection.set("price", "Any");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_without_advanced() {
        let selection: ScreenerFilterSelection = [
            ("price", "Under $10"),
            ("pe", "10 - 15"),
            ("debtToEquity", "No Debt"),
            ("customThing", "x"),
        ]
        .into_iter()
        .collect();

        assert_eq!(selection.advanced_ids(), vec![FilterId::DebtToEquity, FilterId::Pe]);

        let basic = selection.without_advanced();
        assert_eq!(basic.len(), 2);
        assert!(basic.get("pe").is_none());
        assert!(basic.get("customThing").is_some());
    }

    #[test]
    fn test_selection_keys_by_canonical_id() {
        let mut selection = ScreenerFilterSelection::new();
        selection.set("PRICE", "Under $10");
        selection.set("price", "Over $500");
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("Price"), Some("Over $500"));
        assert_eq!(selection.iter().next(), Some(("price", "Over $500")));

        selection.set("DebtToEquity", "No Debt");
        assert_eq!(selection.get("debtToEquity"), Some("No Debt"));
        assert_eq!(selection.remove("DEBTTOEQUITY").as_deref(), Some("No Debt"));

        let legacy: ScreenerFilterSelection =
            serde_json::from_str(r#"{"MARKETCAP":"Mid ($2B-$10B)","customThing":"x"}"#).unwrap();
        assert_eq!(legacy.get("marketCap"), Some("Mid ($2B-$10B)"));
        assert_eq!(legacy.get("customThing"), Some("x"));
    }

    #[test]
    fn test_profitable_pe_excludes_zero() {
        let bounds = PeBucket::Profitable.bounds().unwrap();
        assert!(!bounds.contains(0.0));
        assert!(bounds.contains(0.01));
        assert!(bounds.contains(35.0));
    }

    #[test]
    fn test_selection_serializes_as_plain_map() {
        let selection = ScreenerFilterSelection::new().with("marketCap", "Mid ($2B-$10B)");
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"marketCap":"Mid ($2B-$10B)"}"#);
    }
}
