use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of filter values with a distinguished "no filter" member.
///
/// `value` is the canonical string written to query strings, `member_name`
/// the SCREAMING_CASE identifier accepted as a decode fallback.
pub trait FilterEnum: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Every member, in declaration order
    const MEMBERS: &'static [Self];

    fn value(self) -> &'static str;

    fn member_name(self) -> &'static str;

    /// The no-op member (`ALL` / `RELEVANCE`)
    fn sentinel() -> Self {
        Self::default()
    }

    fn is_sentinel(self) -> bool {
        self == Self::sentinel()
    }
}

macro_rules! filter_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (sentinel = $sentinel:ident) {
            $($variant:ident => ($member:tt, $value:tt)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$sentinel
            }
        }

        impl FilterEnum for $name {
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            fn member_name(self) -> &'static str {
                match self {
                    $($name::$variant => $member),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

filter_enum! {
    /// Wedding destinations covered by the marketplace
    pub enum City (sentinel = All) {
        All => ("ALL", "all"),
        Tunis => ("TUNIS", "Tunis"),
        SidiBouSaid => ("SIDI_BOU_SAID", "Sidi Bou Said"),
        LaMarsa => ("LA_MARSA", "La Marsa"),
        Gammarth => ("GAMMARTH", "Gammarth"),
        Carthage => ("CARTHAGE", "Carthage"),
        Hammamet => ("HAMMAMET", "Hammamet"),
        Nabeul => ("NABEUL", "Nabeul"),
        Sousse => ("SOUSSE", "Sousse"),
        Monastir => ("MONASTIR", "Monastir"),
        Mahdia => ("MAHDIA", "Mahdia"),
        Djerba => ("DJERBA", "Djerba"),
        Tabarka => ("TABARKA", "Tabarka"),
    }
}

filter_enum! {
    pub enum VenueType (sentinel = All) {
        All => ("ALL", "all"),
        Villa => ("VILLA", "villa"),
        Palace => ("PALACE", "palace"),
        Hotel => ("HOTEL", "hotel"),
        Resort => ("RESORT", "resort"),
        Restaurant => ("RESTAURANT", "restaurant"),
        Garden => ("GARDEN", "garden"),
        BeachClub => ("BEACH_CLUB", "beach-club"),
        TraditionalHouse => ("TRADITIONAL_HOUSE", "traditional-house"),
    }
}

filter_enum! {
    /// Price buckets, in dinars
    pub enum PriceRange (sentinel = All) {
        All => ("ALL", "all"),
        Budget => ("BUDGET", "budget"),
        Medium => ("MEDIUM", "medium"),
        Premium => ("PREMIUM", "premium"),
        Luxury => ("LUXURY", "luxury"),
        UltraLuxury => ("ULTRA_LUXURY", "ultra-luxury"),
    }
}

filter_enum! {
    /// Guest-count buckets
    pub enum CapacityRange (sentinel = All) {
        All => ("ALL", "all"),
        Intimate => ("INTIMATE", "intimate"),
        Small => ("SMALL", "small"),
        Medium => ("MEDIUM", "medium"),
        Large => ("LARGE", "large"),
        ExtraLarge => ("EXTRA_LARGE", "extra-large"),
    }
}

filter_enum! {
    pub enum SortBy (sentinel = Relevance) {
        Relevance => ("RELEVANCE", "relevance"),
        PriceAsc => ("PRICE_ASC", "price-asc"),
        PriceDesc => ("PRICE_DESC", "price-desc"),
        Rating => ("RATING", "rating"),
        Capacity => ("CAPACITY", "capacity"),
        Newest => ("NEWEST", "newest"),
    }
}

impl CapacityRange {
    /// Smallest guest count that falls into this bucket
    pub fn min_guests(self) -> u32 {
        match self {
            CapacityRange::All | CapacityRange::Intimate => 0,
            CapacityRange::Small => 51,
            CapacityRange::Medium => 101,
            CapacityRange::Large => 201,
            CapacityRange::ExtraLarge => 501,
        }
    }
}

/// The full search state: free text plus one member of every enumeration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub query: String,
    pub city: City,
    pub venue_type: VenueType,
    pub price_range: PriceRange,
    pub capacity: CapacityRange,
    /// Event date as typed by the user, passed through untouched
    pub date: String,
    /// Detection order, duplicates allowed
    pub features: Vec<String>,
    pub sort_by: SortBy,
}

/// `SearchFilters` with every field optional, used for incremental updates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSearchFilters {
    pub query: Option<String>,
    pub city: Option<City>,
    pub venue_type: Option<VenueType>,
    pub price_range: Option<PriceRange>,
    pub capacity: Option<CapacityRange>,
    pub date: Option<String>,
    pub features: Option<Vec<String>>,
    pub sort_by: Option<SortBy>,
}

impl SearchFilters {
    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    pub fn with_city(self, city: City) -> Self {
        Self { city, ..self }
    }

    pub fn with_venue_type(self, venue_type: VenueType) -> Self {
        Self { venue_type, ..self }
    }

    pub fn with_price_range(self, price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..self
        }
    }

    pub fn with_capacity(self, capacity: CapacityRange) -> Self {
        Self { capacity, ..self }
    }

    pub fn with_date(self, date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..self
        }
    }

    pub fn with_features(self, features: Vec<String>) -> Self {
        Self { features, ..self }
    }

    pub fn with_sort_by(self, sort_by: SortBy) -> Self {
        Self { sort_by, ..self }
    }

    /// Produce a new value with every field present in `patch` replaced
    pub fn merge(&self, patch: PartialSearchFilters) -> SearchFilters {
        SearchFilters {
            query: patch.query.unwrap_or_else(|| self.query.clone()),
            city: patch.city.unwrap_or(self.city),
            venue_type: patch.venue_type.unwrap_or(self.venue_type),
            price_range: patch.price_range.unwrap_or(self.price_range),
            capacity: patch.capacity.unwrap_or(self.capacity),
            date: patch.date.unwrap_or_else(|| self.date.clone()),
            features: patch.features.unwrap_or_else(|| self.features.clone()),
            sort_by: patch.sort_by.unwrap_or(self.sort_by),
        }
    }

    /// Number of fields that would appear in the serialized form
    pub fn active_count(&self) -> usize {
        [
            !self.query.is_empty(),
            !self.city.is_sentinel(),
            !self.venue_type.is_sentinel(),
            !self.price_range.is_sentinel(),
            !self.capacity.is_sentinel(),
            !self.date.is_empty(),
            !self.features.is_empty(),
            !self.sort_by.is_sentinel(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

impl From<SearchFilters> for PartialSearchFilters {
    fn from(filters: SearchFilters) -> Self {
        Self {
            query: Some(filters.query),
            city: Some(filters.city),
            venue_type: Some(filters.venue_type),
            price_range: Some(filters.price_range),
            capacity: Some(filters.capacity),
            date: Some(filters.date),
            features: Some(filters.features),
            sort_by: Some(filters.sort_by),
        }
    }
}
