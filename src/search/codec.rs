//! Query-string form of [`SearchFilters`].
//!
//! Encoding only writes active fields. Decoding is total: anything it cannot
//! make sense of falls back to the field's default.

use super::types::{FilterEnum, PartialSearchFilters, SearchFilters};
use url::form_urlencoded;

pub const FEATURE_SEPARATOR: &str = ",";

/// One way of matching a raw query value against an enum member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ExactValue,
    ValueIgnoreCase,
    MemberNameIgnoreCase,
}

/// Strategies tried by [`resolve_enum`], first hit wins
pub const RESOLUTION_ORDER: [MatchStrategy; 3] = [
    MatchStrategy::ExactValue,
    MatchStrategy::ValueIgnoreCase,
    MatchStrategy::MemberNameIgnoreCase,
];

impl MatchStrategy {
    pub fn try_match<E: FilterEnum>(self, raw: &str) -> Option<E> {
        E::MEMBERS.iter().copied().find(|member| match self {
            MatchStrategy::ExactValue => member.value() == raw,
            MatchStrategy::ValueIgnoreCase => member.value().eq_ignore_ascii_case(raw),
            MatchStrategy::MemberNameIgnoreCase => member.member_name().eq_ignore_ascii_case(raw),
        })
    }
}

/// Resolve a raw value through [`RESOLUTION_ORDER`], defaulting to the sentinel
pub fn resolve_enum<E: FilterEnum>(raw: &str) -> E {
    RESOLUTION_ORDER
        .iter()
        .find_map(|strategy| strategy.try_match::<E>(raw))
        .unwrap_or_else(E::sentinel)
}

/// Encode the active fields of `filters`
pub fn serialize(filters: &SearchFilters) -> String {
    serialize_partial(&PartialSearchFilters::from(filters.clone()))
}

/// Encode a partial filter set; missing, empty and sentinel fields are omitted
pub fn serialize_partial(filters: &PartialSearchFilters) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if let Some(query) = non_empty(&filters.query) {
        out.append_pair("query", query);
    }
    append_enum(&mut out, "city", filters.city);
    append_enum(&mut out, "venueType", filters.venue_type);
    append_enum(&mut out, "priceRange", filters.price_range);
    append_enum(&mut out, "capacity", filters.capacity);
    if let Some(date) = non_empty(&filters.date) {
        out.append_pair("date", date);
    }
    if let Some(features) = filters.features.as_ref().filter(|f| !f.is_empty()) {
        out.append_pair("features", &features.join(FEATURE_SEPARATOR));
    }
    append_enum(&mut out, "sortBy", filters.sort_by);

    out.finish()
}

/// Decode a query string (with or without the leading `?`)
pub fn deserialize(query_string: &str) -> SearchFilters {
    let input = query_string.strip_prefix('?').unwrap_or(query_string);
    let mut filters = SearchFilters::default();

    // Later occurrences of a key overwrite earlier ones.
    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        match key.as_ref() {
            "query" => filters.query = value.into_owned(),
            "city" => filters.city = resolve_enum(&value),
            "venueType" => filters.venue_type = resolve_enum(&value),
            "priceRange" => filters.price_range = resolve_enum(&value),
            "capacity" => filters.capacity = resolve_enum(&value),
            "date" => filters.date = value.into_owned(),
            "features" => {
                filters.features = value
                    .split(FEATURE_SEPARATOR)
                    .filter(|feature| !feature.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "sortBy" => filters.sort_by = resolve_enum(&value),
            _ => {}
        }
    }

    filters
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn append_enum<E: FilterEnum>(
    out: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: Option<E>,
) {
    if let Some(member) = value.filter(|m| !m.is_sentinel()) {
        out.append_pair(key, member.value());
    }
}
