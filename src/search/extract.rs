//! Keyword-driven extraction of filter fragments from free text.
//!
//! Every table is scanned in declaration order against the lower-cased input
//! using substring containment; the input is padded with one space on each
//! side so a keyword like `" dar "` matches a whole word anywhere, including
//! at either end of the text. For single-valued extractors the first
//! declared keyword found in the text wins, so table order is significant.

use super::types::{CapacityRange, City, PriceRange, SearchFilters, VenueType};
use once_cell::sync::Lazy;
use regex::Regex;

const CITY_KEYWORDS: &[(&str, City)] = &[
    ("sidi bou said", City::SidiBouSaid),
    ("sidi bou", City::SidiBouSaid),
    ("la marsa", City::LaMarsa),
    ("marsa", City::LaMarsa),
    ("gammarth", City::Gammarth),
    ("carthage", City::Carthage),
    ("cartagine", City::Carthage),
    ("hammamet", City::Hammamet),
    ("nabeul", City::Nabeul),
    ("sousse", City::Sousse),
    ("monastir", City::Monastir),
    ("mahdia", City::Mahdia),
    ("djerba", City::Djerba),
    ("jerba", City::Djerba),
    ("tabarka", City::Tabarka),
    ("tunisi", City::Tunis),
    ("tunis", City::Tunis),
];

const VENUE_KEYWORDS: &[(&str, VenueType)] = &[
    ("villa", VenueType::Villa),
    ("palazzo", VenueType::Palace),
    ("palace", VenueType::Palace),
    ("palais", VenueType::Palace),
    ("hotel", VenueType::Hotel),
    ("albergo", VenueType::Hotel),
    ("resort", VenueType::Resort),
    ("ristorante", VenueType::Restaurant),
    ("restaurant", VenueType::Restaurant),
    ("beach club", VenueType::BeachClub),
    ("spiaggia", VenueType::BeachClub),
    ("beach", VenueType::BeachClub),
    ("giardino", VenueType::Garden),
    ("garden", VenueType::Garden),
    (" dar ", VenueType::TraditionalHouse),
    ("tradizional", VenueType::TraditionalHouse),
    ("traditional", VenueType::TraditionalHouse),
];

// "ultra lusso" must precede "lusso"
const PRICE_KEYWORDS: &[(&str, PriceRange)] = &[
    ("ultra lusso", PriceRange::UltraLuxury),
    ("ultra luxury", PriceRange::UltraLuxury),
    ("economic", PriceRange::Budget),
    ("budget", PriceRange::Budget),
    ("low cost", PriceRange::Budget),
    ("prezzo medio", PriceRange::Medium),
    ("moderat", PriceRange::Medium),
    ("premium", PriceRange::Premium),
    ("lussuos", PriceRange::Luxury),
    ("lusso", PriceRange::Luxury),
    ("luxury", PriceRange::Luxury),
];

const FEATURE_KEYWORDS: &[(&str, &str)] = &[
    ("piscina", "Piscina privata"),
    ("pool", "Piscina privata"),
    ("vista mare", "Vista mare panoramica"),
    ("sea view", "Vista mare panoramica"),
    ("spiaggia privata", "Spiaggia privata"),
    ("giardino", "Giardino"),
    ("terrazza", "Terrazza"),
    ("parcheggio", "Parcheggio"),
    ("parking", "Parcheggio"),
    ("catering", "Catering interno"),
    ("musica", "Musica dal vivo"),
    ("aria condizionata", "Aria condizionata"),
    ("accessibil", "Accesso disabili"),
    ("suite", "Suite sposi"),
    ("fuochi", "Fuochi d'artificio"),
];

const GUEST_WORDS: &[&str] = &["invitati", "ospiti", "persone", "guests", "people", "persons"];

static GUEST_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d[\d.,]*)\s*(?:invitati|ospiti|persone|guests|people|persons)").unwrap()
});

static PRICE_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:€\s*(\d[\d.,]*))|(?:(\d[\d.,]*)\s*(?:€|euro|eur\b|dt\b|tnd\b|dinar))").unwrap()
});

// A bare number shortly after a spending word, e.g. "budget è di 8000"
static BUDGET_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:budget|massimo|fino a|non più di|spendere)\D{0,12}?(\d[\d.,]*)\s*(\p{L}*)").unwrap()
});

fn first_match<T: Copy + Default>(text: &str, table: &[(&str, T)]) -> T {
    let haystack = format!(" {} ", text.to_lowercase());
    table
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, value)| *value)
        .unwrap_or_default()
}

pub fn extract_city(text: &str) -> City {
    first_match(text, CITY_KEYWORDS)
}

pub fn extract_venue_type(text: &str) -> VenueType {
    first_match(text, VENUE_KEYWORDS)
}

pub fn extract_price_range_from_text(text: &str) -> PriceRange {
    first_match(text, PRICE_KEYWORDS)
}

pub fn extract_capacity_from_number(guests: i64) -> CapacityRange {
    match guests {
        n if n <= 50 => CapacityRange::Intimate,
        n if n <= 100 => CapacityRange::Small,
        n if n <= 200 => CapacityRange::Medium,
        n if n <= 500 => CapacityRange::Large,
        _ => CapacityRange::ExtraLarge,
    }
}

pub fn extract_price_range_from_number(amount: i64) -> PriceRange {
    match amount {
        n if n <= 2_000 => PriceRange::Budget,
        n if n <= 5_000 => PriceRange::Medium,
        n if n <= 7_000 => PriceRange::Premium,
        n if n <= 10_000 => PriceRange::Luxury,
        _ => PriceRange::UltraLuxury,
    }
}

/// Every feature label whose keyword appears in `text`, in table order.
///
/// Labels reachable from several keywords can appear more than once.
pub fn extract_features(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    FEATURE_KEYWORDS
        .iter()
        .filter(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Like [`extract_features`], keeping only the first occurrence of each label
pub fn extract_features_unique(text: &str) -> Vec<String> {
    let mut features = extract_features(text);
    let mut seen = Vec::with_capacity(features.len());
    features.retain(|label| {
        if seen.contains(label) {
            false
        } else {
            seen.push(label.clone());
            true
        }
    });
    features
}

/// Guest count mentioned in the text, e.g. "150 invitati"
pub fn extract_guest_count(text: &str) -> Option<i64> {
    let haystack = text.to_lowercase();
    GUEST_COUNT
        .captures(&haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_amount(m.as_str()))
}

/// Budget amount mentioned in the text, e.g. "5.000 euro", "€ 3000" or
/// "budget di 8000". Amounts with a currency marker take precedence.
pub fn extract_price_amount(text: &str) -> Option<i64> {
    let haystack = text.to_lowercase();
    PRICE_AMOUNT
        .captures(&haystack)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .and_then(|m| parse_amount(m.as_str()))
        .or_else(|| {
            BUDGET_AMOUNT
                .captures_iter(&haystack)
                .filter(|caps| {
                    let next_word = caps.get(2).map_or("", |m| m.as_str());
                    !GUEST_WORDS.contains(&next_word)
                })
                .find_map(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        })
}

fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

// A trailing group of one or two digits is a decimal part and is dropped;
// every other separator is a thousands separator.
fn parse_amount(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_end_matches(is_separator);
    let integer = match trimmed.rfind(is_separator) {
        Some(pos) if (1..=2).contains(&(trimmed.len() - pos - 1)) => &trimmed[..pos],
        _ => trimmed,
    };
    let digits: String = integer.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub dedupe_features: bool,
}

/// Turn a conversational phrase into a complete filter value
pub fn parse_phrase(text: &str, options: ExtractOptions) -> SearchFilters {
    let price_range = match extract_price_amount(text) {
        Some(amount) => extract_price_range_from_number(amount),
        None => extract_price_range_from_text(text),
    };
    let capacity = extract_guest_count(text)
        .map(extract_capacity_from_number)
        .unwrap_or_default();
    let features = if options.dedupe_features {
        extract_features_unique(text)
    } else {
        extract_features(text)
    };

    SearchFilters::default()
        .with_query(text.trim())
        .with_city(extract_city(text))
        .with_venue_type(extract_venue_type(text))
        .with_price_range(price_range)
        .with_capacity(capacity)
        .with_features(features)
}
