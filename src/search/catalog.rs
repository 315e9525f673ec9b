use super::extract::extract_price_range_from_number;
use super::types::{FilterEnum, SearchFilters, SortBy};
use crate::models::Location;
use std::cmp::Ordering;
use tracing::debug;

/// Whether `location` satisfies every active filter. `date` is not checked
/// here: availability lives with the booking service.
pub fn matches(location: &Location, filters: &SearchFilters) -> bool {
    let query = filters.query.trim().to_lowercase();
    if !query.is_empty()
        && !location.title.to_lowercase().contains(&query)
        && !location.city.to_lowercase().contains(&query)
    {
        return false;
    }

    if !filters.city.is_sentinel() && !location.city.eq_ignore_ascii_case(filters.city.value()) {
        return false;
    }

    if !filters.venue_type.is_sentinel() {
        let wanted = filters.venue_type.value();
        match &location.venue_type {
            Some(venue_type) if venue_type.eq_ignore_ascii_case(wanted) => {}
            _ => return false,
        }
    }

    if !filters.price_range.is_sentinel()
        && extract_price_range_from_number(location.price) != filters.price_range
    {
        return false;
    }

    if !filters.capacity.is_sentinel() && location.max_guests < filters.capacity.min_guests() {
        return false;
    }

    filters.features.iter().all(|wanted| {
        location
            .features
            .iter()
            .any(|feature| feature.eq_ignore_ascii_case(wanted))
    })
}

/// Filter then order `locations`. Sorting is stable, so `Relevance` keeps
/// the catalog order.
pub fn apply(locations: &[Location], filters: &SearchFilters) -> Vec<Location> {
    let mut results: Vec<Location> = locations
        .iter()
        .filter(|location| matches(location, filters))
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::Relevance => {}
        SortBy::PriceAsc => results.sort_by_key(|l| l.price),
        SortBy::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => results.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)),
        SortBy::Capacity => results.sort_by(|a, b| b.max_guests.cmp(&a.max_guests)),
        // newest first, undated listings last
        SortBy::Newest => results.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }

    debug!(
        "Catalog filter kept {} of {} locations (sort: {})",
        results.len(),
        locations.len(),
        filters.sort_by
    );

    results
}
