use proptest::prelude::*;
use venue_scout::search::{
    deserialize, serialize, CapacityRange, City, FilterEnum, PriceRange, SearchFilters, SortBy,
    VenueType,
};

fn member<E: FilterEnum>() -> impl Strategy<Value = E> {
    proptest::sample::select(E::MEMBERS.to_vec())
}

fn active_member<E: FilterEnum>() -> impl Strategy<Value = E> {
    let active: Vec<E> = E::MEMBERS.iter().copied().filter(|m| !m.is_sentinel()).collect();
    proptest::sample::select(active)
}

fn feature() -> impl Strategy<Value = String> {
    // commas are the list separator and never part of a label
    "[A-Za-z][A-Za-z '&]{0,20}"
}

prop_compose! {
    fn active_filters()(
        query in "[a-zA-Z0-9 àèé]{1,30}",
        city in active_member::<City>(),
        venue_type in active_member::<VenueType>(),
        price_range in active_member::<PriceRange>(),
        capacity in active_member::<CapacityRange>(),
        date in "20[2-3][0-9]-[01][0-9]-[0-3][0-9]",
        features in prop::collection::vec(feature(), 1..5),
        sort_by in active_member::<SortBy>(),
    ) -> SearchFilters {
        SearchFilters {
            query,
            city,
            venue_type,
            price_range,
            capacity,
            date,
            features,
            sort_by,
        }
    }
}

proptest! {
    #[test]
    fn round_trip_on_active_filters(filters in active_filters()) {
        prop_assert_eq!(deserialize(&serialize(&filters)), filters);
    }

    #[test]
    fn serialized_form_never_contains_sentinels(
        city in member::<City>(),
        venue_type in member::<VenueType>(),
        sort_by in member::<SortBy>(),
    ) {
        let filters = SearchFilters::default()
            .with_city(city)
            .with_venue_type(venue_type)
            .with_sort_by(sort_by);
        let encoded = serialize(&filters);

        prop_assert!(!encoded.contains("=all"));
        prop_assert!(!encoded.contains("=relevance"));
        prop_assert_eq!(encoded.split('&').filter(|p| !p.is_empty()).count(), filters.active_count());
    }

    #[test]
    fn deserialize_is_total(input in ".{0,200}") {
        let filters = deserialize(&input);
        // every enum field holds a declared member
        prop_assert!(City::MEMBERS.contains(&filters.city));
        prop_assert!(SortBy::MEMBERS.contains(&filters.sort_by));
        prop_assert!(filters.features.iter().all(|f| !f.is_empty()));
    }

    #[test]
    fn garbage_enum_values_fall_back_to_defaults(raw in "[0-9#@!]{1,12}") {
        let query = format!("city={0}&venueType={0}&priceRange={0}&capacity={0}&sortBy={0}", raw);
        let filters = deserialize(&query);
        prop_assert_eq!(filters, SearchFilters::default());
    }

    #[test]
    fn enum_values_decode_in_any_casing(city in member::<City>(), upper in any::<bool>()) {
        let value = if upper { city.value().to_uppercase() } else { city.value().to_lowercase() };
        let filters = deserialize(&format!("city={}", value.replace(' ', "+")));
        prop_assert_eq!(filters.city, city);
    }
}

#[test]
fn serialize_only_query_example() {
    let filters = SearchFilters::default().with_city(City::All).with_query("villa");
    assert_eq!(serialize(&filters), "query=villa");
}
