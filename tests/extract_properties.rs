use proptest::prelude::*;
use venue_scout::search::extract::{
    extract_capacity_from_number, extract_price_amount, extract_price_range_from_number,
};
use venue_scout::search::{CapacityRange, PriceRange};

proptest! {
    #[test]
    fn non_positive_numbers_land_in_the_lowest_bucket(n in i64::MIN..=0) {
        prop_assert_eq!(extract_capacity_from_number(n), CapacityRange::Intimate);
        prop_assert_eq!(extract_price_range_from_number(n), PriceRange::Budget);
    }

    #[test]
    fn decimal_part_never_inflates_the_amount(whole in 1i64..1_000_000, cents in 0u32..100) {
        let text = format!("{},{:02} euro", whole, cents);
        prop_assert_eq!(extract_price_amount(&text), Some(whole));
    }
}
