pub mod catalog;
pub mod codec;
pub mod extract;
pub mod paginate;
pub mod types;

pub use codec::{deserialize, resolve_enum, serialize, serialize_partial, MatchStrategy};
pub use extract::{parse_phrase, ExtractOptions};
pub use paginate::{page_buttons, Page, PageButton, Paginator};
pub use types::{
    CapacityRange, City, FilterEnum, PartialSearchFilters, PriceRange, SearchFilters, SortBy,
    VenueType,
};
