pub mod http;
pub mod prayer_times;
pub mod resource;
pub mod session;
pub mod traits;

pub use http::ApiClient;
pub use prayer_times::PrayerTimesClient;
pub use resource::Resource;
pub use session::{FileSessionStore, Session, SessionManager, SessionStore};
pub use traits::{AuthService, BookingService, FavoritesService};
