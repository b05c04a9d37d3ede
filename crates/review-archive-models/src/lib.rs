pub mod app;
pub mod review;

pub use app::AppEntry;
pub use review::Review;
