pub mod archive;
pub mod name_cache;
pub mod resolver;
pub mod walker;

pub use archive::{format_review, render_front_matter, write_review};
pub use name_cache::{is_stale, AppNameCache};
pub use resolver::{NameResolver, UNKNOWN_NAME};
pub use walker::walk;
