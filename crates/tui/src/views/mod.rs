pub mod detail;
pub mod search;

pub use detail::MemoryDetailView;
pub use search::{FormError, SearchView};
