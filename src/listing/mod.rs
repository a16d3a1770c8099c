//! Listing module - filtering, pagination and list state

mod filter;
mod state;

pub use filter::{filter_posts, paginate, total_pages, FilterState};
pub use state::BlogState;
