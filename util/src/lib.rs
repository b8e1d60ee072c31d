pub mod config;
pub mod paging;
pub mod state;
pub mod test_helpers;
