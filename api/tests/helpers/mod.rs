pub mod app;
pub mod fixtures;

pub use app::{body_json, make_test_app};
