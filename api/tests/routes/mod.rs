mod auth_test;
mod health_test;
mod search_test;
mod tickets_test;
mod translations_test;
mod update_requests_test;
