pub mod m202510010001_create_employees;
pub mod m202510010002_create_traders;
pub mod m202510010003_create_offers;
pub mod m202510010004_create_offer_support_tickets;
pub mod m202510010005_create_offer_support_ticket_messages;
pub mod m202510010006_create_offer_update_requests;
pub mod m202510010007_create_catalogue;
pub mod m202510010008_create_search_history;
pub mod m202510010009_create_translation_keys;
