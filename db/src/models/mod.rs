pub mod category;
pub mod employee;
pub mod offer;
pub mod offer_support_ticket;
pub mod offer_support_ticket_message;
pub mod offer_update_request;
pub mod order;
pub mod product;
pub mod saved_search;
pub mod search_history;
pub mod trader;
pub mod translation_key;
pub mod vendor;

pub use category::Entity as Category;
pub use employee::Entity as Employee;
pub use offer::Entity as Offer;
pub use offer_support_ticket::Entity as OfferSupportTicket;
pub use offer_support_ticket_message::Entity as OfferSupportTicketMessage;
pub use offer_update_request::Entity as OfferUpdateRequest;
pub use order::Entity as Order;
pub use product::Entity as Product;
pub use saved_search::Entity as SavedSearch;
pub use search_history::Entity as SearchHistory;
pub use trader::Entity as Trader;
pub use translation_key::Entity as TranslationKey;
pub use vendor::Entity as Vendor;
