pub mod catalogue;
pub mod employee;
pub mod offer;
pub mod ticket;
pub mod trader;
pub mod update_request;
