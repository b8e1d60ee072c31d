//! Workflow core of the trade desk: who may touch what, the support-ticket
//! lifecycle, the offer update-request review, catalogue search and the
//! translation store.

pub mod actor;
pub mod error;
pub mod filters;
pub mod ports;
pub mod search_service;
pub mod store;
pub mod ticket_service;
pub mod translation_service;
pub mod update_request_service;

pub use actor::{Actor, ActorType};
pub use error::{ServiceError, ServiceResult};
