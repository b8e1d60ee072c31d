//! Persistence seams used by the workflow services.
//!
//! [`crate::store::SeaOrmStore`] backs these with the database;
//! [`crate::store::MemoryStore`] backs them with in-process maps for tests.

use async_trait::async_trait;
use db::models::offer_support_ticket::{TicketPriority, TicketStatus};
use db::models::offer_support_ticket_message::SenderType;
use db::models::{employee, offer, offer_support_ticket, offer_support_ticket_message, offer_update_request, trader};
use serde_json::Value;
use util::paging::PageRequest;

use crate::error::ServiceResult;
use crate::filters::{TicketFilter, UpdateRequestFilter};

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub offer_id: i64,
    pub trader_id: i64,
    pub employee_id: Option<i64>,
    pub subject: String,
    pub priority: TicketPriority,
}

#[derive(Debug, Clone)]
pub struct NewTicketMessage {
    pub ticket_id: i64,
    pub sender_id: i64,
    pub sender_type: SenderType,
    pub message: String,
    pub attachments: Option<String>,
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_offer(&self, id: i64) -> ServiceResult<Option<offer::Model>>;

    /// Ids of every offer owned by one of `trader_ids`.
    async fn offer_ids_for_traders(&self, trader_ids: &[i64]) -> ServiceResult<Vec<i64>>;
}

#[async_trait]
pub trait TraderRepository: Send + Sync {
    async fn find_trader(&self, id: i64) -> ServiceResult<Option<trader::Model>>;

    /// Ids of the traders currently assigned to `employee_id`.
    async fn trader_ids_for_employee(&self, employee_id: i64) -> ServiceResult<Vec<i64>>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_employee(&self, id: i64) -> ServiceResult<Option<employee::Model>>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_ticket(&self, id: i64) -> ServiceResult<Option<offer_support_ticket::Model>>;

    /// Inserts a ticket together with its opening message. `opening.ticket_id`
    /// is ignored in favour of the new ticket's id.
    async fn open_ticket(
        &self,
        ticket: NewTicket,
        opening: NewTicketMessage,
    ) -> ServiceResult<(offer_support_ticket::Model, offer_support_ticket_message::Model)>;

    /// Persists every field of `ticket`.
    async fn save_ticket(&self, ticket: offer_support_ticket::Model) -> ServiceResult<offer_support_ticket::Model>;

    async fn insert_message(&self, message: NewTicketMessage) -> ServiceResult<offer_support_ticket_message::Model>;

    /// Thread of a ticket, oldest first.
    async fn messages_for(&self, ticket_id: i64) -> ServiceResult<Vec<offer_support_ticket_message::Model>>;

    async fn latest_message(&self, ticket_id: i64) -> ServiceResult<Option<offer_support_ticket_message::Model>>;

    /// Matching tickets, most recently updated first, plus the total match count.
    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_support_ticket::Model>, u64)>;

    async fn count_tickets_by_status(&self, filter: &TicketFilter) -> ServiceResult<Vec<(TicketStatus, u64)>>;
}

#[async_trait]
pub trait UpdateRequestRepository: Send + Sync {
    async fn find_request(&self, id: i64) -> ServiceResult<Option<offer_update_request::Model>>;

    async fn find_pending_for_offer(&self, offer_id: i64) -> ServiceResult<Option<offer_update_request::Model>>;

    async fn insert_request(&self, offer_id: i64, requested_data: Value) -> ServiceResult<offer_update_request::Model>;

    /// Persists every field of `request`.
    async fn save_request(&self, request: offer_update_request::Model) -> ServiceResult<offer_update_request::Model>;

    /// Writes the patched offer and the approved request as one unit.
    async fn apply_approval(
        &self,
        offer: offer::Model,
        request: offer_update_request::Model,
    ) -> ServiceResult<(offer::Model, offer_update_request::Model)>;

    /// Matching requests, newest first, plus the total match count.
    async fn list_requests(
        &self,
        filter: &UpdateRequestFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_update_request::Model>, u64)>;
}
