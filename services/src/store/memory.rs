use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use db::models::offer::OfferStatus;
use db::models::offer_support_ticket::TicketStatus;
use db::models::offer_update_request::UpdateRequestStatus;
use db::models::{employee, offer, offer_support_ticket, offer_support_ticket_message, offer_update_request, trader};
use sea_orm::Iterable;
use serde_json::Value;
use util::paging::PageRequest;

use crate::error::{ServiceError, ServiceResult};
use crate::filters::{TicketFilter, UpdateRequestFilter, text_matches};
use crate::ports::{
    EmployeeRepository, NewTicket, NewTicketMessage, OfferRepository, TicketRepository, TraderRepository,
    UpdateRequestRepository,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    employees: BTreeMap<i64, employee::Model>,
    traders: BTreeMap<i64, trader::Model>,
    offers: BTreeMap<i64, offer::Model>,
    tickets: BTreeMap<i64, offer_support_ticket::Model>,
    messages: BTreeMap<i64, offer_support_ticket_message::Model>,
    requests: BTreeMap<i64, offer_update_request::Model>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store used by the workflow tests. Ids are unique across tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_employee(&self, name: &str) -> employee::Model {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();
        let model = employee::Model {
            id,
            name: name.to_string(),
            employee_code: format!("EMP-{id:04}"),
            email: format!("employee{id}@example.com"),
            phone: None,
            created_at: now,
            updated_at: now,
        };
        tables.employees.insert(id, model.clone());
        model
    }

    pub fn add_trader(&self, name: &str, employee_id: Option<i64>) -> trader::Model {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();
        let model = trader::Model {
            id,
            name: name.to_string(),
            company_name: format!("{name} Trading"),
            trader_code: format!("TRD-{id:04}"),
            email: format!("trader{id}@example.com"),
            phone: None,
            employee_id,
            created_at: now,
            updated_at: now,
        };
        tables.traders.insert(id, model.clone());
        model
    }

    pub fn add_offer(&self, trader_id: i64, title: &str, status: OfferStatus) -> offer::Model {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();
        let model = offer::Model {
            id,
            trader_id,
            title: title.to_string(),
            description: format!("{title} description"),
            images: "[]".to_string(),
            country: None,
            city: None,
            category_id: None,
            accepts_negotiation: false,
            status,
            created_at: now,
            updated_at: now,
        };
        tables.offers.insert(id, model.clone());
        model
    }

    pub fn reassign_trader(&self, trader_id: i64, employee_id: Option<i64>) {
        if let Some(trader) = self.tables().traders.get_mut(&trader_id) {
            trader.employee_id = employee_id;
            trader.updated_at = Utc::now();
        }
    }

    pub fn offer(&self, id: i64) -> Option<offer::Model> {
        self.tables().offers.get(&id).cloned()
    }

    pub fn ticket(&self, id: i64) -> Option<offer_support_ticket::Model> {
        self.tables().tickets.get(&id).cloned()
    }

    pub fn request(&self, id: i64) -> Option<offer_update_request::Model> {
        self.tables().requests.get(&id).cloned()
    }

    pub fn message_count(&self, ticket_id: i64) -> usize {
        self.tables()
            .messages
            .values()
            .filter(|m| m.ticket_id == ticket_id)
            .count()
    }
}

fn ticket_matches(filter: &TicketFilter, ticket: &offer_support_ticket::Model) -> bool {
    filter.offer_id.is_none_or(|id| ticket.offer_id == id)
        && filter.trader_id.is_none_or(|id| ticket.trader_id == id)
        && filter.trader_ids.as_ref().is_none_or(|ids| ids.contains(&ticket.trader_id))
        && filter.employee_id.is_none_or(|id| ticket.employee_id == Some(id))
        && filter.status.is_none_or(|s| ticket.status == s)
        && filter.priority.is_none_or(|p| ticket.priority == p)
        && filter.query.as_deref().is_none_or(|q| text_matches(q, &[&ticket.subject]))
}

fn request_matches(filter: &UpdateRequestFilter, request: &offer_update_request::Model) -> bool {
    filter.offer_id.is_none_or(|id| request.offer_id == id)
        && filter.offer_ids.as_ref().is_none_or(|ids| ids.contains(&request.offer_id))
        && filter.status.is_none_or(|s| request.status == s)
}

fn paged<T>(items: Vec<T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.skip() as usize)
        .take(page.take() as usize)
        .collect();
    (items, total)
}

fn missing(what: &str) -> ServiceError {
    ServiceError::Database(sea_orm::DbErr::RecordNotFound(format!("{what} not found")))
}

#[async_trait]
impl OfferRepository for MemoryStore {
    async fn find_offer(&self, id: i64) -> ServiceResult<Option<offer::Model>> {
        Ok(self.offer(id))
    }

    async fn offer_ids_for_traders(&self, trader_ids: &[i64]) -> ServiceResult<Vec<i64>> {
        Ok(self
            .tables()
            .offers
            .values()
            .filter(|o| trader_ids.contains(&o.trader_id))
            .map(|o| o.id)
            .collect())
    }
}

#[async_trait]
impl TraderRepository for MemoryStore {
    async fn find_trader(&self, id: i64) -> ServiceResult<Option<trader::Model>> {
        Ok(self.tables().traders.get(&id).cloned())
    }

    async fn trader_ids_for_employee(&self, employee_id: i64) -> ServiceResult<Vec<i64>> {
        Ok(self
            .tables()
            .traders
            .values()
            .filter(|t| t.employee_id == Some(employee_id))
            .map(|t| t.id)
            .collect())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn find_employee(&self, id: i64) -> ServiceResult<Option<employee::Model>> {
        Ok(self.tables().employees.get(&id).cloned())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn find_ticket(&self, id: i64) -> ServiceResult<Option<offer_support_ticket::Model>> {
        Ok(self.ticket(id))
    }

    async fn open_ticket(
        &self,
        ticket: NewTicket,
        opening: NewTicketMessage,
    ) -> ServiceResult<(offer_support_ticket::Model, offer_support_ticket_message::Model)> {
        let mut tables = self.tables();
        let now = Utc::now();

        let ticket_id = tables.next_id();
        let created = offer_support_ticket::Model {
            id: ticket_id,
            offer_id: ticket.offer_id,
            trader_id: ticket.trader_id,
            employee_id: ticket.employee_id,
            subject: ticket.subject,
            status: TicketStatus::Open,
            priority: ticket.priority,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            closed_at: None,
        };
        tables.tickets.insert(ticket_id, created.clone());

        let message_id = tables.next_id();
        let message = offer_support_ticket_message::Model {
            id: message_id,
            ticket_id,
            sender_id: opening.sender_id,
            sender_type: opening.sender_type,
            message: opening.message,
            attachments: opening.attachments,
            created_at: now,
        };
        tables.messages.insert(message_id, message.clone());

        Ok((created, message))
    }

    async fn save_ticket(&self, ticket: offer_support_ticket::Model) -> ServiceResult<offer_support_ticket::Model> {
        let mut tables = self.tables();
        let slot = tables.tickets.get_mut(&ticket.id).ok_or_else(|| missing("Ticket"))?;
        *slot = ticket.clone();
        Ok(ticket)
    }

    async fn insert_message(&self, message: NewTicketMessage) -> ServiceResult<offer_support_ticket_message::Model> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let created = offer_support_ticket_message::Model {
            id,
            ticket_id: message.ticket_id,
            sender_id: message.sender_id,
            sender_type: message.sender_type,
            message: message.message,
            attachments: message.attachments,
            created_at: Utc::now(),
        };
        tables.messages.insert(id, created.clone());
        Ok(created)
    }

    async fn messages_for(&self, ticket_id: i64) -> ServiceResult<Vec<offer_support_ticket_message::Model>> {
        let mut messages: Vec<_> = self
            .tables()
            .messages
            .values()
            .filter(|m| m.ticket_id == ticket_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }

    async fn latest_message(&self, ticket_id: i64) -> ServiceResult<Option<offer_support_ticket_message::Model>> {
        Ok(self.messages_for(ticket_id).await?.pop())
    }

    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_support_ticket::Model>, u64)> {
        let mut tickets: Vec<_> = self
            .tables()
            .tickets
            .values()
            .filter(|t| ticket_matches(filter, t))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| (b.updated_at, b.id).cmp(&(a.updated_at, a.id)));
        Ok(paged(tickets, page))
    }

    async fn count_tickets_by_status(&self, filter: &TicketFilter) -> ServiceResult<Vec<(TicketStatus, u64)>> {
        let tables = self.tables();
        Ok(TicketStatus::iter()
            .map(|status| {
                let total = tables
                    .tickets
                    .values()
                    .filter(|t| t.status == status && ticket_matches(filter, t))
                    .count() as u64;
                (status, total)
            })
            .collect())
    }
}

#[async_trait]
impl UpdateRequestRepository for MemoryStore {
    async fn find_request(&self, id: i64) -> ServiceResult<Option<offer_update_request::Model>> {
        Ok(self.request(id))
    }

    async fn find_pending_for_offer(&self, offer_id: i64) -> ServiceResult<Option<offer_update_request::Model>> {
        Ok(self
            .tables()
            .requests
            .values()
            .find(|r| r.offer_id == offer_id && r.status == UpdateRequestStatus::Pending)
            .cloned())
    }

    async fn insert_request(&self, offer_id: i64, requested_data: Value) -> ServiceResult<offer_update_request::Model> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();
        let created = offer_update_request::Model {
            id,
            offer_id,
            requested_data,
            status: UpdateRequestStatus::Pending,
            reviewed_by: None,
            reviewed_by_type: None,
            reviewed_at: None,
            review_notes: None,
            created_at: now,
            updated_at: now,
        };
        tables.requests.insert(id, created.clone());
        Ok(created)
    }

    async fn save_request(&self, request: offer_update_request::Model) -> ServiceResult<offer_update_request::Model> {
        let mut tables = self.tables();
        let slot = tables.requests.get_mut(&request.id).ok_or_else(|| missing("Update request"))?;
        *slot = request.clone();
        Ok(request)
    }

    async fn apply_approval(
        &self,
        offer: offer::Model,
        request: offer_update_request::Model,
    ) -> ServiceResult<(offer::Model, offer_update_request::Model)> {
        let mut tables = self.tables();
        if !tables.offers.contains_key(&offer.id) {
            return Err(missing("Offer"));
        }
        if !tables.requests.contains_key(&request.id) {
            return Err(missing("Update request"));
        }
        tables.offers.insert(offer.id, offer.clone());
        tables.requests.insert(request.id, request.clone());
        Ok((offer, request))
    }

    async fn list_requests(
        &self,
        filter: &UpdateRequestFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_update_request::Model>, u64)> {
        let mut requests: Vec<_> = self
            .tables()
            .requests
            .values()
            .filter(|r| request_matches(filter, r))
            .cloned()
            .collect();
        requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(paged(requests, page))
    }
}
