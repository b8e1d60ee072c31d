//! Support-ticket lifecycle.
//!
//! Tickets move OPEN → IN_PROGRESS → RESOLVED → CLOSED. Status updates may jump
//! between any two states, a new message on a RESOLVED ticket reopens it, and
//! CLOSED accepts nothing further.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use db::models::offer::OfferStatus;
use db::models::offer_support_ticket::{TicketPriority, TicketStatus};
use db::models::offer_support_ticket_message::SenderType;
use db::models::{employee, offer, offer_support_ticket, offer_support_ticket_message, trader};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use util::paging::PageRequest;

use crate::actor::{AccessTarget, Actor, resolve_offer_access};
use crate::error::{ServiceError, ServiceResult};
use crate::filters::TicketFilter;
use crate::ports::{
    EmployeeRepository, NewTicket, NewTicketMessage, OfferRepository, TicketRepository, TraderRepository,
};

#[derive(Debug, Clone, Default)]
pub struct CreateTicket {
    pub offer_id: i64,
    pub subject: String,
    pub message: String,
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Clone, Default)]
pub struct PostMessage {
    pub message: String,
    pub attachments: Option<Value>,
}

/// Query parameters accepted by the ticket listings. Which of them apply
/// depends on the caller; see [`TicketService::list`].
#[derive(Debug, Clone, Default)]
pub struct TicketListQuery {
    pub offer_id: Option<i64>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub employee_id: Option<i64>,
    pub trader_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedTicket {
    pub ticket: offer_support_ticket::Model,
    pub message: offer_support_ticket_message::Model,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    #[serde(flatten)]
    pub ticket: offer_support_ticket::Model,
    pub latest_message: Option<offer_support_ticket_message::Model>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub id: i64,
    pub title: String,
    pub status: OfferStatus,
    pub trader_id: i64,
}

impl From<offer::Model> for OfferSummary {
    fn from(offer: offer::Model) -> Self {
        Self {
            id: offer.id,
            title: offer.title,
            status: offer.status,
            trader_id: offer.trader_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderSummary {
    pub id: i64,
    pub name: String,
    pub company_name: String,
    pub trader_code: String,
    pub email: String,
}

impl From<trader::Model> for TraderSummary {
    fn from(trader: trader::Model) -> Self {
        Self {
            id: trader.id,
            name: trader.name,
            company_name: trader.company_name,
            trader_code: trader.trader_code,
            email: trader.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub employee_code: String,
    pub email: String,
}

impl From<employee::Model> for EmployeeSummary {
    fn from(employee: employee::Model) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            employee_code: employee.employee_code,
            email: employee.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: offer_support_ticket::Model,
    pub offer: OfferSummary,
    pub trader: Option<TraderSummary>,
    pub employee: Option<EmployeeSummary>,
    pub messages: Vec<offer_support_ticket_message::Model>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

/// A timestamp strictly after `previous`, even on a coarse clock.
fn touched(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

fn required_text(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn serialize_attachments(attachments: Option<Value>) -> ServiceResult<Option<String>> {
    match attachments {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::to_string(&value)?)),
    }
}

fn ensure_open(ticket: &offer_support_ticket::Model, action: &str) -> ServiceResult<()> {
    if ticket.is_closed() {
        warn!(ticket_id = ticket.id, action, "Rejected write to closed ticket");
        return Err(ServiceError::validation(format!("Cannot {action} closed ticket")));
    }
    Ok(())
}

pub struct TicketService {
    offers: Arc<dyn OfferRepository>,
    traders: Arc<dyn TraderRepository>,
    employees: Arc<dyn EmployeeRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        traders: Arc<dyn TraderRepository>,
        employees: Arc<dyn EmployeeRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self {
            offers,
            traders,
            employees,
            tickets,
        }
    }

    /// Wires every port to the same store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: OfferRepository + TraderRepository + EmployeeRepository + TicketRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Loads a ticket and checks the actor against its offer's trader.
    async fn authorized_ticket(
        &self,
        actor: &Actor,
        ticket_id: i64,
    ) -> ServiceResult<(offer_support_ticket::Model, offer::Model, AccessTarget)> {
        let ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket not found"))?;

        let (offer, target) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), ticket.offer_id).await?;
        if let Err(err) = actor.ensure_access(&target) {
            warn!(ticket_id, actor = ?actor, "Ticket access denied");
            return Err(err);
        }

        Ok((ticket, offer, target))
    }

    /// Opens a ticket on one of the trader's own offers. The ticket inherits the
    /// trader's current employee and is seeded with the trader's message.
    pub async fn create_by_trader(&self, trader_id: i64, input: CreateTicket) -> ServiceResult<OpenedTicket> {
        let (offer, target) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), input.offer_id).await?;
        if offer.trader_id != trader_id {
            return Err(ServiceError::forbidden("You can only open tickets for your own offers"));
        }

        let subject = required_text(&input.subject, "Subject")?;
        let message = required_text(&input.message, "Message")?;

        let (ticket, message) = self
            .tickets
            .open_ticket(
                NewTicket {
                    offer_id: offer.id,
                    trader_id: offer.trader_id,
                    employee_id: target.trader_employee_id,
                    subject,
                    priority: input.priority.unwrap_or_default(),
                },
                NewTicketMessage {
                    ticket_id: 0,
                    sender_id: trader_id,
                    sender_type: SenderType::Trader,
                    message,
                    attachments: None,
                },
            )
            .await?;

        info!(ticket_id = ticket.id, offer_id = offer.id, trader_id, "Support ticket opened");
        Ok(OpenedTicket { ticket, message })
    }

    /// Opens a ticket on behalf of a trader assigned to the employee. The
    /// ticket is assigned to the opening employee.
    pub async fn create_by_employee(&self, employee_id: i64, input: CreateTicket) -> ServiceResult<OpenedTicket> {
        let (offer, target) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), input.offer_id).await?;
        Actor::Employee { id: employee_id }.ensure_access(&target)?;

        let subject = required_text(&input.subject, "Subject")?;
        let message = required_text(&input.message, "Message")?;

        let (ticket, message) = self
            .tickets
            .open_ticket(
                NewTicket {
                    offer_id: offer.id,
                    trader_id: offer.trader_id,
                    employee_id: Some(employee_id),
                    subject,
                    priority: input.priority.unwrap_or_default(),
                },
                NewTicketMessage {
                    ticket_id: 0,
                    sender_id: employee_id,
                    sender_type: SenderType::Employee,
                    message,
                    attachments: None,
                },
            )
            .await?;

        info!(ticket_id = ticket.id, offer_id = offer.id, employee_id, "Support ticket opened by employee");
        Ok(OpenedTicket { ticket, message })
    }

    /// Appends a message and returns it.
    ///
    /// An unassigned ticket is claimed by a replying employee, and a RESOLVED
    /// ticket goes back to OPEN.
    pub async fn add_message(
        &self,
        actor: &Actor,
        ticket_id: i64,
        input: PostMessage,
    ) -> ServiceResult<offer_support_ticket_message::Model> {
        let (mut ticket, _, _) = self.authorized_ticket(actor, ticket_id).await?;
        ensure_open(&ticket, "add message to")?;

        let message = required_text(&input.message, "Message")?;
        let attachments = serialize_attachments(input.attachments)?;

        if let Actor::Employee { id } = *actor {
            if ticket.employee_id.is_none() {
                ticket.employee_id = Some(id);
            }
        }
        if ticket.status == TicketStatus::Resolved {
            ticket.status = TicketStatus::Open;
        }
        ticket.updated_at = touched(ticket.updated_at);
        let ticket = self.tickets.save_ticket(ticket).await?;

        let created = self
            .tickets
            .insert_message(NewTicketMessage {
                ticket_id: ticket.id,
                sender_id: actor.id().unwrap_or_default(),
                sender_type: actor.sender_type(),
                message,
                attachments,
            })
            .await?;

        info!(ticket_id, message_id = created.id, sender = %created.sender_type, "Ticket message added");
        Ok(created)
    }

    /// Sets the ticket status. `resolved_at` and `closed_at` keep the time of
    /// the first transition into their state.
    pub async fn update_status(
        &self,
        actor: &Actor,
        ticket_id: i64,
        status: TicketStatus,
    ) -> ServiceResult<offer_support_ticket::Model> {
        let (mut ticket, _, _) = self.authorized_ticket(actor, ticket_id).await?;
        ensure_open(&ticket, "update status of")?;

        let now = touched(ticket.updated_at);
        ticket.status = status;
        match status {
            TicketStatus::Resolved if ticket.resolved_at.is_none() => ticket.resolved_at = Some(now),
            TicketStatus::Closed if ticket.closed_at.is_none() => ticket.closed_at = Some(now),
            _ => {}
        }
        if let Actor::Employee { id } = *actor {
            if ticket.employee_id.is_none() {
                ticket.employee_id = Some(id);
            }
        }
        ticket.updated_at = now;

        let ticket = self.tickets.save_ticket(ticket).await?;
        info!(ticket_id, status = %ticket.status, "Ticket status updated");
        Ok(ticket)
    }

    /// Assigns the ticket to an employee. Employees may only assign to
    /// themselves; admins must name the target. OPEN tickets move to
    /// IN_PROGRESS.
    pub async fn assign(
        &self,
        actor: &Actor,
        ticket_id: i64,
        employee_id: Option<i64>,
    ) -> ServiceResult<offer_support_ticket::Model> {
        let (mut ticket, _, _) = self.authorized_ticket(actor, ticket_id).await?;

        let target_id = match *actor {
            Actor::Employee { id } => match employee_id {
                Some(other) if other != id => {
                    return Err(ServiceError::forbidden("You can only assign tickets to yourself"));
                }
                _ => id,
            },
            Actor::Admin { .. } => {
                employee_id.ok_or_else(|| ServiceError::validation("Employee ID is required"))?
            }
            Actor::Trader { .. } => return Err(ServiceError::forbidden("Only staff can assign tickets")),
        };
        ensure_open(&ticket, "assign")?;

        if self.employees.find_employee(target_id).await?.is_none() {
            return Err(ServiceError::not_found("Employee not found"));
        }

        ticket.employee_id = Some(target_id);
        if ticket.status == TicketStatus::Open {
            ticket.status = TicketStatus::InProgress;
        }
        ticket.updated_at = touched(ticket.updated_at);

        let ticket = self.tickets.save_ticket(ticket).await?;
        info!(ticket_id, employee_id = target_id, "Ticket assigned");
        Ok(ticket)
    }

    /// Narrows `filter` to what the actor may see.
    async fn visible_to(&self, actor: &Actor, filter: TicketFilter) -> ServiceResult<TicketFilter> {
        Ok(match *actor {
            Actor::Trader { id } => filter.with_trader_id(id),
            Actor::Employee { id } => filter.with_trader_ids(self.traders.trader_ids_for_employee(id).await?),
            Actor::Admin { .. } => filter,
        })
    }

    /// Tickets visible to the actor, most recently updated first, each with
    /// its newest message. Traders may filter by offer, status and priority;
    /// staff may also filter by subject text, and admins by employee and trader.
    pub async fn list(
        &self,
        actor: &Actor,
        query: TicketListQuery,
        page: PageRequest,
    ) -> ServiceResult<(Vec<TicketSummary>, u64)> {
        let mut filter = TicketFilter::new();
        if let Some(offer_id) = query.offer_id {
            filter = filter.with_offer_id(offer_id);
        }
        if let Some(status) = query.status {
            filter = filter.with_status(status);
        }
        if let Some(priority) = query.priority {
            filter = filter.with_priority(priority);
        }
        if actor.is_staff() {
            if let Some(search) = query.search {
                filter = filter.with_query(search);
            }
        }
        if let Actor::Admin { .. } = actor {
            if let Some(employee_id) = query.employee_id {
                filter = filter.with_employee_id(employee_id);
            }
            if let Some(trader_id) = query.trader_id {
                filter = filter.with_trader_id(trader_id);
            }
        }
        let filter = self.visible_to(actor, filter).await?;

        let (tickets, total) = self.tickets.list_tickets(&filter, page).await?;
        let mut rows = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let latest_message = self.tickets.latest_message(ticket.id).await?;
            rows.push(TicketSummary { ticket, latest_message });
        }
        Ok((rows, total))
    }

    /// A ticket with its offer, people and full thread (oldest message first).
    pub async fn detail(&self, actor: &Actor, ticket_id: i64) -> ServiceResult<TicketDetail> {
        let (ticket, offer, _) = self.authorized_ticket(actor, ticket_id).await?;

        let trader = self.traders.find_trader(ticket.trader_id).await?.map(TraderSummary::from);
        let employee = match ticket.employee_id {
            Some(id) => self.employees.find_employee(id).await?.map(EmployeeSummary::from),
            None => None,
        };
        let messages = self.tickets.messages_for(ticket.id).await?;

        Ok(TicketDetail {
            ticket,
            offer: offer.into(),
            trader,
            employee,
            messages,
        })
    }

    /// Ticket counts per status within the actor's visibility.
    pub async fn stats(&self, actor: &Actor) -> ServiceResult<TicketStats> {
        let filter = self.visible_to(actor, TicketFilter::new()).await?;
        let counts = self.tickets.count_tickets_by_status(&filter).await?;

        let mut stats = TicketStats::default();
        for (status, count) in counts {
            stats.total += count;
            match status {
                TicketStatus::Open => stats.open = count,
                TicketStatus::InProgress => stats.in_progress = count,
                TicketStatus::Resolved => stats.resolved = count,
                TicketStatus::Closed => stats.closed = count,
            }
        }
        Ok(stats)
    }
}
