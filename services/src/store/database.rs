use async_trait::async_trait;
use chrono::Utc;
use db::models::offer_support_ticket::TicketStatus;
use db::models::offer_update_request::UpdateRequestStatus;
use db::models::{employee, offer, offer_support_ticket, offer_support_ticket_message, offer_update_request, trader};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Iterable, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde_json::Value;
use util::paging::PageRequest;

use crate::error::ServiceResult;
use crate::filters::{TicketFilter, UpdateRequestFilter, contains_any};
use crate::ports::{
    EmployeeRepository, NewTicket, NewTicketMessage, OfferRepository, TicketRepository, TraderRepository,
    UpdateRequestRepository,
};

/// Database-backed implementation of every repository port.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn ticket_condition(filter: &TicketFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(offer_id) = filter.offer_id {
        condition = condition.add(offer_support_ticket::Column::OfferId.eq(offer_id));
    }
    if let Some(trader_id) = filter.trader_id {
        condition = condition.add(offer_support_ticket::Column::TraderId.eq(trader_id));
    }
    if let Some(trader_ids) = &filter.trader_ids {
        condition = condition.add(offer_support_ticket::Column::TraderId.is_in(trader_ids.clone()));
    }
    if let Some(employee_id) = filter.employee_id {
        condition = condition.add(offer_support_ticket::Column::EmployeeId.eq(employee_id));
    }
    if let Some(status) = filter.status {
        condition = condition.add(offer_support_ticket::Column::Status.eq(status));
    }
    if let Some(priority) = filter.priority {
        condition = condition.add(offer_support_ticket::Column::Priority.eq(priority));
    }
    if let Some(query) = &filter.query {
        condition = condition.add(contains_any(query, &[offer_support_ticket::Column::Subject]));
    }
    condition
}

fn request_condition(filter: &UpdateRequestFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(offer_id) = filter.offer_id {
        condition = condition.add(offer_update_request::Column::OfferId.eq(offer_id));
    }
    if let Some(offer_ids) = &filter.offer_ids {
        condition = condition.add(offer_update_request::Column::OfferId.is_in(offer_ids.clone()));
    }
    if let Some(status) = filter.status {
        condition = condition.add(offer_update_request::Column::Status.eq(status));
    }
    condition
}

fn ticket_changes(ticket: offer_support_ticket::Model) -> offer_support_ticket::ActiveModel {
    let mut active: offer_support_ticket::ActiveModel = ticket.clone().into();
    active.subject = Set(ticket.subject);
    active.employee_id = Set(ticket.employee_id);
    active.status = Set(ticket.status);
    active.priority = Set(ticket.priority);
    active.updated_at = Set(ticket.updated_at);
    active.resolved_at = Set(ticket.resolved_at);
    active.closed_at = Set(ticket.closed_at);
    active
}

fn request_changes(request: offer_update_request::Model) -> offer_update_request::ActiveModel {
    let mut active: offer_update_request::ActiveModel = request.clone().into();
    active.status = Set(request.status);
    active.reviewed_by = Set(request.reviewed_by);
    active.reviewed_by_type = Set(request.reviewed_by_type);
    active.reviewed_at = Set(request.reviewed_at);
    active.review_notes = Set(request.review_notes);
    active.updated_at = Set(request.updated_at);
    active
}

fn offer_changes(offer: offer::Model) -> offer::ActiveModel {
    let mut active: offer::ActiveModel = offer.clone().into();
    active.title = Set(offer.title);
    active.description = Set(offer.description);
    active.images = Set(offer.images);
    active.country = Set(offer.country);
    active.city = Set(offer.city);
    active.category_id = Set(offer.category_id);
    active.accepts_negotiation = Set(offer.accepts_negotiation);
    active.status = Set(offer.status);
    active.updated_at = Set(offer.updated_at);
    active
}

#[async_trait]
impl OfferRepository for SeaOrmStore {
    async fn find_offer(&self, id: i64) -> ServiceResult<Option<offer::Model>> {
        Ok(offer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn offer_ids_for_traders(&self, trader_ids: &[i64]) -> ServiceResult<Vec<i64>> {
        if trader_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = offer::Entity::find()
            .select_only()
            .column(offer::Column::Id)
            .filter(offer::Column::TraderId.is_in(trader_ids.to_vec()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl TraderRepository for SeaOrmStore {
    async fn find_trader(&self, id: i64) -> ServiceResult<Option<trader::Model>> {
        Ok(trader::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn trader_ids_for_employee(&self, employee_id: i64) -> ServiceResult<Vec<i64>> {
        let ids = trader::Entity::find()
            .select_only()
            .column(trader::Column::Id)
            .filter(trader::Column::EmployeeId.eq(employee_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmStore {
    async fn find_employee(&self, id: i64) -> ServiceResult<Option<employee::Model>> {
        Ok(employee::Entity::find_by_id(id).one(&self.db).await?)
    }
}

#[async_trait]
impl TicketRepository for SeaOrmStore {
    async fn find_ticket(&self, id: i64) -> ServiceResult<Option<offer_support_ticket::Model>> {
        Ok(offer_support_ticket::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn open_ticket(
        &self,
        ticket: NewTicket,
        opening: NewTicketMessage,
    ) -> ServiceResult<(offer_support_ticket::Model, offer_support_ticket_message::Model)> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let created = offer_support_ticket::ActiveModel {
            offer_id: Set(ticket.offer_id),
            trader_id: Set(ticket.trader_id),
            employee_id: Set(ticket.employee_id),
            subject: Set(ticket.subject),
            status: Set(TicketStatus::Open),
            priority: Set(ticket.priority),
            created_at: Set(now),
            updated_at: Set(now),
            resolved_at: Set(None),
            closed_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let message = offer_support_ticket_message::ActiveModel {
            ticket_id: Set(created.id),
            sender_id: Set(opening.sender_id),
            sender_type: Set(opening.sender_type),
            message: Set(opening.message),
            attachments: Set(opening.attachments),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok((created, message))
    }

    async fn save_ticket(&self, ticket: offer_support_ticket::Model) -> ServiceResult<offer_support_ticket::Model> {
        Ok(ticket_changes(ticket).update(&self.db).await?)
    }

    async fn insert_message(&self, message: NewTicketMessage) -> ServiceResult<offer_support_ticket_message::Model> {
        let created = offer_support_ticket_message::Model::create(
            &self.db,
            message.ticket_id,
            message.sender_id,
            message.sender_type,
            &message.message,
            message.attachments,
        )
        .await?;
        Ok(created)
    }

    async fn messages_for(&self, ticket_id: i64) -> ServiceResult<Vec<offer_support_ticket_message::Model>> {
        let messages = offer_support_ticket_message::Entity::find()
            .filter(offer_support_ticket_message::Column::TicketId.eq(ticket_id))
            .order_by_asc(offer_support_ticket_message::Column::CreatedAt)
            .order_by_asc(offer_support_ticket_message::Column::Id)
            .all(&self.db)
            .await?;
        Ok(messages)
    }

    async fn latest_message(&self, ticket_id: i64) -> ServiceResult<Option<offer_support_ticket_message::Model>> {
        let message = offer_support_ticket_message::Entity::find()
            .filter(offer_support_ticket_message::Column::TicketId.eq(ticket_id))
            .order_by_desc(offer_support_ticket_message::Column::CreatedAt)
            .order_by_desc(offer_support_ticket_message::Column::Id)
            .one(&self.db)
            .await?;
        Ok(message)
    }

    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_support_ticket::Model>, u64)> {
        let query = offer_support_ticket::Entity::find().filter(ticket_condition(filter));
        let total = query.clone().count(&self.db).await?;
        let tickets = query
            .order_by_desc(offer_support_ticket::Column::UpdatedAt)
            .order_by_desc(offer_support_ticket::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(&self.db)
            .await?;
        Ok((tickets, total))
    }

    async fn count_tickets_by_status(&self, filter: &TicketFilter) -> ServiceResult<Vec<(TicketStatus, u64)>> {
        let mut counts = Vec::new();
        for status in TicketStatus::iter() {
            let total = offer_support_ticket::Entity::find()
                .filter(ticket_condition(filter))
                .filter(offer_support_ticket::Column::Status.eq(status))
                .count(&self.db)
                .await?;
            counts.push((status, total));
        }
        Ok(counts)
    }
}

#[async_trait]
impl UpdateRequestRepository for SeaOrmStore {
    async fn find_request(&self, id: i64) -> ServiceResult<Option<offer_update_request::Model>> {
        Ok(offer_update_request::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_pending_for_offer(&self, offer_id: i64) -> ServiceResult<Option<offer_update_request::Model>> {
        let pending = offer_update_request::Entity::find()
            .filter(offer_update_request::Column::OfferId.eq(offer_id))
            .filter(offer_update_request::Column::Status.eq(UpdateRequestStatus::Pending))
            .one(&self.db)
            .await?;
        Ok(pending)
    }

    async fn insert_request(&self, offer_id: i64, requested_data: Value) -> ServiceResult<offer_update_request::Model> {
        Ok(offer_update_request::Model::create(&self.db, offer_id, requested_data).await?)
    }

    async fn save_request(&self, request: offer_update_request::Model) -> ServiceResult<offer_update_request::Model> {
        Ok(request_changes(request).update(&self.db).await?)
    }

    async fn apply_approval(
        &self,
        offer: offer::Model,
        request: offer_update_request::Model,
    ) -> ServiceResult<(offer::Model, offer_update_request::Model)> {
        let txn = self.db.begin().await?;
        let offer = offer_changes(offer).update(&txn).await?;
        let request = request_changes(request).update(&txn).await?;
        txn.commit().await?;
        Ok((offer, request))
    }

    async fn list_requests(
        &self,
        filter: &UpdateRequestFilter,
        page: PageRequest,
    ) -> ServiceResult<(Vec<offer_update_request::Model>, u64)> {
        let query = offer_update_request::Entity::find().filter(request_condition(filter));
        let total = query.clone().count(&self.db).await?;
        let requests = query
            .order_by_desc(offer_update_request::Column::CreatedAt)
            .order_by_desc(offer_update_request::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(&self.db)
            .await?;
        Ok((requests, total))
    }
}
