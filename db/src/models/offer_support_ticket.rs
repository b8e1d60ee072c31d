use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A support conversation opened about a single offer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "offer_support_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub offer_id: i64,
    pub trader_id: i64,
    pub employee_id: Option<i64>,

    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TicketPriority {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[default]
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "URGENT")]
    Urgent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offer::Entity",
        from = "Column::OfferId",
        to = "super::offer::Column::Id"
    )]
    Offer,

    #[sea_orm(
        belongs_to = "super::trader::Entity",
        from = "Column::TraderId",
        to = "super::trader::Column::Id"
    )]
    Trader,

    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,

    #[sea_orm(has_many = "super::offer_support_ticket_message::Entity")]
    Message,
}

impl Related<super::offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl Related<super::trader::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trader.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::offer_support_ticket_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a ticket row as-is. Lifecycle rules live in the services crate;
    /// this is the raw write used by the persistence layer and fixtures.
    pub async fn create(
        db: &DbConn,
        offer_id: i64,
        trader_id: i64,
        employee_id: Option<i64>,
        subject: &str,
        priority: TicketPriority,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            offer_id: Set(offer_id),
            trader_id: Set(trader_id),
            employee_id: Set(employee_id),
            subject: Set(subject.to_owned()),
            status: Set(TicketStatus::Open),
            priority: Set(priority),
            created_at: Set(now),
            updated_at: Set(now),
            resolved_at: Set(None),
            closed_at: Set(None),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn set_status(db: &DbConn, ticket_id: i64, status: TicketStatus) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(ticket_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Ticket not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.status = Set(status);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }
}
