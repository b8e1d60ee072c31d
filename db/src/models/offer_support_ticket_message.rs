use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One immutable message in a ticket thread.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "offer_support_ticket_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub ticket_id: i64,
    pub sender_id: i64,
    pub sender_type: SenderType,

    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Serialized JSON list, if any attachments were sent.
    #[sea_orm(column_type = "Text", nullable)]
    pub attachments: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sender_type")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SenderType {
    #[sea_orm(string_value = "TRADER")]
    Trader,
    #[sea_orm(string_value = "EMPLOYEE")]
    Employee,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offer_support_ticket::Entity",
        from = "Column::TicketId",
        to = "super::offer_support_ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::offer_support_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        ticket_id: i64,
        sender_id: i64,
        sender_type: SenderType,
        message: &str,
        attachments: Option<String>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            sender_id: Set(sender_id),
            sender_type: Set(sender_type),
            message: Set(message.to_owned()),
            attachments: Set(attachments),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }
}
