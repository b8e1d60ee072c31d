use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A trader's listed trade opportunity.
///
/// `images` holds a serialized JSON array of URLs.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub trader_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub images: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub category_id: Option<i64>,
    pub accepts_negotiation: bool,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "offer_status")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum OfferStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trader::Entity",
        from = "Column::TraderId",
        to = "super::trader::Column::Id"
    )]
    Trader,

    #[sea_orm(has_many = "super::offer_support_ticket::Entity")]
    SupportTicket,

    #[sea_orm(has_many = "super::offer_update_request::Entity")]
    UpdateRequest,
}

impl Related<super::trader::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trader.def()
    }
}

impl Related<super::offer_support_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupportTicket.def()
    }
}

impl Related<super::offer_update_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UpdateRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        trader_id: i64,
        title: &str,
        description: &str,
        status: OfferStatus,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            trader_id: Set(trader_id),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            images: Set("[]".to_owned()),
            country: Set(None),
            city: Set(None),
            category_id: Set(None),
            accepts_negotiation: Set(false),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Parses the stored image list. A value that is not a JSON array of
    /// strings is returned as a single entry.
    pub fn image_list(&self) -> Vec<String> {
        if self.images.trim().is_empty() {
            return Vec::new();
        }
        serde_json::from_str::<Vec<String>>(&self.images).unwrap_or_else(|_| vec![self.images.clone()])
    }
}
