use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered trading entity. `employee_id` is the staff member currently
/// responsible for the trader and everything the trader owns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "traders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub company_name: String,
    pub trader_code: String,
    pub email: String,
    pub phone: Option<String>,
    pub employee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,

    #[sea_orm(has_many = "super::offer::Entity")]
    Offer,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        company_name: &str,
        trader_code: &str,
        email: &str,
        employee_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            name: Set(name.to_owned()),
            company_name: Set(company_name.to_owned()),
            trader_code: Set(trader_code.to_owned()),
            email: Set(email.to_owned()),
            phone: Set(None),
            employee_id: Set(employee_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Moves the trader to another employee (or unassigns it with `None`).
    pub async fn assign_employee(
        db: &DbConn,
        trader_id: i64,
        employee_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(trader_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Trader not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.employee_id = Set(employee_id);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }
}
