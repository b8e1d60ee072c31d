use axum::{body::Body, http::Request};
use db::models::{
    employee::Model as EmployeeModel,
    offer::{Model as OfferModel, OfferStatus},
    trader::Model as TraderModel,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use services::ActorType;

use api::auth::generate_jwt;

/// One employee managing one trader who owns one ACTIVE offer, plus an
/// employee with no traders.
pub struct Desk {
    pub employee: EmployeeModel,
    pub outsider: EmployeeModel,
    pub trader: TraderModel,
    pub offer: OfferModel,
}

pub async fn seed_desk(db: &DatabaseConnection) -> Desk {
    let employee = EmployeeModel::create(db, "Sara Haddad", "EMP-001", "sara@desk.test", None)
        .await
        .unwrap();
    let outsider = EmployeeModel::create(db, "Yousef Nasser", "EMP-002", "yousef@desk.test", None)
        .await
        .unwrap();
    let trader = TraderModel::create(
        db,
        "Omar Aziz",
        "Aziz Trading",
        "TR-001",
        "omar@aziz.test",
        Some(employee.id),
    )
    .await
    .unwrap();
    let offer = OfferModel::create(db, trader.id, "Medjool dates", "Premium grade, 5kg boxes", OfferStatus::Active)
        .await
        .unwrap();

    Desk {
        employee,
        outsider,
        trader,
        offer,
    }
}

pub fn token(id: i64, actor_type: ActorType) -> String {
    generate_jwt(id, actor_type).0
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
