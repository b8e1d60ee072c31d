//! Review workflow for trader-submitted offer edits.
//!
//! A request starts PENDING and ends APPROVED, REJECTED or CANCELLED. An offer
//! has at most one PENDING request, and only approval touches the offer.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use db::models::offer::OfferStatus;
use db::models::offer_update_request::UpdateRequestStatus;
use db::models::{offer, offer_update_request};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use util::paging::PageRequest;

use crate::actor::{Actor, ActorType, resolve_offer_access};
use crate::error::{ServiceError, ServiceResult};
use crate::filters::UpdateRequestFilter;
use crate::ports::{OfferRepository, TraderRepository, UpdateRequestRepository};
use crate::ticket_service::OfferSummary;

/// Offer fields a trader may propose changes to, as named on the wire.
pub const EDITABLE_FIELDS: [&str; 7] = [
    "title",
    "description",
    "images",
    "country",
    "city",
    "categoryId",
    "acceptsNegotiation",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestSummary {
    #[serde(flatten)]
    pub request: offer_update_request::Model,
    pub offer: Option<OfferSummary>,
}

/// A request next to the offer's current values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestDetail {
    #[serde(flatten)]
    pub request: offer_update_request::Model,
    pub offer: offer::Model,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedRequest {
    pub request: offer_update_request::Model,
    pub offer: offer::Model,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequestListQuery {
    pub offer_id: Option<i64>,
    pub status: Option<UpdateRequestStatus>,
}

/// Keeps the recognised keys of a submitted body, values untouched.
pub fn recognised_changes(body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .filter(|(key, _)| EDITABLE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// `true` and `"true"` enable negotiation; every other value disables it.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        _ => false,
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn category_value(value: &Value) -> ServiceResult<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ServiceError::validation("categoryId must be an integer")),
        Value::String(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::validation("categoryId must be an integer")),
        _ => Err(ServiceError::validation("categoryId must be an integer")),
    }
}

/// Copies every key of `changes` onto the offer. Image lists are stored in
/// their serialized form.
pub fn apply_changes(offer: &mut offer::Model, changes: &Value) -> ServiceResult<()> {
    let Some(changes) = changes.as_object() else {
        return Err(ServiceError::validation("Requested data is not an object"));
    };

    for (key, value) in changes {
        match key.as_str() {
            "title" => {
                if let Some(title) = text_value(value) {
                    offer.title = title;
                }
            }
            "description" => {
                if let Some(description) = text_value(value) {
                    offer.description = description;
                }
            }
            "images" => {
                offer.images = match value {
                    Value::Null => "[]".to_string(),
                    Value::String(raw) => raw.clone(),
                    other => serde_json::to_string(other)?,
                };
            }
            "country" => offer.country = text_value(value),
            "city" => offer.city = text_value(value),
            "categoryId" => offer.category_id = category_value(value)?,
            "acceptsNegotiation" => offer.accepts_negotiation = coerce_flag(value),
            _ => {}
        }
    }
    Ok(())
}

pub struct UpdateRequestService {
    offers: Arc<dyn OfferRepository>,
    traders: Arc<dyn TraderRepository>,
    requests: Arc<dyn UpdateRequestRepository>,
}

impl UpdateRequestService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        traders: Arc<dyn TraderRepository>,
        requests: Arc<dyn UpdateRequestRepository>,
    ) -> Self {
        Self {
            offers,
            traders,
            requests,
        }
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: OfferRepository + TraderRepository + UpdateRequestRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    async fn find_request(&self, request_id: i64) -> ServiceResult<offer_update_request::Model> {
        self.requests
            .find_request(request_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Update request not found"))
    }

    /// Loads a request for review: staff only, within the reviewer's traders,
    /// and still PENDING.
    async fn reviewable(
        &self,
        actor: &Actor,
        request_id: i64,
    ) -> ServiceResult<(offer_update_request::Model, offer::Model)> {
        let request = self.find_request(request_id).await?;
        if !actor.is_staff() {
            return Err(ServiceError::forbidden("Only staff can review update requests"));
        }

        let (offer, target) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), request.offer_id).await?;
        if let Err(err) = actor.ensure_access(&target) {
            warn!(request_id, actor = ?actor, "Update request review denied");
            return Err(err);
        }

        if request.status.is_terminal() {
            return Err(ServiceError::validation(format!(
                "Request is already {}",
                request.status.to_string().to_lowercase()
            )));
        }

        Ok((request, offer))
    }

    fn stamp_review(
        actor: &Actor,
        mut request: offer_update_request::Model,
        status: UpdateRequestStatus,
        notes: Option<String>,
    ) -> offer_update_request::Model {
        let now = Utc::now();
        request.status = status;
        request.reviewed_by = match actor.actor_type() {
            ActorType::Employee | ActorType::Admin => actor.id(),
            ActorType::Trader => None,
        };
        request.reviewed_by_type = Some(actor.actor_type().to_string());
        request.reviewed_at = Some(now);
        request.review_notes = notes;
        request.updated_at = now.max(request.updated_at + TimeDelta::microseconds(1));
        request
    }

    /// Stages an edit of an ACTIVE offer owned by the trader.
    pub async fn create(
        &self,
        trader_id: i64,
        offer_id: i64,
        body: &Map<String, Value>,
    ) -> ServiceResult<offer_update_request::Model> {
        let (offer, _) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), offer_id).await?;
        if offer.trader_id != trader_id {
            return Err(ServiceError::forbidden("You can only request updates for your own offers"));
        }
        if offer.status != OfferStatus::Active {
            return Err(ServiceError::validation("Only active offers can be updated"));
        }

        // Checked, then inserted: two concurrent submissions can both pass.
        if self.requests.find_pending_for_offer(offer_id).await?.is_some() {
            warn!(offer_id, trader_id, "Duplicate pending update request");
            return Err(ServiceError::validation(
                "You already have a pending update request for this offer",
            ));
        }

        let changes = recognised_changes(body);
        if changes.is_empty() {
            return Err(ServiceError::validation("No changes provided"));
        }

        // Values that could never be applied are refused now, not at review.
        let changes = Value::Object(changes);
        let mut preview = offer;
        apply_changes(&mut preview, &changes)?;

        let request = self.requests.insert_request(offer_id, changes).await?;
        info!(request_id = request.id, offer_id, trader_id, "Offer update request submitted");
        Ok(request)
    }

    /// Applies the requested changes to the offer and marks the request
    /// APPROVED, in one write.
    pub async fn approve(
        &self,
        actor: &Actor,
        request_id: i64,
        review_notes: Option<String>,
    ) -> ServiceResult<ApprovedRequest> {
        let (request, mut offer) = self.reviewable(actor, request_id).await?;

        apply_changes(&mut offer, &request.requested_data)?;
        offer.updated_at = Utc::now();

        let notes = review_notes.filter(|n| !n.trim().is_empty());
        let request = Self::stamp_review(actor, request, UpdateRequestStatus::Approved, notes);
        let (offer, request) = self.requests.apply_approval(offer, request).await?;

        info!(request_id, offer_id = offer.id, reviewer = ?actor, "Offer update request approved");
        Ok(ApprovedRequest { request, offer })
    }

    /// Marks the request REJECTED. The offer is left as it is.
    pub async fn reject(
        &self,
        actor: &Actor,
        request_id: i64,
        review_notes: Option<String>,
    ) -> ServiceResult<offer_update_request::Model> {
        let (request, _) = self.reviewable(actor, request_id).await?;

        let notes = review_notes
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("Review notes are required when rejecting a request"))?;

        let request = Self::stamp_review(actor, request, UpdateRequestStatus::Rejected, Some(notes));
        let request = self.requests.save_request(request).await?;

        info!(request_id, reviewer = ?actor, "Offer update request rejected");
        Ok(request)
    }

    /// Withdraws a PENDING request. Only the offer's owner may do this.
    pub async fn cancel(&self, trader_id: i64, request_id: i64) -> ServiceResult<offer_update_request::Model> {
        let mut request = self.find_request(request_id).await?;
        let (offer, _) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), request.offer_id).await?;
        if offer.trader_id != trader_id {
            return Err(ServiceError::forbidden("You can only cancel your own update requests"));
        }
        if request.status.is_terminal() {
            return Err(ServiceError::validation("Only pending requests can be cancelled"));
        }

        request.status = UpdateRequestStatus::Cancelled;
        request.updated_at = Utc::now().max(request.updated_at + TimeDelta::microseconds(1));
        let request = self.requests.save_request(request).await?;

        info!(request_id, trader_id, "Offer update request cancelled");
        Ok(request)
    }

    /// Requests the actor may see, newest first. Traders see requests on
    /// their own offers, employees those of their traders, admins all.
    pub async fn list(
        &self,
        actor: &Actor,
        query: UpdateRequestListQuery,
        page: PageRequest,
    ) -> ServiceResult<(Vec<UpdateRequestSummary>, u64)> {
        let mut filter = UpdateRequestFilter::new();
        if let Some(offer_id) = query.offer_id {
            filter = filter.with_offer_id(offer_id);
        }
        if let Some(status) = query.status {
            filter = filter.with_status(status);
        }
        filter = match *actor {
            Actor::Trader { id } => filter.with_offer_ids(self.offers.offer_ids_for_traders(&[id]).await?),
            Actor::Employee { id } => {
                let traders = self.traders.trader_ids_for_employee(id).await?;
                filter.with_offer_ids(self.offers.offer_ids_for_traders(&traders).await?)
            }
            Actor::Admin { .. } => filter,
        };

        let (requests, total) = self.requests.list_requests(&filter, page).await?;
        let mut rows = Vec::with_capacity(requests.len());
        for request in requests {
            let offer = self.offers.find_offer(request.offer_id).await?.map(OfferSummary::from);
            rows.push(UpdateRequestSummary { request, offer });
        }
        Ok((rows, total))
    }

    pub async fn detail(&self, actor: &Actor, request_id: i64) -> ServiceResult<UpdateRequestDetail> {
        let request = self.find_request(request_id).await?;
        let (offer, target) = resolve_offer_access(self.offers.as_ref(), self.traders.as_ref(), request.offer_id).await?;
        actor.ensure_access(&target)?;
        Ok(UpdateRequestDetail { request, offer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: UpdateRequestService,
        employee: i64,
        other_employee: i64,
        trader: i64,
        offer: i64,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let employee = store.add_employee("Ayla").id;
        let other_employee = store.add_employee("Omar").id;
        let trader = store.add_trader("Tariq", Some(employee)).id;
        let offer = store.add_offer(trader, "Old Title", OfferStatus::Active).id;
        let service = UpdateRequestService::from_store(store.clone());
        Fixture {
            store,
            service,
            employee,
            other_employee,
            trader,
            offer,
        }
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn second_pending_request_is_rejected() {
        let fx = fixture();
        let first = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"description": "updated"})))
            .await
            .unwrap();
        assert_eq!(first.status, UpdateRequestStatus::Pending);

        let err = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"city": "Riyadh"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("already have a pending update request")));
    }

    #[tokio::test]
    async fn unusable_values_are_refused_before_staging() {
        let fx = fixture();
        let err = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"categoryId": "abc"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "categoryId must be an integer"));

        let staged = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"categoryId": "12"})))
            .await
            .unwrap();
        let approved = fx
            .service
            .approve(&Actor::Employee { id: fx.employee }, staged.id, None)
            .await
            .unwrap();
        assert_eq!(approved.request.status, UpdateRequestStatus::Approved);
        assert_eq!(fx.store.offer(fx.offer).unwrap().category_id, Some(12));
    }

    #[tokio::test]
    async fn create_requires_active_owned_offer_and_changes() {
        let fx = fixture();
        let stranger = fx.store.add_trader("Stranger", None).id;
        let draft = fx.store.add_offer(fx.trader, "Draft", OfferStatus::Pending).id;

        let foreign = fx.service.create(stranger, fx.offer, &body(json!({"title": "x"}))).await;
        assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

        let inactive = fx.service.create(fx.trader, draft, &body(json!({"title": "x"}))).await;
        assert!(matches!(inactive, Err(ServiceError::Validation(_))));

        let empty = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"price": 10})))
            .await
            .unwrap_err();
        assert!(matches!(empty, ServiceError::Validation(ref m) if m == "No changes provided"));

        let missing = fx.service.create(fx.trader, 777_777, &body(json!({"title": "x"}))).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_keys_are_not_stored() {
        let fx = fixture();
        let request = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"title": "New", "status": "CLOSED"})))
            .await
            .unwrap();
        assert_eq!(request.requested_data, json!({"title": "New"}));
    }

    #[tokio::test]
    async fn approve_applies_changes_and_records_reviewer() {
        let fx = fixture();
        let request = fx
            .service
            .create(
                fx.trader,
                fx.offer,
                &body(json!({
                    "title": "New Title",
                    "images": ["a.png", "b.png"],
                    "acceptsNegotiation": "true",
                    "categoryId": 4,
                    "city": "Riyadh"
                })),
            )
            .await
            .unwrap();

        let reviewer = Actor::Employee { id: fx.employee };
        let approved = fx.service.approve(&reviewer, request.id, None).await.unwrap();

        assert_eq!(approved.request.status, UpdateRequestStatus::Approved);
        assert_eq!(approved.request.reviewed_by, Some(fx.employee));
        assert_eq!(approved.request.reviewed_by_type.as_deref(), Some("EMPLOYEE"));
        assert!(approved.request.reviewed_at.is_some());

        let offer = fx.store.offer(fx.offer).unwrap();
        assert_eq!(offer.title, "New Title");
        assert_eq!(offer.images, r#"["a.png","b.png"]"#);
        assert!(offer.accepts_negotiation);
        assert_eq!(offer.category_id, Some(4));
        assert_eq!(offer.city.as_deref(), Some("Riyadh"));
    }

    #[tokio::test]
    async fn reject_requires_notes_and_leaves_offer_alone() {
        let fx = fixture();
        let request = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"title": "New Title"})))
            .await
            .unwrap();
        let admin = Actor::Admin { id: Some(1) };

        for notes in [None, Some(String::new())] {
            let err = fx.service.reject(&admin, request.id, notes).await.unwrap_err();
            assert!(
                matches!(err, ServiceError::Validation(ref m) if m == "Review notes are required when rejecting a request")
            );
        }

        let rejected = fx
            .service
            .reject(&admin, request.id, Some("insufficient detail".into()))
            .await
            .unwrap();
        assert_eq!(rejected.status, UpdateRequestStatus::Rejected);
        assert_eq!(rejected.review_notes.as_deref(), Some("insufficient detail"));
        assert_eq!(fx.store.offer(fx.offer).unwrap().title, "Old Title");
    }

    #[tokio::test]
    async fn terminal_request_reports_its_status() {
        let fx = fixture();
        let request = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"title": "New Title"})))
            .await
            .unwrap();
        let admin = Actor::Admin { id: None };
        fx.service.approve(&admin, request.id, None).await.unwrap();

        let err = fx.service.approve(&admin, request.id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Request is already approved"));

        let cancel = fx.service.cancel(fx.trader, request.id).await.unwrap_err();
        assert!(matches!(cancel, ServiceError::Validation(ref m) if m == "Only pending requests can be cancelled"));
    }

    #[tokio::test]
    async fn reviewer_must_be_assigned_staff() {
        let fx = fixture();
        let request = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"title": "New Title"})))
            .await
            .unwrap();

        let outsider = Actor::Employee { id: fx.other_employee };
        let err = fx.service.approve(&outsider, request.id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let trader = Actor::Trader { id: fx.trader };
        let err = fx.service.approve(&trader, request.id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let missing = fx.service.approve(&outsider, 999_999, None).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn cancel_is_owner_only_and_frees_the_offer() {
        let fx = fixture();
        let stranger = fx.store.add_trader("Stranger", None).id;
        let request = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"title": "New Title"})))
            .await
            .unwrap();

        let err = fx.service.cancel(stranger, request.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let cancelled = fx.service.cancel(fx.trader, request.id).await.unwrap();
        assert_eq!(cancelled.status, UpdateRequestStatus::Cancelled);
        assert!(cancelled.reviewed_by.is_none());

        let again = fx
            .service
            .create(fx.trader, fx.offer, &body(json!({"city": "Jeddah"})))
            .await;
        assert!(again.is_ok());
    }

    #[tokio::test]
    async fn listing_is_scoped_to_actor() {
        let fx = fixture();
        let solo = fx.store.add_trader("Solo", None).id;
        let solo_offer = fx.store.add_offer(solo, "Rice", OfferStatus::Active).id;
        fx.service.create(fx.trader, fx.offer, &body(json!({"title": "A"}))).await.unwrap();
        fx.service.create(solo, solo_offer, &body(json!({"title": "B"}))).await.unwrap();

        let page = PageRequest::resolve(None, None, 20, 100);
        let query = UpdateRequestListQuery::default;

        let (own, total) = fx.service.list(&Actor::Trader { id: solo }, query(), page).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(own[0].offer.as_ref().unwrap().title, "Rice");

        let (_, staff) = fx.service.list(&Actor::Employee { id: fx.employee }, query(), page).await.unwrap();
        assert_eq!(staff, 1);

        let (_, all) = fx.service.list(&Actor::Admin { id: None }, query(), page).await.unwrap();
        assert_eq!(all, 2);
    }

    #[test]
    fn flag_coercion_is_loose_only_for_true() {
        assert!(coerce_flag(&json!(true)));
        assert!(coerce_flag(&json!("true")));
        assert!(!coerce_flag(&json!(1)));
        assert!(!coerce_flag(&json!("yes")));
        assert!(!coerce_flag(&json!(false)));
    }
}
