//! Authenticated principals and the ownership rule that decides what each of
//! them may touch.
//!
//! Every protected resource (offer, ticket, update request) resolves to an
//! [`AccessTarget`]: the trader that owns the offer behind it and the employee
//! currently responsible for that trader. Each actor kind answers
//! [`AccessPolicy::can_access`] against that target.

use db::models::offer;
use db::models::offer_support_ticket_message::SenderType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ServiceError, ServiceResult};
use crate::ports::{OfferRepository, TraderRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActorType {
    Trader,
    Employee,
    Admin,
}

/// Ownership data for one protected resource.
///
/// A ticket's own `employee_id` is not part of it: access follows the
/// trader's current employee, so reassigning a trader moves access with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTarget {
    pub trader_id: i64,
    pub trader_employee_id: Option<i64>,
}

pub trait AccessPolicy {
    fn can_access(&self, target: &AccessTarget) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct TraderActor {
    pub id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct EmployeeActor {
    pub id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct AdminActor {
    pub id: Option<i64>,
}

impl AccessPolicy for TraderActor {
    fn can_access(&self, target: &AccessTarget) -> bool {
        target.trader_id == self.id
    }
}

impl AccessPolicy for EmployeeActor {
    fn can_access(&self, target: &AccessTarget) -> bool {
        target.trader_employee_id == Some(self.id)
    }
}

impl AccessPolicy for AdminActor {
    fn can_access(&self, _target: &AccessTarget) -> bool {
        true
    }
}

/// The authenticated principal behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Trader { id: i64 },
    Employee { id: i64 },
    Admin { id: Option<i64> },
}

impl Actor {
    pub fn actor_type(&self) -> ActorType {
        match self {
            Actor::Trader { .. } => ActorType::Trader,
            Actor::Employee { .. } => ActorType::Employee,
            Actor::Admin { .. } => ActorType::Admin,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match *self {
            Actor::Trader { id } | Actor::Employee { id } => Some(id),
            Actor::Admin { id } => id,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Actor::Employee { .. } | Actor::Admin { .. })
    }

    /// Sender type stamped on messages written by this actor.
    pub fn sender_type(&self) -> SenderType {
        match self {
            Actor::Trader { .. } => SenderType::Trader,
            Actor::Employee { .. } => SenderType::Employee,
            Actor::Admin { .. } => SenderType::Admin,
        }
    }

    /// Fails with `Forbidden` unless the actor may touch `target`.
    pub fn ensure_access(&self, target: &AccessTarget) -> ServiceResult<()> {
        if self.can_access(target) {
            Ok(())
        } else {
            Err(ServiceError::forbidden("Access denied"))
        }
    }
}

impl AccessPolicy for Actor {
    fn can_access(&self, target: &AccessTarget) -> bool {
        match *self {
            Actor::Trader { id } => TraderActor { id }.can_access(target),
            Actor::Employee { id } => EmployeeActor { id }.can_access(target),
            Actor::Admin { id } => AdminActor { id }.can_access(target),
        }
    }
}

/// Loads an offer and the ownership data guarding it.
///
/// A missing offer is `NotFound`. A missing trader row leaves the target
/// without an employee, so only the owning trader and admins get through.
pub async fn resolve_offer_access(
    offers: &dyn OfferRepository,
    traders: &dyn TraderRepository,
    offer_id: i64,
) -> ServiceResult<(offer::Model, AccessTarget)> {
    let offer = offers
        .find_offer(offer_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Offer not found"))?;

    let trader_employee_id = traders
        .find_trader(offer.trader_id)
        .await?
        .and_then(|t| t.employee_id);

    let target = AccessTarget {
        trader_id: offer.trader_id,
        trader_employee_id,
    };
    Ok((offer, target))
}
