use crate::seed::{SeedResult, Seeder};
use db::models::offer::{self, OfferStatus};
use db::models::offer_support_ticket::{TicketPriority, TicketStatus};
use db::models::trader;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use services::Actor;
use services::store::SeaOrmStore;
use services::ticket_service::{CreateTicket, PostMessage, TicketService};
use std::pin::Pin;
use std::sync::Arc;

pub struct TicketSeeder;

const SUBJECTS: [&str; 6] = [
    "Shipping terms",
    "Payment schedule",
    "Minimum order quantity",
    "Certificate of origin",
    "Packaging options",
    "Price revision",
];

const OPENERS: [&str; 6] = [
    "Can this ship to Jeddah port by next month?",
    "Is a 30/70 payment split acceptable?",
    "What is the smallest order you would accept?",
    "Buyers are asking for the certificate of origin.",
    "Could the goods be packed in 10kg cartons instead?",
    "Market prices moved; can we revisit the listing price?",
];

const REPLIES: [&str; 4] = [
    "Thanks, we are checking with the warehouse.",
    "Attached the document you asked for.",
    "Confirmed on our side.",
    "Could you share more details?",
];

impl Seeder for TicketSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");
            let service = TicketService::from_store(Arc::new(SeaOrmStore::new(db.clone())));
            let priorities = [
                TicketPriority::Low,
                TicketPriority::Medium,
                TicketPriority::Medium,
                TicketPriority::High,
                TicketPriority::Urgent,
            ];

            let offers = offer::Entity::find()
                .filter(offer::Column::Status.eq(OfferStatus::Active))
                .all(db)
                .await?;

            for offer in offers {
                let Some(owner) = trader::Entity::find_by_id(offer.trader_id).one(db).await? else {
                    continue;
                };
                let trader = Actor::Trader { id: owner.id };

                let pick = rng.gen_range(0..SUBJECTS.len());
                let input = CreateTicket {
                    offer_id: offer.id,
                    subject: SUBJECTS[pick].to_string(),
                    message: OPENERS[pick].to_string(),
                    priority: priorities.choose(&mut rng).copied(),
                };
                let opened = match owner.employee_id {
                    Some(employee_id) if rng.gen_bool(0.2) => service.create_by_employee(employee_id, input).await?,
                    _ => service.create_by_trader(owner.id, input).await?,
                };
                let ticket_id = opened.ticket.id;

                // Only managed traders get staff replies.
                let Some(employee_id) = owner.employee_id else {
                    continue;
                };
                let employee = Actor::Employee { id: employee_id };

                for turn in 0..rng.gen_range(0..4) {
                    let author = if turn % 2 == 0 { &employee } else { &trader };
                    let reply = PostMessage {
                        message: REPLIES.choose(&mut rng).copied().unwrap_or(REPLIES[0]).to_string(),
                        attachments: None,
                    };
                    service.add_message(author, ticket_id, reply).await?;
                }

                let outcome = [None, Some(TicketStatus::Resolved), Some(TicketStatus::Closed)];
                if let Some(status) = outcome.choose(&mut rng).copied().flatten() {
                    service.update_status(&employee, ticket_id, status).await?;
                }
            }

            Ok(())
        })
    }
}
