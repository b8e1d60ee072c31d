use crate::seed::{SeedResult, Seeder};
use db::models::offer::{self, OfferStatus};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::json;
use services::Actor;
use services::store::SeaOrmStore;
use services::update_request_service::UpdateRequestService;
use std::pin::Pin;
use std::sync::Arc;

pub struct UpdateRequestSeeder;

impl Seeder for UpdateRequestSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");
            let service = UpdateRequestService::from_store(Arc::new(SeaOrmStore::new(db.clone())));
            let admin = Actor::Admin { id: None };

            let offers = offer::Entity::find()
                .filter(offer::Column::Status.eq(OfferStatus::Active))
                .all(db)
                .await?;

            for offer in offers {
                if !rng.gen_bool(0.5) {
                    continue;
                }

                let changes = json!({
                    "title": format!("{} (revised)", offer.title),
                    "acceptsNegotiation": !offer.accepts_negotiation,
                    "images": [format!("https://cdn.example.com/offers/{}/1.jpg", offer.id)],
                });
                let Some(body) = changes.as_object() else {
                    continue;
                };
                let request = service.create(offer.trader_id, offer.id, body).await?;

                // Leave roughly half pending for the review queue.
                match rng.gen_range(0..4) {
                    0 => {
                        service.approve(&admin, request.id, Some("Looks good".to_string())).await?;
                    }
                    1 => {
                        service
                            .reject(&admin, request.id, Some("Please keep the original title".to_string()))
                            .await?;
                    }
                    _ => {}
                }
            }

            Ok(())
        })
    }
}
