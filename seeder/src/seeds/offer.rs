use crate::seed::{SeedResult, Seeder};
use db::models::offer::{self, OfferStatus};
use db::models::trader;
use fake::{Fake, faker::lorem::en::Paragraph};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel};
use std::pin::Pin;

pub struct OfferSeeder;

const TITLES: [&str; 8] = [
    "Medjool dates, 5kg boxes",
    "Basmati rice, bulk",
    "Olive oil, cold pressed",
    "Cotton fabric rolls",
    "Steel rebar, grade 60",
    "Frozen shrimp, IQF",
    "Arabic coffee beans",
    "Solar panels, 450W",
];

const PLACES: [(&str, &str); 4] = [("SA", "Riyadh"), ("SA", "Jeddah"), ("AE", "Dubai"), ("EG", "Cairo")];

impl Seeder for OfferSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");
            let statuses = [
                OfferStatus::Active,
                OfferStatus::Active,
                OfferStatus::Active,
                OfferStatus::Pending,
                OfferStatus::Inactive,
            ];

            for trader in trader::Entity::find().all(db).await? {
                for _ in 0..rng.gen_range(1..=3) {
                    let title = TITLES.choose(&mut rng).copied().unwrap_or(TITLES[0]);
                    let description: String = Paragraph(2..4).fake();
                    let status = statuses.choose(&mut rng).copied().unwrap_or(OfferStatus::Active);
                    let created = offer::Model::create(db, trader.id, title, &description, status).await?;

                    let (country, city) = PLACES.choose(&mut rng).copied().unwrap_or(PLACES[0]);
                    let mut active = created.into_active_model();
                    active.country = Set(Some(country.to_string()));
                    active.city = Set(Some(city.to_string()));
                    active.accepts_negotiation = Set(rng.gen_bool(0.5));
                    active.update(db).await?;
                }
            }

            Ok(())
        })
    }
}
