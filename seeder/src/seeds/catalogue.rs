use crate::seed::{SeedResult, Seeder};
use db::models::order::{self, OrderStatus};
use db::models::{category, product, trader, vendor};
use fake::{Fake, faker::company::en::CompanyName, faker::lorem::en::Sentence};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::pin::Pin;

pub struct CatalogueSeeder;

const CATEGORIES: [(&str, &str); 5] = [
    ("Food", "Dates, grains and packaged goods"),
    ("Textiles", "Fabric, yarn and garments"),
    ("Construction", "Steel, cement and fittings"),
    ("Energy", "Solar and electrical equipment"),
    ("Tools", "Hand and power tools"),
];

const PRODUCTS: [&str; 10] = [
    "Sukkari dates",
    "Jasmine rice",
    "Linen roll",
    "Denim bolt",
    "Rebar bundle",
    "Portland cement",
    "Inverter 5kW",
    "Panel mount kit",
    "Cordless drill",
    "Socket set",
];

const PLACES: [(&str, &str); 4] = [("SA", "Riyadh"), ("SA", "Dammam"), ("AE", "Sharjah"), ("TR", "Istanbul")];

impl Seeder for CatalogueSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

            let mut categories = Vec::new();
            for (name, description) in CATEGORIES {
                categories.push(category::Model::create(db, name, Some(description)).await?.id);
            }

            let mut vendors = Vec::new();
            for n in 1..=6 {
                let company: String = CompanyName().fake();
                let (country, city) = PLACES.choose(&mut rng).copied().unwrap_or(PLACES[0]);
                let email = format!("sales{n}@vendors.example.com");
                let created =
                    vendor::Model::create(db, &company, Some(&company), &email, Some(country), Some(city)).await?;
                vendors.push(created.id);
            }

            for (i, name) in PRODUCTS.iter().enumerate() {
                let description: String = Sentence(4..8).fake();
                let vendor_id = vendors[i % vendors.len()];
                let category_id = categories.get(i / 2).copied();
                let price = f64::from(rng.gen_range(500..50_000)) / 100.0;
                let stock = if rng.gen_bool(0.2) { 0 } else { rng.gen_range(1..500) };
                product::Model::create(db, vendor_id, category_id, name, Some(&description), price, stock).await?;
            }

            let traders: Vec<i64> = trader::Entity::find().all(db).await?.into_iter().map(|t| t.id).collect();
            let statuses = [
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ];
            for n in 1..=20 {
                let number = format!("ORD-{:05}", 10_000 + n);
                let status = statuses.choose(&mut rng).copied().unwrap_or(OrderStatus::Pending);
                let total = f64::from(rng.gen_range(1_000..500_000)) / 100.0;
                order::Model::create(
                    db,
                    &number,
                    traders.choose(&mut rng).copied(),
                    vendors.choose(&mut rng).copied(),
                    status,
                    total,
                )
                .await?;
            }

            Ok(())
        })
    }
}
