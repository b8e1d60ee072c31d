use crate::seed::{SeedResult, Seeder};
use db::models::{employee, trader};
use fake::{Fake, faker::company::en::CompanyName, faker::name::en::Name};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, EntityTrait};
use services::ServiceError;
use std::pin::Pin;

pub struct TraderSeeder;

impl Seeder for TraderSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

            let employees: Vec<i64> = employee::Entity::find().all(db).await?.into_iter().map(|e| e.id).collect();
            if employees.is_empty() {
                return Err(ServiceError::not_found("No employees to assign traders to"));
            }

            for n in 1..=12 {
                let name: String = Name().fake();
                let company: String = CompanyName().fake();
                let code = format!("TR-{n:03}");
                let email = format!("{}@traders.example.com", code.to_lowercase());
                // A quarter of the traders have no account manager yet.
                let manager = if rng.gen_bool(0.75) {
                    employees.choose(&mut rng).copied()
                } else {
                    None
                };
                trader::Model::create(db, &name, &company, &code, &email, manager).await?;
            }

            Ok(())
        })
    }
}
