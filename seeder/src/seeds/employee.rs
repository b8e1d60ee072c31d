use crate::seed::{SeedResult, Seeder};
use db::models::employee::Model;
use fake::{Fake, faker::name::en::Name, faker::phone_number::en::PhoneNumber};
use sea_orm::DatabaseConnection;
use std::pin::Pin;

pub struct EmployeeSeeder;

impl Seeder for EmployeeSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> Pin<Box<dyn Future<Output = SeedResult> + Send + 'a>> {
        Box::pin(async move {
            // Fixed account for manual testing
            Model::create(db, "Desk Lead", "EMP-000", "lead@desk.example.com", None).await?;

            for n in 1..=5 {
                let name: String = Name().fake();
                let phone: String = PhoneNumber().fake();
                let code = format!("EMP-{n:03}");
                let email = format!("{}@desk.example.com", code.to_lowercase());
                Model::create(db, &name, &code, &email, Some(&phone)).await?;
            }

            Ok(())
        })
    }
}
