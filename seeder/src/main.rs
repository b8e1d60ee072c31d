use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    catalogue::CatalogueSeeder, employee::EmployeeSeeder, offer::OfferSeeder, ticket::TicketSeeder,
    trader::TraderSeeder, update_request::UpdateRequestSeeder,
};
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(EmployeeSeeder) as Box<dyn Seeder + Send + Sync>, "Employee"),
        (Box::new(TraderSeeder), "Trader"),
        (Box::new(OfferSeeder), "Offer"),
        (Box::new(CatalogueSeeder), "Catalogue"),
        (Box::new(TicketSeeder), "SupportTicket"),
        (Box::new(UpdateRequestSeeder), "UpdateRequest"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
