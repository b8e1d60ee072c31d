use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_employees::Migration),
            Box::new(migrations::m202510010002_create_traders::Migration),
            Box::new(migrations::m202510010003_create_offers::Migration),
            Box::new(migrations::m202510010004_create_offer_support_tickets::Migration),
            Box::new(migrations::m202510010005_create_offer_support_ticket_messages::Migration),
            Box::new(migrations::m202510010006_create_offer_update_requests::Migration),
            Box::new(migrations::m202510010007_create_catalogue::Migration),
            Box::new(migrations::m202510010008_create_search_history::Migration),
            Box::new(migrations::m202510010009_create_translation_keys::Migration),
        ]
    }
}
