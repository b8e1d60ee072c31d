use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010004_create_offer_support_tickets"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("offer_support_tickets"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("offer_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("trader_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("employee_id")).big_integer())
                    .col(ColumnDef::new(Alias::new("subject")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("ticket_status"),
                                vec![
                                    Alias::new("OPEN"),
                                    Alias::new("IN_PROGRESS"),
                                    Alias::new("RESOLVED"),
                                    Alias::new("CLOSED"),
                                ],
                            )
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("priority"))
                            .enumeration(
                                Alias::new("ticket_priority"),
                                vec![
                                    Alias::new("LOW"),
                                    Alias::new("MEDIUM"),
                                    Alias::new("HIGH"),
                                    Alias::new("URGENT"),
                                ],
                            )
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("resolved_at")).timestamp())
                    .col(ColumnDef::new(Alias::new("closed_at")).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offer_support_tickets"), Alias::new("offer_id"))
                            .to(Alias::new("offers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offer_support_tickets"), Alias::new("trader_id"))
                            .to(Alias::new("traders"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offer_support_tickets"), Alias::new("employee_id"))
                            .to(Alias::new("employees"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_offer_support_tickets_offer_id", "offer_id"),
            ("idx_offer_support_tickets_trader_id", "trader_id"),
            ("idx_offer_support_tickets_status", "status"),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Alias::new("offer_support_tickets"))
                        .col(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("offer_support_tickets")).to_owned())
            .await
    }
}
