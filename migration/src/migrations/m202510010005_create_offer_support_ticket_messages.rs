use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_offer_support_ticket_messages"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("offer_support_ticket_messages"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("ticket_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("sender_id")).big_integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("sender_type"))
                            .enumeration(
                                Alias::new("sender_type"),
                                vec![Alias::new("TRADER"), Alias::new("EMPLOYEE"), Alias::new("ADMIN")],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("message")).text().not_null())
                    .col(ColumnDef::new(Alias::new("attachments")).text())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offer_support_ticket_messages"), Alias::new("ticket_id"))
                            .to(Alias::new("offer_support_tickets"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offer_support_ticket_messages_ticket_id")
                    .table(Alias::new("offer_support_ticket_messages"))
                    .col(Alias::new("ticket_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("offer_support_ticket_messages")).to_owned())
            .await
    }
}
