use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_offers"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("offers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("trader_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(ColumnDef::new(Alias::new("description")).text().not_null())
                    .col(ColumnDef::new(Alias::new("images")).text().not_null().default("[]"))
                    .col(ColumnDef::new(Alias::new("country")).string())
                    .col(ColumnDef::new(Alias::new("city")).string())
                    .col(ColumnDef::new(Alias::new("category_id")).big_integer())
                    .col(ColumnDef::new(Alias::new("accepts_negotiation")).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("offer_status"),
                                vec![
                                    Alias::new("PENDING"),
                                    Alias::new("ACTIVE"),
                                    Alias::new("INACTIVE"),
                                    Alias::new("REJECTED"),
                                    Alias::new("CLOSED"),
                                ],
                            )
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offers"), Alias::new("trader_id"))
                            .to(Alias::new("traders"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offers_trader_id")
                    .table(Alias::new("offers"))
                    .col(Alias::new("trader_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("offers")).to_owned())
            .await
    }
}
