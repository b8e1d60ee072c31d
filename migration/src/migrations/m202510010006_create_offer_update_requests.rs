use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010006_create_offer_update_requests"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("offer_update_requests"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("offer_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("requested_data")).json().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("update_request_status"),
                                vec![
                                    Alias::new("PENDING"),
                                    Alias::new("APPROVED"),
                                    Alias::new("REJECTED"),
                                    Alias::new("CANCELLED"),
                                ],
                            )
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Alias::new("reviewed_by")).big_integer())
                    .col(ColumnDef::new(Alias::new("reviewed_by_type")).string())
                    .col(ColumnDef::new(Alias::new("reviewed_at")).timestamp())
                    .col(ColumnDef::new(Alias::new("review_notes")).text())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("offer_update_requests"), Alias::new("offer_id"))
                            .to(Alias::new("offers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: at most one PENDING per offer is enforced by the workflow.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offer_update_requests_offer_status")
                    .table(Alias::new("offer_update_requests"))
                    .col(Alias::new("offer_id"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("offer_update_requests")).to_owned())
            .await
    }
}
