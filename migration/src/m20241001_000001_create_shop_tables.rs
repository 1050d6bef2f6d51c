use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    Name,
    City,
    Street,
    Zipcode,
}

/// 单表继承: dtype 区分 Book(B) / Album(A) / Movie(M)
#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Dtype,
    Name,
    Price,
    StockQuantity,
    Author,
    Isbn,
    Artist,
    Etc,
    Director,
    Actor,
}

#[derive(DeriveIden)]
enum Deliveries {
    Table,
    Id,
    City,
    Street,
    Zipcode,
    Status,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    MemberId,
    DeliveryId,
    OrderDate,
    Status,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ItemId,
    OrderPrice,
    Count,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Members::City).string_len(255).null())
                    .col(ColumnDef::new(Members::Street).string_len(255).null())
                    .col(ColumnDef::new(Members::Zipcode).string_len(32).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::Dtype).string_len(1).not_null())
                    .col(ColumnDef::new(Items::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Items::Price).integer().not_null())
                    .col(
                        ColumnDef::new(Items::StockQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Items::Author).string_len(255).null())
                    .col(ColumnDef::new(Items::Isbn).string_len(255).null())
                    .col(ColumnDef::new(Items::Artist).string_len(255).null())
                    .col(ColumnDef::new(Items::Etc).string_len(255).null())
                    .col(ColumnDef::new(Items::Director).string_len(255).null())
                    .col(ColumnDef::new(Items::Actor).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deliveries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deliveries::City).string_len(255).null())
                    .col(ColumnDef::new(Deliveries::Street).string_len(255).null())
                    .col(ColumnDef::new(Deliveries::Zipcode).string_len(32).null())
                    .col(
                        ColumnDef::new(Deliveries::Status)
                            .string_len(8)
                            .not_null()
                            .default("READY"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::DeliveryId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::OrderDate).date_time().not_null())
                    .col(ColumnDef::new(Orders::Status).string_len(8).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_member_id")
                            .from(Orders::Table, Orders::MemberId)
                            .to(Members::Table, Members::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_delivery_id")
                            .from(Orders::Table, Orders::DeliveryId)
                            .to(Deliveries::Table, Deliveries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::ItemId).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::OrderPrice).integer().not_null())
                    .col(ColumnDef::new(OrderItems::Count).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order_id")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_item_id")
                            .from(OrderItems::Table, OrderItems::ItemId)
                            .to(Items::Table, Items::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按外键依赖的逆序删除
        manager
            .drop_table(Table::drop().table(OrderItems::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Deliveries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
