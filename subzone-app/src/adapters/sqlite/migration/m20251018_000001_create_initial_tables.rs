use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // domains 表
        manager
            .create_table(
                Table::create()
                    .table(Domain::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Domain::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Domain::RootDomain)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Domain::Status).string().not_null())
                    .col(ColumnDef::new(Domain::ApiToken).string().null())
                    .col(ColumnDef::new(Domain::ZoneId).string().null())
                    .col(ColumnDef::new(Domain::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Domain::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // records 表
        manager
            .create_table(
                Table::create()
                    .table(Record::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Record::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Record::DomainId).string().not_null())
                    .col(ColumnDef::new(Record::UserId).string().not_null())
                    .col(ColumnDef::new(Record::Name).string().not_null())
                    .col(ColumnDef::new(Record::FullName).string().not_null())
                    .col(ColumnDef::new(Record::RecordType).string().not_null())
                    .col(ColumnDef::new(Record::Target).string().not_null())
                    .col(ColumnDef::new(Record::Status).string().not_null())
                    .col(ColumnDef::new(Record::ExternalId).string().null())
                    .col(ColumnDef::new(Record::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Record::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 同一域名下名称唯一
        manager
            .create_index(
                Index::create()
                    .name("idx_records_domain_name")
                    .table(Record::Table)
                    .col(Record::DomainId)
                    .col(Record::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_records_user")
                    .table(Record::Table)
                    .col(Record::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // domain_assignments 表
        manager
            .create_table(
                Table::create()
                    .table(DomainAssignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DomainAssignment::DomainId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DomainAssignment::UserId).string().not_null())
                    .col(
                        ColumnDef::new(DomainAssignment::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DomainAssignment::DomainId)
                            .col(DomainAssignment::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DomainAssignment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Record::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domain::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Domain {
    #[sea_orm(iden = "domains")]
    Table,
    Id,
    RootDomain,
    Status,
    ApiToken,
    ZoneId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Record {
    #[sea_orm(iden = "records")]
    Table,
    Id,
    DomainId,
    UserId,
    Name,
    FullName,
    RecordType,
    Target,
    Status,
    ExternalId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DomainAssignment {
    #[sea_orm(iden = "domain_assignments")]
    Table,
    DomainId,
    UserId,
    CreatedAt,
}
