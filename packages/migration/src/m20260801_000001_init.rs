use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    CreatedBy,
    Name,
    IsPublished,
    StartsAt,
    MaxPlayers,
    Format,
    GenesysPointsCap,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Decks {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Format,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DeckCards {
    Table,
    Id,
    DeckId,
    CardId,
    Quantity,
    Section,
    CardData,
    CreatedAt,
}

#[derive(Iden)]
enum EventRegistrations {
    Table,
    Id,
    EventId,
    UserId,
    DeckId,
    Status,
    KonamiId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DeckFormatEnum {
    #[iden = "deck_format"]
    Type,
}

#[derive(Iden)]
enum DeckSectionEnum {
    #[iden = "deck_section"]
    Type,
}

#[derive(Iden)]
enum RegistrationStatusEnum {
    #[iden = "registration_status"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Postgres enums first; the tables below reference them.
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            async fn enum_exists(
                manager: &SchemaManager<'_>,
                enum_name: &str,
            ) -> Result<bool, DbErr> {
                let result = manager
                    .get_connection()
                    .query_one(Statement::from_string(
                        sea_orm::DatabaseBackend::Postgres,
                        format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                    ))
                    .await?;
                Ok(result.is_some())
            }

            if !enum_exists(manager, "deck_format").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(DeckFormatEnum::Type)
                            .values(["TCG", "OCG", "GOAT", "EDISON", "GENESYS"])
                            .to_owned(),
                    )
                    .await?;
            }

            if !enum_exists(manager, "deck_section").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(DeckSectionEnum::Type)
                            .values(["MAIN", "EXTRA", "SIDE"])
                            .to_owned(),
                    )
                    .await?;
            }

            if !enum_exists(manager, "registration_status").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(RegistrationStatusEnum::Type)
                            .values(["PENDIENTE", "APROBADO", "RECHAZADO"])
                            .to_owned(),
                    )
                    .await?;
            }
        }

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_sub")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // events
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Events::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(
                        ColumnDef::new(Events::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::MaxPlayers).integer().null())
                    .col(
                        ColumnDef::new(Events::Format)
                            .custom(DeckFormatEnum::Type)
                            .null(),
                    )
                    .col(ColumnDef::new(Events::GenesysPointsCap).integer().null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_created_by")
                            .from(Events::Table, Events::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // decks
        manager
            .create_table(
                Table::create()
                    .table(Decks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Decks::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Decks::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Decks::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Decks::Description).text().null())
                    .col(
                        ColumnDef::new(Decks::Format)
                            .custom(DeckFormatEnum::Type)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Decks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Decks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Decks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_decks_owner_id")
                            .from(Decks::Table, Decks::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_decks_owner_id")
                    .table(Decks::Table)
                    .col(Decks::OwnerId)
                    .to_owned(),
            )
            .await?;

        // deck_cards
        manager
            .create_table(
                Table::create()
                    .table(DeckCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeckCards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(DeckCards::DeckId).big_integer().not_null())
                    .col(ColumnDef::new(DeckCards::CardId).big_integer().not_null())
                    .col(ColumnDef::new(DeckCards::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(DeckCards::Section)
                            .custom(DeckSectionEnum::Type)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeckCards::CardData).json_binary().not_null())
                    .col(
                        ColumnDef::new(DeckCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deck_cards_deck_id")
                            .from(DeckCards::Table, DeckCards::DeckId)
                            .to(Decks::Table, Decks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_deck_cards_deck_id")
                    .table(DeckCards::Table)
                    .col(DeckCards::DeckId)
                    .to_owned(),
            )
            .await?;

        // event_registrations
        manager
            .create_table(
                Table::create()
                    .table(EventRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventRegistrations::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::DeckId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::Status)
                            .custom(RegistrationStatusEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::KonamiId)
                            .string_len(12)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registrations_event_id")
                            .from(EventRegistrations::Table, EventRegistrations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registrations_user_id")
                            .from(EventRegistrations::Table, EventRegistrations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registrations_deck_id")
                            .from(EventRegistrations::Table, EventRegistrations::DeckId)
                            .to(Decks::Table, Decks::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One registration per (event, user). The registration service
        // pre-checks this, but only this index closes the race between the
        // check and the insert.
        manager
            .create_index(
                Index::create()
                    .name("ux_event_registrations_event_user")
                    .table(EventRegistrations::Table)
                    .col(EventRegistrations::EventId)
                    .col(EventRegistrations::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_event_registrations_deck_id")
                    .table(EventRegistrations::Table)
                    .col(EventRegistrations::DeckId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventRegistrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeckCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Decks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(
                    PgType::drop()
                        .if_exists()
                        .name(RegistrationStatusEnum::Type)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .if_exists()
                        .name(DeckSectionEnum::Type)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .if_exists()
                        .name(DeckFormatEnum::Type)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
