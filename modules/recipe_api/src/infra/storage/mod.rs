//! Persistence layer: SeaORM entities, row mappers, and schema migrations.

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

pub mod mapper;
pub mod migrations;
pub mod recipes;
pub mod tags;
pub mod tokens;
pub mod users;

/// Apply any pending schema migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrations::Migrator::up(db, None).await
}
