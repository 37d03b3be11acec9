use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new token row
pub struct NewTokenEntity {
    pub key: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Find a token by its key
pub async fn find_by_key(db: &DatabaseConnection, key: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(key).one(db).await
}

/// Find the token owned by a user, if one was ever issued
pub async fn find_by_user(db: &DatabaseConnection, user_id: i64) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Create a new token
pub async fn create(db: &DatabaseConnection, new_token: NewTokenEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        key: Set(new_token.key),
        user_id: Set(new_token.user_id),
        created_at: Set(new_token.created_at),
    };

    active_model.insert(db).await
}
