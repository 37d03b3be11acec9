use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new tag row
pub struct NewTagEntity {
    pub user_id: i64,
    pub name: String,
}

/// All tags belonging to a user, ordered by name descending
pub async fn list_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::Name)
        .all(db)
        .await
}

/// Find a tag by ID, scoped to its owner
pub async fn find_owned(
    db: &DatabaseConnection,
    user_id: i64,
    id: i64,
) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Create a new tag
pub async fn create(db: &DatabaseConnection, new_tag: NewTagEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        user_id: Set(new_tag.user_id),
        name: Set(new_tag.name),
        ..Default::default()
    };

    active_model.insert(db).await
}

/// Rename an existing tag
pub async fn update(db: &DatabaseConnection, id: i64, name: String) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        name: Set(name),
        ..Default::default()
    };

    active_model.update(db).await
}

/// Delete a tag scoped to its owner, returns true if a row was deleted
pub async fn delete_owned(db: &DatabaseConnection, user_id: i64, id: i64) -> Result<bool, DbErr> {
    let result = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
