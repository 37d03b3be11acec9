use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

// Price is stored as its canonical decimal string; sqlx's SQLite driver
// has no native decimal column type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: String,
    pub description: String,
    pub link: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new recipe row
pub struct NewRecipeEntity {
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: String,
    pub description: String,
    pub link: String,
}

/// Data for updating an existing recipe row
pub struct UpdateRecipeEntity {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// All recipes belonging to a user, newest first
pub async fn list_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::Id)
        .all(db)
        .await
}

/// Find a recipe by ID, scoped to its owner
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

/// Create a new recipe
pub async fn create(db: &DatabaseConnection, new_recipe: NewRecipeEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        user_id: Set(new_recipe.user_id),
        title: Set(new_recipe.title),
        time_minutes: Set(new_recipe.time_minutes),
        price: Set(new_recipe.price),
        description: Set(new_recipe.description),
        link: Set(new_recipe.link),
        ..Default::default()
    };

    active_model.insert(db).await
}

/// Update an existing recipe
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    update_data: UpdateRecipeEntity,
) -> Result<Model, DbErr> {
    let mut active_model = ActiveModel {
        id: Set(id),
        ..Default::default()
    };

    if let Some(title) = update_data.title {
        active_model.title = Set(title);
    }
    if let Some(time_minutes) = update_data.time_minutes {
        active_model.time_minutes = Set(time_minutes);
    }
    if let Some(price) = update_data.price {
        active_model.price = Set(price);
    }
    if let Some(description) = update_data.description {
        active_model.description = Set(description);
    }
    if let Some(link) = update_data.link {
        active_model.link = Set(link);
    }

    active_model.update(db).await
}

/// Delete a recipe scoped to its owner, returns true if a row was deleted
pub async fn delete_owned(db: &DatabaseConnection, user_id: i64, id: i64) -> Result<bool, DbErr> {
    let result = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
