//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    pub password_hash: String,
    /// Owned post ids as a JSON array of UUID strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub post_ids: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn post_ids_from_json(value: &Json) -> Vec<Uuid> {
    value
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().and_then(|s| Uuid::parse_str(s).ok()))
                .collect()
        })
        .unwrap_or_default()
}

fn post_ids_to_json(ids: &[Uuid]) -> Json {
    Json::Array(ids.iter().map(|id| Json::String(id.to_string())).collect())
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for bloglist_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_ids: post_ids_from_json(&model.post_ids),
            username: model.username,
            name: model.name,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<bloglist_core::domain::User> for ActiveModel {
    fn from(user: bloglist_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            post_ids: Set(post_ids_to_json(&user.post_ids)),
            username: Set(user.username),
            name: Set(user.name),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_ids_json_roundtrip_skips_garbage() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let mut json = post_ids_to_json(&ids);
        if let Json::Array(items) = &mut json {
            items.push(Json::String("not-a-uuid".to_string()));
            items.push(Json::Bool(true));
        }

        assert_eq!(post_ids_from_json(&json), ids);
        assert!(post_ids_from_json(&Json::Null).is_empty());
    }
}
