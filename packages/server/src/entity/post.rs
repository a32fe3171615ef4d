use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub is_active: bool,

    /// Unset for posts created through the quick form.
    pub category_id: Option<i32>,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: Option<super::category::Entity>,

    pub document_id: Option<i32>,
    #[sea_orm(belongs_to, from = "document_id", to = "id")]
    pub document: Option<super::document::Entity>,

    #[sea_orm(has_many, via = "post_author")]
    pub authors: HasMany<super::author::Entity>,

    #[sea_orm(has_many)]
    pub images: HasMany<super::post_image::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
