use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Banner image uploaded alongside a post. Created only when the compose
/// form submission carried a file.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_image")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub post_id: i32,
    #[sea_orm(belongs_to, from = "post_id", to = "id")]
    pub post: HasOne<super::post::Entity>,

    /// SHA-256 hash of the stored image, keys into the media store.
    pub content_hash: String,

    /// Original upload filename.
    pub filename: String,

    /// MIME content type sniffed from the image bytes.
    pub content_type: Option<String>,

    pub size: i64,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
