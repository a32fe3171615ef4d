use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;

use crate::entity::{author, category, document};

/// Categories offered by the compose form's select widget.
const DEFAULT_CATEGORIES: &[&str] = &["General", "Engineering", "Travel", "Announcements"];

/// Authors selectable in the compose form.
const DEFAULT_AUTHORS: &[&str] = &["Alice Doyle", "Bram Okafor", "Carol Lindqvist"];

/// Documents a post can link to.
const DEFAULT_DOCUMENTS: &[&str] = &["Editorial checklist", "Style guide"];

/// Seed the reference tables the create forms draw their choices from.
/// Idempotent: rows already present are left untouched.
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;

    for &name in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    for &name in DEFAULT_AUTHORS {
        let model = author::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        let result = author::Entity::insert(model)
            .on_conflict(
                OnConflict::column(author::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    for &title in DEFAULT_DOCUMENTS {
        let model = document::ActiveModel {
            title: Set(title.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = document::Entity::insert(model)
            .on_conflict(
                OnConflict::column(document::Column::Title)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!(inserted, "seeded form reference data");
    }
    Ok(())
}
