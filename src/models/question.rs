use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per question. `game_type` mirrors the tag inside `payload` so listings can
/// filter without decoding JSON.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub game_slug: String,
    pub game_type: String,
    pub difficulty: String,
    pub payload: String, // JSON, tagged by gameType
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
