use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "words_of_the_day")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub word: String,
    pub arabic: Option<String>,
    pub transliteration: Option<String>,
    pub meaning: String,
    pub example: Option<String>,
    pub reference: Option<String>,
    #[sea_orm(unique)]
    pub date_active: String, // YYYY-MM-DD, compares lexicographically
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
