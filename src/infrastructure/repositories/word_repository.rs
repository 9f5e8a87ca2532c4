//! SeaORM implementation of WordRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{conflict_or_db, now};
use crate::domain::{DomainError, NewWord, WordOfTheDay, WordRepository};
use crate::models::word_of_the_day::{ActiveModel, Column, Entity as WordEntity, Model};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SeaORM-based implementation of WordRepository
pub struct SeaOrmWordRepository {
    db: DatabaseConnection,
}

impl SeaOrmWordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for WordOfTheDay {
    fn from(w: Model) -> Self {
        Self {
            id: w.id,
            word: w.word,
            arabic: w.arabic,
            transliteration: w.transliteration,
            meaning: w.meaning,
            example: w.example,
            reference: w.reference,
            date_active: w.date_active,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl WordRepository for SeaOrmWordRepository {
    async fn find_for_date(&self, date: NaiveDate) -> Result<Option<WordOfTheDay>, DomainError> {
        let word = WordEntity::find()
            .filter(Column::DateActive.lte(date.format(DATE_FORMAT).to_string()))
            .order_by_desc(Column::DateActive)
            .one(&self.db)
            .await?;
        Ok(word.map(WordOfTheDay::from))
    }

    async fn list(&self) -> Result<Vec<WordOfTheDay>, DomainError> {
        let words = WordEntity::find()
            .order_by_desc(Column::DateActive)
            .all(&self.db)
            .await?;
        Ok(words.into_iter().map(WordOfTheDay::from).collect())
    }

    async fn create(&self, word: NewWord) -> Result<WordOfTheDay, DomainError> {
        if word.word.trim().is_empty() {
            return Err(DomainError::validation("word is required"));
        }
        if word.meaning.trim().is_empty() {
            return Err(DomainError::validation("meaning is required"));
        }

        let date = word.date_active.format(DATE_FORMAT).to_string();
        let now = now();

        let model = ActiveModel {
            word: Set(word.word.trim().to_owned()),
            arabic: Set(non_blank(word.arabic)),
            transliteration: Set(non_blank(word.transliteration)),
            meaning: Set(word.meaning.trim().to_owned()),
            example: Set(non_blank(word.example)),
            reference: Set(non_blank(word.reference)),
            date_active: Set(date.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, || format!("A word is already scheduled for {}", date)))?;

        tracing::info!("Scheduled word '{}' for {}", saved.word, saved.date_active);
        Ok(WordOfTheDay::from(saved))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = WordEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("Word"));
        }

        Ok(())
    }
}
