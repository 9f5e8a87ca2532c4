//! SeaORM implementation of QuestionRepository

use async_trait::async_trait;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::now;
use crate::domain::{
    DomainError, GameType, NewQuestion, Question, QuestionFilter, QuestionKind, QuestionPatch,
    QuestionRepository,
};
use crate::models::question::{ActiveModel, Column, Entity as QuestionEntity, Model};

/// SeaORM-based implementation of QuestionRepository
pub struct SeaOrmQuestionRepository {
    db: DatabaseConnection,
}

impl SeaOrmQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TryFrom<Model> for Question {
    type Error = DomainError;

    fn try_from(q: Model) -> Result<Self, Self::Error> {
        let kind: QuestionKind = serde_json::from_str(&q.payload)?;
        Ok(Self {
            id: q.id,
            game_slug: q.game_slug,
            difficulty: q.difficulty.parse().unwrap_or_default(),
            is_active: q.is_active,
            kind,
            created_at: q.created_at,
            updated_at: q.updated_at,
        })
    }
}

fn into_questions(models: Vec<Model>) -> Result<Vec<Question>, DomainError> {
    models.into_iter().map(Question::try_from).collect()
}

#[async_trait]
impl QuestionRepository for SeaOrmQuestionRepository {
    async fn list(
        &self,
        game_slug: &str,
        filter: QuestionFilter,
    ) -> Result<Vec<Question>, DomainError> {
        let mut query = QuestionEntity::find().filter(Column::GameSlug.eq(game_slug));

        if !filter.include_inactive {
            query = query.filter(Column::IsActive.eq(true));
        }
        if let Some(game_type) = filter.game_type {
            query = query.filter(Column::GameType.eq(game_type.as_str()));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(Column::Difficulty.eq(difficulty.as_str()));
        }

        let questions = query.order_by_asc(Column::Id).all(&self.db).await?;
        into_questions(questions)
    }

    async fn random(
        &self,
        game_slug: &str,
        count: usize,
        game_type: Option<GameType>,
    ) -> Result<Vec<Question>, DomainError> {
        let mut query = QuestionEntity::find()
            .filter(Column::GameSlug.eq(game_slug))
            .filter(Column::IsActive.eq(true));
        if let Some(game_type) = game_type {
            query = query.filter(Column::GameType.eq(game_type.as_str()));
        }

        let mut questions = query.all(&self.db).await?;
        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(count);

        into_questions(questions)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Question>, DomainError> {
        QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Question::try_from)
            .transpose()
    }

    async fn create(
        &self,
        game_slug: &str,
        question: NewQuestion,
    ) -> Result<Question, DomainError> {
        question.kind.validate()?;
        let now = now();

        let model = ActiveModel {
            game_slug: Set(game_slug.to_owned()),
            game_type: Set(question.kind.game_type().as_str().to_owned()),
            difficulty: Set(question.difficulty.as_str().to_owned()),
            payload: Set(serde_json::to_string(&question.kind)?),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model.insert(&self.db).await?;
        tracing::info!(
            "Added {} question {} to '{}'",
            saved.game_type,
            saved.id,
            saved.game_slug
        );
        Question::try_from(saved)
    }

    async fn update(&self, id: i32, patch: QuestionPatch) -> Result<Question, DomainError> {
        let existing = QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound("Question"))?;

        let mut active: ActiveModel = existing.into();
        if let Some(kind) = patch.kind {
            kind.validate()?;
            active.game_type = Set(kind.game_type().as_str().to_owned());
            active.payload = Set(serde_json::to_string(&kind)?);
        }
        if let Some(difficulty) = patch.difficulty {
            active.difficulty = Set(difficulty.as_str().to_owned());
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(now());

        let saved = active.update(&self.db).await?;
        Question::try_from(saved)
    }

    async fn deactivate(&self, id: i32) -> Result<Question, DomainError> {
        let existing = QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound("Question"))?;

        let mut active: ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(now());

        let saved = active.update(&self.db).await?;
        tracing::info!("Deactivated question {}", id);
        Question::try_from(saved)
    }
}
