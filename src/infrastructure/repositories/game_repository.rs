//! SeaORM implementation of GameRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{conflict_or_db, now};
use crate::domain::{DomainError, Game, GameFilter, GamePatch, GameRepository, NewGame};
use crate::models::game::{ActiveModel, Column, Entity as GameEntity, Model};
use crate::models::question::{self, Entity as QuestionEntity};

/// SeaORM-based implementation of GameRepository
pub struct SeaOrmGameRepository {
    db: DatabaseConnection,
}

impl SeaOrmGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for Game {
    fn from(g: Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            difficulty: g.difficulty.parse().unwrap_or_default(),
            category: g.category,
            slug: g.slug,
            icon_name: g.icon_name,
            is_active: g.is_active,
            coming_soon: g.coming_soon,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

fn slug_taken(slug: &str) -> String {
    format!("A game with slug '{}' already exists", slug)
}

#[async_trait]
impl GameRepository for SeaOrmGameRepository {
    async fn list(&self, filter: GameFilter) -> Result<Vec<Game>, DomainError> {
        let mut query = GameEntity::find();

        if !filter.include_inactive {
            query = query.filter(Column::IsActive.eq(true));
        }

        if let Some(category) = &filter.category
            && !category.is_empty()
        {
            query = query.filter(Column::Category.eq(category));
        }

        let games = query
            .order_by_asc(Column::ComingSoon)
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        Ok(games.into_iter().map(Game::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Game>, DomainError> {
        let game = GameEntity::find_by_id(id).one(&self.db).await?;
        Ok(game.map(Game::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Game>, DomainError> {
        let game = GameEntity::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(game.map(Game::from))
    }

    async fn create(&self, game: NewGame) -> Result<Game, DomainError> {
        let slug = game
            .slug
            .ok_or_else(|| DomainError::validation("slug is required"))?;
        let now = now();

        let model = ActiveModel {
            title: Set(game.title),
            description: Set(game.description),
            difficulty: Set(game.difficulty.as_str().to_owned()),
            category: Set(game.category),
            slug: Set(slug.clone()),
            icon_name: Set(game.icon_name),
            is_active: Set(game.is_active),
            coming_soon: Set(game.coming_soon),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, || slug_taken(&slug)))?;

        tracing::info!("Created game '{}' ({})", saved.slug, saved.id);
        Ok(Game::from(saved))
    }

    /// A slug change is carried over to the game's questions in the same transaction.
    async fn update(&self, id: i32, patch: GamePatch) -> Result<Game, DomainError> {
        let txn = self.db.begin().await?;

        let existing = GameEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Game"))?;
        let old_slug = existing.slug.clone();

        let mut active: ActiveModel = existing.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(difficulty) = patch.difficulty {
            active.difficulty = Set(difficulty.as_str().to_owned());
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(slug) = &patch.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(icon_name) = patch.icon_name {
            active.icon_name = Set(Some(icon_name));
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(coming_soon) = patch.coming_soon {
            active.coming_soon = Set(coming_soon);
        }
        active.updated_at = Set(now());

        let saved = active.update(&txn).await.map_err(|e| {
            conflict_or_db(e, || slug_taken(patch.slug.as_deref().unwrap_or_default()))
        })?;

        if saved.slug != old_slug {
            let moved = QuestionEntity::update_many()
                .col_expr(question::Column::GameSlug, Expr::value(saved.slug.clone()))
                .filter(question::Column::GameSlug.eq(old_slug.as_str()))
                .exec(&txn)
                .await?;
            tracing::info!(
                "Game {} renamed '{}' -> '{}', {} questions moved",
                id,
                old_slug,
                saved.slug,
                moved.rows_affected
            );
        }

        txn.commit().await?;
        Ok(Game::from(saved))
    }

    /// Progress rows go with the game (foreign key cascade). Its questions are deleted so
    /// a later game reusing the slug starts with an empty bank.
    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let game = GameEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Game"))?;

        let removed = QuestionEntity::delete_many()
            .filter(question::Column::GameSlug.eq(game.slug.as_str()))
            .exec(&txn)
            .await?;
        GameEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            "Deleted game '{}' ({}) with {} questions",
            game.slug,
            id,
            removed.rows_affected
        );
        Ok(())
    }
}
