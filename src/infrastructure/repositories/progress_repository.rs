//! SeaORM implementation of ProgressRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::conflict_or_db;
use crate::domain::{DomainError, Game, Progress, ProgressRepository, ProgressState, ProgressUpdate};
use crate::models::game::Entity as GameEntity;
use crate::models::user_progress::{ActiveModel, Column, Entity as ProgressEntity, Model};

/// SeaORM-based implementation of ProgressRepository
pub struct SeaOrmProgressRepository {
    db: DatabaseConnection,
}

impl SeaOrmProgressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn state_of(row: &Model) -> Result<ProgressState, DomainError> {
    Ok(ProgressState {
        score: row.score,
        level: row.level,
        completed_challenges: serde_json::from_str(&row.completed_challenges)?,
        streak: row.streak,
        last_played: row
            .last_played
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc)),
    })
}

fn write_state(active: &mut ActiveModel, state: &ProgressState) -> Result<(), DomainError> {
    active.score = Set(state.score);
    active.level = Set(state.level);
    active.completed_challenges = Set(serde_json::to_string(&state.completed_challenges)?);
    active.streak = Set(state.streak);
    active.last_played = Set(state.last_played.map(|d| d.to_rfc3339()));
    Ok(())
}

fn to_progress(row: Model, game_slug: String) -> Result<Progress, DomainError> {
    let state = state_of(&row)?;
    Ok(Progress {
        id: Some(row.id),
        user_id: row.user_id,
        game_id: row.game_id,
        game_slug,
        score: state.score,
        level: state.level,
        completed_challenges: state.completed_challenges,
        streak: state.streak,
        last_played: row.last_played,
    })
}

#[async_trait]
impl ProgressRepository for SeaOrmProgressRepository {
    async fn find(&self, user_id: i32, game: &Game) -> Result<Option<Progress>, DomainError> {
        ProgressEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::GameId.eq(game.id))
            .one(&self.db)
            .await?
            .map(|row| to_progress(row, game.slug.clone()))
            .transpose()
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Progress>, DomainError> {
        let rows = ProgressEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::LastPlayed)
            .find_also_related(GameEntity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(row, game)| {
                let slug = game.map(|g| g.slug).unwrap_or_default();
                to_progress(row, slug)
            })
            .collect()
    }

    async fn upsert(
        &self,
        user_id: i32,
        game: &Game,
        update: ProgressUpdate,
    ) -> Result<Progress, DomainError> {
        update.validate()?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let existing = ProgressEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::GameId.eq(game.id))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(row) => {
                let state = state_of(&row)?.apply(&update, now);
                let mut active: ActiveModel = row.into();
                write_state(&mut active, &state)?;
                active.updated_at = Set(now.to_rfc3339());
                active.update(&txn).await?
            }
            None => {
                let state = ProgressState::default().apply(&update, now);
                let mut active = ActiveModel {
                    user_id: Set(user_id),
                    game_id: Set(game.id),
                    created_at: Set(now.to_rfc3339()),
                    updated_at: Set(now.to_rfc3339()),
                    ..Default::default()
                };
                write_state(&mut active, &state)?;
                // The (user_id, game_id) unique index rejects a concurrent first save
                active.insert(&txn).await.map_err(|e| {
                    conflict_or_db(e, || "Progress was saved concurrently, retry".to_string())
                })?
            }
        };

        txn.commit().await?;
        tracing::debug!(
            "Progress for user {} on '{}': score={} streak={}",
            user_id,
            game.slug,
            saved.score,
            saved.streak
        );
        to_progress(saved, game.slug.clone())
    }
}
