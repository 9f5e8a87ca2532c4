use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_owned()))
        .await
        .map(|_| ())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    // Create users table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Create games table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL DEFAULT 'easy',
            category TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            icon_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_games_category ON games(category);
        "#,
    )
    .await?;

    // Migration 002: games can be announced before they are playable.
    // SQLite has no ADD COLUMN IF NOT EXISTS, so the error on re-run is ignored.
    let _ = execute(
        db,
        "ALTER TABLE games ADD COLUMN coming_soon INTEGER NOT NULL DEFAULT 0",
    )
    .await;

    // Create questions table. Kind-specific fields live in the JSON payload.
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            game_slug TEXT NOT NULL,
            game_type TEXT NOT NULL,
            difficulty TEXT NOT NULL DEFAULT 'easy',
            payload TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_questions_game_slug ON questions(game_slug);
        CREATE INDEX IF NOT EXISTS idx_questions_game_type ON questions(game_type);
        CREATE INDEX IF NOT EXISTS idx_questions_active ON questions(is_active);
        "#,
    )
    .await?;

    // Create user_progress table: one row per (user, game)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS user_progress (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            game_id INTEGER NOT NULL,
            score INTEGER NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 1,
            completed_challenges TEXT NOT NULL DEFAULT '[]',
            streak INTEGER NOT NULL DEFAULT 0,
            last_played TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(user_id, game_id),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (game_id) REFERENCES games(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_user_progress_user ON user_progress(user_id);
        "#,
    )
    .await?;

    // Create words_of_the_day table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS words_of_the_day (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            arabic TEXT,
            transliteration TEXT,
            meaning TEXT NOT NULL,
            example TEXT,
            date_active TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Migration 003: source reference (ayah / hadith) for words
    let _ = execute(db, "ALTER TABLE words_of_the_day ADD COLUMN reference TEXT").await;

    Ok(())
}
