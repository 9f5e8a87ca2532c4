use chrono::{Duration, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde_json::{Value, json};

use crate::auth::hash_password;
use crate::domain::{DomainError, NewQuestion, QuestionFilter, QuestionRepository};
use crate::infrastructure::SeaOrmQuestionRepository;
use crate::models::{game, user, word_of_the_day};

struct DemoGame {
    title: &'static str,
    slug: &'static str,
    category: &'static str,
    difficulty: &'static str,
    icon_name: &'static str,
    description: &'static str,
    coming_soon: bool,
}

const GAMES: &[DemoGame] = &[
    DemoGame {
        title: "Quran Quiz",
        slug: "quran-quiz",
        category: "quran",
        difficulty: "easy",
        icon_name: "book-open",
        description: "Test what you know about the surahs of the Quran.",
        coming_soon: false,
    },
    DemoGame {
        title: "True or False",
        slug: "true-or-false",
        category: "fiqh",
        difficulty: "easy",
        icon_name: "check-circle",
        description: "Decide whether each statement is true or false.",
        coming_soon: false,
    },
    DemoGame {
        title: "Prophets Matching",
        slug: "prophets-matching",
        category: "prophets",
        difficulty: "medium",
        icon_name: "link",
        description: "Match each prophet with his story.",
        coming_soon: false,
    },
    DemoGame {
        title: "Pillars Word Search",
        slug: "pillars-word-search",
        category: "vocabulary",
        difficulty: "easy",
        icon_name: "search",
        description: "Find the five pillars hidden in the grid.",
        coming_soon: false,
    },
    DemoGame {
        title: "Arabic Flashcards",
        slug: "arabic-flashcards",
        category: "vocabulary",
        difficulty: "easy",
        icon_name: "layers",
        description: "Learn common Arabic words.",
        coming_soon: false,
    },
    DemoGame {
        title: "Memory Cards",
        slug: "memory-cards",
        category: "vocabulary",
        difficulty: "medium",
        icon_name: "grid",
        description: "Flip the cards and find the matching pairs.",
        coming_soon: false,
    },
    DemoGame {
        title: "Islamic Crossword",
        slug: "islamic-crossword",
        category: "general",
        difficulty: "hard",
        icon_name: "hash",
        description: "Fill in the crossword from the clues.",
        coming_soon: false,
    },
    DemoGame {
        title: "Word Hunt",
        slug: "word-hunt",
        category: "vocabulary",
        difficulty: "medium",
        icon_name: "target",
        description: "Guess the hidden word from its hint.",
        coming_soon: false,
    },
    DemoGame {
        title: "Seerah Timeline",
        slug: "seerah-timeline",
        category: "seerah",
        difficulty: "hard",
        icon_name: "clock",
        description: "Put the events of the Seerah in order.",
        coming_soon: true,
    },
];

fn demo_questions() -> Vec<(&'static str, Value)> {
    vec![
        (
            "quran-quiz",
            json!({
                "gameType": "quiz",
                "question": "Which surah is known as the heart of the Quran?",
                "options": ["Al-Fatiha", "Ya-Sin", "Al-Mulk", "Al-Kahf"],
                "correctAnswer": "Ya-Sin"
            }),
        ),
        (
            "quran-quiz",
            json!({
                "gameType": "multiple-choice",
                "question": "How many surahs are in the Quran?",
                "options": ["99", "114", "120", "30"],
                "correctOptionIndex": 1,
                "explanation": "The Quran has 114 surahs in 30 juz."
            }),
        ),
        (
            "true-or-false",
            json!({
                "gameType": "true-false",
                "statement": "There are five daily prayers.",
                "isTrue": true
            }),
        ),
        (
            "true-or-false",
            json!({
                "gameType": "true-false",
                "statement": "Ramadan is the eleventh month of the Islamic calendar.",
                "isTrue": false,
                "explanation": "Ramadan is the ninth month."
            }),
        ),
        (
            "prophets-matching",
            json!({
                "gameType": "matching",
                "prompt": "Match the prophet with the event",
                "pairs": [
                    {"left": "Nuh", "right": "The ark"},
                    {"left": "Musa", "right": "The parting of the sea"},
                    {"left": "Yunus", "right": "The whale"}
                ]
            }),
        ),
        (
            "pillars-word-search",
            json!({
                "gameType": "word-search",
                "words": ["SHAHADA", "SALAH", "ZAKAT", "SAWM", "HAJJ"],
                "gridSize": 8,
                "hint": "The five pillars of Islam"
            }),
        ),
        (
            "arabic-flashcards",
            json!({
                "gameType": "flashcard",
                "front": "كتاب",
                "back": "Book (kitab)",
                "category": "nouns"
            }),
        ),
        (
            "memory-cards",
            json!({
                "gameType": "memory-card",
                "term": "Sabr",
                "match": "Patience",
                "icon": "heart"
            }),
        ),
        (
            "islamic-crossword",
            json!({
                "gameType": "crossword",
                "title": "Pillars",
                "size": 7,
                "clues": [
                    {"number": 1, "direction": "across", "clue": "Prayer", "answer": "SALAH", "row": 0, "col": 0},
                    {"number": 1, "direction": "down", "clue": "Fasting", "answer": "SAWM", "row": 0, "col": 0},
                    {"number": 2, "direction": "down", "clue": "Pilgrimage", "answer": "HAJJ", "row": 0, "col": 4}
                ]
            }),
        ),
        (
            "word-hunt",
            json!({
                "gameType": "word-hunt",
                "word": "TAWHEED",
                "hint": "The oneness of Allah",
                "category": "aqeedah"
            }),
        ),
    ]
}

/// (word, arabic, transliteration, meaning, example, reference)
const WORDS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("Shukr", "شكر", "shukr", "Gratitude", "Shukr for every blessing, big or small.", "Quran 14:7"),
    ("Sabr", "صبر", "sabr", "Patience", "Sabr in hardship brings reward.", "Quran 2:153"),
    ("Taqwa", "تقوى", "taqwa", "God-consciousness", "Taqwa guides every choice.", "Quran 49:13"),
    ("Ihsan", "إحسان", "ihsan", "Excellence in worship", "Worship as if you see Him.", "Sahih Muslim 8"),
    ("Rahmah", "رحمة", "rahmah", "Mercy", "His mercy encompasses all things.", "Quran 7:156"),
    ("Tawakkul", "توكل", "tawakkul", "Trust in Allah", "Tie your camel, then trust.", "Tirmidhi 2517"),
    ("Ilm", "علم", "ilm", "Knowledge", "Seeking knowledge is an obligation.", "Ibn Majah 224"),
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    let now = Utc::now();
    let timestamp = now.to_rfc3339();

    // 1. Users
    let users = [
        ("admin", "admin@ilmquest.local", "admin1234", "admin"),
        ("student", "student@ilmquest.local", "student1234", "user"),
    ];
    for (username, email, password, role) in users {
        // Either unique column may already be taken by a real account
        let exists = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let password_hash = hash_password(password).map_err(DomainError::Internal)?;
        user::ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            role: Set(role.to_owned()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        tracing::info!("Seeded {} user '{}'", role, username);
    }

    // 2. Games
    for g in GAMES {
        game::Entity::insert(game::ActiveModel {
            title: Set(g.title.to_owned()),
            description: Set(g.description.to_owned()),
            difficulty: Set(g.difficulty.to_owned()),
            category: Set(g.category.to_owned()),
            slug: Set(g.slug.to_owned()),
            icon_name: Set(Some(g.icon_name.to_owned())),
            is_active: Set(true),
            coming_soon: Set(g.coming_soon),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp.clone()),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(game::Column::Slug).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    }

    // 3. Questions, only for games whose bank is still empty
    let bank = SeaOrmQuestionRepository::new(db.clone());
    let mut seeded = 0;
    for g in GAMES {
        let all = QuestionFilter {
            include_inactive: true,
            ..Default::default()
        };
        if !bank.list(g.slug, all).await?.is_empty() {
            continue;
        }
        for (_, body) in demo_questions().into_iter().filter(|(slug, _)| *slug == g.slug) {
            let question: NewQuestion = serde_json::from_value(body).map_err(|e| {
                DomainError::Internal(format!("demo question for {}: {}", g.slug, e))
            })?;
            bank.create(g.slug, question).await?;
            seeded += 1;
        }
    }

    // 4. A week of words ending today
    for (offset, (word, arabic, transliteration, meaning, example, reference)) in
        WORDS.iter().enumerate()
    {
        let date = (now - Duration::days((WORDS.len() - 1 - offset) as i64)).date_naive();
        word_of_the_day::Entity::insert(word_of_the_day::ActiveModel {
            word: Set(word.to_string()),
            arabic: Set(Some(arabic.to_string())),
            transliteration: Set(Some(transliteration.to_string())),
            meaning: Set(meaning.to_string()),
            example: Set(Some(example.to_string())),
            reference: Set(Some(reference.to_string())),
            date_active: Set(date.format("%Y-%m-%d").to_string()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp.clone()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(word_of_the_day::Column::DateActive)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    }

    tracing::info!(
        "Demo data ready: {} games, {} new questions, {} words",
        GAMES.len(),
        seeded,
        WORDS.len()
    );
    Ok(())
}
