//! Question kinds
//!
//! Every game draws its questions from one bank keyed by the game slug. The shape of a
//! question depends on its `gameType`, so the kinds are a tagged union: the tag travels on
//! the wire as `gameType` and the variant carries the type-specific fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DomainError;
use super::game::Difficulty;

/// Discriminator of the question kinds, kebab-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    TrueFalse,
    MultipleChoice,
    Matching,
    WordSearch,
    Quiz,
    Flashcard,
    MemoryCard,
    Crossword,
    WordHunt,
}

impl GameType {
    pub const ALL: [GameType; 9] = [
        GameType::TrueFalse,
        GameType::MultipleChoice,
        GameType::Matching,
        GameType::WordSearch,
        GameType::Quiz,
        GameType::Flashcard,
        GameType::MemoryCard,
        GameType::Crossword,
        GameType::WordHunt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::TrueFalse => "true-false",
            GameType::MultipleChoice => "multiple-choice",
            GameType::Matching => "matching",
            GameType::WordSearch => "word-search",
            GameType::Quiz => "quiz",
            GameType::Flashcard => "flashcard",
            GameType::MemoryCard => "memory-card",
            GameType::Crossword => "crossword",
            GameType::WordHunt => "word-hunt",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown game type '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalse {
    pub statement: String,
    pub is_true: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoice {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub pairs: Vec<MatchPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSearch {
    pub words: Vec<String>,
    pub grid_size: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Like multiple choice, but the answer is given as option text rather than position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCard {
    pub term: String,
    #[serde(rename = "match")]
    pub counterpart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswordClue {
    pub number: u32,
    pub direction: Direction,
    pub clue: String,
    pub answer: String,
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossword {
    pub title: String,
    pub size: u8,
    pub clues: Vec<CrosswordClue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordHunt {
    pub word: String,
    pub hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gameType", rename_all = "kebab-case")]
pub enum QuestionKind {
    TrueFalse(TrueFalse),
    MultipleChoice(MultipleChoice),
    Matching(Matching),
    WordSearch(WordSearch),
    Quiz(Quiz),
    Flashcard(Flashcard),
    MemoryCard(MemoryCard),
    Crossword(Crossword),
    WordHunt(WordHunt),
}

const WORD_SEARCH_GRID: std::ops::RangeInclusive<u8> = 5..=20;
const CROSSWORD_GRID: std::ops::RangeInclusive<u8> = 3..=25;

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_options(options: &[String]) -> Result<(), DomainError> {
    if options.len() < 2 {
        return Err(DomainError::validation("at least two options are required"));
    }
    for option in options {
        require("option", option)?;
    }
    Ok(())
}

/// Number of grid cells a word occupies (spaces are not placed).
fn cell_count(word: &str) -> usize {
    word.chars().filter(|c| !c.is_whitespace()).count()
}

impl QuestionKind {
    pub fn game_type(&self) -> GameType {
        match self {
            QuestionKind::TrueFalse(_) => GameType::TrueFalse,
            QuestionKind::MultipleChoice(_) => GameType::MultipleChoice,
            QuestionKind::Matching(_) => GameType::Matching,
            QuestionKind::WordSearch(_) => GameType::WordSearch,
            QuestionKind::Quiz(_) => GameType::Quiz,
            QuestionKind::Flashcard(_) => GameType::Flashcard,
            QuestionKind::MemoryCard(_) => GameType::MemoryCard,
            QuestionKind::Crossword(_) => GameType::Crossword,
            QuestionKind::WordHunt(_) => GameType::WordHunt,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            QuestionKind::TrueFalse(q) => require("statement", &q.statement),
            QuestionKind::MultipleChoice(q) => {
                require("question", &q.question)?;
                require_options(&q.options)?;
                if q.correct_option_index >= q.options.len() {
                    return Err(DomainError::validation(format!(
                        "correctOptionIndex {} is out of range for {} options",
                        q.correct_option_index,
                        q.options.len()
                    )));
                }
                Ok(())
            }
            QuestionKind::Matching(q) => {
                if q.pairs.is_empty() {
                    return Err(DomainError::validation("at least one pair is required"));
                }
                for pair in &q.pairs {
                    require("pair.left", &pair.left)?;
                    require("pair.right", &pair.right)?;
                }
                Ok(())
            }
            QuestionKind::WordSearch(q) => {
                if !WORD_SEARCH_GRID.contains(&q.grid_size) {
                    return Err(DomainError::validation(format!(
                        "gridSize must be between {} and {}",
                        WORD_SEARCH_GRID.start(),
                        WORD_SEARCH_GRID.end()
                    )));
                }
                if q.words.is_empty() {
                    return Err(DomainError::validation("at least one word is required"));
                }
                for word in &q.words {
                    require("word", word)?;
                    if cell_count(word) > q.grid_size as usize {
                        return Err(DomainError::validation(format!(
                            "'{}' does not fit in a {}x{} grid",
                            word, q.grid_size, q.grid_size
                        )));
                    }
                }
                Ok(())
            }
            QuestionKind::Quiz(q) => {
                require("question", &q.question)?;
                require_options(&q.options)?;
                if !q.options.iter().any(|o| o == &q.correct_answer) {
                    return Err(DomainError::validation(
                        "correctAnswer must be one of the options",
                    ));
                }
                Ok(())
            }
            QuestionKind::Flashcard(q) => {
                require("front", &q.front)?;
                require("back", &q.back)
            }
            QuestionKind::MemoryCard(q) => {
                require("term", &q.term)?;
                require("match", &q.counterpart)
            }
            QuestionKind::Crossword(q) => {
                require("title", &q.title)?;
                if !CROSSWORD_GRID.contains(&q.size) {
                    return Err(DomainError::validation(format!(
                        "size must be between {} and {}",
                        CROSSWORD_GRID.start(),
                        CROSSWORD_GRID.end()
                    )));
                }
                if q.clues.is_empty() {
                    return Err(DomainError::validation("at least one clue is required"));
                }
                let size = q.size as usize;
                for clue in &q.clues {
                    require("clue", &clue.clue)?;
                    require("answer", &clue.answer)?;
                    let (row, col) = (clue.row as usize, clue.col as usize);
                    let len = cell_count(&clue.answer);
                    let fits = match clue.direction {
                        Direction::Across => row < size && col + len <= size,
                        Direction::Down => col < size && row + len <= size,
                    };
                    if !fits {
                        return Err(DomainError::validation(format!(
                            "answer for clue {} does not fit in the grid",
                            clue.number
                        )));
                    }
                }
                Ok(())
            }
            QuestionKind::WordHunt(q) => {
                require("word", &q.word)?;
                require("hint", &q.hint)?;
                if !q.word.chars().all(char::is_alphabetic) {
                    return Err(DomainError::validation("word must contain letters only"));
                }
                Ok(())
            }
        }
    }
}

/// A stored question as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub game_slug: String,
    pub difficulty: Difficulty,
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a create request: the kind fields sit next to the shared ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Partial update. `kind` is only replaced when the body names a `gameType`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionPatch {
    pub difficulty: Option<Difficulty>,
    pub is_active: Option<bool>,
    pub kind: Option<QuestionKind>,
}

impl QuestionPatch {
    pub fn from_json(body: Value) -> Result<Self, DomainError> {
        let Value::Object(map) = &body else {
            return Err(DomainError::validation("request body must be a JSON object"));
        };

        let difficulty = match map.get("difficulty") {
            Some(Value::Null) | None => None,
            Some(v) => Some(
                serde_json::from_value(v.clone())
                    .map_err(|e| DomainError::validation(format!("difficulty: {}", e)))?,
            ),
        };
        let is_active = match map.get("isActive") {
            Some(Value::Null) | None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => return Err(DomainError::validation("isActive must be a boolean")),
        };
        let kind = if map.contains_key("gameType") {
            Some(
                serde_json::from_value::<QuestionKind>(body.clone())
                    .map_err(|e| DomainError::validation(e.to_string()))?,
            )
        } else {
            None
        };

        Ok(Self {
            difficulty,
            is_active,
            kind,
        })
    }
}

/// Filter criteria for question listings
#[derive(Debug, Default, Clone)]
pub struct QuestionFilter {
    pub game_type: Option<GameType>,
    pub difficulty: Option<Difficulty>,
    pub include_inactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn multiple_choice(index: usize) -> QuestionKind {
        QuestionKind::MultipleChoice(MultipleChoice {
            question: "How many pillars of Islam are there?".into(),
            options: vec!["Three".into(), "Five".into(), "Seven".into()],
            correct_option_index: index,
            explanation: None,
        })
    }

    #[test]
    fn game_type_parses_kebab_case() {
        assert_eq!("word-search".parse::<GameType>().unwrap(), GameType::WordSearch);
        assert_eq!("true-false".parse::<GameType>().unwrap(), GameType::TrueFalse);
        assert!("wordsearch".parse::<GameType>().is_err());
        for t in GameType::ALL {
            assert_eq!(t.to_string().parse::<GameType>().unwrap(), t);
        }
    }

    #[test]
    fn question_kind_is_tagged_by_game_type() {
        let body = json!({
            "gameType": "true-false",
            "statement": "Ramadan is the ninth month of the Hijri calendar.",
            "isTrue": true
        });
        let kind: QuestionKind = serde_json::from_value(body).unwrap();
        assert_eq!(kind.game_type(), GameType::TrueFalse);

        let value = serde_json::to_value(&multiple_choice(1)).unwrap();
        assert_eq!(value["gameType"], "multiple-choice");
        assert_eq!(value["correctOptionIndex"], 1);
    }

    #[test]
    fn new_question_flattens_kind_and_defaults_difficulty() {
        let body = json!({
            "gameType": "memory-card",
            "term": "Salah",
            "match": "Prayer"
        });
        let q: NewQuestion = serde_json::from_value(body).unwrap();
        assert_eq!(q.difficulty, Difficulty::Easy);
        match q.kind {
            QuestionKind::MemoryCard(card) => assert_eq!(card.counterpart, "Prayer"),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn multiple_choice_index_must_be_in_range() {
        assert!(multiple_choice(2).validate().is_ok());
        assert!(matches!(
            multiple_choice(3).validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn quiz_answer_must_be_an_option() {
        let mut quiz = Quiz {
            question: "Which surah is known as the heart of the Quran?".into(),
            options: vec!["Ya-Sin".into(), "Al-Fatiha".into()],
            correct_answer: "Ya-Sin".into(),
            explanation: None,
        };
        assert!(QuestionKind::Quiz(quiz.clone()).validate().is_ok());
        quiz.correct_answer = "Al-Mulk".into();
        assert!(QuestionKind::Quiz(quiz).validate().is_err());
    }

    #[test]
    fn word_search_words_must_fit_the_grid() {
        let kind = QuestionKind::WordSearch(WordSearch {
            words: vec!["ZAKAT".into(), "SAWM".into()],
            grid_size: 5,
            hint: None,
        });
        assert!(kind.validate().is_ok());

        let kind = QuestionKind::WordSearch(WordSearch {
            words: vec!["SHAHADAH".into()],
            grid_size: 5,
            hint: None,
        });
        assert!(kind.validate().is_err());
    }

    #[test]
    fn crossword_answers_must_stay_inside_the_grid() {
        let clue = |direction, row, col| CrosswordClue {
            number: 1,
            direction,
            clue: "Pilgrimage to Makkah".into(),
            answer: "HAJJ".into(),
            row,
            col,
        };
        let grid = |c| {
            QuestionKind::Crossword(Crossword {
                title: "Pillars".into(),
                size: 5,
                clues: vec![c],
            })
        };
        assert!(grid(clue(Direction::Across, 4, 1)).validate().is_ok());
        assert!(grid(clue(Direction::Across, 0, 2)).validate().is_err());
        assert!(grid(clue(Direction::Down, 1, 4)).validate().is_ok());
        assert!(grid(clue(Direction::Down, 2, 0)).validate().is_err());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let card = QuestionKind::Flashcard(Flashcard {
            front: "  ".into(),
            back: "Charity".into(),
            category: None,
        });
        assert!(card.validate().is_err());

        let hunt = QuestionKind::WordHunt(WordHunt {
            word: "Iman 2".into(),
            hint: "Faith".into(),
            category: None,
        });
        assert!(hunt.validate().is_err());
    }

    #[test]
    fn patch_only_replaces_kind_when_game_type_present() {
        let patch = QuestionPatch::from_json(json!({ "isActive": true })).unwrap();
        assert_eq!(patch.is_active, Some(true));
        assert!(patch.kind.is_none());

        let patch = QuestionPatch::from_json(json!({
            "gameType": "flashcard",
            "front": "Tawhid",
            "back": "Oneness of God",
            "difficulty": "hard"
        }))
        .unwrap();
        assert_eq!(patch.difficulty, Some(Difficulty::Hard));
        assert!(matches!(patch.kind, Some(QuestionKind::Flashcard(_))));

        assert!(QuestionPatch::from_json(json!({ "gameType": "flashcard" })).is_err());
        assert!(QuestionPatch::from_json(json!(["not", "an", "object"])).is_err());
    }
}
