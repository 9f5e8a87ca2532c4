pub mod game;
pub mod question;
pub mod user;
pub mod user_progress;
pub mod word_of_the_day;
