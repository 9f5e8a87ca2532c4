use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::register,
        api::auth::login,
        api::auth::me,
        api::user::list_users,
        api::user::get_profile,
        api::user::update_profile,
        api::user::delete_profile,
        api::games::list_games,
        api::games::get_game,
        api::games::create_game,
        api::games::update_game,
        api::games::delete_game,
        api::questions::list_questions,
        api::questions::random_questions,
        api::questions::get_question,
        api::questions::create_question,
        api::questions::update_question,
        api::questions::delete_question,
        api::progress::list_progress,
        api::progress::get_progress,
        api::progress::update_progress,
        api::word_of_the_day::today,
        api::word_of_the_day::by_date,
        api::word_of_the_day::list_words,
        api::word_of_the_day::create_word,
        api::word_of_the_day::delete_word,
    ),
    tags(
        (name = "ilmquest", description = "IlmQuest API")
    )
)]
pub struct ApiDoc;
