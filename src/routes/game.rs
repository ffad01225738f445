use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::GameError;
use crate::services::guess_game_service::{GameStore, DEFAULT_MAX, DEFAULT_MIN};

#[derive(Deserialize, Default)]
pub struct StartGame {
    min: Option<i64>,
    max: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum GuessInput {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
pub struct GuessRequest {
    guess: GuessInput,
}

/*
    /api/games/{chat_id}/start
*/
pub async fn start(
    path: web::Path<i64>,
    body: Option<web::Json<StartGame>>,
    games: web::Data<Arc<GameStore>>,
) -> Result<HttpResponse, GameError> {
    let chat_id = path.into_inner();
    let request = body.map(|b| b.into_inner()).unwrap_or_default();

    let range = match (request.min, request.max) {
        (None, None) => None,
        (min, max) => Some((min.unwrap_or(DEFAULT_MIN), max.unwrap_or(DEFAULT_MAX))),
    };

    let status = games.start(chat_id, range)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "game": status,
        "message": {
            "ru": format!("Я загадал число от {} до {}", status.min, status.max),
            "en": format!("I picked a number between {} and {}", status.min, status.max)
        }
    })))
}

/*
    /api/games/{chat_id}/guess
*/
pub async fn guess(
    path: web::Path<i64>,
    body: web::Json<GuessRequest>,
    games: web::Data<Arc<GameStore>>,
) -> Result<HttpResponse, GameError> {
    let text = match &body.guess {
        GuessInput::Number(n) => n.to_string(),
        GuessInput::Text(s) => s.clone(),
    };

    let (outcome, status) = games.guess(path.into_inner(), &text)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "result": outcome,
        "message": outcome.message(),
        "game": status
    })))
}

/*
    /api/games/{chat_id}
*/
pub async fn status(
    path: web::Path<i64>,
    games: web::Data<Arc<GameStore>>,
) -> Result<HttpResponse, GameError> {
    let status = games.status(path.into_inner())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true, "game": status })))
}
