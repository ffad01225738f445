use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::LocalizedText;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: LocalizedText,
}

impl FieldError {
    pub fn new(field: &str, ru: &str, en: &str) -> Self {
        Self {
            field: field.to_string(),
            message: LocalizedText::new(ru, en),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid preferences: {}", .0.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<FieldError>),

    #[error("no attractions match the requested preferences")]
    NoCandidates,

    #[error("malformed fixture data: {0}")]
    Fixture(String),

    #[error("internal planner error: {0}")]
    Internal(String),

    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// The "no itinerary possible" outcome, as opposed to a real failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, PlannerError::NoCandidates)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    error: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            PlannerError::NoCandidates => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PlannerError::Validation(errors) => ErrorBody {
                ok: false,
                error: LocalizedText::new(
                    "Некорректные параметры маршрута",
                    "Invalid itinerary preferences",
                ),
                details: Some(errors.as_slice()),
            },
            PlannerError::NoCandidates => ErrorBody {
                ok: false,
                error: LocalizedText::new(
                    "Не найдено подходящих мест для ваших предпочтений",
                    "No suitable destinations found for your preferences",
                ),
                details: None,
            },
            other => {
                log::error!("Itinerary request failed: {}", other);
                ErrorBody {
                    ok: false,
                    error: LocalizedText::new(
                        "Произошла ошибка при генерации маршрута",
                        "An error occurred while generating the itinerary",
                    ),
                    details: None,
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("invalid range {min}..={max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("no game started for chat {0}")]
    NotStarted(i64),
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            GameError::NotStarted(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            GameError::InvalidRange { .. } => LocalizedText::new(
                "Диапазон должен быть от 1 до 1 000 000, причём минимум меньше максимума",
                "Range must be within 1-1,000,000 with min below max",
            ),
            GameError::NotStarted(_) => LocalizedText::new(
                "Игра не начата. Начните новую игру",
                "No game in progress. Start a new game first",
            ),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            ok: false,
            error,
            details: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlannerError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlannerError::NoCandidates.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PlannerError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = PlannerError::Validation(vec![
            FieldError::new("days", "дни", "days"),
            FieldError::new("interests", "интересы", "interests"),
        ]);
        assert_eq!(err.to_string(), "invalid preferences: days, interests");
        assert!(!err.is_empty_result());
        assert!(PlannerError::NoCandidates.is_empty_result());
    }

    #[test]
    fn test_game_error_status_codes() {
        assert_eq!(
            GameError::InvalidRange { min: 5, max: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GameError::NotStarted(42).status_code(), StatusCode::NOT_FOUND);
    }
}
