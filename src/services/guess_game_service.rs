//! Number guessing game, one game per chat.
//!
//! The store is created by the caller and shared through `web::Data`; each
//! game sits behind its own lock so chats never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::Rng;
use serde::Serialize;

use crate::error::GameError;
use crate::models::LocalizedText;

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 100;
pub const RANGE_FLOOR: i64 = 1;
pub const RANGE_CEILING: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuessOutcome {
    Invalid,
    OutOfRange { min: i64, max: i64 },
    Higher,
    Lower,
    Correct { attempts: u32 },
    GameOver,
}

impl GuessOutcome {
    pub fn message(&self) -> LocalizedText {
        match self {
            GuessOutcome::Invalid => LocalizedText::new(
                "Пожалуйста, отправьте целое число",
                "Please send a whole number",
            ),
            GuessOutcome::OutOfRange { min, max } => LocalizedText::new(
                format!("Число должно быть от {} до {}", min, max),
                format!("Out of range. Please guess between {} and {}", min, max),
            ),
            GuessOutcome::Higher => LocalizedText::new("Больше ⬆️", "Higher ⬆️"),
            GuessOutcome::Lower => LocalizedText::new("Меньше ⬇️", "Lower ⬇️"),
            GuessOutcome::Correct { attempts } => LocalizedText::new(
                format!("🎉 Верно! Попыток: {}", attempts),
                format!("🎉 Correct! You guessed it in {} attempts", attempts),
            ),
            GuessOutcome::GameOver => LocalizedText::new(
                "Игра окончена. Начните новую игру",
                "This game is over. Start a new game to play again",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub chat_id: i64,
    pub min: i64,
    pub max: i64,
    pub attempts: u32,
    pub active: bool,
}

#[derive(Debug)]
pub struct GuessGame {
    min: i64,
    max: i64,
    target: i64,
    attempts: u32,
    active: bool,
}

impl GuessGame {
    pub fn new<R: Rng>(min: i64, max: i64, rng: &mut R) -> Result<Self, GameError> {
        if min >= max || min < RANGE_FLOOR || max > RANGE_CEILING {
            return Err(GameError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            target: rng.gen_range(min..=max),
            attempts: 0,
            active: true,
        })
    }

    /// Only well-formed, in-range guesses count as attempts.
    pub fn guess(&mut self, text: &str) -> GuessOutcome {
        if !self.active {
            return GuessOutcome::GameOver;
        }

        let value: i64 = match text.trim().parse() {
            Ok(value) => value,
            Err(_) => return GuessOutcome::Invalid,
        };

        if value < self.min || value > self.max {
            return GuessOutcome::OutOfRange {
                min: self.min,
                max: self.max,
            };
        }

        self.attempts += 1;
        if value < self.target {
            GuessOutcome::Higher
        } else if value > self.target {
            GuessOutcome::Lower
        } else {
            self.active = false;
            GuessOutcome::Correct {
                attempts: self.attempts,
            }
        }
    }

    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    fn status(&self, chat_id: i64) -> GameStatus {
        GameStatus {
            chat_id,
            min: self.min,
            max: self.max,
            attempts: self.attempts,
            active: self.active,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct GameStore {
    games: Mutex<HashMap<i64, Arc<Mutex<GuessGame>>>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn game(&self, chat_id: i64) -> Option<Arc<Mutex<GuessGame>>> {
        lock(&self.games).get(&chat_id).cloned()
    }

    /// Start or restart the chat's game. Without an explicit range the
    /// previous game's range is reused, falling back to 1-100.
    pub fn start(&self, chat_id: i64, range: Option<(i64, i64)>) -> Result<GameStatus, GameError> {
        self.start_with_rng(chat_id, range, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng>(
        &self,
        chat_id: i64,
        range: Option<(i64, i64)>,
        rng: &mut R,
    ) -> Result<GameStatus, GameError> {
        let (min, max) = match range {
            Some(range) => range,
            None => match self.game(chat_id) {
                Some(previous) => {
                    let range = lock(&previous).range();
                    range
                }
                None => (DEFAULT_MIN, DEFAULT_MAX),
            },
        };

        let game = GuessGame::new(min, max, rng)?;
        let status = game.status(chat_id);
        lock(&self.games).insert(chat_id, Arc::new(Mutex::new(game)));

        log::info!("Started game for chat {} in range {}..={}", chat_id, min, max);
        Ok(status)
    }

    pub fn guess(&self, chat_id: i64, text: &str) -> Result<(GuessOutcome, GameStatus), GameError> {
        let game = self.game(chat_id).ok_or(GameError::NotStarted(chat_id))?;
        let mut game = lock(&game);
        let outcome = game.guess(text);
        log::debug!("Chat {} guessed {:?}: {:?}", chat_id, text, outcome);
        Ok((outcome, game.status(chat_id)))
    }

    pub fn status(&self, chat_id: i64) -> Result<GameStatus, GameError> {
        let game = self.game(chat_id).ok_or(GameError::NotStarted(chat_id))?;
        let status = lock(&game).status(chat_id);
        Ok(status)
    }
}
