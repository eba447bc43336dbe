use serde::{Deserialize, Serialize};

pub const SUCCESS_TITLE: &str = "Анализ завершён";
pub const SUCCESS_DESCRIPTION: &str = "Деталь успешно распознана";
pub const FAILURE_TITLE: &str = "Ошибка анализа";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Success,
    Error,
}

/// A user-facing message raised when an analysis finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn analysis_complete() -> Self {
        Self {
            level: Level::Success,
            title: SUCCESS_TITLE.to_string(),
            description: SUCCESS_DESCRIPTION.to_string(),
        }
    }

    pub fn analysis_failed(reason: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: FAILURE_TITLE.to_string(),
            description: reason.into(),
        }
    }
}
