//! Error types for the homework notifier

use std::fmt;

/// Outcome of a review API request that did not return 200 OK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiStatus {
    pub code: u16,
    pub success: bool,
}

impl ApiStatus {
    pub fn from_code(code: u16) -> Self {
        Self {
            code,
            success: code == 200,
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "API ответил кодом {}", self.code)
        } else {
            write!(f, "Ошибка при подключении к API: код ответа {}", self.code)
        }
    }
}

/// Errors that can occur in the homework notifier.
///
/// Poll iteration errors are shown in the chat, so their text is Russian;
/// `Config` and `Delivery` only reach the log.
#[derive(Debug, thiserror::Error)]
pub enum HomeworkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ошибка при подключении к API: {0}")]
    Http(String),

    #[error("Превышено время ожидания ответа: {0}")]
    Timeout(String),

    #[error("{0}")]
    IncorrectStatus(ApiStatus),

    #[error("Ответ API не является JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректный ответ API: {0}")]
    MalformedResponse(String),

    #[error("В ответе API нет ключа {0}")]
    MissingKey(String),

    #[error("Под ключом homeworks ожидался список, получен {0}")]
    UnexpectedType(String),

    #[error("Некорректная запись о работе: {0}")]
    MalformedRecord(String),

    #[error("Неизвестный статус работы: {0}")]
    UnknownStatus(String),

    #[error("API не вернул ни одной работы")]
    EmptyResult,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Result type alias for homework notifier operations
pub type Result<T> = std::result::Result<T, HomeworkError>;
