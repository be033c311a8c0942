use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, ErrorClass};

/// Ошибка внешнего API (то, что отдаём фронту / клиенту).
///
/// `code` стабилен и годится для ветвления в клиенте, `message` – для людей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub class: ErrorClass,
    pub message: String,
}

impl ApiError {
    /// Неправильные входные данные (например, битый JSON).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BadRequest".into(),
            class: ErrorClass::Rejected,
            message: message.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self {
            code: err.code().into(),
            class: err.class(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(err.to_string())
    }
}
