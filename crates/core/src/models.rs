use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Schedules,
    Facilities,
    Dining,
    Library,
    Administration,
    StudentServices,
    Map,
    Parking,
    Default,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 9] = [
        Self::Schedules,
        Self::Facilities,
        Self::Dining,
        Self::Library,
        Self::Administration,
        Self::StudentServices,
        Self::Map,
        Self::Parking,
        Self::Default,
    ];

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Facilities => "facilities",
            Self::Dining => "dining",
            Self::Library => "library",
            Self::Administration => "administration",
            Self::StudentServices => "student_services",
            Self::Map => "map",
            Self::Parking => "parking",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(content, Sender::User, at)
    }

    pub fn assistant(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(content, Sender::Assistant, at)
    }

    fn new(content: impl Into<String>, sender: Sender, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: at,
        }
    }
}
