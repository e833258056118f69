pub mod catalog;
pub mod conversation;
pub mod intent;
pub mod models;
pub mod pacing;

pub use catalog::{card_for, catalog, Catalog, CategoryCard, GREETING, QUICK_PROMPTS};
pub use conversation::{ReplyDirective, Transcript, TurnError};
pub use intent::{
    classify, classify_with, normalize_text, respond, response_for, KeywordRule, MatchMode,
    KEYWORD_RULES,
};
pub use models::*;
pub use pacing::ReplyPacing;
