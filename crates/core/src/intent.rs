use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::ResponseCategory;

static TOKEN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{Nd}]+").expect("valid token separator regex"));

/// Trigger substrings for one response category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: ResponseCategory,
    pub keywords: &'static [&'static str],
}

/// Rules in priority order. The first rule with a matching keyword wins,
/// so reordering changes observable replies.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: ResponseCategory::Schedules,
        keywords: &["schedule", "class", "exam"],
    },
    KeywordRule {
        category: ResponseCategory::Facilities,
        keywords: &["facility", "building", "room"],
    },
    KeywordRule {
        category: ResponseCategory::Dining,
        keywords: &["dining", "food", "menu", "cafeteria"],
    },
    KeywordRule {
        category: ResponseCategory::Library,
        keywords: &["library", "study", "book"],
    },
    KeywordRule {
        category: ResponseCategory::Administration,
        keywords: &["admin", "form", "transcript", "enrollment"],
    },
    KeywordRule {
        category: ResponseCategory::StudentServices,
        keywords: &["counseling", "health", "career", "service"],
    },
    KeywordRule {
        category: ResponseCategory::Map,
        keywords: &["map", "where", "location"],
    },
    KeywordRule {
        category: ResponseCategory::Parking,
        keywords: &["parking", "permit"],
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword anywhere in the text, including inside longer words.
    #[default]
    Substring,
    /// Keyword must be a whole token (or its `s`/`es` plural).
    WholeWord,
}

impl MatchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "substring" => Some(Self::Substring),
            "whole_word" | "word" => Some(Self::WholeWord),
            _ => None,
        }
    }
}

pub fn respond(utterance: &str) -> &'static str {
    response_for(classify(utterance))
}

pub fn classify(utterance: &str) -> ResponseCategory {
    classify_with(utterance, MatchMode::Substring)
}

pub fn classify_with(utterance: &str, mode: MatchMode) -> ResponseCategory {
    let lower = utterance.to_lowercase();

    match mode {
        MatchMode::Substring => first_matching_rule(|keywords| contains_any(&lower, keywords)),
        MatchMode::WholeWord => {
            let tokens = tokenize(&lower);
            first_matching_rule(|keywords| {
                keywords
                    .iter()
                    .any(|keyword| tokens.iter().any(|token| token_matches(token, keyword)))
            })
        }
    }
}

pub fn response_for(category: ResponseCategory) -> &'static str {
    match category {
        ResponseCategory::Schedules => "I can help you with class schedules, exam dates, and the academic calendar. What specific schedule information do you need?",
        ResponseCategory::Facilities => "Our campus has various facilities including libraries, computer labs, fitness center, and student lounges. Which facility would you like to know more about?",
        ResponseCategory::Dining => "The dining halls serve meals from 7 AM to 10 PM daily. Today's menu includes fresh salads, grilled entrees, and vegetarian options. Would you like specific nutrition information?",
        ResponseCategory::Library => "The main library is open 24/7 during finals week, regular hours are 6 AM to midnight. You can book study rooms online through the library portal. Need help with that?",
        ResponseCategory::Administration => "I can help you with enrollment forms, transcript requests, tuition payments, and academic policies. What administrative task do you need assistance with?",
        ResponseCategory::StudentServices => "Our student services include counseling, health center, career services, and academic advising. All services are available Monday-Friday 8 AM to 5 PM.",
        ResponseCategory::Map => "I can help you navigate campus! The main buildings are connected by covered walkways. Where are you trying to go?",
        ResponseCategory::Parking => "Student parking is available in lots A-F. Permits are required and can be purchased online. Visitor parking is in lot G near the main entrance.",
        ResponseCategory::Default => "I'm here to help with any campus-related questions! Try asking about schedules, facilities, dining, library, or administrative services.",
    }
}

pub fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_matching_rule(mut matches: impl FnMut(&[&str]) -> bool) -> ResponseCategory {
    KEYWORD_RULES
        .iter()
        .find(|rule| matches(rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(ResponseCategory::Default)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

fn tokenize(lower: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .replace_all(lower, " ")
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

fn token_matches(token: &str, keyword: &str) -> bool {
    match token.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest == "s" || rest == "es",
        None => false,
    }
}
