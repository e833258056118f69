//! Static copy for the campus landing page and chat panel.

use serde::Serialize;

use crate::models::ResponseCategory;

pub const GREETING: &str = "Hello! I'm your Smart Campus Assistant. I can help you with information about schedules, facilities, dining, library services, and administrative procedures. What would you like to know?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub primary_action: &'static str,
    pub secondary_action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionHeading {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCard {
    pub category: ResponseCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatPanelCopy {
    pub assistant_name: &'static str,
    pub status: &'static str,
    pub placeholder: &'static str,
    pub footer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub hero: HeroContent,
    pub categories_section: SectionHeading,
    pub categories: &'static [CategoryCard],
    pub quick_prompts_section: SectionHeading,
    pub quick_prompts: &'static [&'static str],
    pub chat_panel: ChatPanelCopy,
    pub greeting: &'static str,
}

pub const HERO: HeroContent = HeroContent {
    title: "Smart Campus Assistant",
    tagline: "Your AI-powered guide to campus life. Get instant answers about schedules, facilities, dining, and more.",
    primary_action: "Start Chatting",
    secondary_action: "Quick Info",
};

pub const CATEGORIES_SECTION: SectionHeading = SectionHeading {
    title: "What can I help you with?",
    subtitle: "Explore different areas of campus information or ask me anything directly",
};

pub const QUICK_PROMPTS_SECTION: SectionHeading = SectionHeading {
    title: "Popular Questions",
    subtitle: "Click on any question to get started",
};

pub const CATEGORY_CARDS: &[CategoryCard] = &[
    CategoryCard {
        category: ResponseCategory::Schedules,
        title: "Schedules",
        description: "Class schedules, exam dates, academic calendar",
        icon: "calendar",
    },
    CategoryCard {
        category: ResponseCategory::Facilities,
        title: "Facilities",
        description: "Campus map, building hours, room locations",
        icon: "map-pin",
    },
    CategoryCard {
        category: ResponseCategory::Dining,
        title: "Dining",
        description: "Cafeteria menus, hours, nutrition info",
        icon: "utensils-crossed",
    },
    CategoryCard {
        category: ResponseCategory::Library,
        title: "Library",
        description: "Library hours, resources, study rooms",
        icon: "book-open",
    },
    CategoryCard {
        category: ResponseCategory::Administration,
        title: "Administration",
        description: "Forms, procedures, contacts, policies",
        icon: "file-text",
    },
    CategoryCard {
        category: ResponseCategory::StudentServices,
        title: "Student Services",
        description: "Counseling, health, career services",
        icon: "users",
    },
];

pub const QUICK_PROMPTS: &[&str] = &[
    "What's the library schedule today?",
    "Show me the dining hall menu",
    "Where is the computer science building?",
    "When is registration deadline?",
    "How do I book a study room?",
    "Campus shuttle schedule",
];

pub const CHAT_PANEL: ChatPanelCopy = ChatPanelCopy {
    assistant_name: "Campus Assistant",
    status: "Online • Ready to help",
    placeholder: "Ask me about campus information...",
    footer: "AI-powered campus information assistant",
};

pub fn catalog() -> Catalog {
    Catalog {
        hero: HERO,
        categories_section: CATEGORIES_SECTION,
        categories: CATEGORY_CARDS,
        quick_prompts_section: QUICK_PROMPTS_SECTION,
        quick_prompts: QUICK_PROMPTS,
        chat_panel: CHAT_PANEL,
        greeting: GREETING,
    }
}

pub fn card_for(category: ResponseCategory) -> Option<&'static CategoryCard> {
    CATEGORY_CARDS.iter().find(|card| card.category == category)
}
