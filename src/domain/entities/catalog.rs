//! Static catalog of addiction types grouped by category.

use serde::Serialize;

/// Top-level grouping of catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Substance,
    Behavioral,
    Emotional,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substance => "substance",
            Self::Behavioral => "behavioral",
            Self::Emotional => "emotional",
        }
    }
}

/// One selectable addiction type. `id` doubles as the content identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddictionType {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
}

/// All entries belonging to one category, in display order.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: Category,
    pub items: &'static [AddictionType],
}

const fn item(id: &'static str, name: &'static str, emoji: &'static str) -> AddictionType {
    AddictionType { id, name, emoji }
}

const SUBSTANCE: &[AddictionType] = &[
    item("nicotine", "Nicotine", "🚬"),
    item("alcohol", "Alcohol", "🍺"),
    item("drugs", "Drugs", "💊"),
    item("cocaine", "Cocaine", "❄️"),
    item("heroin", "Heroin", "💉"),
    item("coffee", "Coffee", "☕"),
];

const BEHAVIORAL: &[AddictionType] = &[
    item("internet", "Internet", "🌐"),
    item("socialmedia", "Social media", "📱"),
    item("smartphone", "Smartphone", "📱"),
    item("pornography", "Pornography", "🔞"),
    item("sex", "Sex", "💕"),
    item("shopping", "Shopping", "🛒"),
    item("fastfood", "Fastfood", "🍔"),
];

const EMOTIONAL: &[AddictionType] = &[
    item("overthinking", "Overthinking", "🤔"),
    item("anxiety", "Anxiety / Negative self-talk", "😰"),
    item("depressionloops", "Depression loops", "😔"),
    item("perfectionism", "Perfectionism", "⭐"),
];

/// The built-in catalog, ordered substance → behavioral → emotional.
pub const CATALOG: &[CategoryGroup] = &[
    CategoryGroup {
        category: Category::Substance,
        items: SUBSTANCE,
    },
    CategoryGroup {
        category: Category::Behavioral,
        items: BEHAVIORAL,
    },
    CategoryGroup {
        category: Category::Emotional,
        items: EMOTIONAL,
    },
];
