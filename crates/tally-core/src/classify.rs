//! Keyword-based expense categorization
//!
//! Maps a free-text merchant or description string to a category id by
//! ordered substring matching. First match wins, so the table order is the
//! tie-break when a description contains several keywords. No LLM involved;
//! classification is advisory and never fails.

use crate::catalog::OTHER_CATEGORY;

/// Ordered keyword → category table.
///
/// Order is load-bearing: entries are checked top to bottom and the first
/// keyword found as a substring decides the category.
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("starbucks", "food"),
    ("coffee", "food"),
    ("uber", "transport"),
    ("rent", "utilities"),
    ("grocery", "shopping"),
    ("electricity", "utilities"),
    ("netflix", "entertainment"),
    ("restaurant", "food"),
    ("salary", "other"),
    ("bill", "utilities"),
    ("subscription", "entertainment"),
    ("whole foods", "shopping"),
    ("pharmacy", "health"),
    ("gym", "health"),
    ("cinema", "entertainment"),
    ("hotel", "travel"),
    ("flight", "travel"),
    ("taxi", "transport"),
    ("gas ", "transport"),
    ("train", "transport"),
    ("tuition", "education"),
];

/// Classify a description into a category id.
///
/// Total over all inputs; empty or unmatched descriptions fall back to
/// "other".
pub fn classify(description: &str) -> &'static str {
    let description = description.to_lowercase();
    for (keyword, category_id) in KEYWORD_RULES {
        if description.contains(keyword) {
            return category_id;
        }
    }
    OTHER_CATEGORY
}
