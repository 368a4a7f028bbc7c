//! Home page categorization.
//!
//! Records are bucketed by an ordered rule table. Rules are evaluated top to
//! bottom and the first match decides the bucket; a record matching no rule
//! is completed. A movie keyword therefore beats a recency marker.

use shared::{AnimeRecord, CategorizedSet, Category};

/// Which part of a record a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    TitleOrUrl,
}

/// One row of the categorization table
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub name: &'static str,
    pub field: Field,
    pub keywords: &'static [&'static str],
    pub category: Category,
}

impl CategoryRule {
    /// Does this rule match the lowercased title and url?
    pub fn matches(&self, title_lower: &str, url_lower: &str) -> bool {
        self.keywords.iter().any(|keyword| match self.field {
            Field::Title => title_lower.contains(keyword),
            Field::TitleOrUrl => title_lower.contains(keyword) || url_lower.contains(keyword),
        })
    }
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "movie",
        field: Field::TitleOrUrl,
        keywords: &["movie", "film"],
        category: Category::Movies,
    },
    CategoryRule {
        name: "sequel",
        field: Field::Title,
        keywords: &[
            "season 2", "season 3", "season 4", "s2", "s3", "s4", "part 2", "part 3",
        ],
        category: Category::Ongoing,
    },
    CategoryRule {
        name: "recency",
        field: Field::Title,
        keywords: &["2025", "2024", "ongoing", "airing"],
        category: Category::Ongoing,
    },
];

/// Bucket a single record
pub fn categorize(record: &AnimeRecord) -> Category {
    let title_lower = record.title.to_lowercase();
    let url_lower = record.url.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&title_lower, &url_lower))
        .map(|rule| rule.category)
        .unwrap_or(Category::Completed)
}

/// Bucket every record, preserving input order within each bucket
pub fn categorize_anime(records: Vec<AnimeRecord>) -> CategorizedSet {
    let mut set = CategorizedSet::default();
    for record in records {
        let category = categorize(&record);
        set.bucket_mut(category).push(record);
    }
    set
}
