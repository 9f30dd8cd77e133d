//! The closed set of document categories

use std::fmt;
use std::str::FromStr;

use super::error::StoreError;

/// Specialized form available for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Character,
    Synopsis,
    FuturePlans,
    NarouPost,
}

/// A fixed grouping of documents, one folder per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Character,
    World,
    Map,
    Building,
    Relation,
    Situation,
    Economy,
    Synopsis,
    NarouPost,
    FuturePlans,
}

struct CategoryInfo {
    id: &'static str,
    folder: &'static str,
    label: &'static str,
    form: Option<FormKind>,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 10] = [
        Category::Character,
        Category::World,
        Category::Map,
        Category::Building,
        Category::Relation,
        Category::Situation,
        Category::Economy,
        Category::Synopsis,
        Category::NarouPost,
        Category::FuturePlans,
    ];

    fn info(self) -> CategoryInfo {
        let (id, folder, label, form) = match self {
            Category::Character => ("character", "characters", "Characters", Some(FormKind::Character)),
            Category::World => ("world", "world", "World settings", None),
            Category::Map => ("map", "maps", "Map data", None),
            Category::Building => ("building", "buildings", "Buildings", None),
            Category::Relation => ("relation", "relations", "Relationships", None),
            Category::Situation => ("situation", "situations", "Current affairs", None),
            Category::Economy => ("economy", "economy", "Prices & economy", None),
            Category::Synopsis => ("synopsis", "synopsis", "Synopsis", Some(FormKind::Synopsis)),
            Category::NarouPost => ("narou_post", "narou_posts", "Published episodes", Some(FormKind::NarouPost)),
            Category::FuturePlans => ("future_plans", "future_plans", "Future plans", Some(FormKind::FuturePlans)),
        };
        CategoryInfo { id, folder, label, form }
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Storage folder name under the data root
    pub fn folder_name(self) -> &'static str {
        self.info().folder
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// The specialized form, if the category has one
    pub fn form(self) -> Option<FormKind> {
        self.info().form
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    /// Accepts either the identifier or the folder name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s || c.folder_name() == s)
            .ok_or_else(|| StoreError::UnknownCategory(s.to_string()))
    }
}
