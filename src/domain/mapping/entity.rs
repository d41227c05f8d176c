use serde::{Deserialize, Serialize};

/// Destination classification of a mapping row.
/// Built only through `Category::from_code`; unknown codes collapse to
/// `Uncategorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Active,
    Terminated,
    #[default]
    Uncategorized,
}

impl Category {
    /// Normalize a raw category code ("A", " t ", "x", "") into a category.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "A" => Category::Active,
            "T" => Category::Terminated,
            _ => Category::Uncategorized,
        }
    }

    /// The short code this category is written as in mapping sheets.
    /// Uncategorized rows have no code.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Active => "A",
            Category::Terminated => "T",
            Category::Uncategorized => "",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Active => write!(f, "Active"),
            Category::Terminated => write!(f, "Terminated"),
            Category::Uncategorized => write!(f, "Uncategorized"),
        }
    }
}

/// One row as it arrives from the upload collaborator, before cleaning.
/// Any field may be missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMappingRow {
    pub current: Option<String>,
    pub new: Option<String>,
    pub category: Option<String>,
}

impl RawMappingRow {
    pub fn new(current: &str, new: &str, category: &str) -> Self {
        Self {
            current: Some(current.to_string()),
            new: Some(new.to_string()),
            category: Some(category.to_string()),
        }
    }

    /// Build a raw row from positional fields (current, new, category).
    /// Missing trailing fields stay `None`; fields past the third are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[Option<S>]) -> Self {
        let field = |idx: usize| {
            fields
                .get(idx)
                .and_then(|f| f.as_ref())
                .map(|f| f.as_ref().to_string())
        };

        Self {
            current: field(0),
            new: field(1),
            category: field(2),
        }
    }

    /// True when every field is missing or whitespace.
    pub fn is_blank(&self) -> bool {
        [&self.current, &self.new, &self.category]
            .iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// A cleaned rename request: rename `current` to `desired`, route by `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub current: String,
    pub desired: String,
    pub category: Category,
}

impl MappingRow {
    pub fn new(current: impl Into<String>, desired: impl Into<String>, category: Category) -> Self {
        Self {
            current: current.into(),
            desired: desired.into(),
            category,
        }
    }
}

/// A mapping row paired with its unique final name.
/// `row.desired` is never rewritten; `final_new` holds the disambiguated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    pub row: MappingRow,
    pub final_new: String,
}

impl PlannedRename {
    pub fn current(&self) -> &str {
        &self.row.current
    }

    pub fn original_new(&self) -> &str {
        &self.row.desired
    }

    pub fn category(&self) -> Category {
        self.row.category
    }

    /// True when the disambiguator had to change the desired name.
    pub fn was_renamed(&self) -> bool {
        self.final_new != self.row.desired
    }
}
