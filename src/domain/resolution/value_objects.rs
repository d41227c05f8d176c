// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure, immutable data structures describing what a rename plan would do.
//
// CRITICAL INVARIANTS:
// - No timestamps: identical inputs compare equal
// - No I/O operations
// - status = Error   iff no matched file, or final name hits an unmapped file
// - status = Warning iff matched and current == final name
// - status = Ready   otherwise

use serde::{Deserialize, Serialize};

use crate::domain::mapping::Category;

// ============================================================================
// RESOLUTION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Ready,
    Warning,
    Error,
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionStatus::Ready => write!(f, "ready"),
            ResolutionStatus::Warning => write!(f, "warning"),
            ResolutionStatus::Error => write!(f, "error"),
        }
    }
}

// ============================================================================
// RESOLVED ITEM
// ============================================================================

/// The disposition of one mapping row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Name the mapping asked to rename
    pub current: String,

    /// Unique target name after disambiguation
    pub final_new: String,

    /// Target name as written in the mapping
    pub original_new: String,

    pub category: Category,

    pub status: ResolutionStatus,

    /// The available file that `current` resolved to, if any
    pub matched_file: Option<String>,

    /// Human-readable justification, in the order it was decided
    pub notes: Vec<String>,
}

impl ResolvedItem {
    /// Whether the executor should attempt this row.
    pub fn is_executable(&self) -> bool {
        self.status == ResolutionStatus::Ready
            && self.matched_file.is_some()
            && self.current != self.final_new
    }

    pub fn was_renamed(&self) -> bool {
        self.final_new != self.original_new
    }

    /// Notes joined for single-line display; "OK" when there are none.
    pub fn notes_line(&self) -> String {
        if self.notes.is_empty() {
            "OK".to_string()
        } else {
            self.notes.join("; ")
        }
    }
}

// ============================================================================
// PLAN SUMMARY
// ============================================================================

/// Aggregate counts over a resolved plan.
/// `active` and `terminated` count ready rows only; `auto_renamed` counts
/// every row whose name was disambiguated, whatever its status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub ready: usize,
    pub warning: usize,
    pub error: usize,
    pub total: usize,
    pub active: usize,
    pub terminated: usize,
    pub auto_renamed: usize,
}

impl PlanSummary {
    pub fn tally(items: &[ResolvedItem]) -> Self {
        let mut summary = PlanSummary {
            total: items.len(),
            ..Default::default()
        };

        for item in items {
            if item.was_renamed() {
                summary.auto_renamed += 1;
            }

            match item.status {
                ResolutionStatus::Ready => {
                    summary.ready += 1;
                    match item.category {
                        Category::Active => summary.active += 1,
                        Category::Terminated => summary.terminated += 1,
                        Category::Uncategorized => {}
                    }
                }
                ResolutionStatus::Warning => summary.warning += 1,
                ResolutionStatus::Error => summary.error += 1,
            }
        }

        summary
    }
}

// ============================================================================
// RESOLVED PLAN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    pub items: Vec<ResolvedItem>,
    pub summary: PlanSummary,
}

impl ResolvedPlan {
    pub fn new(items: Vec<ResolvedItem>) -> Self {
        let summary = PlanSummary::tally(&items);
        Self { items, summary }
    }

    pub fn executable(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.items.iter().filter(|item| item.is_executable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ResolutionStatus, category: Category, renamed: bool) -> ResolvedItem {
        ResolvedItem {
            current: "a.txt".to_string(),
            final_new: if renamed { "b (1).txt" } else { "b.txt" }.to_string(),
            original_new: "b.txt".to_string(),
            category,
            status,
            matched_file: Some("a.txt".to_string()),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_tally_counts_categories_of_ready_rows_only() {
        let items = vec![
            item(ResolutionStatus::Ready, Category::Active, false),
            item(ResolutionStatus::Ready, Category::Terminated, true),
            item(ResolutionStatus::Error, Category::Active, true),
            item(ResolutionStatus::Warning, Category::Uncategorized, false),
        ];

        let summary = PlanSummary::tally(&items);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.ready, 2);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.error, 1);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.terminated, 1);
        assert_eq!(summary.auto_renamed, 2);
    }

    #[test]
    fn test_notes_line() {
        let mut resolved = item(ResolutionStatus::Ready, Category::Uncategorized, false);
        assert_eq!(resolved.notes_line(), "OK");

        resolved.notes = vec!["one".to_string(), "two".to_string()];
        assert_eq!(resolved.notes_line(), "one; two");
    }

    #[test]
    fn test_only_ready_rows_are_executable() {
        assert!(item(ResolutionStatus::Ready, Category::Active, false).is_executable());
        assert!(!item(ResolutionStatus::Error, Category::Active, false).is_executable());
        assert!(!item(ResolutionStatus::Warning, Category::Active, false).is_executable());
    }
}
