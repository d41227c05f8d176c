use serde::{Deserialize, Serialize};

use super::entity::{Category, MappingRow, RawMappingRow};

/// Result of cleaning an uploaded mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMapping {
    pub rows: Vec<MappingRow>,
    pub summary: NormalizationSummary,
}

/// Counts reported back to whoever uploaded the mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationSummary {
    pub total: usize,
    pub kept: usize,
    pub dropped: usize,
    pub active: usize,
    pub terminated: usize,
    pub uncategorized: usize,
}

impl NormalizationSummary {
    /// Human-readable upload message.
    /// Category counts are only listed when at least one row is categorized.
    pub fn message(&self) -> String {
        let mut message = format!("Mapping loaded: {} rename mappings found", self.kept);

        if self.active > 0 || self.terminated > 0 {
            message.push_str(&format!(
                " (Active: {}, Terminated: {}",
                self.active, self.terminated
            ));
            if self.uncategorized > 0 {
                message.push_str(&format!(", Uncategorized: {}", self.uncategorized));
            }
            message.push(')');
        }

        message
    }
}

/// Clean raw rows into mapping rows, preserving input order.
///
/// Blank rows and rows whose current or new name is empty after trimming are
/// dropped silently; the summary carries the drop count.
pub fn normalize_rows(raw: &[RawMappingRow]) -> NormalizedMapping {
    let mut rows = Vec::with_capacity(raw.len());
    let mut summary = NormalizationSummary {
        total: raw.len(),
        ..Default::default()
    };

    for raw_row in raw {
        let Some(row) = normalize_row(raw_row) else {
            summary.dropped += 1;
            continue;
        };

        match row.category {
            Category::Active => summary.active += 1,
            Category::Terminated => summary.terminated += 1,
            Category::Uncategorized => summary.uncategorized += 1,
        }
        rows.push(row);
    }

    summary.kept = rows.len();
    NormalizedMapping { rows, summary }
}

fn normalize_row(raw: &RawMappingRow) -> Option<MappingRow> {
    if raw.is_blank() {
        return None;
    }

    let current = raw.current.as_deref().unwrap_or_default().trim();
    let desired = raw.new.as_deref().unwrap_or_default().trim();
    if current.is_empty() || desired.is_empty() {
        return None;
    }

    let category = Category::from_code(raw.category.as_deref().unwrap_or_default());
    Some(MappingRow::new(current, desired, category))
}
