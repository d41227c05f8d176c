// src/domain/file_index.rs
//
// Lookup structures over the filenames present in a working area.
//
// Built once per resolution pass and read-only afterwards.
//
// TIE-BREAK:
// Two files can share a base key ("report.pdf" and "Report.docx" both map to
// "report"). The lexicographically smallest full filename wins, independent
// of the order the listing was produced in. Ambiguous keys are logged and
// available through `ambiguous_bases`.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::domain::file_name::base_key;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    exact: BTreeSet<String>,
    by_base: BTreeMap<String, String>,
    ambiguous: BTreeMap<String, Vec<String>>,
}

impl FileIndex {
    /// Build the index from any listing of filenames.
    pub fn build<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exact: BTreeSet<String> = files.into_iter().map(Into::into).collect();

        let mut by_base: BTreeMap<String, String> = BTreeMap::new();
        let mut ambiguous: BTreeMap<String, Vec<String>> = BTreeMap::new();

        // BTreeSet iterates in sorted order, so the first insert is the winner
        for name in &exact {
            let key = base_key(name);
            match by_base.get(&key) {
                Some(winner) => {
                    ambiguous
                        .entry(key)
                        .or_insert_with(|| vec![winner.clone()])
                        .push(name.clone());
                }
                None => {
                    by_base.insert(key, name.clone());
                }
            }
        }

        for (key, candidates) in &ambiguous {
            warn!(
                "Base name '{}' matches {} files {:?}; using '{}'",
                key,
                candidates.len(),
                candidates,
                candidates[0]
            );
        }

        Self {
            exact,
            by_base,
            ambiguous,
        }
    }

    /// True when a file with exactly this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.exact.contains(name)
    }

    /// Find the file a mapping's current name refers to.
    /// Exact name first, then case-insensitive name without extension.
    pub fn find_match(&self, current: &str) -> Option<&str> {
        if let Some(name) = self.exact.get(current) {
            return Some(name.as_str());
        }

        self.by_base.get(&base_key(current)).map(String::as_str)
    }

    /// Base keys that matched more than one file, with every candidate.
    /// The first candidate of each list is the one `find_match` returns.
    pub fn ambiguous_bases(&self) -> &BTreeMap<String, Vec<String>> {
        &self.ambiguous
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}
