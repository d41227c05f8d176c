use std::collections::HashMap;

use super::entity::{MappingRow, PlannedRename};
use crate::domain::file_name::split_extension;

/// Give every row a final target name, suffixing repeated desired names.
///
/// Rows are visited in input order. The first row asking for a name keeps
/// it; the n-th repeat (counted per original desired name) becomes
/// `"{stem} ({n}){ext}"`. Generated names are not checked against other
/// rows' literal desired names.
pub fn disambiguate(rows: &[MappingRow]) -> Vec<PlannedRename> {
    let mut seen: HashMap<&str, u32> = HashMap::new();

    rows.iter()
        .map(|row| {
            let final_new = match seen.get_mut(row.desired.as_str()) {
                Some(counter) => {
                    *counter += 1;
                    let (stem, extension) = split_extension(&row.desired);
                    format!("{} ({}){}", stem, counter, extension)
                }
                None => {
                    seen.insert(row.desired.as_str(), 0);
                    row.desired.clone()
                }
            };

            PlannedRename {
                row: row.clone(),
                final_new,
            }
        })
        .collect()
}
