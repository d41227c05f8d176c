use super::entity::MappingRow;
use crate::domain::{DomainError, DomainResult};

/// Validates all MappingRow invariants
pub fn validate_mapping_row(row: &MappingRow) -> DomainResult<()> {
    validate_name("current", &row.current)?;
    validate_name("desired", &row.desired)?;
    Ok(())
}

/// Names must be non-empty and already trimmed
fn validate_name(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Mapping {} name cannot be empty",
            field
        )));
    }

    if value.trim() != value {
        return Err(DomainError::InvariantViolation(format!(
            "Mapping {} name must be trimmed: {:?}",
            field, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::Category;

    #[test]
    fn test_valid_row() {
        let row = MappingRow::new("a.txt", "b.txt", Category::Active);
        assert!(validate_mapping_row(&row).is_ok());
    }

    #[test]
    fn test_empty_desired_fails() {
        let row = MappingRow::new("a.txt", "   ", Category::Uncategorized);

        let result = validate_mapping_row(&row);
        if let Err(DomainError::InvariantViolation(msg)) = result {
            assert!(msg.contains("desired"));
        } else {
            panic!("Expected InvariantViolation error");
        }
    }

    #[test]
    fn test_untrimmed_current_fails() {
        let row = MappingRow::new(" a.txt", "b.txt", Category::Uncategorized);
        assert!(validate_mapping_row(&row).is_err());
    }
}
