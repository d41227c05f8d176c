// src/domain/file_name.rs
//
// Filename splitting shared by the file index and the disambiguator.
//
// A name is split at its last '.', except that dots leading the name do not
// start an extension: ".env" has no extension, "..x.txt" has ".txt".

/// Split a filename into `(stem, extension)`.
/// The extension keeps its leading dot; it is empty when there is none.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();

    match name.rfind('.') {
        Some(idx) if idx >= leading_dots => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Filename without its final extension.
pub fn stem(name: &str) -> &str {
    split_extension(name).0
}

/// Case-insensitive lookup key for a filename: stem, lower-cased.
pub fn base_key(name: &str) -> String {
    stem(name).to_lowercase()
}

/// True when `name` names a file inside a directory rather than a path:
/// no separators, not "." or "..".
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_extension() {
        assert_eq!(split_extension("x.txt"), ("x", ".txt"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
    }

    #[test]
    fn test_split_without_extension() {
        assert_eq!(split_extension("Report"), ("Report", ""));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("..."), ("...", ""));
    }

    #[test]
    fn test_split_leading_dots_then_extension() {
        assert_eq!(split_extension("..x.txt"), ("..x", ".txt"));
    }

    #[test]
    fn test_trailing_dot_is_an_empty_extension() {
        assert_eq!(split_extension("name."), ("name", "."));
    }

    #[test]
    fn test_base_key_lowercases_stem() {
        assert_eq!(base_key("report.PDF"), "report");
        assert_eq!(base_key("Report"), "report");
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("x (1).txt"));
        assert!(!is_plain_file_name("../x.txt"));
        assert!(!is_plain_file_name("a\\b.txt"));
        assert!(!is_plain_file_name(".."));
    }
}
