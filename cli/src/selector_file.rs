use anyhow::Context;
use std::path::Path;

/// Reads one selector per line, skipping blank lines and `#` comments.
pub fn read_selectors(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = fs_err::read_to_string(path)
        .with_context(|| format!("Failed to read selectors from {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_selectors_skips_blank_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# production").unwrap();
        writeln!(file, "env=prod").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  tier in (web,api)  ").unwrap();
        let selectors = read_selectors(file.path()).unwrap();
        assert_eq!(selectors, vec!["env=prod", "tier in (web,api)"]);
    }

    #[test]
    fn test_read_selectors_missing_file() {
        let err = read_selectors(Path::new("/nonexistent/selectors.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read selectors"));
    }
}
