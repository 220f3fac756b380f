//! Parsing of upstream provider listings

use provider_codegen_common::{DirEntry, GeneratorError, ProviderEntry, Result};

/// Extract provider packages from Go source that imports them
///
/// Every line mentioning `import_prefix` contributes one import path: the
/// quoted part of the line when present (so aliased imports work), otherwise
/// the trimmed line. The provider name is the last path segment. A later
/// line with the same name replaces the earlier path but keeps its position.
pub fn parse_import_list(source: &str, import_prefix: &str) -> Vec<ProviderEntry> {
    let mut entries: Vec<ProviderEntry> = Vec::new();

    for line in source.lines().filter(|line| line.contains(import_prefix)) {
        let import_path = import_path_of(line);
        let name = import_path.rsplit('/').next().unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let entry = ProviderEntry {
            name: name.to_string(),
            import_path: import_path.to_string(),
        };
        match entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    entries
}

fn import_path_of(line: &str) -> &str {
    let trimmed = line.trim();
    match (trimmed.find('"'), trimmed.rfind('"')) {
        (Some(start), Some(end)) if end > start => &trimmed[start + 1..end],
        _ => trimmed.trim_matches('"'),
    }
}

/// Parse a GitHub contents API response for a directory
pub fn parse_contents_listing(json: &str) -> Result<Vec<DirEntry>> {
    serde_json::from_str(json)
        .map_err(|e| GeneratorError::Parse(format!("Failed to parse directory listing: {}", e)))
}
