use crate::directory::DirectoryEntry;

/// Filters entries by keyword and sorts them by their display form.
///
/// The keyword matches case-insensitively against the display form, but
/// case-sensitively against the digit string. The asymmetry is part of the
/// observable behavior and is kept as-is. An empty keyword matches everything.
pub fn search_entries(entries: Vec<DirectoryEntry>, keyword: &str) -> Vec<DirectoryEntry> {
    let keyword_lower = keyword.to_lowercase();
    let mut matches: Vec<DirectoryEntry> = entries
        .into_iter()
        .filter(|entry| {
            entry.to_string().to_lowercase().contains(&keyword_lower)
                || entry.number().contains(keyword)
        })
        .collect();

    matches.sort_by(|left, right| left.to_string().cmp(&right.to_string()));
    matches
}
