/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Upper-case the first letter of every space-separated word and
/// lower-case the rest.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn an underscore-separated key into a readable title
/// (`"bull_shark"` → `"Bull Shark"`).
pub fn humanize_key(key: &str) -> String {
    let spaced: Vec<&str> = key.split('_').filter(|s| !s.is_empty()).collect();
    title_case(&spaced.join(" "))
}
