use super::languages::LanguageShare;

/// Fixed colors for well-known languages, keyed by lowercase name.
const MAPPED_COLORS: &[(&str, &str)] = &[
    ("java", "#f59e0b"),
    ("typescript", "#0ea5e9"),
    ("javascript", "#eab308"),
    ("python", "#10b981"),
    ("go", "#06b6d4"),
    ("c++", "#f43f5e"),
    ("html", "#f97316"),
    ("css", "#84cc16"),
    ("other", "#6366f1"),
];

/// Cycled for everything else.
const FALLBACK_COLORS: &[&str] = &["#8b5cf6", "#a855f7", "#14b8a6", "#ec4899", "#d946ef"];

/// Color for the language at `position` in the displayed sequence.
///
/// Well-known names always get the same color. Others take the fallback
/// slot for their position, so the result only depends on the displayed
/// order.
pub fn language_color(name: &str, position: usize) -> &'static str {
    let lower = name.to_lowercase();
    MAPPED_COLORS
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLORS[position % FALLBACK_COLORS.len()])
}

/// Colors for every entry of an already filtered (and possibly sorted) sequence.
pub fn display_colors(shares: &[LanguageShare]) -> Vec<&'static str> {
    shares
        .iter()
        .enumerate()
        .map(|(idx, share)| language_color(&share.name, idx))
        .collect()
}
