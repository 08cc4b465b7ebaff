// Stress mark handling.

/// U+0301 COMBINING ACUTE ACCENT, the stress mark used in learner dictionaries.
pub const STRESS_MARK: char = '\u{0301}';

/// Remove stress marks, producing the analyzer lookup form.
pub fn strip_stress(text: &str) -> String {
    text.chars().filter(|&c| c != STRESS_MARK).collect()
}
