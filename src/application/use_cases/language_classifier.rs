use crate::domain::translation::Language;

const JAPANESE_RATIO_THRESHOLD: f64 = 0.1;

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{4E00}'..='\u{9FAF}' // CJK unified ideographs
    )
}

/// Share of characters in `text` that are kana or kanji.
pub fn japanese_ratio(text: &str) -> f64 {
    let (matching, total) = text.chars().fold((0usize, 0usize), |(m, t), c| {
        (m + usize::from(is_japanese_char(c)), t + 1)
    });
    matching as f64 / total.max(1) as f64
}

/// Labels text as Japanese when more than 10% of its characters are
/// Japanese script, English otherwise (including empty or symbol-only input).
pub fn classify(text: &str) -> Language {
    if japanese_ratio(text) > JAPANESE_RATIO_THRESHOLD {
        Language::Japanese
    } else {
        Language::English
    }
}
