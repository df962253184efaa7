/// Live word and character totals for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCounts {
    /// Whitespace-delimited, non-empty tokens of the trimmed text.
    pub words: usize,
    /// Raw length in characters, surrounding whitespace included.
    pub chars: usize,
}

impl TextCounts {
    pub fn of(text: &str) -> Self {
        Self {
            words: word_count(text),
            chars: char_count(text),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.trim().split_whitespace().count()
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
