//! Trigger-word classification of incoming text.

/// Default trigger word ("Nasser").
pub const DEFAULT_TRIGGER_WORD: &str = "ناصر";

/// What an incoming text line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Text starts with the trigger word. The query may be empty, in which
    /// case the caller asks the user for one instead of searching.
    Trigger(String),
    PlainText,
}

#[derive(Clone, Debug)]
pub struct IntentClassifier {
    trigger_lower: String,
    trigger_chars: usize,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_WORD)
    }
}

impl IntentClassifier {
    pub fn new(trigger: &str) -> Self {
        let trigger = trigger.trim();
        Self {
            trigger_lower: trigger.to_lowercase(),
            trigger_chars: trigger.chars().count(),
        }
    }

    /// Classify one text line.
    ///
    /// Prefix matching and slicing work on characters, never bytes. The query
    /// is whatever follows the trigger's characters, trimmed.
    pub fn classify(&self, raw: &str) -> Intent {
        let text = raw.trim();
        if self.trigger_chars == 0 {
            return Intent::PlainText;
        }

        // Byte offset just past the first `trigger_chars` characters.
        let split_at = match text.char_indices().nth(self.trigger_chars) {
            Some((idx, _)) => idx,
            None if text.chars().count() == self.trigger_chars => text.len(),
            None => return Intent::PlainText,
        };

        let (head, rest) = text.split_at(split_at);
        if head.to_lowercase() != self.trigger_lower {
            return Intent::PlainText;
        }

        Intent::Trigger(rest.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_with_query_extracts_remainder() {
        let c = IntentClassifier::default();
        assert_eq!(
            c.classify("ناصر أغنية حبيبي"),
            Intent::Trigger("أغنية حبيبي".to_string())
        );
        assert_eq!(
            c.classify("   ناصر   طلعوا الصحاب  "),
            Intent::Trigger("طلعوا الصحاب".to_string())
        );
    }

    #[test]
    fn bare_trigger_yields_empty_query() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("ناصر"), Intent::Trigger(String::new()));
        assert_eq!(c.classify("ناصر   "), Intent::Trigger(String::new()));
        assert_eq!(c.classify(" ناصر \n\t"), Intent::Trigger(String::new()));
    }

    #[test]
    fn remainder_without_separator_is_kept_whole() {
        let c = IntentClassifier::default();
        assert_eq!(c.classify("ناصرabc"), Intent::Trigger("abc".to_string()));
    }

    #[test]
    fn non_trigger_text_is_plain() {
        let c = IntentClassifier::default();
        for text in ["", "   ", "أغنية حبيبي", "ناص", "hello ناصر", "نا", "/start"] {
            assert_eq!(c.classify(text), Intent::PlainText, "{text:?}");
        }
    }

    #[test]
    fn ascii_trigger_matches_case_insensitively() {
        let c = IntentClassifier::new("Play");
        assert_eq!(
            c.classify("PLAY lofi beats"),
            Intent::Trigger("lofi beats".to_string())
        );
        assert_eq!(c.classify("play"), Intent::Trigger(String::new()));
        assert_eq!(c.classify("pla"), Intent::PlainText);
        assert_eq!(c.classify("display"), Intent::PlainText);
    }

    #[test]
    fn multibyte_text_after_trigger_is_never_split() {
        let c = IntentClassifier::new("yt");
        assert_eq!(c.classify("yt🎵"), Intent::Trigger("🎵".to_string()));
        assert_eq!(c.classify("🎵yt"), Intent::PlainText);
    }

    #[test]
    fn blank_trigger_word_matches_nothing() {
        let c = IntentClassifier::new("  ");
        assert_eq!(c.classify("anything"), Intent::PlainText);
    }

    #[test]
    fn non_empty_remainder_is_never_empty_query() {
        let c = IntentClassifier::default();
        for rest in ["a", " b ", "أغنية", "x y z"] {
            match c.classify(&format!("ناصر {rest}")) {
                Intent::Trigger(q) => {
                    assert!(!q.is_empty());
                    assert_eq!(q, rest.trim());
                }
                Intent::PlainText => panic!("expected trigger for {rest:?}"),
            }
        }
    }
}
