use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default word preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Composed form so "é" typed or pasted either way maps to one key
        let text: String = text.nfc().collect();

        text.replace(['\n', '\r'], "").trim().to_string()
    }
}

pub struct WordPreprocessor;
impl Preprocessor for WordPreprocessor {}
