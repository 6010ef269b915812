use certkit_model::TextTransform;

/// Apply a case transform. Total and idempotent.
pub fn transform(text: &str, mode: TextTransform) -> String {
    match mode {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => capitalize(text),
    }
}

/// Upper-case the first character of every whitespace-separated word and
/// lower-case the rest, keeping the original whitespace
///
/// Only whitespace starts a word. Punctuation does not, so `"'hello"` and
/// `"(draft)"` keep a lower-case first letter, and `"o'neil"` becomes
/// `"O'neil"`.
fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;

    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            // Multi-char expansions (ß -> SS) keep only their first letter upper
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(transform("ada LOVELACE", TextTransform::None), "ada LOVELACE");
        assert_eq!(transform("ada lovelace", TextTransform::Uppercase), "ADA LOVELACE");
        assert_eq!(transform("ADA Lovelace", TextTransform::Lowercase), "ada lovelace");
        assert_eq!(transform("aDA  lOVELACE", TextTransform::Capitalize), "Ada  Lovelace");
    }

    #[test]
    fn test_capitalize_keeps_whitespace() {
        assert_eq!(transform("\tmary\nsomerville ", TextTransform::Capitalize), "\tMary\nSomerville ");
        assert_eq!(transform("", TextTransform::Capitalize), "");
    }

    #[test]
    fn test_capitalize_ignores_punctuation_boundaries() {
        assert_eq!(transform("'hello", TextTransform::Capitalize), "'hello");
        assert_eq!(transform("o'neil (draft)", TextTransform::Capitalize), "O'neil (draft)");
    }

    #[test]
    fn test_capitalize_sharp_s() {
        let once = transform("ßtraße", TextTransform::Capitalize);
        assert_eq!(once, "Sstraße");
        assert_eq!(transform(&once, TextTransform::Capitalize), once);
    }
}
