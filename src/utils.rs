//! Small helpers shared across modules.

use std::cmp::min;

/// Convert a character index into a byte index in a UTF-8 string.
///
/// Rust strings are UTF-8, so slicing needs byte offsets that land on
/// character boundaries; cursor math everywhere else is in characters.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    let mut ci = 0usize;
    for (bi, _) in s.char_indices() {
        if ci == char_idx {
            return bi;
        }
        ci += 1;
    }
    s.len()
}

/// Number of decimal digits in `n` (sizes the right-justified number column).
pub fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Levenshtein edit distance, for "did you mean?" command suggestions.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let c1: Vec<char> = s1.chars().collect();
    let c2: Vec<char> = s2.chars().collect();

    let mut prev: Vec<usize> = (0..=len2).collect();
    let mut cur = vec![0usize; len2 + 1];

    for i in 1..=len1 {
        cur[0] = i;
        for j in 1..=len2 {
            let cost = usize::from(c1[i - 1] != c2[j - 1]);
            cur[j] = min(min(prev[j] + 1, cur[j - 1] + 1), prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_to_byte_ascii() {
        assert_eq!(char_to_byte_index("hello", 0), 0);
        assert_eq!(char_to_byte_index("hello", 3), 3);
        assert_eq!(char_to_byte_index("hello", 5), 5);
    }

    #[test]
    fn char_to_byte_multibyte() {
        // 'é' is 2 bytes, '日' is 3, '😀' is 4.
        let s = "héllo";
        assert_eq!(char_to_byte_index(s, 1), 1);
        assert_eq!(char_to_byte_index(s, 2), 3);

        let s = "日本語";
        assert_eq!(char_to_byte_index(s, 2), 6);

        let s = "a😀b";
        assert_eq!(char_to_byte_index(s, 2), 5);
    }

    #[test]
    fn char_to_byte_clamps_past_end() {
        assert_eq!(char_to_byte_index("abc", 10), 3);
        assert_eq!(char_to_byte_index("", 4), 0);
    }

    #[test]
    fn digit_widths() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(999), 3);
        assert_eq!(digits(1000), 4);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("undo", "undo"), 0);
        assert_eq!(levenshtein_distance("undo", ""), 4);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("sav", "save"), 1);
    }
}
