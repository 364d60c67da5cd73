/// First `n` characters of `s`, counted in Unicode scalar values
///
/// Returns the whole string when it is shorter than `n`.
pub fn first_n(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_n_truncates() {
        assert_eq!(first_n("hello", 3), "hel");
    }

    #[test]
    fn test_first_n_shorter_than_n() {
        assert_eq!(first_n("hi", 10), "hi");
        assert_eq!(first_n("hi", 2), "hi");
        assert_eq!(first_n("", 4), "");
    }

    #[test]
    fn test_first_n_zero() {
        assert_eq!(first_n("hello", 0), "");
    }

    #[test]
    fn test_first_n_counts_code_points() {
        assert_eq!(first_n("héllo", 2), "hé");
        assert_eq!(first_n("日本語テキスト", 3), "日本語");
        assert_eq!(first_n("🎥🎬", 1), "🎥");
    }
}
