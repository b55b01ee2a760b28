//! LIKE pattern construction.

use crate::models::LikeType;

/// Escape character declared by every LIKE statement. It can never appear
/// in a path.
pub const LIKE_ESCAPE: char = '|';

/// Turns `term` into a LIKE pattern for `like_type`.
///
/// Literal `%` and `_` in the term are escaped so they match themselves;
/// `Raw` passes the term through untouched.
pub fn like_search_term(term: &str, like_type: LikeType) -> String {
    if like_type == LikeType::Raw {
        return term.to_string();
    }

    let mut escaped = String::with_capacity(term.len() + 2);
    for ch in term.chars() {
        if ch == '%' || ch == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }

    match like_type {
        LikeType::StartsWith => format!("{escaped}%"),
        LikeType::EndsWith => format!("%{escaped}"),
        LikeType::Matches => format!("%{escaped}%"),
        LikeType::Raw => escaped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(like_search_term("100%_done", LikeType::Matches), "%100|%|_done%");
        assert_eq!(like_search_term("a_b", LikeType::StartsWith), "a|_b%");
        assert_eq!(like_search_term("x%", LikeType::EndsWith), "%x|%");
    }

    #[test]
    fn test_raw_is_passed_through() {
        assert_eq!(like_search_term("chars/%.fbx", LikeType::Raw), "chars/%.fbx");
    }

    #[test]
    fn test_plain_terms_only_gain_anchors() {
        assert_eq!(like_search_term("chars/hero", LikeType::StartsWith), "chars/hero%");
        assert_eq!(like_search_term(".fbx", LikeType::EndsWith), "%.fbx");
        assert_eq!(like_search_term("hero", LikeType::Matches), "%hero%");
        assert_eq!(like_search_term("", LikeType::Matches), "%%");
    }
}
