//! Search and page parameters read from the URL

use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// `?query=...&page=...` as driven by the search box and pagination links.
///
/// A missing query searches for everything; a missing or zero page is page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchParams {
    /// Parameters after the user types `term` into the search box.
    ///
    /// The page always resets to 1: the current page may not exist in the
    /// narrower result set. The term is kept as typed; only an empty term
    /// clears the query.
    pub fn searching(&self, term: &str) -> Self {
        Self {
            query: term.to_owned(),
            page: Some(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page())
    }
}

/// SQL `ILIKE` pattern for a substring search. `%` and `_` in the query are
/// passed through as wildcards.
pub fn ilike_pattern(query: &str) -> String {
    format!("%{}%", query)
}

/// Case-insensitive substring test, the in-process equivalent of
/// `haystack ILIKE '%needle%'`.
///
/// `%` in the needle matches any run of characters, `_` exactly one, and a
/// backslash makes the next character literal.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let text: Vec<char> = haystack.to_lowercase().chars().collect();
    let pattern = like_tokens(&ilike_pattern(&needle.to_lowercase()));
    like_match(&text, &pattern)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyOne,
            // A trailing backslash stays literal.
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            c => LikeToken::Literal(c),
        });
    }
    tokens
}

/// Greedy wildcard match, backtracking to the last `%` on a mismatch.
fn like_match(text: &[char], pattern: &[LikeToken]) -> bool {
    let (mut t, mut p) = (0, 0);
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                p += 1;
                resume = Some((p, t));
            }
            Some(LikeToken::AnyOne) => {
                t += 1;
                p += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match resume {
                Some((after_run, start)) => {
                    p = after_run;
                    t = start + 1;
                    resume = Some((after_run, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|token| *token == LikeToken::AnyRun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_and_empty_query() {
        let params = SearchParams::default();
        assert_eq!(params.query, "");
        assert_eq!(params.current_page(), 1);

        let params = SearchParams {
            query: String::new(),
            page: Some(0),
        };
        assert_eq!(params.current_page(), 1);
    }

    #[test]
    fn searching_resets_page() {
        let params = SearchParams {
            query: "lee".into(),
            page: Some(4),
        };
        let next = params.searching("delba");
        assert_eq!(next.query, "delba");
        assert_eq!(next.current_page(), 1);

        assert_eq!(params.searching("").query, "");
    }

    #[test]
    fn searching_keeps_term_as_typed() {
        let params = SearchParams::default();
        assert_eq!(params.searching("  ").query, "  ");
        assert_eq!(params.searching(" lee ").query, " lee ");
    }

    #[test]
    fn matching_ignores_case() {
        assert!(contains_ignore_case("paid", "PAID"));
        assert!(contains_ignore_case("Delba de Oliveira", "OLIV"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("pending", "paid"));
    }

    #[test]
    fn percent_matches_any_run() {
        assert!(contains_ignore_case("anything", "%"));
        assert!(contains_ignore_case("", "%"));
        assert!(contains_ignore_case("Delba de Oliveira", "del%OLI"));
        assert!(!contains_ignore_case("Oliveira Delba", "del%oli"));
    }

    #[test]
    fn underscore_matches_one_char() {
        assert!(contains_ignore_case("x", "_"));
        assert!(!contains_ignore_case("", "_"));
        assert!(contains_ignore_case("Ada Lindqvist", "a_a"));
        assert!(contains_ignore_case("BANANA", "a_a"));
        assert!(!contains_ignore_case("aa", "a_a"));
        assert!(contains_ignore_case("2024-06-05", "2024-__-05"));
    }

    #[test]
    fn backslash_escapes_wildcards() {
        assert!(contains_ignore_case("50% off", "50\\%"));
        assert!(!contains_ignore_case("500 off", "50\\%"));
        assert!(contains_ignore_case("snake_case", "e\\_c"));
        assert!(!contains_ignore_case("snakeXcase", "e\\_c"));
    }

    #[test]
    fn wraps_pattern() {
        assert_eq!(ilike_pattern("lee"), "%lee%");
        assert_eq!(ilike_pattern(""), "%%");
    }
}
