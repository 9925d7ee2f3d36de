//! Free-text search over the static taxonomy.
//!
//! Two-tier partition: categories whose own name/key contains the query land
//! in `direct_matches`; categories only reachable through a synonym keyword
//! land in `keyword_matches`, carrying the keyword that matched so the UI
//! can display "Plomería (fuga)". No further ranking — order within each
//! tier is the underlying table order.

use serde::Serialize;

use crate::taxonomy::data::{Category, CategoryTag, CATEGORIES, CATEGORY_KEYWORDS, CATEGORY_TAGS};

/// A category reached through a synonym rather than its own name.
/// `matched_keyword` is the first keyword row that hit, in scan order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KeywordMatch {
    pub category: &'static Category,
    pub matched_keyword: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub direct_matches: Vec<&'static Category>,
    pub keyword_matches: Vec<KeywordMatch>,
}

/// Resolves a free-text query against the taxonomy.
///
/// Queries shorter than two characters fall back to "browse all": every
/// category as a direct match, no keyword matches. Matching is plain
/// lowercase substring compare, deliberately without accent folding — the
/// keyword table carries accented and unaccented spellings as separate rows.
pub fn search(query: &str) -> SearchResult {
    let q = query.trim().to_lowercase();

    if q.chars().count() < 2 {
        return SearchResult {
            direct_matches: CATEGORIES.iter().collect(),
            keyword_matches: Vec::new(),
        };
    }

    let direct_matches: Vec<&'static Category> = CATEGORIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q) || c.key.contains(&q))
        .collect();

    let mut keyword_matches: Vec<KeywordMatch> = Vec::new();
    for kw in CATEGORY_KEYWORDS {
        if !kw.keyword.contains(&q) {
            continue;
        }
        if direct_matches.iter().any(|c| c.id == kw.category_id) {
            continue;
        }
        // First matching keyword wins per category.
        if keyword_matches.iter().any(|m| m.category.id == kw.category_id) {
            continue;
        }
        if let Some(category) = category_by_id(kw.category_id) {
            keyword_matches.push(KeywordMatch {
                category,
                matched_keyword: kw.keyword,
            });
        }
    }

    SearchResult {
        direct_matches,
        keyword_matches,
    }
}

pub fn category_by_id(id: i32) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn category_by_key(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Tags (concrete services) offered under a category, in table order.
pub fn tags_for(category_key: &str) -> Option<Vec<&'static CategoryTag>> {
    let category = category_by_key(category_key)?;
    Some(
        CATEGORY_TAGS
            .iter()
            .filter(|t| t.category_id == category.id)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_all_categories() {
        let result = search("");
        assert_eq!(result.direct_matches.len(), CATEGORIES.len());
        assert!(result.keyword_matches.is_empty());
    }

    #[test]
    fn test_single_char_query_returns_all_categories() {
        let result = search("a");
        assert_eq!(result.direct_matches.len(), CATEGORIES.len());
        assert!(result.keyword_matches.is_empty());
    }

    #[test]
    fn test_whitespace_query_is_browse_all() {
        let result = search("   ");
        assert_eq!(result.direct_matches.len(), CATEGORIES.len());
    }

    #[test]
    fn test_direct_match_by_name_case_insensitive() {
        let result = search("PLOMER");
        assert_eq!(result.direct_matches.len(), 1);
        assert_eq!(result.direct_matches[0].key, "plomeria");
    }

    #[test]
    fn test_direct_match_by_key() {
        // "albanileria" has no accent in the key, unlike the display name.
        let result = search("albanileria");
        assert!(result.direct_matches.iter().any(|c| c.key == "albanileria"));
    }

    #[test]
    fn test_keyword_match_carries_matched_keyword() {
        let result = search("fuga");
        assert!(result.direct_matches.is_empty());
        let m = result
            .keyword_matches
            .iter()
            .find(|m| m.category.key == "plomeria")
            .expect("fuga should reach plomeria");
        assert_eq!(m.matched_keyword, "fuga");
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        // "fuga" hits both the "fuga" and "fugas" rows; only the first
        // appears, de-duplicated by category id.
        let result = search("fuga");
        let hits: Vec<_> = result
            .keyword_matches
            .iter()
            .filter(|m| m.category.key == "plomeria")
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched_keyword, "fuga");
    }

    #[test]
    fn test_direct_match_excluded_from_keyword_tier() {
        // "limpieza profunda" is a keyword under Limpieza, but the category
        // name itself also contains "limpieza" — direct tier only.
        let result = search("limpieza");
        assert!(result.direct_matches.iter().any(|c| c.key == "limpieza"));
        assert!(!result
            .keyword_matches
            .iter()
            .any(|m| m.category.key == "limpieza"));
    }

    #[test]
    fn test_no_category_in_both_tiers() {
        for query in ["fuga", "limpieza", "muro", "piso", "puerta", "llave"] {
            let result = search(query);
            for m in &result.keyword_matches {
                assert!(
                    !result.direct_matches.iter().any(|c| c.id == m.category.id),
                    "category {} in both tiers for query {query:?}",
                    m.category.key
                );
            }
        }
    }

    #[test]
    fn test_accent_naive_matching_is_literal() {
        // "jardín" and "jardin" are separate keyword rows; neither query
        // matches the other's row, and both resolve to Jardinería.
        let accented = search("jardín");
        let plain = search("jardin");
        assert!(accented
            .keyword_matches
            .iter()
            .any(|m| m.category.key == "jardineria" && m.matched_keyword == "jardín"));
        // "jardin" is a substring of the category key, so it goes direct.
        assert!(plain.direct_matches.iter().any(|c| c.key == "jardineria"));
        assert!(!plain
            .keyword_matches
            .iter()
            .any(|m| m.category.key == "jardineria"));
    }

    #[test]
    fn test_keyword_reaches_multiple_categories() {
        // "muro" is a keyword for Albañilería and part of "muro divisorio"
        // under Tablaroca.
        let result = search("muro");
        assert!(result
            .keyword_matches
            .iter()
            .any(|m| m.category.key == "albanileria"));
        assert!(result
            .keyword_matches
            .iter()
            .any(|m| m.category.key == "tablaroca"));
    }

    #[test]
    fn test_no_match_returns_empty_tiers() {
        let result = search("xyzzy");
        assert!(result.direct_matches.is_empty());
        assert!(result.keyword_matches.is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let a = search("fuga");
        let b = search("fuga");
        assert_eq!(a.keyword_matches.len(), b.keyword_matches.len());
        assert_eq!(
            a.keyword_matches[0].matched_keyword,
            b.keyword_matches[0].matched_keyword
        );
    }

    #[test]
    fn test_tags_for_known_category() {
        let tags = tags_for("plomeria").expect("plomeria exists");
        assert!(tags.iter().any(|t| t.key == "reparacion_fugas"));
        assert!(tags.iter().all(|t| t.category_id == 1));
    }

    #[test]
    fn test_tags_for_unknown_category() {
        assert!(tags_for("astrologia").is_none());
    }

    #[test]
    fn test_every_keyword_points_at_real_category() {
        for kw in CATEGORY_KEYWORDS {
            assert!(
                category_by_id(kw.category_id).is_some(),
                "dangling keyword {:?}",
                kw.keyword
            );
        }
    }

    #[test]
    fn test_every_tag_points_at_real_category() {
        for tag in CATEGORY_TAGS {
            assert!(category_by_id(tag.category_id).is_some());
        }
    }
}
