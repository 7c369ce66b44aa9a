use invoicectl_core::pagination::{total_pages, Pagination, ITEMS_PER_PAGE};
use invoicectl_core::search::contains_ignore_case;
use invoicectl_core::format_currency;
use proptest::prelude::*;

/// Undo the en-US formatting: "-$1,234.05" -> -123405
fn parse_currency(s: &str) -> i128 {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let rest = rest.strip_prefix('$').expect("missing dollar sign");
    let (dollars, cents) = rest.split_once('.').expect("missing decimal point");
    assert_eq!(cents.len(), 2);

    let dollars: i128 = dollars.replace(',', "").parse().unwrap();
    let cents: i128 = cents.parse().unwrap();
    let value = dollars * 100 + cents;
    if negative {
        -value
    } else {
        value
    }
}

proptest! {
    /// Property: formatting is the two-decimal form of cents / 100
    #[test]
    fn prop_currency_matches_amount(cents in any::<i64>()) {
        let formatted = format_currency(cents);
        prop_assert_eq!(parse_currency(&formatted), cents as i128);
    }

    /// Property: formatting is deterministic
    #[test]
    fn prop_currency_deterministic(cents in any::<i64>()) {
        prop_assert_eq!(format_currency(cents), format_currency(cents));
    }

    /// Property: thousands are grouped in threes
    #[test]
    fn prop_currency_groups_thousands(cents in 0i64..i64::MAX) {
        let formatted = format_currency(cents);
        let dollars = formatted
            .trim_start_matches('$')
            .split('.')
            .next()
            .unwrap();
        let groups: Vec<_> = dollars.split(',').collect();

        prop_assert!(groups[0].len() <= 3 && !groups[0].is_empty());
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// Property: total pages is ceil(count / 6)
    #[test]
    fn prop_total_pages_is_ceiling(count in 0u64..10_000_000) {
        let pages = total_pages(count) as u64;
        let per_page = ITEMS_PER_PAGE as u64;

        prop_assert!(pages * per_page >= count);
        if count > 0 {
            prop_assert!((pages - 1) * per_page < count);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    /// Property: offset is (page - 1) * 6
    #[test]
    fn prop_offset(page in 1u32..1_000_000) {
        prop_assert_eq!(Pagination::new(page).offset(), (page as u64 - 1) * 6);
    }

    /// Property: search ignores the case of both sides
    #[test]
    fn prop_search_case_insensitive(haystack in "[a-zA-Z ]{0,20}", start in 0usize..20, len in 0usize..10) {
        let start = start.min(haystack.len());
        let end = (start + len).min(haystack.len());
        let needle = &haystack[start..end];

        prop_assert!(contains_ignore_case(&haystack, &needle.to_uppercase()));
        prop_assert!(contains_ignore_case(&haystack.to_uppercase(), &needle.to_lowercase()));
    }
}
