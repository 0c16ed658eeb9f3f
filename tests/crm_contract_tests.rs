//! Integration tests for the CRM API contracts
//!
//! These tests verify the behavioral contracts the GraphQL layer promises:
//! - Phone number format acceptance
//! - Exact decimal order totals
//! - Bulk import error reporting (1-based indices, partial success)
//! - Cursor pagination windows

// ============================================================================
// Phone Format Tests
// ============================================================================

/// The accepted phone shape: optional "+", a 1-4 digit prefix, then groups
/// of 3 and 3-4 digits, each boundary optionally separated by "-", "." or
/// a space.
const PHONE_PATTERN: &str = r"^\+?\d{1,4}[-.\s]?\d{3}[-.\s]?\d{3,4}$";

mod phone_format {
    use regex::Regex;

    use super::PHONE_PATTERN;

    fn matches(phone: &str) -> bool {
        Regex::new(PHONE_PATTERN).unwrap().is_match(phone)
    }

    #[test]
    fn test_plus_prefix_is_optional() {
        assert!(matches("+1234567890"));
        assert!(matches("1234567890"));

        // The plus must come first and must be followed by digits
        assert!(!matches("1234+567890"));
        assert!(!matches("+"));
        assert!(!matches("++1234567890"));
    }

    #[test]
    fn test_digit_count_limits() {
        // Smallest accepted number: 1 + 3 + 3 digits
        assert!(matches("1234567"));
        assert!(!matches("123456"));

        // Largest accepted number: 4 + 3 + 4 digits
        assert!(matches("12345678901"));
        assert!(!matches("123456789012"));
    }

    #[test]
    fn test_separator_variants() {
        assert!(matches("123-456-7890"));
        assert!(matches("123.456.7890"));
        assert!(matches("123 456 7890"));

        // Separators may be mixed or omitted per group
        assert!(matches("123-456 7890"));
        assert!(matches("123456-7890"));

        // But only one separator per boundary, and only from the allowed set
        assert!(!matches("123--456-7890"));
        assert!(!matches("123_456_7890"));
        assert!(!matches("123/456/7890"));
    }

    #[test]
    fn test_no_surrounding_junk() {
        assert!(!matches(" 1234567890"));
        assert!(!matches("1234567890 "));
        assert!(!matches("tel:123-456-7890"));
        assert!(!matches("123-456-7890 ext 4"));
    }
}

// ============================================================================
// Order Total Tests
// ============================================================================

mod order_totals {
    use rust_decimal::Decimal;

    /// An order total is the exact sum of the unit prices of every product
    /// occurrence in the order.
    fn order_total(prices: &[Decimal]) -> Decimal {
        prices.iter().copied().sum()
    }

    fn price(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_is_exact_in_cents() {
        let total = order_total(&[price("9.99"), price("5.00")]);
        assert_eq!(total, price("14.99"));
        assert_eq!(total.to_string(), "14.99");
    }

    #[test]
    fn test_no_binary_float_drift() {
        // The classic f64 failure case stays exact with decimals
        assert_ne!(0.1f64 + 0.2, 0.3);
        assert_eq!(price("0.10") + price("0.20"), price("0.30"));

        let total = order_total(&[price("9.99"); 3]);
        assert_eq!(total, price("29.97"));
    }

    #[test]
    fn test_repeated_product_counts_each_occurrence() {
        // Ordering the same product twice doubles its contribution
        let total = order_total(&[price("19.99"), price("19.99"), price("5.00")]);
        assert_eq!(total, price("44.98"));
    }

    #[test]
    fn test_many_small_prices() {
        let cents = vec![price("0.01"); 100];
        assert_eq!(order_total(&cents), price("1.00"));
    }

    #[test]
    fn test_total_is_order_independent() {
        let a = [price("1.50"), price("2.25"), price("10.00")];
        let b = [price("10.00"), price("1.50"), price("2.25")];
        assert_eq!(order_total(&a), order_total(&b));
    }
}

// ============================================================================
// Bulk Import Reporting Tests
// ============================================================================

mod bulk_import {
    use std::collections::HashSet;

    use regex::Regex;

    use super::PHONE_PATTERN;

    struct Row {
        name: &'static str,
        email: &'static str,
        phone: Option<&'static str>,
    }

    impl Row {
        fn new(name: &'static str, email: &'static str) -> Self {
            Self {
                name,
                email,
                phone: None,
            }
        }

        fn with_phone(name: &'static str, email: &'static str, phone: &'static str) -> Self {
            Self {
                name,
                email,
                phone: Some(phone),
            }
        }
    }

    /// Mirror of the bulk-create loop: rows are validated in input order
    /// against the rows already stored, every valid row commits immediately,
    /// and every invalid row is reported as "record N: reason" with a
    /// 1-based N. Returns (created names, error strings).
    fn run_bulk_import(rows: &[Row], existing_emails: &[&str]) -> (Vec<String>, Vec<String>) {
        let phone_re = Regex::new(PHONE_PATTERN).unwrap();
        let mut stored: HashSet<String> = existing_emails.iter().map(|e| e.to_string()).collect();
        let mut created = Vec::new();
        let mut errors = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            if row.name.trim().is_empty() {
                errors.push(format!("record {}: Name cannot be empty", idx + 1));
                continue;
            }
            if stored.contains(row.email) {
                errors.push(format!(
                    "record {}: email '{}' is already in use",
                    idx + 1,
                    row.email
                ));
                continue;
            }
            if let Some(p) = row.phone
                && !p.is_empty()
                && !phone_re.is_match(p)
            {
                errors.push(format!(
                    "record {}: Invalid phone format. Use +1234567890 or 123-456-7890.",
                    idx + 1
                ));
                continue;
            }

            stored.insert(row.email.to_string());
            created.push(row.name.to_string());
        }

        (created, errors)
    }

    #[test]
    fn test_duplicate_within_batch() {
        // A commits first, so B sees its email as taken
        let rows = [Row::new("A", "a@x.com"), Row::new("B", "a@x.com")];
        let (created, errors) = run_bulk_import(&rows, &[]);

        assert_eq!(created, vec!["A"]);
        assert_eq!(errors, vec!["record 2: email 'a@x.com' is already in use"]);
    }

    #[test]
    fn test_duplicate_against_stored_rows() {
        let rows = [Row::new("Zoe", "zoe@x.com")];
        let (created, errors) = run_bulk_import(&rows, &["zoe@x.com"]);

        assert!(created.is_empty());
        assert_eq!(errors, vec!["record 1: email 'zoe@x.com' is already in use"]);
    }

    #[test]
    fn test_processing_continues_after_failure() {
        let rows = [
            Row::new("A", "a@x.com"),
            Row::with_phone("B", "b@x.com", "not-a-phone"),
            Row::new("C", "c@x.com"),
        ];
        let (created, errors) = run_bulk_import(&rows, &[]);

        // The bad middle row does not stop the rows after it
        assert_eq!(created, vec!["A", "C"]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("record 2: "), "got {:?}", errors[0]);
    }

    #[test]
    fn test_counts_add_up() {
        let rows = [
            Row::new("A", "a@x.com"),
            Row::new("B", "a@x.com"),
            Row::new("C", "c@x.com"),
            Row::with_phone("D", "d@x.com", "12"),
            Row::new("E", "e@x.com"),
            Row::new("", "f@x.com"),
        ];
        let (created, errors) = run_bulk_import(&rows, &[]);

        // N = 6 rows, k = 3 invalid: exactly N - k created, k reported
        assert_eq!(created.len(), 3);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_indices_are_one_based_input_positions() {
        let rows = [
            Row::new("", "a@x.com"),
            Row::new("B", "b@x.com"),
            Row::new("C", "d@x.com"),
            Row::with_phone("D", "dd@x.com", "abc"),
        ];
        let (_, errors) = run_bulk_import(&rows, &[]);

        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("record 1: "), "got {:?}", errors[0]);
        assert!(errors[1].starts_with("record 4: "), "got {:?}", errors[1]);
    }

    #[test]
    fn test_all_valid_rows_yield_no_errors() {
        let rows = [
            Row::with_phone("A", "a@x.com", "+1234567890"),
            Row::with_phone("B", "b@x.com", "123-456-7890"),
            Row::new("C", "c@x.com"),
        ];
        let (created, errors) = run_bulk_import(&rows, &[]);

        assert_eq!(created, vec!["A", "B", "C"]);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }
}

// ============================================================================
// Cursor Pagination Tests
// ============================================================================

mod cursor_pagination {
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

    fn encode_cursor(offset: i64) -> String {
        BASE64.encode(format!("cursor:{}", offset))
    }

    fn decode_cursor(cursor: &str) -> Option<i64> {
        let bytes = BASE64.decode(cursor).ok()?;
        let s = String::from_utf8(bytes).ok()?;
        let offset: i64 = s.strip_prefix("cursor:")?.parse().ok()?;
        (offset >= 0).then_some(offset)
    }

    struct Page {
        rows: Vec<i64>,
        has_next: bool,
        has_previous: bool,
        end_cursor: Option<String>,
    }

    /// Mirror of the connection windowing: `first` defaults to 25 and is
    /// clamped to 1..=100, `after` resumes one row past the cursor.
    fn page(dataset: &[i64], first: Option<i32>, after: Option<&str>) -> Page {
        let limit = first.unwrap_or(25).clamp(1, 100) as usize;
        let offset = match after {
            Some(cursor) => decode_cursor(cursor).unwrap() as usize + 1,
            None => 0,
        };

        let rows: Vec<i64> = dataset.iter().skip(offset).take(limit).copied().collect();
        let end_cursor = match rows.len() {
            0 => None,
            n => Some(encode_cursor((offset + n - 1) as i64)),
        };

        Page {
            has_next: offset + rows.len() < dataset.len(),
            has_previous: offset > 0,
            end_cursor,
            rows,
        }
    }

    #[test]
    fn test_default_page_size() {
        let dataset: Vec<i64> = (0..80).collect();
        let p = page(&dataset, None, None);

        assert_eq!(p.rows.len(), 25);
        assert_eq!(p.rows[0], 0);
        assert!(p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn test_oversized_first_is_clamped() {
        let dataset: Vec<i64> = (0..150).collect();
        let p = page(&dataset, Some(1000), None);
        assert_eq!(p.rows.len(), 100);
    }

    #[test]
    fn test_walk_covers_every_row_once() {
        let dataset: Vec<i64> = (0..95).collect();

        let mut seen = Vec::new();
        let mut after: Option<String> = None;
        let mut page_sizes = Vec::new();

        loop {
            let p = page(&dataset, Some(40), after.as_deref());
            page_sizes.push(p.rows.len());
            seen.extend(p.rows);

            if !p.has_next {
                break;
            }
            after = p.end_cursor;
        }

        assert_eq!(page_sizes, vec![40, 40, 15]);
        assert_eq!(seen, dataset);
    }

    #[test]
    fn test_resume_after_cursor() {
        let dataset: Vec<i64> = (0..30).collect();
        let cursor = encode_cursor(9);
        let p = page(&dataset, Some(5), Some(&cursor));

        // The page starts one past the row the cursor names
        assert_eq!(p.rows, vec![10, 11, 12, 13, 14]);
        assert!(p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn test_cursor_past_end_yields_empty_page() {
        let dataset: Vec<i64> = (0..10).collect();
        let cursor = encode_cursor(9);
        let p = page(&dataset, Some(5), Some(&cursor));

        assert!(p.rows.is_empty());
        assert!(!p.has_next);
        assert!(p.has_previous);
        assert_eq!(p.end_cursor, None);
    }

    #[test]
    fn test_empty_dataset() {
        let p = page(&[], None, None);

        assert!(p.rows.is_empty());
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn test_crafted_negative_cursor_is_rejected() {
        // A hand-built cursor naming a negative row must not decode
        assert_eq!(decode_cursor(&BASE64.encode("cursor:-5")), None);
        assert_eq!(decode_cursor(&BASE64.encode("cursor:0")), Some(0));
    }
}
