//! Parsing of the comma-separated item id lists carried by query strings
//! and multipart forms (`"1, 2,3"`).
//!
//! Two flavours exist because the list and create paths treat bad input
//! differently: filtering is lenient (a token that is not a number simply
//! matches nothing), registration is strict.

use crate::error::CoreError;
use crate::types::DbId;

/// Separator used on the wire between item ids.
pub const ITEM_SEPARATOR: char = ',';

/// Parse an item filter, silently dropping tokens that are not integers.
///
/// ```
/// use ecoleta_core::items::parse_item_filter;
///
/// assert_eq!(parse_item_filter("1, 2,x,3"), vec![1, 2, 3]);
/// assert!(parse_item_filter("").is_empty());
/// ```
pub fn parse_item_filter(raw: &str) -> Vec<DbId> {
    raw.split(ITEM_SEPARATOR)
        .filter_map(|token| token.trim().parse::<DbId>().ok())
        .collect()
}

/// Parse the item list submitted with a new point.
///
/// Every token must be an integer and at least one id must be present.
/// Duplicates are collapsed, keeping the first occurrence so the returned
/// order follows the submission.
pub fn parse_item_ids(raw: &str) -> Result<Vec<DbId>, CoreError> {
    let mut ids: Vec<DbId> = Vec::new();

    for token in raw.split(ITEM_SEPARATOR) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let id = token
            .parse::<DbId>()
            .map_err(|_| CoreError::Validation(format!("Invalid item id '{token}'")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(CoreError::Validation(
            "At least one item must be selected".to_string(),
        ));
    }

    Ok(ids)
}

/// Render item ids back into their wire form (`[1, 2]` -> `"1,2"`).
pub fn join_item_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_trims_whitespace() {
        assert_eq!(parse_item_filter(" 4 ,5"), vec![4, 5]);
    }

    #[test]
    fn filter_drops_garbage() {
        assert_eq!(parse_item_filter("undefined"), Vec::<DbId>::new());
        assert_eq!(parse_item_filter("1,abc,,2.5,3"), vec![1, 3]);
    }

    #[test]
    fn filter_keeps_duplicates() {
        // Duplicates are harmless in an IN/ANY filter.
        assert_eq!(parse_item_filter("2,2"), vec![2, 2]);
    }

    #[test]
    fn strict_parse_accepts_valid_list() {
        assert_eq!(parse_item_ids("1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse_item_ids(" 3 , 1 ").unwrap(), vec![3, 1]);
    }

    #[test]
    fn strict_parse_collapses_duplicates() {
        assert_eq!(parse_item_ids("2,1,2,1").unwrap(), vec![2, 1]);
    }

    #[test]
    fn strict_parse_ignores_empty_tokens() {
        assert_eq!(parse_item_ids("1,,2,").unwrap(), vec![1, 2]);
    }

    #[test]
    fn strict_parse_rejects_bad_token() {
        let err = parse_item_ids("1,two").unwrap_err();
        assert!(err.to_string().contains("Invalid item id 'two'"));
    }

    #[test]
    fn strict_parse_rejects_empty_list() {
        let err = parse_item_ids(" , ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn join_round_trips_order() {
        assert_eq!(join_item_ids(&[3, 1, 2]), "3,1,2");
        assert_eq!(join_item_ids(&[]), "");
    }
}
