//! Read-only gate for caller-supplied SQL.
//!
//! The check is a plain substring scan over the upper-cased statement. A
//! forbidden word inside a string literal or identifier is rejected as well;
//! false positives are accepted so that no mutating statement reaches the store.

use std::fmt;

/// Keywords that reject a statement, in reporting order.
pub const FORBIDDEN_KEYWORDS: [&str; 6] =
    ["UPDATE", "DELETE", "DROP", "INSERT", "ALTER", "TRUNCATE"];

/// Reason a statement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlRejection {
    /// Statement does not begin with `SELECT`. `forbidden` is the first
    /// forbidden keyword it also contains, if any.
    NotSelect { forbidden: Option<&'static str> },
    /// Statement contains a forbidden keyword.
    ForbiddenKeyword(&'static str),
}

impl SqlRejection {
    /// Caller-facing message used by the `db_query` tool.
    pub fn message(&self) -> String {
        match self {
            SqlRejection::NotSelect { forbidden: None } => {
                format!("Only SELECT queries are allowed: {self}")
            }
            SqlRejection::NotSelect {
                forbidden: Some(word),
            } => format!(
                "Only SELECT queries are allowed: {self}; query contains forbidden keyword: {word}"
            ),
            SqlRejection::ForbiddenKeyword(word) => {
                format!("Query contains forbidden keyword: {word}")
            }
        }
    }
}

impl fmt::Display for SqlRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlRejection::NotSelect { .. } => write!(f, "not a SELECT"),
            SqlRejection::ForbiddenKeyword(word) => write!(f, "forbidden keyword: {word}"),
        }
    }
}

/// Decide whether `sql` is an allowed read-only statement.
pub fn is_safe_select(sql: &str) -> Result<(), SqlRejection> {
    let normalized = sql.trim().to_uppercase();
    let forbidden = first_forbidden(&normalized);
    if !normalized.starts_with("SELECT") {
        return Err(SqlRejection::NotSelect { forbidden });
    }
    match forbidden {
        Some(word) => Err(SqlRejection::ForbiddenKeyword(word)),
        None => Ok(()),
    }
}

fn first_forbidden(normalized: &str) -> Option<&'static str> {
    FORBIDDEN_KEYWORDS
        .iter()
        .copied()
        .find(|word| normalized.contains(word))
}

#[cfg(test)]
mod tests {
    use super::{FORBIDDEN_KEYWORDS, SqlRejection, is_safe_select};
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_plain_selects_regardless_of_case_and_padding() {
        assert_eq!(is_safe_select("SELECT * FROM tickets"), Ok(()));
        assert_eq!(is_safe_select("   select id from tickets\n"), Ok(()));
        assert_eq!(is_safe_select("SeLeCt count(*) FROM tickets"), Ok(()));
    }

    #[test]
    fn rejects_non_select_statements() {
        for sql in [
            "",
            "   ",
            "DELETE FROM tickets",
            "WITH x AS (SELECT 1) SELECT * FROM x",
            "EXPLAIN SELECT 1",
            "-- comment\nSELECT 1",
        ] {
            let rejection = is_safe_select(sql).unwrap_err();
            assert!(matches!(rejection, SqlRejection::NotSelect { .. }), "{sql}");
            assert_eq!(rejection.to_string(), "not a SELECT");
        }
    }

    #[test]
    fn rejects_every_forbidden_keyword() {
        for word in FORBIDDEN_KEYWORDS {
            let sql = format!("SELECT * FROM tickets; {} x", word.to_lowercase());
            assert_eq!(
                is_safe_select(&sql),
                Err(SqlRejection::ForbiddenKeyword(word))
            );
        }
    }

    #[test]
    fn reports_first_keyword_in_list_order() {
        let sql = "SELECT 1; DROP TABLE t; UPDATE t SET a = 1";
        assert_eq!(
            is_safe_select(sql),
            Err(SqlRejection::ForbiddenKeyword("UPDATE"))
        );
    }

    #[test]
    fn substring_matches_inside_identifiers_and_literals() {
        assert_eq!(
            is_safe_select("SELECT updated_at FROM tickets"),
            Err(SqlRejection::ForbiddenKeyword("UPDATE"))
        );
        assert_eq!(
            is_safe_select("SELECT * FROM tickets WHERE title = 'dropdown broken'"),
            Err(SqlRejection::ForbiddenKeyword("DROP"))
        );
    }

    #[test]
    fn non_select_mutations_also_name_the_keyword() {
        assert_eq!(
            is_safe_select("DELETE FROM tickets WHERE id='1'"),
            Err(SqlRejection::NotSelect {
                forbidden: Some("DELETE")
            })
        );
        assert_eq!(
            is_safe_select("SHOW TABLES"),
            Err(SqlRejection::NotSelect { forbidden: None })
        );
    }

    #[test]
    fn messages_carry_reason() {
        assert_eq!(
            SqlRejection::NotSelect { forbidden: None }.message(),
            "Only SELECT queries are allowed: not a SELECT"
        );
        assert_eq!(
            SqlRejection::NotSelect {
                forbidden: Some("UPDATE")
            }
            .message(),
            "Only SELECT queries are allowed: not a SELECT; query contains forbidden keyword: UPDATE"
        );
        assert_eq!(
            SqlRejection::ForbiddenKeyword("DELETE").message(),
            "Query contains forbidden keyword: DELETE"
        );
        assert_eq!(
            SqlRejection::ForbiddenKeyword("DELETE").to_string(),
            "forbidden keyword: DELETE"
        );
    }
}
