use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Pulls entity, field and value out of the error text and the constraint
/// name so violations can be reported as structured API errors.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

/// Global regex patterns cache. `None` only if a pattern failed to compile.
static REGEX_PATTERNS: OnceLock<Option<RegexPatterns>> = OnceLock::new();

impl ConstraintParser {
    /// Gets the cached regex patterns, initializing them if necessary
    fn patterns() -> Option<&'static RegexPatterns> {
        REGEX_PATTERNS
            .get_or_init(|| {
                Some(RegexPatterns {
                    // "Key (clerk_id)=(user_123) already exists."
                    key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok()?,
                    // Matches column names in quotes
                    column_name: Regex::new(r#"column "([^"]+)""#).ok()?,
                    // Matches table names in quotes
                    table_name: Regex::new(r#"table "([^"]+)""#).ok()?,
                })
            })
            .as_ref()
    }

    /// Parses a unique constraint violation message to extract structured information.
    ///
    /// The constraint name (`users_clerk_id_key`, `users_pkey`) wins for
    /// entity and field; the message supplies the value.
    ///
    /// # Arguments
    /// * `message` - The database error message
    /// * `constraint_name` - Optional constraint name from the database
    ///
    /// # Returns
    /// Optional tuple of (entity, field, value) if parsing succeeds
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_message = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = from_message
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = from_message?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns `(entity, field, referenced_value)` for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_message = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) =
            constraint_name.and_then(Self::parse_foreign_key_constraint_name)
        {
            let value = from_message
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = from_message?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| {
                constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
            })
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits `users_clerk_id_key` into `("users", "clerk_id")` and
    /// `users_pkey` into `("users", "id")`.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        if let Some(entity) = constraint.strip_suffix("_pkey") {
            return (!entity.is_empty()).then(|| (entity.to_string(), "id".to_string()));
        }

        let body = constraint.strip_suffix("_key")?;
        let (entity, field) = body.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Splits `stocks_user_id_fkey` into `("stocks", "user_id")`.
    pub fn parse_foreign_key_constraint_name(constraint: &str) -> Option<(String, String)> {
        let body = constraint.strip_suffix("_fkey")?;
        let (entity, field) = body.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` detail.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns()?.key_value.captures(message)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    /// Extracts a quoted column name from the message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        let caps = Self::patterns()?.column_name.captures(message)?;
        Some(caps.get(1)?.as_str().to_string())
    }

    /// Extracts a quoted table name from the message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        let caps = Self::patterns()?.table_name.captures(message)?;
        Some(caps.get(1)?.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_clerk_id_key"),
            Some(("users".to_string(), "clerk_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_pkey"),
            Some(("users".to_string(), "id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("weird"), None);
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("stocks_user_id_fkey"),
            Some(("stocks".to_string(), "user_id".to_string()))
        );
    }

    #[test]
    fn test_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(a@b.co) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, None),
            Some(("resource".to_string(), "email".to_string(), "a@b.co".to_string()))
        );
    }

    #[test]
    fn test_extract_column_and_table() {
        let message = "null value in column \"ticker\" of relation \"stocks\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::extract_column_from_message(message),
            Some("ticker".to_string())
        );
        assert_eq!(ConstraintParser::extract_table_from_message(message), None);
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            Some(("resource".to_string(), "ticker".to_string()))
        );
    }
}
