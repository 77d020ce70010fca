//! Field-name policy shared by inference and manual contract validation
//!
//! Auto-generation and the contract validator once carried independent
//! copies of this character policy and drifted apart; both now call into
//! this single module. [`sanitize_field_name`] is the mutating entry point
//! used when deriving names from samples, [`validate_field_name`] the
//! non-mutating check used when a caller supplies a name directly.

use crate::error::{ContractError, ContractResult};

/// Maximum length of a field name, in characters.
pub const MAX_FIELD_NAME_LEN: usize = 100;

/// Substituted when sanitization leaves nothing but underscores, so a name
/// like `{` still yields a usable identifier instead of `_`.
pub const UNDERSCORE_PLACEHOLDER: &str = "field_underscore";

/// Punctuation permitted anywhere in a field name, alongside letters and
/// digits. Everything else is replaced during sanitization and rejected
/// during validation.
const ALLOWED_PUNCTUATION: [char; 8] = [' ', '.', '-', '_', '@', '#', '?', '$'];

/// Whether `c` may appear anywhere in a field name.
pub fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Whether `c` may start a field name.
pub fn is_allowed_leading_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Sanitize a raw name into one that passes [`validate_field_name`].
///
/// Each disallowed character becomes exactly one underscore; replacements
/// are never collapsed, so the positional structure of the input survives
/// (`"a(("` becomes `"a__"`). Errors only on empty or whitespace-only
/// input; every other input yields a usable name.
pub fn sanitize_field_name(raw: &str) -> ContractResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContractError::invalid_field_name(
            "field name cannot be empty or whitespace only",
        ));
    }

    let mut sanitized: String = trimmed
        .chars()
        .map(|c| if is_allowed_char(c) { c } else { '_' })
        .collect();

    if let Some(first) = sanitized.chars().next() {
        if !is_allowed_leading_char(first) {
            sanitized.insert(0, '_');
        }
    }

    if sanitized.chars().count() > MAX_FIELD_NAME_LEN {
        sanitized = sanitized.chars().take(MAX_FIELD_NAME_LEN).collect();
    }

    // truncation can expose trailing whitespace
    let sanitized = sanitized.trim_end();

    if sanitized.chars().all(|c| c == '_') {
        return Ok(UNDERSCORE_PLACEHOLDER.to_string());
    }

    Ok(sanitized.to_string())
}

/// Check a field name against the policy without modifying it.
///
/// Used by the manual contract-entry path; a name produced by
/// [`sanitize_field_name`] always passes.
pub fn validate_field_name(name: &str) -> ContractResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContractError::invalid_field_name(
            "field name cannot be empty or whitespace only",
        ));
    }

    if name.chars().count() > MAX_FIELD_NAME_LEN {
        return Err(ContractError::invalid_field_name(format!(
            "field name cannot exceed {} characters",
            MAX_FIELD_NAME_LEN
        )));
    }

    if let Some(first) = name.chars().next() {
        if !is_allowed_leading_char(first) {
            return Err(ContractError::invalid_field_name(format!(
                "field name '{}' must start with a letter, underscore, or dollar sign",
                name
            )));
        }
    }

    let mut invalid: Vec<char> = name.chars().filter(|c| !is_allowed_char(*c)).collect();
    invalid.sort_unstable();
    invalid.dedup();
    if !invalid.is_empty() {
        return Err(ContractError::invalid_field_name(format!(
            "field name '{}' contains disallowed characters: {}",
            name,
            invalid
                .iter()
                .map(|c| format!("'{}'", c))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(())
}
