//! Column extraction from CREATE TABLE statements
//!
//! The parser does not validate full SQL grammar; it only needs the sample
//! to contain a parenthesized, comma-separated column list. Everything else
//! (dialect quirks, table options, trailing statements) is tolerated or
//! skipped.

use crate::contract::FieldType;
use crate::error::{ContractError, ContractResult};
use crate::inference::type_resolver::resolve_sql_type;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Clauses whose first token is one of these are table-level constraints,
/// not column definitions.
const TABLE_CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY",
    "FOREIGN",
    "CONSTRAINT",
    "UNIQUE",
    "KEY",
    "INDEX",
    "CHECK",
];

/// One column clause as declared in the DDL, before type resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub sql_type: String,
    pub required: bool,
    pub constraints: BTreeMap<String, Value>,
}

/// Extract column definitions from a single CREATE TABLE statement (or
/// equivalent column-list text), in declaration order.
pub fn parse_columns(ddl: &str) -> ContractResult<Vec<RawColumn>> {
    let body = column_list_body(ddl)?;

    let mut columns = Vec::new();
    for clause in split_top_level(&body) {
        let clause = clause.trim();
        if clause.is_empty() {
            // trailing comma
            continue;
        }
        if is_table_constraint(clause) {
            debug!("Skipping table-level constraint clause: {}", clause);
            continue;
        }
        if let Some(column) = parse_column_clause(clause) {
            columns.push(column);
        }
    }

    if columns.is_empty() {
        return Err(ContractError::malformed_schema(
            "no column definitions found in DDL sample",
        ));
    }
    Ok(columns)
}

/// Locate the parenthesized column list, with `--` comments stripped.
fn column_list_body(ddl: &str) -> ContractResult<String> {
    let cleaned: String = ddl
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n");

    let start = cleaned.find('(').ok_or_else(|| {
        ContractError::malformed_schema("DDL sample contains no parenthesized column list")
    })?;

    let mut depth = 0usize;
    for (idx, c) in cleaned[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(cleaned[start + 1..start + idx].to_string());
                }
            }
            _ => {}
        }
    }

    Err(ContractError::malformed_schema(
        "unbalanced parentheses in DDL sample",
    ))
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("--") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Split on commas that sit outside any nested parentheses, so
/// `DECIMAL(10,2)` stays one clause.
fn split_top_level(body: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in body.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => clauses.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    clauses.push(current);
    clauses
}

fn is_table_constraint(clause: &str) -> bool {
    clause
        .split_whitespace()
        .next()
        .map(|token| {
            let token = token.to_ascii_uppercase();
            TABLE_CONSTRAINT_KEYWORDS.iter().any(|kw| token == *kw)
        })
        .unwrap_or(false)
}

/// Parse one column clause: leading identifier, type token with optional
/// parenthesized arguments, then constraint keywords.
fn parse_column_clause(clause: &str) -> Option<RawColumn> {
    let (name, rest) = take_identifier(clause)?;
    if name.is_empty() {
        return None;
    }
    let rest = rest.trim_start();

    let type_end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let sql_type = &rest[..type_end];
    if sql_type.is_empty() {
        return None;
    }

    let mut remainder = &rest[type_end..];
    let mut type_args = None;
    let after = remainder.trim_start();
    if let Some(stripped) = after.strip_prefix('(') {
        if let Some(close) = find_balanced_close(stripped) {
            type_args = Some(&stripped[..close]);
            remainder = &stripped[close + 1..];
        }
    }

    let upper_remainder = remainder.to_ascii_uppercase();
    let required =
        upper_remainder.contains("NOT NULL") || upper_remainder.contains("PRIMARY KEY");

    let mut constraints = BTreeMap::new();
    if let Some(args) = type_args {
        insert_type_arg_constraints(&mut constraints, sql_type, args);
    }
    if upper_remainder.split_whitespace().any(|t| t == "UNIQUE") {
        constraints.insert("unique".to_string(), Value::Bool(true));
    }
    if let Some(default) = default_token(remainder) {
        constraints.insert("default".to_string(), Value::String(default));
    }

    Some(RawColumn {
        name,
        sql_type: sql_type.to_string(),
        required,
        constraints,
    })
}

/// Split the leading identifier off a clause, honoring backtick, double
/// quote, and square-bracket quoting so spaced identifiers survive intact.
fn take_identifier(clause: &str) -> Option<(String, &str)> {
    let clause = clause.trim_start();
    let first = clause.chars().next()?;
    let closer = match first {
        '`' => Some('`'),
        '"' => Some('"'),
        '[' => Some(']'),
        _ => None,
    };

    if let Some(closer) = closer {
        let rest = &clause[first.len_utf8()..];
        let close_idx = rest.find(closer)?;
        let name = rest[..close_idx].to_string();
        Some((name, &rest[close_idx + closer.len_utf8()..]))
    } else {
        let idx = clause.find(char::is_whitespace)?;
        Some((clause[..idx].to_string(), &clause[idx..]))
    }
}

/// Index of the `)` matching an already-consumed `(`.
fn find_balanced_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Length/precision arguments are ignored for type resolution but kept as
/// constraints: `VARCHAR(255)` records `max_length`, `DECIMAL(10,2)`
/// records `precision` and `scale`.
fn insert_type_arg_constraints(
    constraints: &mut BTreeMap<String, Value>,
    sql_type: &str,
    args: &str,
) {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    match resolve_sql_type(sql_type) {
        FieldType::String => {
            if let Some(Ok(max_length)) = parts.first().map(|p| p.parse::<u64>()) {
                constraints.insert("max_length".to_string(), Value::from(max_length));
            }
        }
        FieldType::Float => {
            if let Some(Ok(precision)) = parts.first().map(|p| p.parse::<u64>()) {
                constraints.insert("precision".to_string(), Value::from(precision));
            }
            if let Some(Ok(scale)) = parts.get(1).map(|p| p.parse::<u64>()) {
                constraints.insert("scale".to_string(), Value::from(scale));
            }
        }
        _ => {}
    }
}

/// The token following a DEFAULT keyword, with quotes stripped.
fn default_token(remainder: &str) -> Option<String> {
    let mut tokens = remainder.split_whitespace();
    while let Some(token) = tokens.next() {
        if token.eq_ignore_ascii_case("DEFAULT") {
            return tokens
                .next()
                .map(|t| t.trim_matches(|c| matches!(c, '\'' | '"')).to_string());
        }
    }
    None
}
