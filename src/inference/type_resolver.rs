//! SQL type keyword resolution, defined once for the DDL parser

use crate::contract::FieldType;

/// Keyword table in match order; the first substring hit wins.
const SQL_TYPE_TABLE: &[(&str, FieldType)] = &[
    ("VARCHAR", FieldType::String),
    ("CHAR", FieldType::String),
    ("TEXT", FieldType::String),
    ("CLOB", FieldType::String),
    ("SMALLINT", FieldType::Integer),
    ("BIGINT", FieldType::Integer),
    ("INTEGER", FieldType::Integer),
    ("INT", FieldType::Integer),
    ("SERIAL", FieldType::Integer),
    ("FLOAT", FieldType::Float),
    ("DOUBLE", FieldType::Float),
    ("DECIMAL", FieldType::Float),
    ("NUMERIC", FieldType::Float),
    ("REAL", FieldType::Float),
    ("BOOLEAN", FieldType::Boolean),
    ("BOOL", FieldType::Boolean),
    ("DATETIME", FieldType::Timestamp),
    ("TIMESTAMP", FieldType::Timestamp),
    ("DATE", FieldType::Timestamp),
    ("TIME", FieldType::Timestamp),
];

/// Map a raw SQL type token to a contract field type.
///
/// Case-insensitive substring match, so `VARCHAR(255)` and
/// `character varying` both resolve. Unrecognized tokens fall back to
/// `string` rather than failing, so one odd column never blocks
/// generating the rest of the contract.
pub fn resolve_sql_type(raw_type: &str) -> FieldType {
    let upper = raw_type.to_ascii_uppercase();
    for (keyword, field_type) in SQL_TYPE_TABLE {
        if upper.contains(keyword) {
            return *field_type;
        }
    }
    FieldType::String
}
