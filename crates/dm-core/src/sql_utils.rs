//! SQL identifier quoting

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and doubles any embedded double
/// quote, following the SQL standard.
///
/// # Examples
/// ```
/// use dm_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("schema_migrations"), r#""schema_migrations""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a `schema`/`table` pair as `"schema"."table"`.
///
/// Each part is quoted whole, so dots inside a catalog name are kept.
pub fn quote_schema_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
