//! SQL text rendering
//!
//! Table and column names are interpolated as-is. They come from entity
//! declarations and must not be derived from untrusted input.

/// `create table if not exists <table> (<name> <type>, ...)`
pub fn create_table<'a, I>(table: &str, definitions: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let columns = definitions
        .into_iter()
        .map(|(name, column_type)| format!("{} {}", name, column_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!("create table if not exists {} ({})", table, columns)
}

/// `select <c1, c2, ...> from <table>;`
pub fn select_all(table: &str, columns: &[&str]) -> String {
    format!("select {} from {};", columns.join(", "), table)
}

/// `insert into <table> (<c1, c2, ...>) values (?, ?, ...);`
pub fn insert_into(table: &str, columns: &[&str]) -> String {
    format!(
        "insert into {} ({}) values ({});",
        table,
        columns.join(", "),
        placeholders(columns.len())
    )
}

/// `count` positional placeholders joined with `", "`
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
