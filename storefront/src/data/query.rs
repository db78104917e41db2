/// Fluent builder for `SELECT` statements with `?` placeholders.
///
/// Conditions compare integer columns and are joined with `AND`. Table and
/// column names are checked against `[A-Za-z_][A-Za-z0-9_]*`; values only
/// ever travel as binds.
///
/// ```ignore
/// let (sql, params) = QueryBuilder::new("orders")
///     .where_eq("user_id", 3)
///     .order_by("id", true)
///     .build_select(&["id", "status"])?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    conditions: Vec<(String, i64)>,
    order: Vec<(String, bool)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            conditions: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn where_eq(mut self, column: &str, value: i64) -> Self {
        self.conditions.push((column.to_string(), value));
        self
    }

    /// Add an equality condition only when `value` is present.
    pub fn where_eq_opt(self, column: &str, value: Option<i64>) -> Self {
        match value {
            Some(v) => self.where_eq(column, v),
            None => self,
        }
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push((column.to_string(), ascending));
        self
    }

    pub fn build_select(&self, columns: &[&str]) -> Result<(String, Vec<i64>), QueryError> {
        for col in columns {
            check_identifier(col, "column")?;
        }
        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), self.checked_table()?);
        let params = self.append_where(&mut sql)?;
        self.append_order(&mut sql)?;
        Ok((sql, params))
    }

    fn checked_table(&self) -> Result<&str, QueryError> {
        check_identifier(&self.table, "table")?;
        Ok(&self.table)
    }

    fn append_where(&self, sql: &mut String) -> Result<Vec<i64>, QueryError> {
        let mut params = Vec::with_capacity(self.conditions.len());
        let mut clauses = Vec::with_capacity(self.conditions.len());
        for (col, value) in &self.conditions {
            check_identifier(col, "column")?;
            clauses.push(format!("{col} = ?"));
            params.push(*value);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        Ok(params)
    }

    fn append_order(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.order.is_empty() {
            return Ok(());
        }
        let mut clauses = Vec::with_capacity(self.order.len());
        for (col, asc) in &self.order {
            check_identifier(col, "column")?;
            clauses.push(format!("{col} {}", if *asc { "ASC" } else { "DESC" }));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&clauses.join(", "));
        Ok(())
    }
}

fn check_identifier(ident: &str, kind: &'static str) -> Result<(), QueryError> {
    let mut chars = ident.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        })
    }
}
