//! In-memory execution collaborator for integration tests
//!
//! A tiny table store that executes the exact statement shapes the query
//! builder renders (parameterized INSERT/SELECT/UPDATE/DELETE with
//! `$1..$n` placeholders). Values are treated as opaque bindings
//! throughout, so the suite can exercise full create/find/update/delete
//! flows without a database server.

use std::cmp::Ordering;
use std::collections::HashMap;

use strata_orm::{Connection, OrmError, OrmResult, Row, Statement, Value};

#[derive(Debug, Clone)]
struct Table {
    rows: Vec<Row>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug)]
pub struct MemoryConnection {
    tables: HashMap<String, Table>,
    last_insert: Value,
    snapshot: Option<HashMap<String, Table>>,
    in_tx: bool,
    statements: Vec<(String, Vec<Value>)>,
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self {
            tables: HashMap::new(),
            last_insert: Value::Null,
            snapshot: None,
            in_tx: false,
            statements: Vec::new(),
        }
    }
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table with pre-existing rows
    pub fn seed(&mut self, table: &str, rows: Vec<Row>) {
        let next_id = rows
            .iter()
            .filter_map(|row| row.get("id").and_then(|v| v.as_i64()))
            .max()
            .unwrap_or(0)
            + 1;
        self.tables.insert(table.to_string(), Table { rows, next_id });
    }

    /// Current rows of a table, for assertions
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Every statement executed so far, with its bindings
    pub fn statements(&self) -> &[(String, Vec<Value>)] {
        &self.statements
    }

    fn exec_insert(&mut self, rest: &str, bindings: &[Value]) -> OrmResult<Statement> {
        let open = rest
            .find('(')
            .ok_or_else(|| malformed(rest))?;
        let close = rest.find(')').ok_or_else(|| malformed(rest))?;
        let table_name = rest[..open].trim().to_string();
        let columns: Vec<&str> = rest[open + 1..close].split(", ").collect();

        if columns.len() != bindings.len() {
            return Err(OrmError::Database(format!(
                "insert expected {} bindings, got {}",
                columns.len(),
                bindings.len()
            )));
        }

        let mut row: Row = columns
            .iter()
            .zip(bindings.iter())
            .map(|(c, v)| (c.to_string(), v.clone()))
            .collect();

        let table = self.tables.entry(table_name).or_default();
        let id = match row.get("id") {
            Some(value) => value.clone(),
            None => {
                let id = Value::Int(table.next_id);
                table.next_id += 1;
                row.insert("id".to_string(), id.clone());
                id
            }
        };
        table.rows.push(row);
        self.last_insert = id;

        Ok(Statement::new(vec![], 1))
    }

    fn exec_select(&self, rest: &str, bindings: &[Value]) -> OrmResult<Statement> {
        let from_idx = rest
            .find(" FROM ")
            .ok_or_else(|| malformed(rest))?;
        let select_list = &rest[..from_idx];
        let tail = &rest[from_idx + 6..];
        let parts = TailParts::parse(tail);

        let source = self
            .tables
            .get(parts.table)
            .map(|t| t.rows.as_slice())
            .unwrap_or(&[]);

        let mut rows: Vec<Row> = source
            .iter()
            .filter(|row| match parts.where_region {
                Some(region) => eval_where(region, row, bindings),
                None => true,
            })
            .cloned()
            .collect();

        if select_list == "COUNT(*) AS count" {
            let mut count_row = Row::new();
            count_row.insert("count".to_string(), Value::Int(rows.len() as i64));
            return Ok(Statement::new(vec![count_row], 0));
        }

        if let Some(order_region) = parts.order_region {
            apply_order(&mut rows, order_region);
        }
        if let Some(offset) = parts.offset {
            rows = rows.into_iter().skip(offset).collect();
        }
        if let Some(limit) = parts.limit {
            rows.truncate(limit);
        }

        if select_list != "*" {
            let columns: Vec<&str> = select_list.split(", ").collect();
            rows = rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .filter(|(k, _)| columns.contains(&k.as_str()))
                        .collect()
                })
                .collect();
        }

        Ok(Statement::new(rows, 0))
    }

    fn exec_update(&mut self, rest: &str, bindings: &[Value]) -> OrmResult<Statement> {
        let set_idx = rest
            .find(" SET ")
            .ok_or_else(|| malformed(rest))?;
        let table_name = &rest[..set_idx];
        let after = &rest[set_idx + 5..];

        let (set_region, where_region) = match after.find(" WHERE ") {
            Some(i) => (&after[..i], Some(&after[i + 7..])),
            None => (after, None),
        };

        let mut assignments = Vec::new();
        for pair in set_region.split(", ") {
            let (column, placeholder) = pair
                .split_once(" = ")
                .ok_or_else(|| malformed(rest))?;
            assignments.push((column.to_string(), binding_index(placeholder)?));
        }

        let mut affected = 0u64;
        if let Some(table) = self.tables.get_mut(table_name) {
            for row in &mut table.rows {
                let matches = match where_region {
                    Some(region) => eval_where(region, row, bindings),
                    None => true,
                };
                if matches {
                    for (column, index) in &assignments {
                        row.insert(column.clone(), bindings[*index].clone());
                    }
                    affected += 1;
                }
            }
        }

        Ok(Statement::new(vec![], affected))
    }

    fn exec_delete(&mut self, rest: &str, bindings: &[Value]) -> OrmResult<Statement> {
        let (table_name, where_region) = match rest.find(" WHERE ") {
            Some(i) => (&rest[..i], Some(&rest[i + 7..])),
            None => (rest, None),
        };

        let mut affected = 0u64;
        if let Some(table) = self.tables.get_mut(table_name) {
            table.rows.retain(|row| {
                let matches = match where_region {
                    Some(region) => eval_where(region, row, bindings),
                    None => true,
                };
                if matches {
                    affected += 1;
                }
                !matches
            });
        }

        Ok(Statement::new(vec![], affected))
    }
}

impl Connection for MemoryConnection {
    fn execute(&mut self, sql: &str, bindings: &[Value]) -> OrmResult<Statement> {
        self.statements.push((sql.to_string(), bindings.to_vec()));

        if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
            self.exec_insert(rest, bindings)
        } else if let Some(rest) = sql.strip_prefix("SELECT ") {
            self.exec_select(rest, bindings)
        } else if let Some(rest) = sql.strip_prefix("UPDATE ") {
            self.exec_update(rest, bindings)
        } else if let Some(rest) = sql.strip_prefix("DELETE FROM ") {
            self.exec_delete(rest, bindings)
        } else {
            Err(malformed(sql))
        }
    }

    fn last_insert_id(&mut self) -> OrmResult<Value> {
        Ok(self.last_insert.clone())
    }

    fn begin_transaction(&mut self) -> OrmResult<()> {
        self.snapshot = Some(self.tables.clone());
        self.in_tx = true;
        Ok(())
    }

    fn commit(&mut self) -> OrmResult<()> {
        self.snapshot = None;
        self.in_tx = false;
        Ok(())
    }

    fn rollback(&mut self) -> OrmResult<()> {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
        self.in_tx = false;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.in_tx
    }
}

struct TailParts<'a> {
    table: &'a str,
    where_region: Option<&'a str>,
    order_region: Option<&'a str>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl<'a> TailParts<'a> {
    fn parse(tail: &'a str) -> Self {
        let idx_where = tail.find(" WHERE ");
        let idx_order = tail.find(" ORDER BY ");
        let idx_limit = tail.find(" LIMIT ");
        let idx_offset = tail.find(" OFFSET ");

        let table_end = [idx_where, idx_order, idx_limit, idx_offset]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(tail.len());

        let where_region = region(tail, idx_where, 7, &[idx_order, idx_limit, idx_offset]);
        let order_region = region(tail, idx_order, 10, &[idx_limit, idx_offset]);
        let limit =
            region(tail, idx_limit, 7, &[idx_offset]).and_then(|s| s.trim().parse().ok());
        let offset = idx_offset
            .map(|s| &tail[s + 8..])
            .and_then(|s| s.trim().parse().ok());

        Self {
            table: &tail[..table_end],
            where_region,
            order_region,
            limit,
            offset,
        }
    }
}

/// Slice out the clause text between a keyword occurrence and the next
/// following keyword (or the end of the statement).
fn region<'a>(
    tail: &'a str,
    start: Option<usize>,
    keyword_len: usize,
    enders: &[Option<usize>],
) -> Option<&'a str> {
    start.map(|s| {
        let end = enders
            .iter()
            .flatten()
            .copied()
            .filter(|&e| e > s)
            .min()
            .unwrap_or(tail.len());
        &tail[s + keyword_len..end]
    })
}

fn malformed(sql: &str) -> OrmError {
    OrmError::Database(format!("unsupported statement: {}", sql))
}

fn binding_index(placeholder: &str) -> OrmResult<usize> {
    placeholder
        .strip_prefix('$')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .map(|n| n - 1)
        .ok_or_else(|| malformed(placeholder))
}

/// Evaluate a rendered WHERE region left to right, the way the builder
/// composed it: `p1 AND p2 OR p3` folds as `((p1 AND p2) OR p3)`.
fn eval_where(region: &str, row: &Row, bindings: &[Value]) -> bool {
    let mut rest = region;
    let mut joiner_is_or = false;
    let mut acc: Option<bool> = None;

    loop {
        let next_and = rest.find(" AND ");
        let next_or = rest.find(" OR ");
        let (predicate, next_joiner, remainder) = match (next_and, next_or) {
            (Some(a), Some(o)) if a < o => (&rest[..a], Some(false), &rest[a + 5..]),
            (Some(_), Some(o)) => (&rest[..o], Some(true), &rest[o + 4..]),
            (Some(a), None) => (&rest[..a], Some(false), &rest[a + 5..]),
            (None, Some(o)) => (&rest[..o], Some(true), &rest[o + 4..]),
            (None, None) => (rest, None, ""),
        };

        let result = eval_predicate(predicate, row, bindings);
        acc = Some(match acc {
            None => result,
            Some(previous) if joiner_is_or => previous || result,
            Some(previous) => previous && result,
        });

        match next_joiner {
            Some(is_or) => {
                joiner_is_or = is_or;
                rest = remainder;
            }
            None => return acc.unwrap_or(true),
        }
    }
}

fn eval_predicate(predicate: &str, row: &Row, bindings: &[Value]) -> bool {
    if predicate == "1 = 0" {
        return false;
    }

    if let Some(in_idx) = predicate.find(" IN (") {
        let column = &predicate[..in_idx];
        let inside = predicate[in_idx + 5..].trim_end_matches(')');
        let candidate = match row.get(column) {
            Some(value) => value,
            None => return false,
        };
        return inside.split(", ").any(|placeholder| {
            binding_index(placeholder)
                .ok()
                .and_then(|i| bindings.get(i))
                .map(|value| values_equal(candidate, value))
                .unwrap_or(false)
        });
    }

    let mut tokens = predicate.splitn(3, ' ');
    let (column, operator, placeholder) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(c), Some(o), Some(p)) => (c, o, p),
        _ => return false,
    };

    let bound = match binding_index(placeholder).ok().and_then(|i| bindings.get(i)) {
        Some(value) => value,
        None => return false,
    };
    let current = match row.get(column) {
        Some(value) => value,
        None => return false,
    };

    match operator {
        "=" => values_equal(current, bound),
        "!=" | "<>" => !values_equal(current, bound),
        ">" => compare(current, bound) == Some(Ordering::Greater),
        ">=" => matches!(compare(current, bound), Some(Ordering::Greater | Ordering::Equal)),
        "<" => compare(current, bound) == Some(Ordering::Less),
        "<=" => matches!(compare(current, bound), Some(Ordering::Less | Ordering::Equal)),
        "LIKE" => match (current.as_str(), bound.as_str()) {
            (Some(text), Some(pattern)) => like_match(text, pattern),
            _ => false,
        },
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Equal) || a == b
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            let x = a.as_f64()?;
            let y = b.as_f64()?;
            x.partial_cmp(&y)
        }
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Uuid(x), Value::Uuid(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn like_match(text: &str, pattern: &str) -> bool {
    let starts = pattern.starts_with('%');
    let ends = pattern.ends_with('%');
    let core = pattern.trim_matches('%');

    match (starts, ends) {
        (true, true) => text.contains(core),
        (true, false) => text.ends_with(core),
        (false, true) => text.starts_with(core),
        (false, false) => text == pattern,
    }
}

fn apply_order(rows: &mut [Row], order_region: &str) {
    let terms: Vec<(&str, bool)> = order_region
        .split(", ")
        .filter_map(|term| {
            term.rsplit_once(' ')
                .map(|(column, direction)| (column, direction == "DESC"))
        })
        .collect();

    for (column, descending) in terms.iter().rev() {
        rows.sort_by(|a, b| {
            let ordering = match (a.get(*column), b.get(*column)) {
                (Some(x), Some(y)) => compare(x, y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            if *descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

/// Build a row from column/value pairs
pub fn row(pairs: Vec<(&str, Value)>) -> Row {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
