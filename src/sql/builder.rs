//! Builds parameterized SELECT (with joins), INSERT, UPDATE, DELETE and COUNT from entity descriptors.
//! Identifiers come from static descriptors only; values always travel as parameters.

use crate::model::{ColumnType, EntityDescriptor};
use crate::sql::{PageRequest, SqlValue};

/// Alias and column prefix of the primary entity in joined selects.
pub const ENTITY_ALIAS: &str = "e";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified(alias: &str, column: &str) -> String {
    format!("{}.{}", quoted(alias), quoted(column))
}

/// `$n::type`, so NULL parameters still carry the column type.
fn placeholder(n: u32, column_type: ColumnType) -> String {
    format!("${}::{}", n, column_type.pg_type())
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Statement without parameters (DDL).
    pub fn statement(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Filter on the primary entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    IdEquals(i64),
    Equals { column: &'static str, value: SqlValue },
    IsNull { column: &'static str },
}

/// `"alias"."column" AS "prefix_column"` for each of the entity's own columns, in descriptor order.
/// Same shape whether the entity is the subject of the query or a joined side table.
pub fn column_projections(entity: &EntityDescriptor, table_alias: &str, prefix: &str) -> Vec<String> {
    entity
        .columns
        .iter()
        .map(|c| {
            format!(
                "{} AS {}",
                qualified(table_alias, c.name),
                quoted(&format!("{}_{}", prefix, c.name))
            )
        })
        .collect()
}

fn where_clause(q: &mut QueryBuf, entity: &EntityDescriptor, condition: &Condition) -> String {
    match condition {
        Condition::IdEquals(id) => {
            let n = q.push_param(SqlValue::BigInt(*id));
            format!(
                " WHERE {} = {}",
                qualified(ENTITY_ALIAS, EntityDescriptor::ID_COLUMN),
                placeholder(n, ColumnType::BigInt)
            )
        }
        Condition::Equals { column, value } => {
            let n = q.push_param(value.clone());
            let ph = entity
                .column(column)
                .map(|c| placeholder(n, c.column_type))
                .unwrap_or_else(|| format!("${}", n));
            format!(" WHERE {} = {}", qualified(ENTITY_ALIAS, column), ph)
        }
        Condition::IsNull { column } => format!(" WHERE {} IS NULL", qualified(ENTITY_ALIAS, column)),
    }
}

/// Requested sort columns, then `id` as a tiebreaker so pages never overlap.
fn page_clause(page: &PageRequest) -> String {
    let mut order: Vec<String> = page
        .sort
        .iter()
        .map(|s| format!("{} {}", qualified(ENTITY_ALIAS, s.column), s.direction.as_sql()))
        .collect();
    if !page.sort.iter().any(|s| s.column == EntityDescriptor::ID_COLUMN) {
        order.push(format!("{} ASC", qualified(ENTITY_ALIAS, EntityDescriptor::ID_COLUMN)));
    }
    format!(" ORDER BY {} LIMIT {} OFFSET {}", order.join(", "), page.size, page.offset())
}

/// SELECT the entity (alias `e`) left-outer-joined to every relation target (alias = relation name),
/// with an optional condition and optional ORDER BY / LIMIT / OFFSET.
pub fn select_with_joins(
    entity: &EntityDescriptor,
    condition: Option<&Condition>,
    page: Option<&PageRequest>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut columns = column_projections(entity, ENTITY_ALIAS, ENTITY_ALIAS);
    let mut from = format!("{} {}", quoted(entity.table), quoted(ENTITY_ALIAS));
    for rel in entity.relations {
        columns.extend(column_projections(rel.target, rel.name, rel.name));
        from.push_str(&format!(
            " LEFT OUTER JOIN {} {} ON {} = {}",
            quoted(rel.target.table),
            quoted(rel.name),
            qualified(ENTITY_ALIAS, rel.fk_column),
            qualified(rel.name, EntityDescriptor::ID_COLUMN)
        ));
    }
    let where_sql = condition
        .map(|c| where_clause(&mut q, entity, c))
        .unwrap_or_default();
    let page_sql = page.map(page_clause).unwrap_or_default();
    q.sql = format!("SELECT {} FROM {}{}{}", columns.join(", "), from, where_sql, page_sql);
    q
}

pub fn count(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) AS {} FROM {}", quoted("count"), quoted(entity.table));
    q
}

pub fn exists_by_id(entity: &EntityDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlValue::BigInt(id));
    q.sql = format!(
        "SELECT 1 AS {} FROM {} WHERE {} = {} LIMIT 1",
        quoted("exists"),
        quoted(entity.table),
        quoted(EntityDescriptor::ID_COLUMN),
        placeholder(n, ColumnType::BigInt)
    );
    q
}

/// INSERT every writable column (missing values bind NULL) and return the generated id.
pub fn insert(entity: &EntityDescriptor, record: &crate::model::Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.writable_columns() {
        let n = q.push_param(record.get(c.name).clone());
        cols.push(quoted(c.name));
        placeholders.push(placeholder(n, c.column_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table),
        cols.join(", "),
        placeholders.join(", "),
        quoted(EntityDescriptor::ID_COLUMN)
    );
    q
}

/// UPDATE by id, replacing every writable column.
pub fn update(entity: &EntityDescriptor, id: i64, record: &crate::model::Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in entity.writable_columns() {
        let n = q.push_param(record.get(c.name).clone());
        sets.push(format!("{} = {}", quoted(c.name), placeholder(n, c.column_type)));
    }
    let id_param = q.push_param(SqlValue::BigInt(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(entity.table),
        sets.join(", "),
        quoted(EntityDescriptor::ID_COLUMN),
        placeholder(id_param, ColumnType::BigInt)
    );
    q
}

/// DELETE by id.
pub fn delete(entity: &EntityDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlValue::BigInt(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(entity.table),
        quoted(EntityDescriptor::ID_COLUMN),
        placeholder(n, ColumnType::BigInt)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, MOVIES, RATINGS, USERS};
    use crate::sql::Direction;

    #[test]
    fn projections_alias_every_own_column() {
        assert_eq!(
            column_projections(&USERS, "users", "users"),
            vec![
                "\"users\".\"id\" AS \"users_id\"",
                "\"users\".\"first_name\" AS \"users_first_name\"",
                "\"users\".\"last_name\" AS \"users_last_name\"",
            ]
        );
    }

    #[test]
    fn select_without_relations_or_page() {
        let q = select_with_joins(&MOVIES, None, None);
        assert_eq!(
            q.sql,
            "SELECT \"e\".\"id\" AS \"e_id\", \"e\".\"title\" AS \"e_title\", \"e\".\"genres\" AS \"e_genres\" FROM \"movies\" \"e\""
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_joins_each_relation_on_foreign_key() {
        let q = select_with_joins(&RATINGS, Some(&Condition::IdEquals(4)), None);
        assert!(q.sql.contains("\"users\".\"first_name\" AS \"users_first_name\""));
        assert!(q.sql.contains("\"movies\".\"genres\" AS \"movies_genres\""));
        assert!(q.sql.contains(
            "FROM \"ratings\" \"e\" LEFT OUTER JOIN \"users\" \"users\" ON \"e\".\"user_id\" = \"users\".\"id\" \
             LEFT OUTER JOIN \"movies\" \"movies\" ON \"e\".\"movie_id\" = \"movies\".\"id\""
        ));
        assert!(q.sql.ends_with(" WHERE \"e\".\"id\" = $1::bigint"));
        assert_eq!(q.params, vec![SqlValue::BigInt(4)]);
    }

    #[test]
    fn page_defaults_to_id_order() {
        let page = PageRequest::new(2, 10);
        let q = select_with_joins(&USERS, None, Some(&page));
        assert!(q.sql.ends_with(" ORDER BY \"e\".\"id\" ASC LIMIT 10 OFFSET 20"));
    }

    #[test]
    fn page_uses_requested_sort() {
        let page = PageRequest::new(0, 5)
            .sorted_by("last_name", Direction::Desc)
            .sorted_by("first_name", Direction::Asc);
        let q = select_with_joins(&USERS, None, Some(&page));
        assert!(q
            .sql
            .ends_with(" ORDER BY \"e\".\"last_name\" DESC, \"e\".\"first_name\" ASC, \"e\".\"id\" ASC LIMIT 5 OFFSET 0"));
    }

    #[test]
    fn explicit_id_sort_is_not_repeated() {
        let page = PageRequest::new(0, 5)
            .sorted_by("genres", Direction::Asc)
            .sorted_by("id", Direction::Desc);
        let q = select_with_joins(&MOVIES, None, Some(&page));
        assert!(q
            .sql
            .ends_with(" ORDER BY \"e\".\"genres\" ASC, \"e\".\"id\" DESC LIMIT 5 OFFSET 0"));
    }

    #[test]
    fn relation_conditions() {
        let q = select_with_joins(
            &RATINGS,
            Some(&Condition::Equals {
                column: "user_id",
                value: SqlValue::BigInt(3),
            }),
            None,
        );
        assert!(q.sql.ends_with(" WHERE \"e\".\"user_id\" = $1::bigint"));

        let q = select_with_joins(&RATINGS, Some(&Condition::IsNull { column: "movie_id" }), None);
        assert!(q.sql.ends_with(" WHERE \"e\".\"movie_id\" IS NULL"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_binds_writable_columns_in_order() {
        let record = Record::new()
            .with("rating", 4.5)
            .with("timestamp", 1_700_000_000i64)
            .with("user_id", 2i64);
        let q = insert(&RATINGS, &record);
        assert_eq!(
            q.sql,
            "INSERT INTO \"ratings\" (\"rating\", \"timestamp\", \"user_id\", \"movie_id\") \
             VALUES ($1::double precision, $2::bigint, $3::bigint, $4::bigint) RETURNING \"id\""
        );
        assert_eq!(
            q.params,
            vec![
                SqlValue::Double(4.5),
                SqlValue::BigInt(1_700_000_000),
                SqlValue::BigInt(2),
                SqlValue::Null,
            ]
        );
    }

    #[test]
    fn update_sets_all_columns_then_id() {
        let record = Record::new().with("title", "Heat").with("genres", "Crime");
        let q = update(&MOVIES, 8, &record);
        assert_eq!(
            q.sql,
            "UPDATE \"movies\" SET \"title\" = $1::text, \"genres\" = $2::text WHERE \"id\" = $3::bigint"
        );
        assert_eq!(q.params.last(), Some(&SqlValue::BigInt(8)));
    }

    #[test]
    fn delete_count_and_exists() {
        assert_eq!(delete(&USERS, 1).sql, "DELETE FROM \"users\" WHERE \"id\" = $1::bigint");
        assert_eq!(count(&USERS).sql, "SELECT COUNT(*) AS \"count\" FROM \"users\"");
        let q = exists_by_id(&MOVIES, 3);
        assert_eq!(q.sql, "SELECT 1 AS \"exists\" FROM \"movies\" WHERE \"id\" = $1::bigint LIMIT 1");
        assert_eq!(q.params, vec![SqlValue::BigInt(3)]);
    }
}
