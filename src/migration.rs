//! Schema bootstrap: `CREATE TABLE IF NOT EXISTS` for every entity, generated
//! from the descriptors. Tables are created in dependency order so foreign keys
//! always reference an existing table.

use crate::db::Database;
use crate::error::AppError;
use crate::model::{all_descriptors, EntityDescriptor};
use crate::sql::QueryBuf;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn create_table_sql(entity: &EntityDescriptor) -> String {
    let mut col_defs: Vec<String> = Vec::new();
    for c in entity.columns {
        let mut def = if c.primary_key {
            format!("{} BIGSERIAL PRIMARY KEY", quote(c.name))
        } else {
            format!("{} {}", quote(c.name), c.column_type.pg_type().to_uppercase())
        };
        if c.required && !c.primary_key {
            def.push_str(" NOT NULL");
        }
        if let Some(r) = entity.relations.iter().find(|r| r.fk_column == c.name) {
            def.push_str(&format!(
                " REFERENCES {} ({})",
                quote(r.target.table),
                quote(EntityDescriptor::ID_COLUMN)
            ));
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(entity.table),
        col_defs.join(", ")
    )
}

/// Idempotent; existing tables are left untouched.
pub async fn apply_migrations(db: &dyn Database) -> Result<(), AppError> {
    for entity in all_descriptors() {
        tracing::info!(table = entity.table, "ensuring table");
        db.execute(&QueryBuf::statement(create_table_sql(entity))).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDatabase;
    use crate::model::{RATINGS, USERS};

    #[test]
    fn users_table() {
        assert_eq!(
            create_table_sql(&USERS),
            "CREATE TABLE IF NOT EXISTS \"users\" (\"id\" BIGSERIAL PRIMARY KEY, \
             \"first_name\" TEXT NOT NULL, \"last_name\" TEXT NOT NULL)"
        );
    }

    #[test]
    fn ratings_reference_users_and_movies() {
        let sql = create_table_sql(&RATINGS);
        assert!(sql.contains("\"rating\" DOUBLE PRECISION NOT NULL"));
        assert!(sql.contains("\"timestamp\" BIGINT NOT NULL"));
        assert!(sql.contains("\"user_id\" BIGINT REFERENCES \"users\" (\"id\")"));
        assert!(sql.contains("\"movie_id\" BIGINT REFERENCES \"movies\" (\"id\")"));
    }

    #[tokio::test]
    async fn tables_are_created_parents_first() {
        let db = InMemoryDatabase::new();
        apply_migrations(&db).await.unwrap();
        let tables: Vec<String> = db
            .recorded_queries()
            .iter()
            .map(|q| q.sql.split('"').nth(1).unwrap_or_default().to_string())
            .collect();
        assert_eq!(tables, ["users", "movies", "ratings", "tags"]);
    }
}
