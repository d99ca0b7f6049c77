use anyhow::{Context, Result};

use super::connection::DbConn;

const DROP_STATEMENTS: [&str; 4] = [
    "DROP TABLE IF EXISTS assessments",
    "DROP TABLE IF EXISTS actions",
    "DROP TABLE IF EXISTS matches",
    "DROP TABLE IF EXISTS players",
];

/// Create any missing tables and indexes; existing data is kept
pub fn initialize_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema ready ({} statements)", statements.len());
    Ok(())
}

pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    for statement in DROP_STATEMENTS {
        execute_sql(conn, statement)?;
    }
    initialize_schema(conn)?;

    log::info!("Database schema reset successfully");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_in_memory_pool, get_connection};

    fn table_count(conn: &mut DbConn) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('players', 'matches', 'actions', 'assessments')",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn schema_statements_split_cleanly() {
        let statements = split_sql_statements(include_str!("schema.sql"));
        assert_eq!(statements.len(), 8);
        assert!(statements.iter().all(|s| s.starts_with("CREATE")));
    }

    #[test]
    fn initialize_is_repeatable_and_reset_clears_rows() {
        let pool = create_in_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        initialize_schema(&mut conn).unwrap();
        initialize_schema(&mut conn).unwrap();
        assert_eq!(table_count(&mut conn), 4);

        conn.execute(
            "INSERT INTO players (name, position, date_added) VALUES ('A', 'winger', '2024-08-01 10:00:00')",
            [],
        )
        .unwrap();
        reset_database(&mut conn).unwrap();

        let players: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
            .unwrap();
        assert_eq!(players, 0);
        assert_eq!(table_count(&mut conn), 4);
    }
}
