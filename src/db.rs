use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::Connection;

use crate::domain::errors::DomainError;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Quotes a Postgres identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn set_search_path(conn: &mut PgConnection, schema: &str) -> diesel::QueryResult<()> {
    conn.batch_execute(&format!("SET search_path TO {}", quote_ident(schema)))
}

/// Points every pooled connection at the warehouse schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        set_search_path(conn, &self.0).map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str, schema: &str) -> Result<DbPool, DomainError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(SearchPath(schema.to_string())))
        .build(manager)?;
    Ok(pool)
}

/// Single connection for the one-shot pipeline binaries.
pub fn connect(database_url: &str) -> Result<PgConnection, DomainError> {
    Ok(PgConnection::establish(database_url)?)
}
