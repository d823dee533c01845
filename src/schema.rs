use rusqlite::{Connection, Error};

pub fn create_schema(conn: &Connection, meta: &[(&str, &str)]) -> Result<(), Error> {
    conn.execute(
        "CREATE TABLE metadata (
          name TEXT NOT NULL,
          value TEXT NOT NULL,
          UNIQUE(name)
      )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE maps (
          name TEXT NOT NULL PRIMARY KEY,
          format TEXT NOT NULL,
          width INTEGER NOT NULL,
          height INTEGER NOT NULL,
          image_data BLOB NOT NULL,
          grid_data BLOB
        )",
        (),
    )?;

    let mut stmt = conn.prepare("INSERT INTO metadata VALUES (?1, ?2)")?;

    for item in meta {
        stmt.execute(*item)?;
    }

    Ok(())
}
