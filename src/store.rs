use crate::{
    error::{Error, Result},
    grid::LabelGrid,
    grid_codec::{GRID_FORMAT, decode_grid},
    schema::create_schema,
    shared_types::Format,
};
use clap::ValueEnum;
use log::info;
use rusqlite::{Connection, OptionalExtension};
use std::{fs::remove_file, path::Path};

const INSERT_MAP_SQL: &str = "INSERT OR REPLACE INTO maps VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_IMAGE_SQL: &str = "SELECT image_data FROM maps WHERE name = ?1";

const SELECT_GRID_SQL: &str = "SELECT grid_data FROM maps WHERE name = ?1";

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ExistingFileAction {
    /// Replace the whole store
    Overwrite,
    /// Add to the existing store, replacing a map of the same name
    Continue,
}

/// Encoded map ready to be stored.
pub struct StoredMap<'a> {
    pub name: &'a str,
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub image_data: &'a [u8],
    pub grid_data: Option<&'a [u8]>,
}

/// Opens the map store, creating it when missing. An existing store is only
/// touched when `existing_file_action` says how.
pub fn open_store(path: &Path, existing_file_action: Option<ExistingFileAction>) -> Result<Connection> {
    let r#continue = path.exists()
        && match existing_file_action {
            Some(ExistingFileAction::Overwrite) => {
                remove_file(path)?;

                false
            }
            Some(ExistingFileAction::Continue) => true,
            None => return Err(Error::OutputExists(path.to_owned())),
        };

    let conn = Connection::open(path)?;

    if !r#continue {
        create_schema(
            &conn,
            &[
                ("name", "postcode-map"),
                ("grid_format", GRID_FORMAT),
            ],
        )?;
    }

    conn.pragma_update(None, "synchronous", "OFF")?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

pub fn save_map(conn: &Connection, map: &StoredMap) -> Result<()> {
    conn.execute(
        INSERT_MAP_SQL,
        (
            map.name,
            map.format.to_string(),
            map.width,
            map.height,
            map.image_data,
            map.grid_data,
        ),
    )?;

    info!("Stored map {} ({} bytes)", map.name, map.image_data.len());

    Ok(())
}

pub fn load_image(conn: &Connection, name: &str) -> Result<Vec<u8>> {
    conn.prepare_cached(SELECT_IMAGE_SQL)?
        .query_row([name], |row| row.get::<_, Vec<u8>>(0))
        .optional()?
        .ok_or_else(|| Error::MapNotFound(name.to_owned()))
}

pub fn load_grid(conn: &Connection, name: &str) -> Result<LabelGrid> {
    let data = conn
        .prepare_cached(SELECT_GRID_SQL)?
        .query_row([name], |row| row.get::<_, Option<Vec<u8>>>(0))
        .optional()?
        .flatten()
        .ok_or_else(|| Error::MapNotFound(name.to_owned()))?;

    decode_grid(&data)
}
