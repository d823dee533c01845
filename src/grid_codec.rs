use crate::{
    error::{Error, Result},
    grid::{GridGeometry, LabelGrid, LabelId},
    projection::Extent,
};
use std::io::{Cursor, Read};

const MAGIC: &[u8; 4] = b"PCG1";

pub const GRID_FORMAT: &str = "application/x-zstd-label-grid";

/// Serializes a grid as little-endian header, label table and cells
/// (label id + 1 or 0, then occupancy), compressed with zstd.
pub fn encode_grid(grid: &LabelGrid) -> Result<Vec<u8>> {
    let geometry = grid.geometry();

    let extent = geometry.extent;

    let mut raw = Vec::with_capacity(grid.columns() * grid.rows() * 5 + 64);

    raw.extend_from_slice(MAGIC);

    for value in [
        extent.min_easting,
        extent.max_easting,
        extent.min_northing,
        extent.max_northing,
    ] {
        raw.extend_from_slice(&value.to_le_bytes());
    }

    raw.extend_from_slice(&geometry.grid_width.to_le_bytes());

    raw.extend_from_slice(&geometry.grid_height.to_le_bytes());

    raw.extend_from_slice(&(grid.label_names().len() as u32).to_le_bytes());

    for name in grid.label_names() {
        raw.extend_from_slice(&(name.len() as u32).to_le_bytes());

        raw.extend_from_slice(name.as_bytes());
    }

    for (label, _) in grid.cells() {
        let value = label.map_or(0, |id| id.0 + 1);

        raw.extend_from_slice(&value.to_le_bytes());
    }

    raw.extend(grid.cells().map(|(_, occupancy)| occupancy));

    Ok(zstd::encode_all(Cursor::new(raw), 0)?)
}

pub fn decode_grid(data: &[u8]) -> Result<LabelGrid> {
    let raw = zstd::decode_all(Cursor::new(data))?;

    let mut reader = Cursor::new(raw.as_slice());

    if read_array::<4>(&mut reader)? != *MAGIC {
        return Err(Error::CorruptGrid("bad magic"));
    }

    let min_easting = i64::from_le_bytes(read_array(&mut reader)?);
    let max_easting = i64::from_le_bytes(read_array(&mut reader)?);
    let min_northing = i64::from_le_bytes(read_array(&mut reader)?);
    let max_northing = i64::from_le_bytes(read_array(&mut reader)?);

    let grid_width = read_u32(&mut reader)?;

    let grid_height = read_u32(&mut reader)?;

    let geometry = GridGeometry::new(
        Extent::new(min_easting, max_easting, min_northing, max_northing),
        grid_width,
        grid_height,
    )?;

    let label_count = read_u32(&mut reader)?;

    let mut names = Vec::new();

    for _ in 0..label_count {
        let len = read_u32(&mut reader)? as usize;

        if len > remaining(&reader) {
            return Err(Error::CorruptGrid("truncated label"));
        }

        let mut name = vec![0; len];

        reader
            .read_exact(&mut name)
            .map_err(|_| Error::CorruptGrid("truncated label"))?;

        names.push(String::from_utf8(name).map_err(|_| Error::CorruptGrid("label is not UTF-8"))?);
    }

    let len = geometry
        .columns()
        .checked_mul(geometry.rows())
        .ok_or(Error::CorruptGrid("grid too large"))?;

    // u32 label then u8 occupancy per cell
    if len.checked_mul(5).is_none_or(|size| size > remaining(&reader)) {
        return Err(Error::CorruptGrid("truncated cells"));
    }

    let mut labels = Vec::with_capacity(len);

    for _ in 0..len {
        labels.push(read_u32(&mut reader)?.checked_sub(1).map(LabelId));
    }

    let mut occupancy = vec![0; len];

    reader
        .read_exact(&mut occupancy)
        .map_err(|_| Error::CorruptGrid("truncated cells"))?;

    LabelGrid::from_parts(geometry, names, labels, occupancy)
}

fn remaining(reader: &Cursor<&[u8]>) -> usize {
    reader
        .get_ref()
        .len()
        .saturating_sub(reader.position() as usize)
}

fn read_array<const N: usize>(reader: &mut impl Read) -> Result<[u8; N]> {
    let mut buf = [0; N];

    reader
        .read_exact(&mut buf)
        .map_err(|_| Error::CorruptGrid("truncated header"))?;

    Ok(buf)
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    read_array(reader).map(u32::from_le_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_restores_cells_and_labels() {
        let geometry = GridGeometry::new(Extent::new(-5, 20, 100, 130), 5, 3).unwrap();

        let mut grid = LabelGrid::new(geometry);

        grid.claim(0, 0, "RG1").unwrap();
        grid.claim(4, 2, "SL4").unwrap();
        grid.claim(4, 2, "RG1").unwrap();
        grid.claim(5, 3, "RG1").unwrap();

        let decoded = decode_grid(&encode_grid(&grid).unwrap()).unwrap();

        assert_eq!(decoded.geometry(), grid.geometry());

        for x in 0..grid.columns() {
            for y in 0..grid.rows() {
                assert_eq!(decoded.label(x, y), grid.label(x, y));
                assert_eq!(decoded.occupancy(x, y), grid.occupancy(x, y));
            }
        }
    }

    #[test]
    fn rejects_garbage() {
        let garbage = zstd::encode_all(Cursor::new(b"nope".to_vec()), 0).unwrap();

        assert!(matches!(decode_grid(&garbage), Err(Error::CorruptGrid(_))));
    }

    fn header(grid_width: u32, grid_height: u32) -> Vec<u8> {
        let mut raw = MAGIC.to_vec();

        for value in [0i64, 10, 0, 10] {
            raw.extend_from_slice(&value.to_le_bytes());
        }

        raw.extend_from_slice(&grid_width.to_le_bytes());

        raw.extend_from_slice(&grid_height.to_le_bytes());

        raw
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let mut raw = header(u32::MAX, u32::MAX);

        raw.extend_from_slice(&0u32.to_le_bytes());

        let data = zstd::encode_all(Cursor::new(raw), 0).unwrap();

        assert!(matches!(decode_grid(&data), Err(Error::CorruptGrid("grid too large"))));
    }

    #[test]
    fn rejects_lengths_past_end_of_snapshot() {
        let mut raw = header(2, 2);

        raw.extend_from_slice(&1u32.to_le_bytes());
        raw.extend_from_slice(&u32::MAX.to_le_bytes());
        raw.extend_from_slice(b"RG1");

        let data = zstd::encode_all(Cursor::new(raw), 0).unwrap();

        assert!(matches!(decode_grid(&data), Err(Error::CorruptGrid("truncated label"))));

        let mut raw = header(60_000, 60_000);

        raw.extend_from_slice(&0u32.to_le_bytes());

        let data = zstd::encode_all(Cursor::new(raw), 0).unwrap();

        assert!(matches!(decode_grid(&data), Err(Error::CorruptGrid("truncated cells"))));
    }
}
