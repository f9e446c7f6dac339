//! Caller-facing lookups: one column coordinate in, decoded records out.
//!
//! A missing record is `Ok(None)` (or simply absent from a list). A present
//! record that fails to decode is a [`ShulkerError::Record`] naming the column
//! and sub-chunk index.

use bytes::Bytes;
use shulker_common::{
    Column, ColumnCoordinate, Result, Section, ShulkerError, SurfaceRecord, MAX_SUBCHUNKS,
};
use shulker_format::{decode_subchunk, decode_surface, encode_subchunk_key, encode_surface_key};
use shulker_store::KeyValueStore;

use crate::observer::{NoopObserver, RecordObserver};

fn fetch<S, O>(store: &S, key: &[u8], observer: &mut O) -> Result<Option<Bytes>>
where
    S: KeyValueStore + ?Sized,
    O: RecordObserver + ?Sized,
{
    let value = store.get(key)?;
    if let Some(value) = &value {
        observer.on_record(key, value);
    }
    Ok(value)
}

pub fn get_surface<S: KeyValueStore + ?Sized>(
    store: &S,
    col: ColumnCoordinate,
) -> Result<Option<SurfaceRecord>> {
    get_surface_observed(store, col, &mut NoopObserver)
}

pub fn get_surface_observed<S, O>(
    store: &S,
    col: ColumnCoordinate,
    observer: &mut O,
) -> Result<Option<SurfaceRecord>>
where
    S: KeyValueStore + ?Sized,
    O: RecordObserver + ?Sized,
{
    let Some(value) = fetch(store, &encode_surface_key(col), observer)? else {
        return Ok(None);
    };
    decode_surface(&value)
        .map(Some)
        .map_err(|err| ShulkerError::record(col, None, err))
}

/// Looks up one sub-chunk. Fails with `InvalidIndex` for indices above 15.
pub fn get_subchunk<S: KeyValueStore + ?Sized>(
    store: &S,
    col: ColumnCoordinate,
    index: u8,
) -> Result<Option<Section>> {
    get_subchunk_observed(store, col, index, &mut NoopObserver)
}

pub fn get_subchunk_observed<S, O>(
    store: &S,
    col: ColumnCoordinate,
    index: u8,
    observer: &mut O,
) -> Result<Option<Section>>
where
    S: KeyValueStore + ?Sized,
    O: RecordObserver + ?Sized,
{
    let key = encode_subchunk_key(col, index)
        .map_err(|_| ShulkerError::InvalidIndex { coord: col, index })?;
    let Some(value) = fetch(store, &key, observer)? else {
        return Ok(None);
    };
    decode_subchunk(value)
        .map(|record| Some(Section { index, record }))
        .map_err(|err| ShulkerError::record(col, Some(index), err))
}

/// All present sub-chunks of a column, bottom to top. Missing indices are
/// skipped; the first malformed record fails the call.
pub fn get_subchunks<S: KeyValueStore + ?Sized>(
    store: &S,
    col: ColumnCoordinate,
) -> Result<Vec<Section>> {
    get_subchunks_observed(store, col, &mut NoopObserver)
}

pub fn get_subchunks_observed<S, O>(
    store: &S,
    col: ColumnCoordinate,
    observer: &mut O,
) -> Result<Vec<Section>>
where
    S: KeyValueStore + ?Sized,
    O: RecordObserver + ?Sized,
{
    let mut sections = Vec::new();
    for index in 0..MAX_SUBCHUNKS {
        if let Some(section) = get_subchunk_observed(store, col, index, observer)? {
            sections.push(section);
        }
    }
    Ok(sections)
}

/// Surface record plus every present sub-chunk of one column.
pub fn load_column<S: KeyValueStore + ?Sized>(store: &S, col: ColumnCoordinate) -> Result<Column> {
    load_column_observed(store, col, &mut NoopObserver)
}

pub fn load_column_observed<S, O>(
    store: &S,
    col: ColumnCoordinate,
    observer: &mut O,
) -> Result<Column>
where
    S: KeyValueStore + ?Sized,
    O: RecordObserver + ?Sized,
{
    Ok(Column {
        coord: col,
        surface: get_surface_observed(store, col, observer)?,
        sections: get_subchunks_observed(store, col, observer)?,
    })
}
