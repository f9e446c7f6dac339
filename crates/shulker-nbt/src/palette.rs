use shulker_common::PaletteBlob;
use std::collections::HashMap;
use std::io::{self, Cursor};

use crate::Tag;

/// One block identity referenced by a sub-chunk's palette indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub name: String,
    pub states: HashMap<String, Tag>,
    /// Pre-"states" data value (`val`), when the entry still carries one.
    pub legacy_value: Option<i16>,
    pub version: Option<i32>,
}

impl PaletteEntry {
    fn from_compound(mut compound: HashMap<String, Tag>) -> io::Result<Self> {
        let name = match compound.remove("name") {
            Some(Tag::String(name)) => name,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Palette entry without a name",
                ))
            }
        };
        let states = match compound.remove("states") {
            Some(Tag::Compound(states)) => states,
            _ => HashMap::new(),
        };
        Ok(PaletteEntry {
            name,
            states,
            legacy_value: compound.get("val").and_then(Tag::as_i16),
            version: compound.get("version").and_then(Tag::as_i32),
        })
    }
}

/// Reads the `declared_length` palette entries at the start of a blob's
/// payload. Bytes after the last entry are left alone.
pub fn read_palette(blob: &PaletteBlob) -> io::Result<Vec<PaletteEntry>> {
    let mut reader = Cursor::new(&blob.payload[..]);
    let mut entries = Vec::with_capacity(blob.declared_length as usize);

    for _ in 0..blob.declared_length {
        let left = (blob.payload.len() as u64).saturating_sub(reader.position());
        match Tag::read_limited(&mut reader, left)? {
            (_, Tag::Compound(compound)) => entries.push(PaletteEntry::from_compound(compound)?),
            (_, other) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Palette entry is tag type {}, not a compound", other.get_type_id()),
                ))
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entry_bytes(name: &str, states: Vec<(&str, Tag)>, extra: Vec<(&str, Tag)>) -> Vec<u8> {
        let mut root = HashMap::new();
        root.insert("name".to_string(), Tag::String(name.to_string()));
        if !states.is_empty() {
            let states = states
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            root.insert("states".to_string(), Tag::Compound(states));
        }
        for (k, v) in extra {
            root.insert(k.to_string(), v);
        }
        let mut buffer = Vec::new();
        Tag::Compound(root).write(&mut buffer, "").unwrap();
        buffer
    }

    fn blob(declared_length: u8, payload: Vec<u8>) -> PaletteBlob {
        PaletteBlob {
            declared_length,
            reserved: [0; 3],
            payload: Bytes::from(payload),
        }
    }

    #[test]
    fn test_read_palette_entries() {
        let mut payload = entry_bytes("minecraft:air", vec![], vec![("version", Tag::Int(1))]);
        payload.extend(entry_bytes(
            "minecraft:stone",
            vec![("stone_type", Tag::String("andesite".to_string()))],
            vec![],
        ));
        payload.extend(entry_bytes("minecraft:dirt", vec![], vec![("val", Tag::Short(1))]));
        // trailing block entity data is not part of the palette
        payload.extend_from_slice(&[0xDE, 0xAD]);

        let entries = read_palette(&blob(3, payload)).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "minecraft:air");
        assert_eq!(entries[0].version, Some(1));
        assert!(entries[0].states.is_empty());
        assert_eq!(
            entries[1].states.get("stone_type"),
            Some(&Tag::String("andesite".to_string()))
        );
        assert_eq!(entries[2].legacy_value, Some(1));
        assert_eq!(entries[2].version, None);
    }

    #[test]
    fn test_read_palette_empty() {
        assert!(read_palette(&blob(0, vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_read_palette_short_payload_fails() {
        let payload = entry_bytes("minecraft:air", vec![], vec![]);
        assert!(read_palette(&blob(2, payload)).is_err());
    }

    #[test]
    fn test_read_palette_requires_name() {
        let mut buffer = Vec::new();
        Tag::Compound(HashMap::new()).write(&mut buffer, "").unwrap();
        let err = read_palette(&blob(1, buffer)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_palette_rejects_deep_nesting() {
        let payload = [10u8, 0, 0].repeat(200_000);
        let err = read_palette(&blob(1, payload)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_palette_rejects_oversized_array() {
        // root compound holding a long array that claims i32::MAX elements
        let mut payload = vec![10u8, 0, 0, 12, 1, 0, b'a'];
        payload.extend_from_slice(&i32::MAX.to_le_bytes());
        let err = read_palette(&blob(1, payload)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
