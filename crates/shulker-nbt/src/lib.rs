//! Little-endian named binary tags, as embedded in sub-chunk palettes.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::io::{self, Read, Take, Write};

pub mod palette;

pub use palette::{read_palette, PaletteEntry};

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Deepest list/compound nesting accepted while reading.
pub const MAX_DEPTH: usize = 512;

fn read_length<R: Read>(reader: &mut Take<R>, element_size: u64) -> io::Result<usize> {
    let length = reader.read_i32::<LittleEndian>()?;
    let length =
        usize::try_from(length).map_err(|_| invalid_data(format!("Negative length: {}", length)))?;
    let needed = length as u64 * element_size;
    if needed > reader.limit() {
        return Err(invalid_data(format!(
            "Length {} needs {} bytes, {} left",
            length,
            needed,
            reader.limit()
        )));
    }
    Ok(length)
}

/// Smallest encoded payload of one element of `type_id`.
fn min_payload_size(type_id: u8) -> io::Result<u64> {
    match type_id {
        0 => Ok(0),
        1 => Ok(1),
        2 => Ok(2),
        3 | 5 | 7 | 11 | 12 => Ok(4),
        4 | 6 => Ok(8),
        8 => Ok(2),
        9 => Ok(5),
        10 => Ok(1),
        _ => Err(invalid_data(format!("Invalid tag type: {}", type_id))),
    }
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let length = reader.read_u16::<LittleEndian>()?;
    let mut bytes = vec![0u8; length as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    let length = u16::try_from(value.len())
        .map_err(|_| invalid_data(format!("String too long: {} bytes", value.len())))?;
    writer.write_u16::<LittleEndian>(length)?;
    writer.write_all(value.as_bytes())
}

impl Tag {
    pub fn get_type_id(&self) -> u8 {
        match self {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List(_) => 9,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
            Tag::LongArray(_) => 12,
        }
    }

    /// Reads one named tag.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<(String, Tag)> {
        Tag::read_limited(reader, u64::MAX)
    }

    /// Reads one named tag that must fit in the next `limit` bytes. Array and
    /// list lengths that cannot fit are rejected before anything is allocated.
    pub fn read_limited<R: Read>(reader: &mut R, limit: u64) -> io::Result<(String, Tag)> {
        Tag::read_named(&mut reader.by_ref().take(limit), 0)
    }

    fn read_named<R: Read>(reader: &mut Take<R>, depth: usize) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == 0 {
            return Ok((String::new(), Tag::End));
        }

        let name = read_string(reader)?;
        let tag = Tag::read_payload(reader, type_id, depth)?;
        Ok((name, tag))
    }

    fn read_payload<R: Read>(reader: &mut Take<R>, type_id: u8, depth: usize) -> io::Result<Tag> {
        match type_id {
            0 => Ok(Tag::End),
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(reader.read_i16::<LittleEndian>()?)),
            3 => Ok(Tag::Int(reader.read_i32::<LittleEndian>()?)),
            4 => Ok(Tag::Long(reader.read_i64::<LittleEndian>()?)),
            5 => Ok(Tag::Float(reader.read_f32::<LittleEndian>()?)),
            6 => Ok(Tag::Double(reader.read_f64::<LittleEndian>()?)),
            7 => {
                let length = read_length(reader, 1)?;
                let mut bytes = vec![0i8; length];
                reader.read_i8_into(&mut bytes)?;
                Ok(Tag::ByteArray(bytes))
            }
            8 => read_string(reader).map(Tag::String),
            9 => {
                if depth >= MAX_DEPTH {
                    return Err(invalid_data(format!("Nesting deeper than {}", MAX_DEPTH)));
                }
                let list_type = reader.read_u8()?;
                let length = read_length(reader, min_payload_size(list_type)?)?;
                if list_type == 0 && length > 0 {
                    return Err(invalid_data(format!("List of {} end tags", length)));
                }
                let mut list = Vec::with_capacity(length);
                for _ in 0..length {
                    list.push(Tag::read_payload(reader, list_type, depth + 1)?);
                }
                Ok(Tag::List(list))
            }
            10 => {
                if depth >= MAX_DEPTH {
                    return Err(invalid_data(format!("Nesting deeper than {}", MAX_DEPTH)));
                }
                let mut compound = HashMap::new();
                loop {
                    let (name, tag) = Tag::read_named(reader, depth + 1)?;
                    if let Tag::End = tag {
                        break;
                    }
                    compound.insert(name, tag);
                }
                Ok(Tag::Compound(compound))
            }
            11 => {
                let length = read_length(reader, 4)?;
                let mut ints = vec![0i32; length];
                reader.read_i32_into::<LittleEndian>(&mut ints)?;
                Ok(Tag::IntArray(ints))
            }
            12 => {
                let length = read_length(reader, 8)?;
                let mut longs = vec![0i64; length];
                reader.read_i64_into::<LittleEndian>(&mut longs)?;
                Ok(Tag::LongArray(longs))
            }
            _ => Err(invalid_data(format!("Invalid tag type: {}", type_id))),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        writer.write_u8(self.get_type_id())?;

        if !matches!(self, Tag::End) {
            write_string(writer, name)?;
        }

        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => writer.write_i16::<LittleEndian>(*v),
            Tag::Int(v) => writer.write_i32::<LittleEndian>(*v),
            Tag::Long(v) => writer.write_i64::<LittleEndian>(*v),
            Tag::Float(v) => writer.write_f32::<LittleEndian>(*v),
            Tag::Double(v) => writer.write_f64::<LittleEndian>(*v),
            Tag::ByteArray(v) => {
                writer.write_i32::<LittleEndian>(v.len() as i32)?;
                for &b in v {
                    writer.write_i8(b)?;
                }
                Ok(())
            }
            Tag::String(v) => write_string(writer, v),
            Tag::List(v) => {
                let list_type = v.first().map_or(0, Tag::get_type_id);
                if let Some(other) = v.iter().find(|tag| tag.get_type_id() != list_type) {
                    return Err(invalid_data(format!(
                        "List of type {} holds a tag of type {}",
                        list_type,
                        other.get_type_id()
                    )));
                }
                writer.write_u8(list_type)?;
                writer.write_i32::<LittleEndian>(v.len() as i32)?;
                for tag in v {
                    tag.write_payload(writer)?;
                }
                Ok(())
            }
            Tag::Compound(v) => {
                for (name, tag) in v {
                    tag.write(writer, name)?;
                }
                Tag::End.write(writer, "")
            }
            Tag::IntArray(v) => {
                writer.write_i32::<LittleEndian>(v.len() as i32)?;
                for &i in v {
                    writer.write_i32::<LittleEndian>(i)?;
                }
                Ok(())
            }
            Tag::LongArray(v) => {
                writer.write_i32::<LittleEndian>(v.len() as i32)?;
                for &l in v {
                    writer.write_i64::<LittleEndian>(l)?;
                }
                Ok(())
            }
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Tag>> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }
}
