//! Binary encode/decode for keyword records.
//!
//! All integers and floats are big-endian. Every unit on disk is a
//! Fortran-style record: a 4-byte length marker, the payload, and the same
//! marker repeated. A keyword is one 16-byte header record followed by its
//! payload split into blocks of [`TypeTag::block_size`] elements, one
//! record per block.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::error::KeywordError;
use crate::types::{KeywordData, KeywordEntry, TypeTag};
use crate::{HEADER_BYTES, NAME_WIDTH, TYPE_WIDTH};

/// `LOGI` encoding of `true`.
pub const LOGI_TRUE: i32 = -1;

/// `LOGI` encoding of `false`.
pub const LOGI_FALSE: i32 = 0;

/// The decoded 16-byte header of a keyword record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    /// Keyword name without padding.
    pub name: String,
    /// Declared element count.
    pub count: usize,
    /// Element type.
    pub type_tag: TypeTag,
}

impl RecordHeader {
    /// Number of payload bytes on disk, including block markers.
    pub fn payload_disk_len(&self) -> u64 {
        let size = self.type_tag.element_size() as u64;
        if size == 0 {
            return 0;
        }
        let block = self.type_tag.block_size() as u64;
        let count = self.count as u64;
        let blocks = count.div_ceil(block);
        count * size + blocks * 8
    }
}

// ── Record markers ──────────────────────────────────────────────

/// Write a Fortran record: marker, bytes, marker.
pub fn write_record(w: &mut dyn Write, payload: &[u8]) -> Result<(), KeywordError> {
    let len = i32::try_from(payload.len()).map_err(|_| KeywordError::InvalidValue {
        name: String::new(),
        detail: format!("record of {} bytes exceeds i32 marker", payload.len()),
    })?;
    w.write_i32::<BigEndian>(len)?;
    w.write_all(payload)?;
    w.write_i32::<BigEndian>(len)?;
    Ok(())
}

/// Read the leading marker of a record, or `None` at a clean end of stream.
///
/// Reads byte-by-byte up to four bytes so that a partial marker is
/// reported as truncation rather than a clean end.
fn read_head_marker(r: &mut dyn Read, name: &str) -> Result<Option<i32>, KeywordError> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(KeywordError::truncated(
                    name,
                    format!("got {filled} of 4 bytes of a record marker"),
                ));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(KeywordError::Io(e)),
        }
    }
    Ok(Some(BigEndian::read_i32(&buf)))
}

/// Read one complete record whose length must equal `expected` bytes.
fn read_sized_record(
    r: &mut dyn Read,
    name: &str,
    expected: usize,
) -> Result<Vec<u8>, KeywordError> {
    let head = read_head_marker(r, name)?
        .ok_or_else(|| KeywordError::truncated(name, "stream ended before payload block"))?;
    if head < 0 || head as usize != expected {
        return Err(KeywordError::truncated(
            name,
            format!("block declares {head} bytes, element count requires {expected}"),
        ));
    }
    let mut payload = vec![0u8; expected];
    r.read_exact(&mut payload)
        .map_err(|e| KeywordError::from_read(e, name))?;
    let tail = r
        .read_i32::<BigEndian>()
        .map_err(|e| KeywordError::from_read(e, name))?;
    if tail != head {
        return Err(KeywordError::truncated(
            name,
            format!("tail marker {tail} does not match head marker {head}"),
        ));
    }
    Ok(payload)
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the 16-byte header record for `entry`.
pub fn encode_header(w: &mut dyn Write, entry: &KeywordEntry) -> Result<(), KeywordError> {
    entry.validate()?;
    let count = i32::try_from(entry.len()).map_err(|_| KeywordError::InvalidValue {
        name: entry.name().to_string(),
        detail: format!("element count {} exceeds i32", entry.len()),
    })?;
    let mut buf = [b' '; HEADER_BYTES];
    let name = entry.name().as_bytes();
    buf[..name.len()].copy_from_slice(name);
    BigEndian::write_i32(&mut buf[NAME_WIDTH..NAME_WIDTH + 4], count);
    buf[NAME_WIDTH + 4..].copy_from_slice(entry.type_tag().as_str().as_bytes());
    write_record(w, &buf)
}

/// Decode a header record, or `None` at a clean end of stream.
pub fn decode_header(r: &mut dyn Read) -> Result<Option<RecordHeader>, KeywordError> {
    let Some(head) = read_head_marker(r, "")? else {
        return Ok(None);
    };
    if head as usize != HEADER_BYTES {
        return Err(KeywordError::MalformedHeader {
            detail: format!("header record is {head} bytes, expected {HEADER_BYTES}"),
        });
    }
    let mut buf = [0u8; HEADER_BYTES];
    r.read_exact(&mut buf)
        .map_err(|e| KeywordError::from_read(e, ""))?;
    let tail = r
        .read_i32::<BigEndian>()
        .map_err(|e| KeywordError::from_read(e, ""))?;
    if tail != head {
        return Err(KeywordError::MalformedHeader {
            detail: format!("tail marker {tail} does not match head marker {head}"),
        });
    }

    let name = String::from_utf8_lossy(&buf[..NAME_WIDTH])
        .trim_end()
        .to_string();
    let count = BigEndian::read_i32(&buf[NAME_WIDTH..NAME_WIDTH + 4]);
    if count < 0 {
        return Err(KeywordError::MalformedHeader {
            detail: format!("keyword '{name}' declares negative count {count}"),
        });
    }
    let tag = String::from_utf8_lossy(&buf[NAME_WIDTH + 4..NAME_WIDTH + 4 + TYPE_WIDTH]);
    let type_tag = TypeTag::parse(&tag).ok_or_else(|| KeywordError::UnknownType {
        tag: tag.to_string(),
    })?;

    Ok(Some(RecordHeader {
        name,
        count: count as usize,
        type_tag,
    }))
}

// ── Payload encode/decode ───────────────────────────────────────

fn pad_string(s: &str, name: &str) -> Result<[u8; 8], KeywordError> {
    let bytes = s.as_bytes();
    if bytes.len() > 8 {
        return Err(KeywordError::InvalidValue {
            name: name.to_string(),
            detail: format!("string '{s}' is longer than 8 bytes"),
        });
    }
    let mut out = [b' '; 8];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

/// Encode the payload blocks of `entry`.
pub fn encode_payload(w: &mut dyn Write, entry: &KeywordEntry) -> Result<(), KeywordError> {
    let tag = entry.type_tag();
    let block = tag.block_size();
    let size = tag.element_size();
    match entry.data() {
        KeywordData::Int(v) => {
            for chunk in v.chunks(block) {
                let mut buf = vec![0u8; chunk.len() * size];
                BigEndian::write_i32_into(chunk, &mut buf);
                write_record(w, &buf)?;
            }
        }
        KeywordData::Float(v) => {
            for chunk in v.chunks(block) {
                let mut buf = vec![0u8; chunk.len() * size];
                BigEndian::write_f32_into(chunk, &mut buf);
                write_record(w, &buf)?;
            }
        }
        KeywordData::Double(v) => {
            for chunk in v.chunks(block) {
                let mut buf = vec![0u8; chunk.len() * size];
                BigEndian::write_f64_into(chunk, &mut buf);
                write_record(w, &buf)?;
            }
        }
        KeywordData::Bool(v) => {
            for chunk in v.chunks(block) {
                let ints: Vec<i32> = chunk
                    .iter()
                    .map(|&b| if b { LOGI_TRUE } else { LOGI_FALSE })
                    .collect();
                let mut buf = vec![0u8; chunk.len() * size];
                BigEndian::write_i32_into(&ints, &mut buf);
                write_record(w, &buf)?;
            }
        }
        KeywordData::Char(v) => {
            for chunk in v.chunks(block) {
                let mut buf = Vec::with_capacity(chunk.len() * size);
                for s in chunk {
                    buf.extend_from_slice(&pad_string(s, entry.name())?);
                }
                write_record(w, &buf)?;
            }
        }
        KeywordData::Message => {}
    }
    Ok(())
}

/// Decode the payload announced by `header`.
pub fn decode_payload(r: &mut dyn Read, header: &RecordHeader) -> Result<KeywordData, KeywordError> {
    let tag = header.type_tag;
    let block = tag.block_size();
    let size = tag.element_size();
    let mut data = KeywordData::empty(tag);
    if size == 0 {
        return Ok(data);
    }

    let mut remaining = header.count;
    while remaining > 0 {
        let n = remaining.min(block);
        let bytes = read_sized_record(r, &header.name, n * size)?;
        match &mut data {
            KeywordData::Int(v) => {
                let start = v.len();
                v.resize(start + n, 0);
                BigEndian::read_i32_into(&bytes, &mut v[start..]);
            }
            KeywordData::Float(v) => {
                let start = v.len();
                v.resize(start + n, 0.0);
                BigEndian::read_f32_into(&bytes, &mut v[start..]);
            }
            KeywordData::Double(v) => {
                let start = v.len();
                v.resize(start + n, 0.0);
                BigEndian::read_f64_into(&bytes, &mut v[start..]);
            }
            KeywordData::Bool(v) => {
                v.extend(bytes.chunks_exact(4).map(|c| BigEndian::read_i32(c) != 0));
            }
            KeywordData::Char(v) => {
                v.extend(
                    bytes
                        .chunks_exact(8)
                        .map(|c| String::from_utf8_lossy(c).trim_end().to_string()),
                );
            }
            KeywordData::Message => {}
        }
        remaining -= n;
    }
    Ok(data)
}

// ── Entry encode/decode ─────────────────────────────────────────

/// Encode a complete keyword: header record followed by payload blocks.
///
/// Nothing is written when the entry fails [`KeywordEntry::validate`].
pub fn encode_entry(w: &mut dyn Write, entry: &KeywordEntry) -> Result<(), KeywordError> {
    entry.validate()?;
    encode_header(w, entry)?;
    encode_payload(w, entry)
}

/// Decode the next keyword, or `None` at a clean end of stream.
pub fn decode_entry(r: &mut dyn Read) -> Result<Option<KeywordEntry>, KeywordError> {
    let Some(header) = decode_header(r)? else {
        return Ok(None);
    };
    let data = decode_payload(r, &header)?;
    Ok(Some(KeywordEntry::new(&header.name, data)))
}
