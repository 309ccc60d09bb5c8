//! Catalog version record format
//!
//! The record layout on disk is:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes this field)
//! +------------------+
//! | Version          | (u64 LE)
//! +------------------+
//! | Active Flag      | (u8: 0 = inactive, 1 = active)
//! +------------------+
//! | Size Count       | (u32 LE)
//! +------------------+
//! | Pack Sizes       | (u32 LE each)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io::{self, Read};

use crc32fast::Hasher;

/// Fixed bytes of a record: length + version + flag + count + checksum.
pub(super) const MIN_RECORD_SIZE: usize = 4 + 8 + 1 + 4 + 4;

/// Computes a CRC32 checksum over the provided data.
pub(super) fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// One catalog version as stored on disk.
///
/// History rows are self-describing: every record carries its version and
/// whether it was active when written. Reads resolve the highest-versioned
/// active record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Monotonically increasing version number
    pub version: u64,
    /// Whether this version is active (current records are written active)
    pub active: bool,
    /// The pack sizes of this version
    pub sizes: Vec<u32>,
}

impl CatalogRecord {
    /// Create a new active record for a catalog version.
    pub fn active(version: u64, sizes: Vec<u32>) -> Self {
        Self {
            version,
            active: true,
            sizes,
        }
    }

    /// Serialize the record body (everything between length prefix and
    /// checksum). This is part of the data the checksum covers.
    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 1 + 4 + self.sizes.len() * 4);

        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.push(if self.active { 1 } else { 0 });
        buf.extend_from_slice(&(self.sizes.len() as u32).to_le_bytes());
        for size in &self.sizes {
            buf.extend_from_slice(&size.to_le_bytes());
        }

        buf
    }

    /// Serialize the complete record to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut checksum_data = Vec::with_capacity(4 + body.len());
        checksum_data.extend_from_slice(&record_length.to_le_bytes());
        checksum_data.extend_from_slice(&body);
        let checksum = compute_checksum(&checksum_data);

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying the checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);

        let computed_checksum = compute_checksum(&data[0..checksum_offset]);
        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let body = &data[4..checksum_offset];
        let mut cursor = io::Cursor::new(body);

        let mut u64_buf = [0u8; 8];
        cursor.read_exact(&mut u64_buf)?;
        let version = u64::from_le_bytes(u64_buf);

        let mut flag_buf = [0u8; 1];
        cursor.read_exact(&mut flag_buf)?;
        let active = flag_buf[0] != 0;

        let mut u32_buf = [0u8; 4];
        cursor.read_exact(&mut u32_buf)?;
        let size_count = u32::from_le_bytes(u32_buf) as usize;

        let remaining = body.len() - cursor.position() as usize;
        if remaining != size_count * 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "size count {} disagrees with {} remaining body bytes",
                    size_count, remaining
                ),
            ));
        }

        let mut sizes = Vec::with_capacity(size_count);
        for _ in 0..size_count {
            cursor.read_exact(&mut u32_buf)?;
            sizes.push(u32::from_le_bytes(u32_buf));
        }

        Ok((
            Self {
                version,
                active,
                sizes,
            },
            record_length,
        ))
    }
}
