//! Versioned save container for the game map.
//!
//! On-disk layout, little-endian throughout:
//!
//! ```text
//! offset  size  field
//! 0       4     magic "MSBX" (application tag)
//! 4       2     format version
//! 6       1     cell record size (13)
//! 7       1     reserved
//! 8       4     map width
//! 12      4     map height
//! 16      ..    lz4 block (size-prepended) of width*height cell records
//! ```
//!
//! Each cell record is `kind: u8`, `temp: f32`, `payload: [u8; 8]`. Loading
//! validates the container before materializing a single cell and never
//! touches the caller's current map; on success it returns a fresh
//! [`GameMap`] for the caller to swap in.

use std::fmt;
use std::io::{self, Write};

use log::debug;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::config::DEFAULT_TEMP;
use crate::map::GameMap;
use crate::material::{Dot, Material, MaterialKind};

/// Magic bytes identifying a moonsbox save ("MSBX").
pub const MAGIC: u32 = 0x4D53_4258;

/// Current format version.
pub const VERSION: u16 = 1;

/// Versions this build can still read.
const COMPATIBLE_VERSIONS: &[u16] = &[1];

/// Header size in bytes.
const HEADER_SIZE: usize = 16;

/// Cell record size in bytes: kind + temp + payload.
const RECORD_SIZE: usize = 13;

/// Save failures. Dumping cannot corrupt the map; the caller just reports it.
#[derive(Debug)]
pub enum SaveError {
  Io(io::Error),
}

impl fmt::Display for SaveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io(e) => write!(f, "failed to write save: {e}"),
    }
  }
}

impl std::error::Error for SaveError {}

impl From<io::Error> for SaveError {
  fn from(e: io::Error) -> Self {
    Self::Io(e)
  }
}

/// Load failures, distinguishable so the UI can report a specific message.
/// The prior map is untouched in every case.
#[derive(Debug)]
pub enum LoadError {
  /// Not the expected container shape (truncated, undecodable payload, ...).
  InvalidFormat(&'static str),
  /// The application tag is not ours; carries the magic actually found.
  WrongApplication(u32),
  /// A format version this build does not read.
  IncompatibleVersion(u16),
  /// Structurally valid container with inconsistent cell data.
  MalformedArray(String),
}

impl fmt::Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidFormat(reason) => write!(f, "save is invalid: {reason}"),
      Self::WrongApplication(magic) => {
        write!(f, "save is not a moonsbox save (magic 0x{magic:08X})")
      }
      Self::IncompatibleVersion(version) => {
        write!(f, "save version {version} is incompatible with this build")
      }
      Self::MalformedArray(reason) => write!(f, "save cell data is malformed: {reason}"),
    }
  }
}

impl std::error::Error for LoadError {}

/// Serializes the map into a writer.
pub fn dump_to<W: Write>(map: &GameMap, writer: &mut W) -> Result<(), SaveError> {
  let mut records = Vec::with_capacity(map.dots().len() * RECORD_SIZE);
  for dot in map.dots() {
    records.push(dot.kind().id());
    records.extend_from_slice(&dot.temp.to_le_bytes());
    records.extend_from_slice(&dot.material.encode_payload());
  }
  let compressed = compress_prepend_size(&records);

  writer.write_all(&MAGIC.to_le_bytes())?;
  writer.write_all(&VERSION.to_le_bytes())?;
  writer.write_all(&[RECORD_SIZE as u8, 0])?;
  writer.write_all(&map.width().to_le_bytes())?;
  writer.write_all(&map.height().to_le_bytes())?;
  writer.write_all(&compressed)?;

  debug!(
    "dumped {}x{} map, {} -> {} bytes",
    map.width(),
    map.height(),
    records.len(),
    compressed.len()
  );
  Ok(())
}

/// Serializes the map into a byte buffer.
pub fn dump(map: &GameMap) -> Result<Vec<u8>, SaveError> {
  let mut out = Vec::with_capacity(HEADER_SIZE + map.dots().len() * RECORD_SIZE / 4);
  dump_to(map, &mut out)?;
  Ok(out)
}

/// Deserializes a map from save bytes.
pub fn load(bytes: &[u8]) -> Result<GameMap, LoadError> {
  if bytes.len() < HEADER_SIZE {
    return Err(LoadError::InvalidFormat("shorter than the header"));
  }

  let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
  if magic != MAGIC {
    return Err(LoadError::WrongApplication(magic));
  }
  let version = u16::from_le_bytes(bytes[4..6].try_into().unwrap());
  if !COMPATIBLE_VERSIONS.contains(&version) {
    return Err(LoadError::IncompatibleVersion(version));
  }
  if bytes[6] as usize != RECORD_SIZE {
    return Err(LoadError::InvalidFormat("unexpected cell record size"));
  }

  let width = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
  let height = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
  let cells = (width as usize)
    .checked_mul(height as usize)
    .ok_or_else(|| LoadError::MalformedArray("cell count overflows".into()))?;

  let records = decompress_size_prepended(&bytes[HEADER_SIZE..])
    .map_err(|_| LoadError::InvalidFormat("payload is not decompressible"))?;
  if records.len() != cells * RECORD_SIZE {
    return Err(LoadError::MalformedArray(format!(
      "expected {} cell records, found {}",
      cells,
      records.len() / RECORD_SIZE
    )));
  }

  let mut dots = Vec::with_capacity(cells);
  for (i, record) in records.chunks_exact(RECORD_SIZE).enumerate() {
    let kind = MaterialKind::from_id(record[0]).ok_or_else(|| {
      LoadError::MalformedArray(format!("unknown material kind {} at cell {}", record[0], i))
    })?;
    let raw_temp = f32::from_le_bytes(record[1..5].try_into().unwrap());
    let temp = if raw_temp.is_finite() {
      raw_temp.max(0.0)
    } else {
      DEFAULT_TEMP
    };
    let mut payload = [0u8; 8];
    payload.copy_from_slice(&record[5..13]);
    dots.push(Dot::new(Material::decode(kind, payload), temp));
  }

  debug!("loaded {width}x{height} map from {} bytes", bytes.len());
  Ok(GameMap::from_raw(width, height, dots))
}
