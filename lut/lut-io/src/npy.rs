//! NPY array format support.
//!
//! Lookup tables are stored as a single two-dimensional `uint8` array in
//! the NumPy `.npy` format, so they load directly with `numpy.load`.
//!
//! # Layout
//!
//! ```text
//! UINT8[6]     – Magic string "\x93NUMPY"
//! UINT8        – Major version (1, or 2 for oversized headers)
//! UINT8        – Minor version (0)
//! UINT16/32    – Header length, little endian (u16 for v1, u32 for v2)
//! ASCII[len]   – Python dict literal, space padded, ending in '\n'
//! UINT8[R*L]   – Row-major table data
//! ```
//!
//! The magic, version, length field and header together are padded to a
//! multiple of 64 bytes.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use lut_types::StackTable;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};

/// The NPY magic string.
const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Alignment of the data section.
const ALIGN: usize = 64;

/// Save a stack table as an NPY file.
///
/// The parent directory is created if missing. Data is written to a
/// temporary sibling file which is renamed over `path` once complete, so
/// a failed save never leaves a partial table at `path`.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
///
/// # Example
///
/// ```no_run
/// use lut_io::save_npy;
/// use lut_types::StackTable;
///
/// let table = StackTable::from_raw(2, vec![0, 0, 1, 1]).unwrap();
/// save_npy(&table, "assets/lut.npy").unwrap();
/// ```
pub fn save_npy<P: AsRef<Path>>(table: &StackTable, path: P) -> IoResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let result =
        write_file(table, &tmp).and_then(|()| fs::rename(&tmp, path).map_err(IoError::from));
    if result.is_err() {
        // Best effort; the original error is what matters.
        let _ = fs::remove_file(&tmp);
    }
    result?;

    info!(
        path = %path.display(),
        rows = table.row_count(),
        layers = table.layer_count(),
        "Saved lookup table"
    );
    Ok(())
}

fn write_file(table: &StackTable, path: &Path) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_npy(table, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("lut.npy")));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a stack table in NPY format to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_npy<W: Write>(table: &StackTable, writer: &mut W) -> IoResult<()> {
    let [rows, layers] = table.shape();
    let dict = format!("{{'descr': '|u1', 'fortran_order': False, 'shape': ({rows}, {layers}), }}");

    // Version 1 stores the header length in a u16
    let (version, prefix_len) = if dict.len() + ALIGN < usize::from(u16::MAX) {
        (1u8, MAGIC.len() + 2 + 2)
    } else {
        (2u8, MAGIC.len() + 2 + 4)
    };

    let unpadded = prefix_len + dict.len() + 1;
    let padding = (ALIGN - unpadded % ALIGN) % ALIGN;
    let mut header = dict.into_bytes();
    header.resize(header.len() + padding, b' ');
    header.push(b'\n');

    writer.write_all(MAGIC)?;
    writer.write_all(&[version, 0])?;
    if version == 1 {
        let len = u16::try_from(header.len())
            .map_err(|_| IoError::bad_header("header too long for version 1"))?;
        writer.write_all(&len.to_le_bytes())?;
    } else {
        let len = u32::try_from(header.len())
            .map_err(|_| IoError::bad_header("header too long for version 2"))?;
        writer.write_all(&len.to_le_bytes())?;
    }
    writer.write_all(&header)?;
    writer.write_all(table.as_bytes())?;

    Ok(())
}

/// Load a stack table from an NPY file.
///
/// Accepts version 1, 2 and 3 files holding a C-ordered two-dimensional
/// array of unsigned bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not an NPY file
/// - The array is not a two-dimensional C-ordered `uint8` array
///
/// # Example
///
/// ```no_run
/// use lut_io::load_npy;
///
/// let table = load_npy("assets/smart_8color_stacks.npy").unwrap();
/// println!("{:?}", table.shape());
/// ```
pub fn load_npy<P: AsRef<Path>>(path: P) -> IoResult<StackTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let table = read_npy(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        layers = table.layer_count(),
        "Loaded lookup table"
    );
    Ok(table)
}

/// Read a stack table in NPY format from any reader.
///
/// # Errors
///
/// See [`load_npy`].
pub fn read_npy<R: Read>(mut reader: R) -> IoResult<StackTable> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_npy(&bytes)
}

fn parse_npy(bytes: &[u8]) -> IoResult<StackTable> {
    if !bytes.starts_with(MAGIC) {
        return Err(IoError::BadMagic);
    }

    let preamble = |end: usize| {
        bytes
            .get(MAGIC.len()..end)
            .ok_or_else(|| IoError::bad_header("file ends inside the preamble"))
    };

    let version = preamble(MAGIC.len() + 2)?;
    let (major, minor) = (version[0], version[1]);
    let (header_len, prefix_len) = match major {
        1 => {
            let raw = preamble(MAGIC.len() + 4)?;
            (usize::from(u16::from_le_bytes([raw[2], raw[3]])), MAGIC.len() + 4)
        }
        2 | 3 => {
            let raw = preamble(MAGIC.len() + 6)?;
            let len = u32::from_le_bytes([raw[2], raw[3], raw[4], raw[5]]);
            let len = usize::try_from(len)
                .map_err(|_| IoError::bad_header("header length does not fit in memory"))?;
            (len, MAGIC.len() + 6)
        }
        _ => return Err(IoError::UnsupportedVersion { major, minor }),
    };

    let data_start = prefix_len
        .checked_add(header_len)
        .ok_or_else(|| IoError::bad_header("header length overflows"))?;
    let text = bytes
        .get(prefix_len..data_start)
        .ok_or_else(|| IoError::bad_header("header extends past end of file"))?;
    let text = std::str::from_utf8(text)
        .map_err(|_| IoError::bad_header("header is not valid text"))?;

    let header = Header::parse(text)?;
    if !header.is_u8() {
        return Err(IoError::UnsupportedDtype {
            descr: header.descr,
        });
    }
    if header.fortran_order {
        return Err(IoError::FortranOrder);
    }
    let Ok([rows, layers]) = <[usize; 2]>::try_from(header.shape.as_slice()) else {
        return Err(IoError::UnsupportedShape {
            shape: header.shape,
        });
    };

    let expected = rows
        .checked_mul(layers)
        .ok_or_else(|| IoError::bad_header("shape is too large"))?;
    let data = &bytes[data_start..];
    if data.len() < expected {
        return Err(IoError::Truncated {
            expected,
            got: data.len(),
        });
    }
    if data.len() > expected {
        return Err(IoError::TrailingData {
            expected,
            got: data.len(),
        });
    }

    Ok(StackTable::from_raw(layers, data.to_vec())?)
}

/// The fields of an NPY header dictionary.
#[derive(Debug)]
struct Header {
    descr: String,
    fortran_order: bool,
    shape: Vec<usize>,
}

impl Header {
    fn parse(text: &str) -> IoResult<Self> {
        let body = text
            .trim()
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| IoError::bad_header("header is not a dictionary"))?;

        let descr = parse_string(field(body, "descr")?)?.to_string();
        let fortran_order = parse_bool(field(body, "fortran_order")?)?;
        let shape = parse_tuple(field(body, "shape")?)?;

        Ok(Self {
            descr,
            fortran_order,
            shape,
        })
    }

    /// Single-byte unsigned integers; byte order is irrelevant.
    fn is_u8(&self) -> bool {
        matches!(self.descr.as_str(), "|u1" | "<u1" | ">u1" | "=u1" | "u1")
    }
}

/// The text following `'key':` in the dictionary body.
fn field<'a>(body: &'a str, key: &str) -> IoResult<&'a str> {
    let single = format!("'{key}'");
    let double = format!("\"{key}\"");
    let (start, len) = body
        .find(&single)
        .map(|i| (i, single.len()))
        .or_else(|| body.find(&double).map(|i| (i, double.len())))
        .ok_or_else(|| IoError::bad_header(format!("missing '{key}'")))?;

    body[start + len..]
        .trim_start()
        .strip_prefix(':')
        .map(str::trim_start)
        .ok_or_else(|| IoError::bad_header(format!("expected ':' after '{key}'")))
}

fn parse_string(value: &str) -> IoResult<&str> {
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| IoError::bad_header("'descr' is not a string"))?;
    let rest = &value[1..];
    let end = rest
        .find(quote)
        .ok_or_else(|| IoError::bad_header("unterminated string"))?;
    Ok(&rest[..end])
}

fn parse_bool(value: &str) -> IoResult<bool> {
    if value.starts_with("False") {
        Ok(false)
    } else if value.starts_with("True") {
        Ok(true)
    } else {
        Err(IoError::bad_header("'fortran_order' is not a boolean"))
    }
}

fn parse_tuple(value: &str) -> IoResult<Vec<usize>> {
    let inner = value
        .strip_prefix('(')
        .and_then(|t| t.find(')').map(|end| &t[..end]))
        .ok_or_else(|| IoError::bad_header("'shape' is not a tuple"))?;

    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| IoError::bad_header(format!("invalid dimension '{s}'")))
        })
        .collect()
}
