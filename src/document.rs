use std::{
    fs::{self, OpenOptions},
    io::{self, BufReader, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};

use crate::error::{ErrorCode, Result};

/// The whole key/value mapping held in one file.
pub type Document = Map<String, Value>;

const INDENT: &[u8] = b"    ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    /// no whitespace between tokens
    #[default]
    Compact,
    /// four space indentation
    Pretty,
}

impl Format {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            Format::Pretty
        } else {
            Format::Compact
        }
    }
}

/// Read and parse the full document. A top level value other than an object
/// is rejected.
pub fn load(path: &Path) -> Result<Document> {
    let reader = BufReader::new(fs::File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ErrorCode::NotAnObject { path: path.into() }.into()),
    }
}

/// Serialize the full document and replace the file content with it.
pub fn save(path: &Path, doc: &Document, format: Format) -> Result<()> {
    let buf = encode(doc, format)?;
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;
    file.write_all(&buf)?;
    file.flush()?;
    Ok(())
}

/// Write an empty document unless the file is already there.
///
/// Returns whether the file was created.
pub fn init(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(&encode(&Document::new(), Format::Compact)?)?;
            file.flush()?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn encode(doc: &Document, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Compact => Ok(serde_json::to_vec(doc)?),
        Format::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(INDENT);
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            doc.serialize(&mut ser)?;
            Ok(buf)
        }
    }
}
