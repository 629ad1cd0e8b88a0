//! Text export of a [`LineMapping`].
//!
//! The layout is line oriented:
//!
//! ```text
//! /** Begin line maps. **/{ "file" : "", "count": 1 }
//! [0,0,0,1,1,null]
//! /** Begin file information. **/
//! [{"module": "app", "sha1": "…", "path": "src/app.py", "name": "app.py", "k": "app"}]
//! /** Begin mapping definitions. **/
//! ["app",1,0]
//! ```
//!
//! Mapping definitions carry the 1-based input line. Id rows and mapping
//! definitions are compact; file records use `", "` and `": "` separators and
//! escape non-ASCII characters.

use std::io;

use indexmap::IndexSet;
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::{catalog::SourceCatalog, errors::SourceMapError, linemap::LineMapping};

#[derive(Serialize)]
struct FileRecord<'a> {
    module: &'a str,
    sha1: String,
    path: &'a str,
    name: &'a str,
    k: &'a str,
}

/// Renders `mapping` in the line-map text format.
///
/// # Errors
///
/// Returns [`SourceMapError::UnknownSource`] if an entry names a file key that
/// `catalog` does not have.
pub fn export_line_maps(
    mapping: &LineMapping,
    catalog: &SourceCatalog,
) -> Result<String, SourceMapError> {
    let file_keys: IndexSet<&str> = mapping
        .entries
        .iter()
        .map(|entry| entry.file.as_str())
        .collect();

    let mut out = String::new();
    out.push_str(&format!(
        "/** Begin line maps. **/{{ \"file\" : \"\", \"count\": {} }}\n",
        file_keys.len()
    ));
    for row in &mapping.rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }

    out.push_str("/** Begin file information. **/\n");
    for key in &file_keys {
        let info = catalog
            .get(key)
            .ok_or_else(|| SourceMapError::UnknownSource((*key).to_string()))?;
        let record = FileRecord {
            module: &info.module,
            sha1: info.sha1(),
            path: &info.path,
            name: info.name(),
            k: key,
        };
        out.push_str(&spaced(&[record])?);
        out.push('\n');
    }

    out.push_str("/** Begin mapping definitions. **/\n");
    for entry in &mapping.entries {
        out.push_str(&serde_json::to_string(&(
            &entry.file,
            entry.line + 1,
            entry.column,
        ))?);
        out.push('\n');
    }
    Ok(out)
}

/// Separators and escaping of the file information section.
struct Spaced;

impl Formatter for Spaced {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(ch.encode_utf8(&mut [0; 4]).as_bytes())?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

fn spaced(value: &impl Serialize) -> Result<String, SourceMapError> {
    let mut buffer = Vec::new();
    value.serialize(&mut serde_json::Serializer::with_formatter(&mut buffer, Spaced))?;
    Ok(String::from_utf8(buffer)?)
}
