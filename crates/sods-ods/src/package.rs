//! ODS zip packaging

use std::io::{Read, Seek, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::document::{self, OdsDocument, ODS_MIMETYPE};
use crate::error::{OdsError, OdsResult};

/// XML parts of a package needed to rebuild the document
#[derive(Debug)]
pub(crate) struct PackageParts {
    pub content: String,
    pub styles: Option<String>,
}

/// Read the parts of an ODS package
///
/// `content.xml` is required. A `mimetype` entry, when present, must name
/// the spreadsheet type; `styles.xml` is optional.
pub(crate) fn read_package<R: Read + Seek>(reader: R) -> OdsResult<PackageParts> {
    let mut archive = ZipArchive::new(reader)?;

    if let Some(mimetype) = read_part(&mut archive, "mimetype")? {
        if mimetype.trim() != ODS_MIMETYPE {
            return Err(OdsError::InvalidFormat(format!(
                "unexpected mimetype {:?}",
                mimetype.trim()
            )));
        }
    }

    let content = read_part(&mut archive, "content.xml")?
        .ok_or_else(|| OdsError::MissingPart("content.xml".into()))?;
    let styles = read_part(&mut archive, "styles.xml")?;

    Ok(PackageParts { content, styles })
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> OdsResult<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Write `doc` as a complete ODS package and return the underlying writer
///
/// The `mimetype` entry goes first and uncompressed so the package can be
/// sniffed without inflating anything.
pub(crate) fn write_package<W: Write + Seek>(writer: W, doc: &OdsDocument) -> OdsResult<W> {
    let mut zip = ZipWriter::new(writer);

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored)?;
    zip.write_all(ODS_MIMETYPE.as_bytes())?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let parts = [
        ("content.xml", document::content_xml(doc)),
        ("styles.xml", document::styles_xml(doc)),
        ("meta.xml", document::meta_xml()),
        ("META-INF/manifest.xml", document::manifest_xml()),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn package_bytes(doc: &OdsDocument) -> Vec<u8> {
        write_package(Cursor::new(Vec::new()), doc)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_mimetype_first_and_stored() {
        let bytes = package_bytes(&OdsDocument::new("Sheet1"));
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        drop(first);

        assert!(archive.by_name("META-INF/manifest.xml").is_ok());
    }

    #[test]
    fn test_read_written_package() {
        let bytes = package_bytes(&OdsDocument::new("Sheet1"));
        let parts = read_package(Cursor::new(bytes)).unwrap();
        assert!(parts.content.contains("table:name=\"Sheet1\""));
        assert!(parts.styles.is_some());
    }

    #[test]
    fn test_missing_content_is_fatal() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("mimetype", SimpleFileOptions::default()).unwrap();
        zip.write_all(ODS_MIMETYPE.as_bytes()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = read_package(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, OdsError::MissingPart(ref part) if part == "content.xml"));
    }

    #[test]
    fn test_foreign_mimetype_is_rejected() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("mimetype", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"application/vnd.oasis.opendocument.text").unwrap();
        zip.start_file("content.xml", SimpleFileOptions::default()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = read_package(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, OdsError::InvalidFormat(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = read_package(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, OdsError::Zip(_)));
    }
}
