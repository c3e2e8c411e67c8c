use crate::adapters::LocalStorage;
use crate::domain::model::{Roster, Student, ROSTER_TAG, STUDENT_TAG};
use crate::domain::ports::Storage;
use crate::formats::{parse_document, write_document, XmlElement};
use crate::utils::error::{Result, RosterError};
use std::path::Path;

/// Write the roster to `path` as an XML document.
pub fn save(path: impl AsRef<Path>, students: &[Student]) -> Result<()> {
    save_with(&LocalStorage::default(), path, students)
}

/// Read a roster previously written by [`save`].
pub fn load_students(path: impl AsRef<Path>) -> Result<Roster> {
    load_with(&LocalStorage::default(), path)
}

pub fn save_with<S: Storage>(storage: &S, path: impl AsRef<Path>, students: &[Student]) -> Result<()> {
    let path = path.as_ref();
    let result = encode_roster(students).and_then(|bytes| storage.write_file(path, &bytes));

    match &result {
        Ok(()) => tracing::info!(
            "saved {} students to file: {}",
            students.len(),
            path.display()
        ),
        Err(e) => tracing::error!("failed to save students to {}: {}", path.display(), e),
    }
    result
}

pub fn load_with<S: Storage>(storage: &S, path: impl AsRef<Path>) -> Result<Roster> {
    let path = path.as_ref();
    let result = storage
        .read_file(path)
        .and_then(|bytes| decode_roster(&bytes));

    match &result {
        Ok(students) => tracing::info!(
            "loaded {} students from file: {}",
            students.len(),
            path.display()
        ),
        Err(e) => tracing::error!("failed to load students from {}: {}", path.display(), e),
    }
    result
}

pub fn encode_roster(students: &[Student]) -> Result<Vec<u8>> {
    let mut root = XmlElement::new(ROSTER_TAG);
    for student in students {
        root.push(student.to_xml());
    }
    write_document(&root)
}

pub fn decode_roster(bytes: &[u8]) -> Result<Roster> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| RosterError::data_format(format!("document is not valid UTF-8: {}", e)))?;
    let root = parse_document(text).map_err(|e| match e {
        RosterError::Xml(e) => RosterError::data_format(format!("malformed XML: {}", e)),
        other => other,
    })?;

    if root.tag != ROSTER_TAG {
        return Err(RosterError::data_format(format!(
            "invalid root element <{}>, expected <{}>",
            root.tag, ROSTER_TAG
        )));
    }

    root.find_all(STUDENT_TAG)
        .map(|element| {
            Student::from_xml(element)
                .map_err(|e| RosterError::data_format(format!("invalid student data: {}", e.message())))
        })
        .collect()
}
