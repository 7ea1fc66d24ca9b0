use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::SubjectRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Subject operations
    // ========================================================================

    /// Store a subject record
    pub fn put_subject(&self, subject: &SubjectRecord) -> Result<(), DatabaseError> {
        debug_assert!(!subject.id.is_empty(), "subject id must not be empty");
        debug_assert!(!subject.name.is_empty(), "subject name must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SUBJECTS)?;
            let data = rmp_serde::to_vec_named(subject)?;
            table.insert(subject.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a subject by its UUID
    pub fn get_subject(&self, id: &str) -> Result<Option<SubjectRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SUBJECTS)?;

        match table.get(id)? {
            Some(data) => {
                let subject: SubjectRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(subject))
            }
            None => Ok(None),
        }
    }

    /// List all subjects ordered lexicographically by name
    pub fn list_subjects(&self) -> Result<Vec<SubjectRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SUBJECTS)?;

        let mut subjects = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let subject: SubjectRecord = rmp_serde::from_slice(value.value())?;
            subjects.push(subject);
        }

        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    /// Replace a subject's name and description in place.
    /// Returns the updated record, or None if the id does not exist.
    pub fn update_subject(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<SubjectRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;

        let existing = {
            let table = write_txn.open_table(SUBJECTS)?;
            let result = match table.get(id)? {
                Some(data) => {
                    let subject: SubjectRecord = rmp_serde::from_slice(data.value())?;
                    Some(subject)
                }
                None => None,
            };
            result
        };

        let updated = match existing {
            Some(mut subject) => {
                subject.name = name.to_string();
                subject.description = description.map(|s| s.to_string());
                subject.updated_at = chrono::Utc::now();

                let serialized = rmp_serde::to_vec_named(&subject)?;
                let mut table = write_txn.open_table(SUBJECTS)?;
                table.insert(id, serialized.as_slice())?;
                Some(subject)
            }
            None => None,
        };

        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a subject by its UUID.
    /// Documents referencing it are left untouched; their subject_id dangles.
    pub fn delete_subject(&self, id: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;

        let deleted = {
            let mut table = write_txn.open_table(SUBJECTS)?;
            let removed = table.remove(id)?.is_some();
            removed
        };

        write_txn.commit()?;
        Ok(deleted)
    }
}
