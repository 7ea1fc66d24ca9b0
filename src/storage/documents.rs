use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{DocType, DocumentRecord, ReviewStatus};
use super::tables::*;

impl Database {
    // ========================================================================
    // Document operations
    // ========================================================================

    /// Store a document record and update the subject index
    pub fn put_document(&self, document: &DocumentRecord) -> Result<(), DatabaseError> {
        debug_assert!(!document.id.is_empty(), "document id must not be empty");
        debug_assert!(
            !document.subject_id.is_empty(),
            "document subject_id must not be empty"
        );

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS)?;
            let data = rmp_serde::to_vec_named(document)?;
            table.insert(document.id.as_str(), data.as_slice())?;

            // Maintain subject index
            let mut subject_table = write_txn.open_table(SUBJECT_DOCUMENTS)?;
            let mut doc_ids: Vec<String> = subject_table
                .get(document.subject_id.as_str())?
                .map(|v| rmp_serde::from_slice(v.value()).unwrap_or_default())
                .unwrap_or_default();

            if !doc_ids.contains(&document.id) {
                doc_ids.push(document.id.clone());
                let index_data = rmp_serde::to_vec_named(&doc_ids)?;
                subject_table.insert(document.subject_id.as_str(), index_data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a document by its UUID
    pub fn get_document(&self, id: &str) -> Result<Option<DocumentRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS)?;

        match table.get(id)? {
            Some(data) => {
                let document: DocumentRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    /// Get all documents for a subject
    pub fn get_documents_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<DocumentRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let subject_table = read_txn.open_table(SUBJECT_DOCUMENTS)?;
        let documents_table = read_txn.open_table(DOCUMENTS)?;

        let doc_ids: Vec<String> = match subject_table.get(subject_id)? {
            Some(data) => rmp_serde::from_slice(data.value())?,
            None => return Ok(Vec::new()),
        };

        let mut documents = Vec::new();
        for doc_id in doc_ids {
            if let Some(data) = documents_table.get(doc_id.as_str())? {
                let document: DocumentRecord = rmp_serde::from_slice(data.value())?;
                documents.push(document);
            }
        }

        Ok(documents)
    }

    /// Get all documents
    pub fn get_all_documents(&self) -> Result<Vec<DocumentRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS)?;

        let mut documents = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let document: DocumentRecord = rmp_serde::from_slice(value.value())?;
            documents.push(document);
        }

        Ok(documents)
    }

    /// List documents with optional subject, type, and status filters
    /// (logical AND), ordered newest-created first.
    pub fn list_documents(
        &self,
        subject_id: Option<&str>,
        doc_type: Option<DocType>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<DocumentRecord>, DatabaseError> {
        // Use the subject index when a subject filter is provided
        let all = match subject_id {
            Some(sid) => self.get_documents_by_subject(sid)?,
            None => self.get_all_documents()?,
        };

        let mut documents: Vec<DocumentRecord> = all
            .into_iter()
            .filter(|d| doc_type.map_or(true, |t| d.doc_type == t))
            .filter(|d| status.map_or(true, |s| d.status == s))
            .collect();

        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    /// Set a document's review status and record the acting reviewer.
    /// Returns the updated record, or None if the id does not exist.
    /// Transitions are unrestricted.
    pub fn set_document_status(
        &self,
        id: &str,
        status: ReviewStatus,
        reviewer_id: &str,
        reviewer_name: &str,
    ) -> Result<Option<DocumentRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;

        let existing = {
            let table = write_txn.open_table(DOCUMENTS)?;
            let result = match table.get(id)? {
                Some(data) => {
                    let document: DocumentRecord = rmp_serde::from_slice(data.value())?;
                    Some(document)
                }
                None => None,
            };
            result
        };

        let updated = match existing {
            Some(mut document) => {
                document.status = status;
                document.approved_by = Some(reviewer_id.to_string());
                document.approved_by_name = Some(reviewer_name.to_string());

                let serialized = rmp_serde::to_vec_named(&document)?;
                let mut table = write_txn.open_table(DOCUMENTS)?;
                table.insert(id, serialized.as_slice())?;
                Some(document)
            }
            None => None,
        };

        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a document by its UUID and clean up the subject index
    pub fn delete_document(&self, id: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;

        // Get the document for index cleanup
        let subject_id: Option<String> = {
            let table = write_txn.open_table(DOCUMENTS)?;
            let result = match table.get(id)? {
                Some(data) => {
                    let document: DocumentRecord = rmp_serde::from_slice(data.value())?;
                    Some(document.subject_id)
                }
                None => None,
            };
            result
        };

        let deleted = match subject_id {
            Some(subject_id) => {
                // Remove from documents table
                {
                    let mut table = write_txn.open_table(DOCUMENTS)?;
                    table.remove(id)?;
                }
                // Remove from subject index
                let doc_ids: Option<Vec<String>> = {
                    let subject_table = write_txn.open_table(SUBJECT_DOCUMENTS)?;
                    let result = subject_table.get(subject_id.as_str())?;
                    match result {
                        Some(data) => Some(rmp_serde::from_slice(data.value())?),
                        None => None,
                    }
                };

                if let Some(mut ids) = doc_ids {
                    ids.retain(|did| did != id);
                    let mut subject_table = write_txn.open_table(SUBJECT_DOCUMENTS)?;
                    if ids.is_empty() {
                        subject_table.remove(subject_id.as_str())?;
                    } else {
                        let new_data = rmp_serde::to_vec_named(&ids)?;
                        subject_table.insert(subject_id.as_str(), new_data.as_slice())?;
                    }
                }
                true
            }
            None => false,
        };

        write_txn.commit()?;
        Ok(deleted)
    }
}
