use redb::TableDefinition;

/// Subject records: uuid -> SubjectRecord (msgpack)
pub const SUBJECTS: TableDefinition<&str, &[u8]> = TableDefinition::new("subjects");

/// Document records: uuid -> DocumentRecord (msgpack)
pub const DOCUMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// Subject index: subject_id -> msgpack Vec of document UUIDs
pub const SUBJECT_DOCUMENTS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("subject_documents");
