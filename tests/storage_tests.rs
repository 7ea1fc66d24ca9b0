use chrono::{Duration, Utc};
use noteshelf::storage::models::{
    DocType, DocumentRecord, FileKind, ReviewStatus, SubjectRecord,
};
use noteshelf::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_subject(id: &str, name: &str) -> SubjectRecord {
    let now = Utc::now();
    SubjectRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("test description".to_string()),
        created_at: now,
        updated_at: now,
    }
}

fn sample_document(id: &str, subject_id: &str) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        title: "Test Document".to_string(),
        description: None,
        subject_id: subject_id.to_string(),
        doc_type: DocType::Notes,
        file_url: format!("http://localhost:8080/static/{id}.pdf"),
        file_kind: FileKind::Pdf,
        uploaded_by: "user-1".to_string(),
        uploaded_by_name: "Test User".to_string(),
        status: ReviewStatus::Pending,
        approved_by: None,
        approved_by_name: None,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Subject tests
// ============================================================================

#[test]
fn test_put_and_get_subject() {
    let (_dir, db) = test_db();
    let subject = sample_subject("sub-1", "Algorithms");

    db.put_subject(&subject).unwrap();

    let retrieved = db
        .get_subject("sub-1")
        .unwrap()
        .expect("subject should exist");
    assert_eq!(retrieved.id, "sub-1");
    assert_eq!(retrieved.name, "Algorithms");
    assert_eq!(retrieved.description, Some("test description".to_string()));
}

#[test]
fn test_get_subject_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_subject("nonexistent").unwrap().is_none());
}

#[test]
fn test_list_subjects_lexicographic() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s1", "Operating Systems"))
        .unwrap();
    db.put_subject(&sample_subject("s2", "Algorithms")).unwrap();
    db.put_subject(&sample_subject("s3", "Databases")).unwrap();

    let subjects = db.list_subjects().unwrap();
    let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Algorithms", "Databases", "Operating Systems"]);
}

#[test]
fn test_update_subject() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s4", "Networks")).unwrap();

    let updated = db
        .update_subject("s4", "Computer Networks", Some("renamed"))
        .unwrap()
        .expect("subject should exist");
    assert_eq!(updated.name, "Computer Networks");
    assert_eq!(updated.description, Some("renamed".to_string()));

    let retrieved = db.get_subject("s4").unwrap().unwrap();
    assert_eq!(retrieved.name, "Computer Networks");
}

#[test]
fn test_update_subject_clears_description() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s5", "Compilers")).unwrap();

    let updated = db.update_subject("s5", "Compilers", None).unwrap().unwrap();
    assert_eq!(updated.description, None);
}

#[test]
fn test_update_subject_not_found() {
    let (_dir, db) = test_db();
    assert!(db
        .update_subject("nonexistent", "Name", None)
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_subject() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s6", "To Delete")).unwrap();

    assert!(db.delete_subject("s6").unwrap());
    assert!(db.get_subject("s6").unwrap().is_none());
}

#[test]
fn test_delete_subject_not_found() {
    let (_dir, db) = test_db();
    assert!(!db.delete_subject("nonexistent").unwrap());
}

#[test]
fn test_delete_subject_leaves_documents_dangling() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s7", "Ephemeral")).unwrap();
    db.put_document(&sample_document("d1", "s7")).unwrap();

    db.delete_subject("s7").unwrap();

    // No cascade: the document survives with its subject reference intact
    let doc = db.get_document("d1").unwrap().expect("document survives");
    assert_eq!(doc.subject_id, "s7");
    assert!(db.get_subject("s7").unwrap().is_none());
}

// ============================================================================
// Document tests
// ============================================================================

#[test]
fn test_put_and_get_document() {
    let (_dir, db) = test_db();
    let document = sample_document("doc-1", "sub-1");

    db.put_document(&document).unwrap();

    let retrieved = db
        .get_document("doc-1")
        .unwrap()
        .expect("document should exist");
    assert_eq!(retrieved.id, "doc-1");
    assert_eq!(retrieved.title, "Test Document");
    assert_eq!(retrieved.subject_id, "sub-1");
    assert_eq!(retrieved.doc_type, DocType::Notes);
    assert_eq!(retrieved.file_kind, FileKind::Pdf);
    assert_eq!(retrieved.status, ReviewStatus::Pending);
    assert_eq!(retrieved.approved_by, None);
    assert_eq!(retrieved.approved_by_name, None);
}

#[test]
fn test_get_document_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_document("nonexistent").unwrap().is_none());
}

#[test]
fn test_list_documents_newest_first() {
    let (_dir, db) = test_db();
    let base = Utc::now();

    for (i, id) in ["old", "mid", "new"].iter().enumerate() {
        let mut doc = sample_document(id, "s1");
        doc.created_at = base + Duration::seconds(i as i64);
        db.put_document(&doc).unwrap();
    }

    let documents = db.list_documents(None, None, None).unwrap();
    let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn test_list_documents_by_subject() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("a", "math")).unwrap();
    db.put_document(&sample_document("b", "math")).unwrap();
    db.put_document(&sample_document("c", "physics")).unwrap();

    let math = db.list_documents(Some("math"), None, None).unwrap();
    assert_eq!(math.len(), 2);

    let physics = db.list_documents(Some("physics"), None, None).unwrap();
    assert_eq!(physics.len(), 1);
    assert_eq!(physics[0].id, "c");

    let empty = db.list_documents(Some("nonexistent"), None, None).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_list_documents_by_type_and_status() {
    let (_dir, db) = test_db();

    let mut notes = sample_document("n1", "s1");
    notes.doc_type = DocType::Notes;
    db.put_document(&notes).unwrap();

    let mut papers = sample_document("p1", "s1");
    papers.doc_type = DocType::Papers;
    db.put_document(&papers).unwrap();

    let mut approved_papers = sample_document("p2", "s1");
    approved_papers.doc_type = DocType::Papers;
    approved_papers.status = ReviewStatus::Approved;
    db.put_document(&approved_papers).unwrap();

    let all_papers = db
        .list_documents(None, Some(DocType::Papers), None)
        .unwrap();
    assert_eq!(all_papers.len(), 2);

    // Filters combine with logical AND
    let approved = db
        .list_documents(None, Some(DocType::Papers), Some(ReviewStatus::Approved))
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, "p2");

    let pending_notes = db
        .list_documents(None, Some(DocType::Notes), Some(ReviewStatus::Pending))
        .unwrap();
    assert_eq!(pending_notes.len(), 1);
    assert_eq!(pending_notes[0].id, "n1");
}

#[test]
fn test_set_document_status() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("mod-1", "s1")).unwrap();

    let updated = db
        .set_document_status("mod-1", ReviewStatus::Approved, "admin-1", "Admin")
        .unwrap()
        .expect("document should exist");
    assert_eq!(updated.status, ReviewStatus::Approved);
    assert_eq!(updated.approved_by, Some("admin-1".to_string()));
    assert_eq!(updated.approved_by_name, Some("Admin".to_string()));
}

#[test]
fn test_set_document_status_idempotent() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("mod-2", "s1")).unwrap();

    let first = db
        .set_document_status("mod-2", ReviewStatus::Rejected, "admin-1", "Admin")
        .unwrap()
        .unwrap();
    let second = db
        .set_document_status("mod-2", ReviewStatus::Rejected, "admin-1", "Admin")
        .unwrap()
        .unwrap();

    assert_eq!(first.status, second.status);
    assert_eq!(first.approved_by, second.approved_by);
    assert_eq!(first.title, second.title);
    assert_eq!(first.created_at, second.created_at);
}

#[test]
fn test_set_document_status_reversal_permitted() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("mod-3", "s1")).unwrap();

    db.set_document_status("mod-3", ReviewStatus::Approved, "admin-1", "Admin")
        .unwrap();
    let reverted = db
        .set_document_status("mod-3", ReviewStatus::Pending, "admin-2", "Other Admin")
        .unwrap()
        .unwrap();

    // Transitions are unrestricted; the reviewer follows the last actor
    assert_eq!(reverted.status, ReviewStatus::Pending);
    assert_eq!(reverted.approved_by, Some("admin-2".to_string()));
}

#[test]
fn test_set_document_status_not_found() {
    let (_dir, db) = test_db();
    assert!(db
        .set_document_status("nonexistent", ReviewStatus::Approved, "a", "A")
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_document() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("del-1", "s1")).unwrap();

    assert!(db.delete_document("del-1").unwrap());
    assert!(db.get_document("del-1").unwrap().is_none());
}

#[test]
fn test_delete_document_not_found() {
    let (_dir, db) = test_db();
    assert!(!db.delete_document("nonexistent").unwrap());
}

#[test]
fn test_delete_document_cleans_subject_index() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("keep", "shared")).unwrap();
    db.put_document(&sample_document("drop", "shared")).unwrap();

    db.delete_document("drop").unwrap();

    let remaining = db.get_documents_by_subject("shared").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "keep");
}

#[test]
fn test_delete_last_document_removes_subject_entry() {
    let (_dir, db) = test_db();
    db.put_document(&sample_document("only", "solo")).unwrap();

    db.delete_document("only").unwrap();

    let empty = db.get_documents_by_subject("solo").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_purge_all() {
    let (_dir, db) = test_db();
    db.put_subject(&sample_subject("s1", "One")).unwrap();
    db.put_subject(&sample_subject("s2", "Two")).unwrap();
    db.put_document(&sample_document("d1", "s1")).unwrap();

    let stats = db.purge_all().unwrap();
    assert_eq!(stats.subjects, 2);
    assert_eq!(stats.documents, 1);

    assert!(db.list_subjects().unwrap().is_empty());
    assert!(db.get_all_documents().unwrap().is_empty());
}

// ============================================================================
// Model tests
// ============================================================================

#[test]
fn test_file_kind_from_filename() {
    assert_eq!(FileKind::from_filename("notes.pdf"), Some(FileKind::Pdf));
    assert_eq!(FileKind::from_filename("Notes.PDF"), Some(FileKind::Pdf));
    assert_eq!(FileKind::from_filename("essay.docx"), Some(FileKind::Docx));
    assert_eq!(FileKind::from_filename("archive.tar.pdf"), Some(FileKind::Pdf));
    assert_eq!(FileKind::from_filename("paper.exe"), None);
    assert_eq!(FileKind::from_filename("malware.pdf.exe"), None);
    assert_eq!(FileKind::from_filename("no_extension"), None);
}

#[test]
fn test_doc_type_parse() {
    assert_eq!(DocType::parse("notes"), Some(DocType::Notes));
    assert_eq!(DocType::parse("papers"), Some(DocType::Papers));
    assert_eq!(DocType::parse("Notes"), None);
    assert_eq!(DocType::parse("video"), None);
}

#[test]
fn test_review_status_parse() {
    assert_eq!(ReviewStatus::parse("pending"), Some(ReviewStatus::Pending));
    assert_eq!(ReviewStatus::parse("approved"), Some(ReviewStatus::Approved));
    assert_eq!(ReviewStatus::parse("rejected"), Some(ReviewStatus::Rejected));
    assert_eq!(ReviewStatus::parse("archived"), None);
}
