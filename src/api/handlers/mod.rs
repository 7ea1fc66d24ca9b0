mod admin;
mod documents;
mod static_files;
mod subjects;

pub use admin::{admin_purge, health};
pub use documents::{
    create_document, delete_document, get_document, list_documents, update_document_status,
};
pub use static_files::serve_static;
pub use subjects::{create_subject, delete_subject, get_subject, list_subjects, update_subject};
