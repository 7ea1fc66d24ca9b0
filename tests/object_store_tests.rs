use bytes::Bytes;
use noteshelf::object_store::{key_from_url, LocalStore, ObjectStore};

const PUBLIC_URL: &str = "http://localhost:8080";

#[tokio::test]
async fn test_local_store_put_returns_url() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    let url = store
        .put("abc123.pdf", Bytes::from("hello world"))
        .await
        .unwrap();
    assert_eq!(url, "http://localhost:8080/static/abc123.pdf");
}

#[tokio::test]
async fn test_local_store_put_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    let data = Bytes::from("hello world");
    store.put("test-key.pdf", data.clone()).await.unwrap();

    let retrieved = store.get("test-key.pdf").await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn test_local_store_trims_trailing_slash() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), "http://example.com/").unwrap();

    let url = store.put("k.docx", Bytes::from("data")).await.unwrap();
    assert_eq!(url, "http://example.com/static/k.docx");
}

#[tokio::test]
async fn test_local_store_exists() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    assert!(!store.exists("missing").await.unwrap());

    store.put("present", Bytes::from("data")).await.unwrap();
    assert!(store.exists("present").await.unwrap());
}

#[tokio::test]
async fn test_local_store_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    store.put("to-delete", Bytes::from("data")).await.unwrap();
    assert!(store.exists("to-delete").await.unwrap());

    store.delete("to-delete").await.unwrap();
    assert!(!store.exists("to-delete").await.unwrap());
}

#[tokio::test]
async fn test_local_store_delete_nonexistent() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    // Deleting a nonexistent key should not error
    store.delete("nonexistent").await.unwrap();
}

#[tokio::test]
async fn test_local_store_get_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    let result = store.get("missing").await;
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        noteshelf::object_store::ObjectStoreError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_local_store_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), PUBLIC_URL).unwrap();

    store.put("key", Bytes::from("first")).await.unwrap();
    store.put("key", Bytes::from("second")).await.unwrap();

    let data = store.get("key").await.unwrap();
    assert_eq!(data, Bytes::from("second"));
}

#[test]
fn test_key_from_url() {
    assert_eq!(
        key_from_url("http://localhost:8080/static/abc.pdf"),
        Some("abc.pdf")
    );
    assert_eq!(
        key_from_url("https://storage.googleapis.com/bucket/xyz.docx"),
        Some("xyz.docx")
    );
    assert_eq!(key_from_url("no-slashes.pdf"), Some("no-slashes.pdf"));
    assert_eq!(key_from_url("http://example.com/"), None);
}
