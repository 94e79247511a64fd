use async_trait::async_trait;
use bytes::Bytes;
use chirp_storage::{S3Storage, Storage, StorageResult};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, ObjectStoreExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `S3Storage` over an in-memory object store that also counts calls.
pub struct RecordingStorage {
    inner: S3Storage,
    objects: Arc<InMemory>,
    store_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl RecordingStorage {
    pub fn in_memory(bucket: &str, region: &str) -> Self {
        let objects = Arc::new(InMemory::new());
        let inner = S3Storage::with_store(
            objects.clone(),
            bucket.to_string(),
            region.to_string(),
            None,
        );
        Self {
            inner,
            objects,
            store_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.head(&Path::from(key)).await.is_ok()
    }

    /// Content type the object under `key` was stored with.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        let result = self.objects.get(&Path::from(key)).await.ok()?;
        result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| AsRef::<str>::as_ref(v).to_string())
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn store(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.store(key, data, content_type).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }

    fn backend_type(&self) -> &'static str {
        self.inner.backend_type()
    }
}
