//! In-memory object store used by the integration tests.
//!
//! Mirrors the S3 semantics the sync logic relies on: a put replaces
//! the object and clears its tags, probes can answer with delete
//! markers, and failures can be injected per key.

#![allow(dead_code)]

use async_trait::async_trait;
use bakup::store::{ObjectStore, RemoteObject};
use bakup::types::BackupError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default, Clone)]
struct StoredObject {
    body: Vec<u8>,
    metadata: HashMap<String, String>,
    tags: Vec<(String, String)>,
    delete_marker: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    probe_failures: Mutex<HashSet<String>>,
    put_count: AtomicUsize,
    tag_write_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_id(bucket: &str, key: &str) -> String {
        format!("{bucket}/{key}")
    }

    /// Number of binary uploads performed so far.
    pub fn puts(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Number of tag-set writes performed so far.
    pub fn tag_writes(&self) -> usize {
        self.tag_write_count.load(Ordering::SeqCst)
    }

    /// Make every probe for `key` fail with a transport-style error.
    pub fn fail_probe_for(&self, bucket: &str, key: &str) {
        self.probe_failures
            .lock()
            .unwrap()
            .insert(Self::object_id(bucket, key));
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&Self::object_id(bucket, key))
    }

    pub fn body(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&Self::object_id(bucket, key))
            .map(|object| object.body.clone())
    }

    pub fn metadata_value(&self, bucket: &str, key: &str, name: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&Self::object_id(bucket, key))
            .and_then(|object| object.metadata.get(name).cloned())
    }

    pub fn tag_value(&self, bucket: &str, key: &str, tag: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&Self::object_id(bucket, key))
            .and_then(|object| {
                object
                    .tags
                    .iter()
                    .find(|(name, _)| name == tag)
                    .map(|(_, value)| value.clone())
            })
    }

    /// Overwrite one user-metadata entry (e.g. corrupt a stored hash).
    pub fn set_metadata_value(&self, bucket: &str, key: &str, name: &str, value: &str) {
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .get_mut(&Self::object_id(bucket, key))
            .expect("object must exist");
        object.metadata.insert(name.to_string(), value.to_string());
    }

    /// Set or replace one tag (e.g. inject a stale timestamp).
    pub fn set_tag_value(&self, bucket: &str, key: &str, tag: &str, value: &str) {
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .get_mut(&Self::object_id(bucket, key))
            .expect("object must exist");
        object.tags.retain(|(name, _)| name != tag);
        object.tags.push((tag.to_string(), value.to_string()));
    }

    /// Turn the stored object into a versioned-bucket delete marker.
    pub fn mark_delete_marker(&self, bucket: &str, key: &str) {
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .get_mut(&Self::object_id(bucket, key))
            .expect("object must exist");
        object.delete_marker = true;
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn probe_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<RemoteObject>, BackupError> {
        let id = Self::object_id(bucket, key);
        if self.probe_failures.lock().unwrap().contains(&id) {
            return Err(BackupError::MetadataProbeFailed {
                key: key.to_string(),
                message: "injected transport error".to_string(),
            });
        }

        Ok(self.objects.lock().unwrap().get(&id).map(|object| {
            RemoteObject {
                size: object.body.len() as u64,
                is_delete_marker: object.delete_marker,
                metadata: object.metadata.clone(),
            }
        }))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        metadata: HashMap<String, String>,
    ) -> Result<(), BackupError> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        // A put replaces the object and clears its tag set, as S3 does.
        self.objects.lock().unwrap().insert(
            Self::object_id(bucket, key),
            StoredObject {
                body,
                metadata,
                tags: Vec::new(),
                delete_marker: false,
            },
        );
        Ok(())
    }

    async fn get_tags(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Vec<(String, String)>, BackupError> {
        self.objects
            .lock()
            .unwrap()
            .get(&Self::object_id(bucket, key))
            .map(|object| object.tags.clone())
            .ok_or_else(|| BackupError::TagReadFailed {
                key: key.to_string(),
                message: "no such object".to_string(),
            })
    }

    async fn put_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: Vec<(String, String)>,
    ) -> Result<(), BackupError> {
        self.tag_write_count.fetch_add(1, Ordering::SeqCst);
        let mut objects = self.objects.lock().unwrap();
        match objects.get_mut(&Self::object_id(bucket, key)) {
            Some(object) => {
                object.tags = tags;
                Ok(())
            }
            None => Err(BackupError::TagUpdateFailed {
                key: key.to_string(),
                message: "no such object".to_string(),
            }),
        }
    }
}
