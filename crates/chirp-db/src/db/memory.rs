use async_trait::async_trait;
use chirp_core::models::{Association, ImageRecord, NewImageRecord};
use chirp_core::AppError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::image::ImageRecordStore;

#[derive(Default)]
struct State {
    images: HashMap<i32, ImageRecord>,
    next_id: i32,
    tweets: HashSet<i32>,
    comments: HashSet<i32>,
    /// user id -> profile image URL
    users: HashMap<i32, Option<String>>,
    fail_inserts: bool,
}

/// Image record store kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryImageRecords {
    inner: Arc<Mutex<State>>,
}

impl InMemoryImageRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user_id: i32) {
        self.inner.lock().await.users.insert(user_id, None);
    }

    pub async fn add_tweet(&self, tweet_id: i32) {
        self.inner.lock().await.tweets.insert(tweet_id);
    }

    pub async fn add_comment(&self, comment_id: i32) {
        self.inner.lock().await.comments.insert(comment_id);
    }

    /// Make every following insert fail with a database-style error.
    pub async fn fail_inserts(&self, fail: bool) {
        self.inner.lock().await.fail_inserts = fail;
    }

    pub async fn profile_image(&self, user_id: i32) -> Option<String> {
        self.inner
            .lock()
            .await
            .users
            .get(&user_id)
            .cloned()
            .flatten()
    }

    pub async fn records(&self) -> Vec<ImageRecord> {
        let state = self.inner.lock().await;
        let mut records: Vec<ImageRecord> = state.images.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

#[async_trait]
impl ImageRecordStore for InMemoryImageRecords {
    async fn target_exists(&self, association: &Association) -> Result<bool, AppError> {
        let state = self.inner.lock().await;
        Ok(match *association {
            Association::Tweet { tweet_id } => state.tweets.contains(&tweet_id),
            Association::Comment { comment_id } => state.comments.contains(&comment_id),
            Association::User { user_id } => state.users.contains_key(&user_id),
        })
    }

    async fn insert(&self, record: NewImageRecord) -> Result<ImageRecord, AppError> {
        let mut state = self.inner.lock().await;
        if state.fail_inserts {
            return Err(AppError::Internal("insert rejected by test store".to_string()));
        }

        if let Association::User { user_id } = record.association {
            match state.users.get_mut(&user_id) {
                Some(profile_image) => *profile_image = Some(record.url.clone()),
                None => return Err(AppError::RecordNotFound("User not found".to_string())),
            }
        }

        state.next_id += 1;
        let image = ImageRecord {
            id: state.next_id,
            user_id: record.user_id,
            url: record.url,
            key: record.key,
            association: record.association,
        };
        state.images.insert(image.id, image.clone());
        Ok(image)
    }

    async fn get(&self, id: i32) -> Result<Option<ImageRecord>, AppError> {
        Ok(self.inner.lock().await.images.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.inner.lock().await.images.remove(&id).is_some())
    }
}
