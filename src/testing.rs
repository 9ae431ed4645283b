use crate::errors::{ClientError, ValidationError};
use crate::models::{Mood, MoodBody, MoodSummary, StoreData, UsageStat};
use crate::store::MoodStore;
use chrono::Utc;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

/// In-memory [`MoodStore`] that counts requests and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    creates: AtomicUsize,
    views: AtomicUsize,
    failing: AtomicBool,
    failing_views: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str) -> String {
        self.insert_body(MoodBody {
            name: name.to_string(),
            ..MoodBody::default()
        })
    }

    pub fn insert_body(&self, body: MoodBody) -> String {
        let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.data.lock().unwrap().moods.push(Mood {
            id: id.clone(),
            body,
        });
        id
    }

    /// Deletes behind the client's back.
    pub fn remove(&self, id: &str) {
        self.data.lock().unwrap().moods.retain(|mood| mood.id != id);
    }

    pub fn mood(&self, id: &str) -> Option<Mood> {
        self.data.lock().unwrap().find(id).cloned()
    }

    pub fn stat(&self, id: &str) -> Option<UsageStat> {
        self.data.lock().unwrap().stats.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap().moods.len()
    }

    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fails only `record_mood_view`.
    pub fn fail_views(&self, failing: bool) {
        self.failing_views.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn views(&self) -> usize {
        self.views.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn unavailable() -> ClientError {
    ClientError::Status {
        status: 503,
        body: "store unavailable".to_string(),
    }
}

fn not_found(id: &str) -> ClientError {
    ClientError::NotFound { id: id.to_string() }
}

impl MoodStore for MemoryStore {
    async fn list_moods(&self) -> Result<Vec<MoodSummary>, ClientError> {
        self.begin()?;
        let data = self.data.lock().unwrap();
        Ok(data.moods.iter().map(MoodSummary::from).collect())
    }

    async fn get_mood(&self, id: &str) -> Result<Mood, ClientError> {
        self.begin()?;
        self.mood(id).ok_or_else(|| not_found(id))
    }

    async fn create_mood(&self, body: &MoodBody) -> Result<Mood, ClientError> {
        self.begin()?;
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.data.lock().unwrap().name_taken(&body.name, None) {
            return Err(ValidationError::DuplicateName {
                name: body.name.clone(),
            }
            .into());
        }
        let id = self.insert_body(body.clone());
        self.mood(&id).ok_or_else(|| not_found(&id))
    }

    async fn update_mood(&self, id: &str, body: &MoodBody) -> Result<Mood, ClientError> {
        self.begin()?;
        let mut data = self.data.lock().unwrap();
        let mood = data
            .moods
            .iter_mut()
            .find(|mood| mood.id == id)
            .ok_or_else(|| not_found(id))?;
        mood.body = body.clone();
        Ok(mood.clone())
    }

    async fn delete_mood(&self, id: &str) -> Result<(), ClientError> {
        self.begin()?;
        let mut data = self.data.lock().unwrap();
        let before = data.moods.len();
        data.moods.retain(|mood| mood.id != id);
        if data.moods.len() == before {
            return Err(not_found(id));
        }
        data.stats.remove(id);
        Ok(())
    }

    async fn find_moods_by_name(&self, name: &str) -> Result<Vec<Mood>, ClientError> {
        self.begin()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .moods
            .iter()
            .filter(|mood| mood.body.name == name)
            .cloned()
            .collect())
    }

    async fn record_mood_view(&self, id: &str) -> Result<(), ClientError> {
        self.begin()?;
        if self.failing_views.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.views.fetch_add(1, Ordering::SeqCst);
        let mut data = self.data.lock().unwrap();
        data.record_view(id, Utc::now())
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn list_statistics(&self) -> Result<Vec<UsageStat>, ClientError> {
        self.begin()?;
        Ok(self.data.lock().unwrap().stats.values().cloned().collect())
    }
}
