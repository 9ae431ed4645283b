use crate::catalog::CatalogViewModel;
use crate::config::ClientConfig;
use crate::detail::{DeleteOutcome, DetailState};
use crate::errors::ClientError;
use crate::form::{self, FormFields};
use crate::models::Mood;
use crate::session::SessionState;
use crate::stats::StatisticsViewModel;
use crate::store::{HttpMoodStore, MoodStore};
use crate::ui::ViewPort;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const SAVED_MESSAGE: &str = "Salvo com sucesso!";

/// A user-initiated workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    RefreshCatalog,
    RefreshStatistics,
    Open(String),
    /// Selects the catalog card at this position.
    Select(usize),
    Close,
    BeginEdit,
    Delete,
    Submit(FormFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Editing(Option<Mood>),
    Delete(DeleteOutcome),
    Saved(Mood),
}

pub struct MoodClient<S, V> {
    store: S,
    view: V,
    catalog: CatalogViewModel,
    detail: DetailState,
    stats: StatisticsViewModel,
}

impl<V: ViewPort> MoodClient<HttpMoodStore, V> {
    pub fn connect(config: &ClientConfig, view: V) -> Result<Self, ClientError> {
        info!(base_url = %config.base_url, "connecting to mood store");
        Ok(Self::new(HttpMoodStore::new(config)?, view))
    }
}

impl<S: MoodStore, V: ViewPort> MoodClient<S, V> {
    pub fn new(store: S, view: V) -> Self {
        Self {
            store,
            view,
            catalog: CatalogViewModel::new(),
            detail: DetailState::new(),
            stats: StatisticsViewModel::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn catalog(&self) -> &CatalogViewModel {
        &self.catalog
    }

    pub fn statistics(&self) -> &StatisticsViewModel {
        &self.stats
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn session(&self) -> &SessionState {
        self.detail.session()
    }

    /// Initial load of the catalog and the statistics.
    pub async fn start(&mut self) {
        self.refresh_catalog().await;
        self.refresh_statistics().await;
    }

    pub async fn refresh_catalog(&mut self) {
        self.catalog.refresh(&self.store, &mut self.view).await;
    }

    pub async fn refresh_statistics(&mut self) {
        self.stats.refresh(&self.store, &mut self.view).await;
    }

    pub async fn open_mood(&mut self, id: &str) -> Result<(), ClientError> {
        self.detail
            .open(id, &self.store, &mut self.view, &mut self.stats)
            .await
    }

    /// Opens the mood behind the catalog card at `index`. Out-of-range
    /// selections are ignored.
    pub async fn select(&mut self, index: usize) -> Result<(), ClientError> {
        let Some(id) = self.catalog.cards().get(index).map(|card| card.id.clone()) else {
            warn!(index, "no catalog card at position");
            return Ok(());
        };
        self.open_mood(&id).await
    }

    pub fn close_mood(&mut self) {
        self.detail.close(&mut self.view);
    }

    pub async fn begin_edit(&mut self) -> Result<Option<Mood>, ClientError> {
        self.detail.begin_edit(&self.store, &mut self.view).await
    }

    pub async fn delete_open(&mut self) -> Result<DeleteOutcome, ClientError> {
        self.detail
            .delete_open(&self.store, &mut self.view, &mut self.catalog, &mut self.stats)
            .await
    }

    /// Saves the form, then refreshes the catalog and statistics and
    /// acknowledges the save. A mood that vanished mid-edit drops out of the
    /// catalog.
    pub async fn submit(&mut self, fields: &FormFields) -> Result<Mood, ClientError> {
        let submitted = form::submit(
            fields,
            self.detail.session_mut(),
            &self.store,
            &mut self.view,
        )
        .await;
        let saved = match submitted {
            Ok(saved) => saved,
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_catalog().await;
                }
                return Err(err);
            }
        };

        self.refresh_catalog().await;
        self.refresh_statistics().await;
        self.view.notify(SAVED_MESSAGE);
        Ok(saved)
    }

    pub async fn apply(&mut self, action: Action) -> Result<Outcome, ClientError> {
        match action {
            Action::Start => self.start().await,
            Action::RefreshCatalog => self.refresh_catalog().await,
            Action::RefreshStatistics => self.refresh_statistics().await,
            Action::Open(id) => self.open_mood(&id).await?,
            Action::Select(index) => self.select(index).await?,
            Action::Close => self.close_mood(),
            Action::BeginEdit => return Ok(Outcome::Editing(self.begin_edit().await?)),
            Action::Delete => return Ok(Outcome::Delete(self.delete_open().await?)),
            Action::Submit(fields) => return Ok(Outcome::Saved(self.submit(&fields).await?)),
        }
        Ok(Outcome::Done)
    }
}

/// Shared handle for event-driven front ends. Only one action runs at a
/// time; an action triggered while another is in flight is refused.
pub struct SharedClient<S, V> {
    inner: Arc<Mutex<MoodClient<S, V>>>,
}

impl<S, V> Clone for SharedClient<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: MoodStore, V: ViewPort> SharedClient<S, V> {
    pub fn new(client: MoodClient<S, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub async fn dispatch(&self, action: Action) -> Result<Outcome, ClientError> {
        let Ok(mut client) = self.inner.try_lock() else {
            warn!(?action, "action ignored while another is in progress");
            return Err(ClientError::Busy);
        };
        client.apply(action).await
    }

    /// Waits for any in-flight action, then reads the client.
    pub async fn inspect<R>(&self, read: impl FnOnce(&MoodClient<S, V>) -> R) -> R {
        let client = self.inner.lock().await;
        read(&client)
    }
}
