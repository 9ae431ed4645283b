use crate::catalog::CatalogViewModel;
use crate::errors::ClientError;
use crate::form::{FormFields, FormMode};
use crate::models::Mood;
use crate::session::SessionState;
use crate::stats::StatisticsViewModel;
use crate::store::MoodStore;
use crate::ui::ViewPort;
use tracing::{debug, error, warn};

pub const DELETE_QUESTION: &str = "Tem certeza que deseja deletar este humor?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub title: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub swatches: Vec<String>,
    pub sections: Vec<DetailSection>,
}

impl DetailView {
    /// Blank and whitespace-only entries are not shown.
    pub fn from_mood(mood: &Mood) -> Self {
        let body = &mood.body;
        let section = |title: &'static str, items: &[String]| DetailSection {
            title,
            items: items
                .iter()
                .filter(|item| !item.trim().is_empty())
                .cloned()
                .collect(),
        };

        Self {
            title: body.name.clone(),
            swatches: body.colors.iter().filter(|c| !c.is_empty()).cloned().collect(),
            sections: vec![
                section("Frases", &body.phrases),
                section("Dicas de estudo", &body.study_tips),
                section("Músicas", &body.music),
                section("Snacks", &body.snacks),
                section("Emojis", &body.emojis),
                section("Metas rápidas", &body.quick_goals),
                section("Descanso", &body.rest_suggestions),
            ],
        }
    }

    pub fn section(&self, title: &str) -> Option<&DetailSection> {
        self.sections.iter().find(|section| section.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NothingOpen,
    Declined,
    Deleted(String),
    /// The store no longer had the mood.
    AlreadyGone(String),
}

#[derive(Debug, Default)]
pub struct DetailState {
    session: SessionState,
    current: Option<DetailView>,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Last detail successfully rendered.
    pub fn current(&self) -> Option<&DetailView> {
        self.current.as_ref()
    }

    /// Opens `id`: loads it, renders it, records one usage event, refreshes
    /// the statistics and reveals the detail view, in that order.
    pub async fn open<S: MoodStore, V: ViewPort>(
        &mut self,
        id: &str,
        store: &S,
        view: &mut V,
        stats: &mut StatisticsViewModel,
    ) -> Result<(), ClientError> {
        if self.session.is_editing() {
            view.set_form_mode(FormMode::Create);
        }
        self.session.open(id);

        let mood = match store.get_mood(id).await {
            Ok(mood) => mood,
            Err(err) => {
                if err.is_not_found() {
                    warn!(%id, "mood no longer exists");
                } else {
                    error!(%id, "failed to load mood: {err}");
                }
                view.set_detail_visible(false);
                return Err(err);
            }
        };

        let detail = DetailView::from_mood(&mood);
        view.render_detail(&detail);
        self.current = Some(detail);

        if let Err(err) = store.record_mood_view(id).await {
            warn!(%id, "failed to record mood view: {err}");
        }
        stats.refresh(store, view).await;

        view.set_detail_visible(true);
        debug!(%id, "mood opened");
        Ok(())
    }

    /// Hides the detail view. The open mood stays addressable.
    pub fn close<V: ViewPort>(&self, view: &mut V) {
        view.set_detail_visible(false);
    }

    /// Loads the open mood into the form for editing. Returns `None` when
    /// no mood is open.
    pub async fn begin_edit<S: MoodStore, V: ViewPort>(
        &mut self,
        store: &S,
        view: &mut V,
    ) -> Result<Option<Mood>, ClientError> {
        let Some(id) = self.session.begin_edit() else {
            return Ok(None);
        };

        let mood = match store.get_mood(&id).await {
            Ok(mood) => mood,
            Err(err) => {
                warn!(%id, "cannot edit mood: {err}");
                self.session.cancel_edit();
                return Err(err);
            }
        };

        view.populate_form(&FormFields::from_mood(&mood));
        view.set_detail_visible(false);
        view.set_form_mode(FormMode::Edit);
        view.focus_form();

        debug!(%id, "editing mood");
        Ok(Some(mood))
    }

    /// Deletes the open mood after the user confirms, then refreshes the
    /// catalog and statistics. A mood already removed from the store counts
    /// as deleted. The session keeps pointing at the deleted id.
    pub async fn delete_open<S: MoodStore, V: ViewPort>(
        &mut self,
        store: &S,
        view: &mut V,
        catalog: &mut CatalogViewModel,
        stats: &mut StatisticsViewModel,
    ) -> Result<DeleteOutcome, ClientError> {
        let Some(id) = self.session.open_mood_id().map(str::to_string) else {
            return Ok(DeleteOutcome::NothingOpen);
        };
        if !view.confirm(DELETE_QUESTION) {
            return Ok(DeleteOutcome::Declined);
        }

        let outcome = match store.delete_mood(&id).await {
            Ok(()) => DeleteOutcome::Deleted(id),
            Err(err) if err.is_not_found() => {
                warn!(%id, "mood was already deleted");
                DeleteOutcome::AlreadyGone(id)
            }
            Err(err) => {
                error!(%id, "failed to delete mood: {err}");
                return Err(err);
            }
        };

        view.set_detail_visible(false);
        catalog.refresh(store, view).await;
        stats.refresh(store, view).await;

        debug!(?outcome, "delete finished");
        Ok(outcome)
    }
}
