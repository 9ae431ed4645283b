use crate::models::MoodSummary;
use crate::store::MoodStore;
use crate::ui::ViewPort;
use tracing::{debug, error};

pub const DEFAULT_CARD_COLOR: &str = "#6c63ff";

/// One selectable entry of the catalog. Selecting it opens the mood with `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    pub id: String,
    pub label: String,
    pub background: String,
}

impl From<&MoodSummary> for CatalogCard {
    fn from(summary: &MoodSummary) -> Self {
        Self {
            id: summary.id.clone(),
            label: summary.name.clone(),
            background: summary
                .colors
                .first()
                .filter(|color| !color.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogViewModel {
    cards: Vec<CatalogCard>,
}

impl CatalogViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[CatalogCard] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&CatalogCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Replaces the displayed catalog with the store's current list.
    /// On failure the previous catalog stays on screen.
    pub async fn refresh<S: MoodStore, V: ViewPort>(&mut self, store: &S, view: &mut V) {
        match store.list_moods().await {
            Ok(moods) => {
                self.cards = moods.iter().map(CatalogCard::from).collect();
                view.render_catalog(&self.cards);
                debug!(count = self.cards.len(), "catalog refreshed");
            }
            Err(err) => error!("failed to load moods: {err}"),
        }
    }
}
