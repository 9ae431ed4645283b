use crate::errors::{ClientError, ValidationError};
use crate::models::{Mood, MoodBody};
use crate::session::SessionState;
use crate::store::MoodStore;
use crate::ui::ViewPort;
use tracing::{debug, error, warn};

pub const DEFAULT_FORM_COLOR: &str = "#000000";
pub const MOOD_GONE_MESSAGE: &str = "Esse humor não existe mais.";
const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Create => "Criar Novo Humor",
            Self::Edit => "Editar Humor",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Criar Humor",
            Self::Edit => "Salvar Alterações",
        }
    }
}

/// Raw form contents. List fields hold comma-delimited text; an unset color
/// picker is `None` and shows [`DEFAULT_FORM_COLOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub colors: [Option<String>; 3],
    pub phrases: String,
    pub study_tips: String,
    pub music: String,
    pub snacks: String,
    pub emojis: String,
    pub quick_goals: String,
    pub rest_suggestions: String,
}

impl FormFields {
    /// Pre-populates the form from an existing mood.
    pub fn from_mood(mood: &Mood) -> Self {
        let body = &mood.body;
        let color = |index: usize| body.colors.get(index).filter(|c| !c.is_empty()).cloned();

        Self {
            name: body.name.clone(),
            colors: [color(0), color(1), color(2)],
            phrases: body.phrases.join(LIST_SEPARATOR),
            study_tips: body.study_tips.join(LIST_SEPARATOR),
            music: body.music.join(LIST_SEPARATOR),
            snacks: body.snacks.join(LIST_SEPARATOR),
            emojis: body.emojis.join(LIST_SEPARATOR),
            quick_goals: body.quick_goals.join(LIST_SEPARATOR),
            rest_suggestions: body.rest_suggestions.join(LIST_SEPARATOR),
        }
    }

    /// What the color picker at `index` displays.
    pub fn shown_color(&self, index: usize) -> &str {
        self.colors
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or(DEFAULT_FORM_COLOR)
    }

    pub fn normalized_name(&self) -> &str {
        self.name.trim()
    }

    /// Builds the store payload. `name` must already be normalized.
    pub fn to_payload(&self, name: &str) -> MoodBody {
        MoodBody {
            name: name.to_string(),
            colors: self
                .colors
                .iter()
                .flatten()
                .map(|color| color.trim())
                .filter(|color| !color.is_empty())
                .map(str::to_string)
                .collect(),
            phrases: normalize_list(&self.phrases),
            study_tips: normalize_list(&self.study_tips),
            music: normalize_list(&self.music),
            snacks: normalize_list(&self.snacks),
            emojis: normalize_list(&self.emojis),
            quick_goals: normalize_list(&self.quick_goals),
            rest_suggestions: normalize_list(&self.rest_suggestions),
        }
    }
}

/// Splits on commas, trims every piece and drops the empty ones.
/// Order and duplicates are kept.
pub fn normalize_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rejects `name` if any existing mood other than `editing_id` carries it.
pub fn check_unique(
    name: &str,
    existing: &[Mood],
    editing_id: Option<&str>,
) -> Result<(), ValidationError> {
    let clash = existing
        .iter()
        .any(|mood| mood.body.name == name && Some(mood.id.as_str()) != editing_id);
    if !clash {
        return Ok(());
    }

    Err(match editing_id {
        Some(_) => ValidationError::DuplicateWhileEditing { name: name.to_string() },
        None => ValidationError::DuplicateName { name: name.to_string() },
    })
}

/// Validates `fields` and creates or updates a mood depending on `session`.
///
/// On success the session leaves edit mode and the form is blanked. An edit
/// whose mood was deleted elsewhere leaves edit mode and keeps the typed
/// fields, so the next submit creates it. Any other failure leaves the form
/// and session untouched; validation failures are shown to the user,
/// transport failures are only logged.
pub async fn submit<S: MoodStore, V: ViewPort>(
    fields: &FormFields,
    session: &mut SessionState,
    store: &S,
    view: &mut V,
) -> Result<Mood, ClientError> {
    let name = fields.normalized_name();
    if name.is_empty() {
        return Err(reject(view, ValidationError::EmptyName));
    }

    let existing = store.find_moods_by_name(name).await.map_err(|err| {
        error!(name, "failed to check mood name: {err}");
        err
    })?;

    let editing_id = match &*session {
        SessionState::Editing(id) => Some(id.clone()),
        _ => None,
    };
    if let Err(err) = check_unique(name, &existing, editing_id.as_deref()) {
        return Err(reject(view, err));
    }

    let payload = fields.to_payload(name);
    let dispatched = match editing_id.as_deref() {
        Some(id) => store.update_mood(id, &payload).await,
        None => store.create_mood(&payload).await,
    };

    let saved = match dispatched {
        Ok(saved) => saved,
        Err(ClientError::Validation(ValidationError::DuplicateName { name })) => {
            // the store caught a race the name lookup missed
            let err = match editing_id {
                Some(_) => ValidationError::DuplicateWhileEditing { name },
                None => ValidationError::DuplicateName { name },
            };
            return Err(reject(view, err));
        }
        Err(err) if err.is_not_found() && editing_id.is_some() => {
            warn!(name, "edited mood no longer exists: {err}");
            session.cancel_edit();
            view.set_form_mode(FormMode::Create);
            view.notify(MOOD_GONE_MESSAGE);
            return Err(err);
        }
        Err(err) => {
            error!(name, editing = editing_id.is_some(), "failed to save mood: {err}");
            return Err(err);
        }
    };

    if editing_id.is_some() {
        session.reset();
        view.set_form_mode(FormMode::Create);
    }
    view.populate_form(&FormFields::default());

    debug!(id = %saved.id, "mood saved");
    Ok(saved)
}

fn reject<V: ViewPort>(view: &mut V, err: ValidationError) -> ClientError {
    warn!("mood form rejected: {err}");
    view.notify(&err.to_string());
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use crate::ui::HtmlView;

    fn fields(name: &str) -> FormFields {
        FormFields {
            name: name.into(),
            ..FormFields::default()
        }
    }

    #[test]
    fn list_normalization_drops_blank_pieces() {
        assert_eq!(normalize_list("a, , b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(normalize_list("x, x"), vec!["x", "x"]);
        assert!(normalize_list(" , ,, ").is_empty());
        assert!(normalize_list("").is_empty());
    }

    #[test]
    fn payload_drops_unset_colors() {
        let mut form = fields("Feliz");
        form.colors = [Some("#fff".into()), Some(String::new()), Some("#000".into())];
        form.snacks = "pipoca, ".into();
        let payload = form.to_payload("Feliz");
        assert_eq!(payload.colors, vec!["#fff", "#000"]);
        assert_eq!(payload.snacks, vec!["pipoca"]);
        assert!(payload.phrases.is_empty());
    }

    #[test]
    fn from_mood_fills_colors_and_joins_lists() {
        let mood = Mood {
            id: "m1".into(),
            body: MoodBody {
                name: "Calmo".into(),
                colors: vec!["#111".into()],
                phrases: vec!["um".into(), "dois".into()],
                ..MoodBody::default()
            },
        };
        let form = FormFields::from_mood(&mood);
        assert_eq!(form.colors, [Some("#111".to_string()), None, None]);
        assert_eq!(form.shown_color(0), "#111");
        assert_eq!(form.shown_color(2), DEFAULT_FORM_COLOR);
        assert_eq!(form.phrases, "um, dois");
        assert_eq!(form.music, "");
    }

    #[test]
    fn edited_mood_may_match_itself() {
        let existing = vec![Mood {
            id: "m1".into(),
            body: MoodBody {
                name: "Feliz".into(),
                ..MoodBody::default()
            },
        }];
        assert!(check_unique("Feliz", &existing, Some("m1")).is_ok());
        assert_eq!(
            check_unique("Feliz", &existing, Some("m2")),
            Err(ValidationError::DuplicateWhileEditing { name: "Feliz".into() })
        );
        assert_eq!(
            check_unique("Feliz", &existing, None),
            Err(ValidationError::DuplicateName { name: "Feliz".into() })
        );
        assert!(check_unique("feliz", &existing, None).is_ok());
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_requests() {
        let store = MemoryStore::new();
        let mut session = SessionState::new();
        let mut view = HtmlView::new();

        let err = submit(&fields("   "), &mut session, &store, &mut view)
            .await
            .unwrap_err();

        assert_eq!(err.validation(), Some(&ValidationError::EmptyName));
        assert_eq!(store.calls(), 0);
        assert_eq!(view.last_notice(), Some("Informe um nome para o humor."));
    }

    #[tokio::test]
    async fn duplicate_create_sends_no_create() {
        let store = MemoryStore::new();
        store.insert("Feliz");
        let mut session = SessionState::new();
        let mut view = HtmlView::new();
        let mut form = fields(" Feliz ");
        form.phrases = "oi".into();
        view.populate_form(&form);

        let err = submit(&form, &mut session, &store, &mut view)
            .await
            .unwrap_err();

        assert!(matches!(
            err.validation(),
            Some(ValidationError::DuplicateName { .. })
        ));
        assert_eq!(store.creates(), 0);
        assert_eq!(view.last_notice(), Some("Esse humor já existe!"));
        assert_eq!(view.form, form);
    }

    #[tokio::test]
    async fn create_trims_name_and_resets_form() {
        let store = MemoryStore::new();
        let mut session = SessionState::new();
        let mut view = HtmlView::new();
        let mut form = fields("  Focado ");
        form.study_tips = "pomodoro, , revisar".into();

        let saved = submit(&form, &mut session, &store, &mut view).await.unwrap();

        assert_eq!(saved.body.name, "Focado");
        assert_eq!(saved.body.study_tips, vec!["pomodoro", "revisar"]);
        assert_eq!(store.creates(), 1);
        assert_eq!(view.form, FormFields::default());
        assert_eq!(session, SessionState::Idle);
    }

    #[tokio::test]
    async fn edit_updates_in_place_and_leaves_edit_mode() {
        let store = MemoryStore::new();
        let id = store.insert("Feliz");
        let mut session = SessionState::Editing(id.clone());
        let mut view = HtmlView::new();
        view.set_form_mode(FormMode::Edit);

        let saved = submit(&fields("Feliz"), &mut session, &store, &mut view)
            .await
            .unwrap();

        assert_eq!(saved.id, id);
        assert_eq!(store.creates(), 0);
        assert_eq!(session, SessionState::Idle);
        assert_eq!(view.form_mode, FormMode::Create);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn editing_deleted_mood_falls_back_to_create() {
        let store = MemoryStore::new();
        let id = store.insert("Feliz");
        let mut session = SessionState::Editing(id.clone());
        let mut view = HtmlView::new();
        view.set_form_mode(FormMode::Edit);
        let mut form = fields("Radiante");
        form.music = "samba".into();
        view.populate_form(&form);
        store.remove(&id);

        let err = submit(&form, &mut session, &store, &mut view)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(session, SessionState::Viewing(id));
        assert_eq!(view.form_mode, FormMode::Create);
        assert_eq!(view.last_notice(), Some(MOOD_GONE_MESSAGE));
        assert_eq!(view.form, form);

        let saved = submit(&form, &mut session, &store, &mut view).await.unwrap();
        assert_eq!(saved.body.name, "Radiante");
        assert_eq!(saved.body.music, vec!["samba"]);
        assert_eq!(store.creates(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_keeps_edit_state() {
        let store = MemoryStore::new();
        let id = store.insert("Feliz");
        store.fail_requests(true);
        let mut session = SessionState::Editing(id.clone());
        let mut view = HtmlView::new();
        let form = fields("Radiante");
        view.populate_form(&form);

        let err = submit(&form, &mut session, &store, &mut view)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { .. }));
        assert_eq!(session, SessionState::Editing(id));
        assert_eq!(view.form, form);
        assert!(view.notices.is_empty());
    }
}
