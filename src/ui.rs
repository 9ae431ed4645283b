use crate::catalog::CatalogCard;
use crate::detail::DetailView;
use crate::form::{FormFields, FormMode};
use crate::stats::StatLine;

pub trait ViewPort {
    fn render_catalog(&mut self, cards: &[CatalogCard]);
    fn render_detail(&mut self, detail: &DetailView);
    fn render_statistics(&mut self, lines: &[StatLine]);
    fn set_detail_visible(&mut self, visible: bool);
    fn populate_form(&mut self, fields: &FormFields);
    fn set_form_mode(&mut self, mode: FormMode);
    /// Focuses the name field and scrolls the form into view.
    fn focus_form(&mut self);
    /// Blocking acknowledgement shown to the user.
    fn notify(&mut self, message: &str);
    /// Blocking yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct HtmlView {
    pub catalog_html: String,
    pub detail_html: String,
    pub stats_html: String,
    pub detail_visible: bool,
    pub form: FormFields,
    pub form_mode: FormMode,
    pub form_focused: bool,
    pub notices: Vec<String>,
    pub questions: Vec<String>,
    confirm_answer: bool,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every confirmation with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            ..Self::default()
        }
    }

    pub fn set_confirm_answer(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    pub fn form_heading(&self) -> &'static str {
        self.form_mode.heading()
    }

    pub fn submit_label(&self) -> &'static str {
        self.form_mode.submit_label()
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl ViewPort for HtmlView {
    fn render_catalog(&mut self, cards: &[CatalogCard]) {
        self.catalog_html = cards.iter().map(render_card).collect();
    }

    fn render_detail(&mut self, detail: &DetailView) {
        self.detail_html = render_detail(detail);
    }

    fn render_statistics(&mut self, lines: &[StatLine]) {
        self.stats_html = lines.iter().map(render_stat).collect();
    }

    fn set_detail_visible(&mut self, visible: bool) {
        self.detail_visible = visible;
    }

    fn populate_form(&mut self, fields: &FormFields) {
        self.form = fields.clone();
        self.form_focused = false;
    }

    fn set_form_mode(&mut self, mode: FormMode) {
        self.form_mode = mode;
    }

    fn focus_form(&mut self) {
        self.form_focused = true;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.confirm_answer
    }
}

pub fn render_card(card: &CatalogCard) -> String {
    CARD_HTML
        .replace("{{ID}}", &card.id)
        .replace("{{COLOR}}", &card.background)
        .replace("{{NAME}}", &card.label)
}

pub fn render_detail(detail: &DetailView) -> String {
    let swatches: String = detail
        .swatches
        .iter()
        .map(|color| SWATCH_HTML.replace("{{COLOR}}", color))
        .collect();
    let sections: String = detail
        .sections
        .iter()
        .map(|section| {
            let items: String = section
                .items
                .iter()
                .map(|item| format!("<li>{item}</li>"))
                .collect();
            SECTION_HTML
                .replace("{{TITLE}}", section.title)
                .replace("{{ITEMS}}", &items)
        })
        .collect();

    DETAIL_HTML
        .replace("{{TITLE}}", &detail.title)
        .replace("{{SWATCHES}}", &swatches)
        .replace("{{SECTIONS}}", &sections)
}

pub fn render_stat(line: &StatLine) -> String {
    STAT_HTML
        .replace("{{NAME}}", &line.name)
        .replace("{{USES}}", &line.use_count.to_string())
        .replace("{{LAST}}", &line.last_access)
}

const CARD_HTML: &str = r#"<div class="card" data-id="{{ID}}" style="background: {{COLOR}}">{{NAME}}</div>"#;

const SWATCH_HTML: &str = r#"<div class="swatch" style="background: {{COLOR}}"></div>"#;

const SECTION_HTML: &str = r#"<section><h3>{{TITLE}}</h3><ul>{{ITEMS}}</ul></section>"#;

const DETAIL_HTML: &str = r#"<h2 id="humor-title">{{TITLE}}</h2>
<div id="cores">{{SWATCHES}}</div>
{{SECTIONS}}"#;

const STAT_HTML: &str = r#"<div class="stat-card"><strong>{{NAME}}</strong><br>Uso: {{USES}}<br>Última consulta: {{LAST}}</div>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::DetailSection;

    #[test]
    fn card_uses_background_and_label() {
        let html = render_card(&CatalogCard {
            id: "m1".into(),
            label: "Feliz".into(),
            background: "#ffcc00".into(),
        });
        assert!(html.contains(r#"data-id="m1""#));
        assert!(html.contains("background: #ffcc00"));
        assert!(html.contains(">Feliz<"));
    }

    #[test]
    fn detail_lists_each_item() {
        let html = render_detail(&DetailView {
            title: "Calmo".into(),
            swatches: vec!["#111".into(), "#222".into()],
            sections: vec![DetailSection {
                title: "Frases",
                items: vec!["respira".into(), "ok".into()],
            }],
        });
        assert!(html.contains("Calmo"));
        assert_eq!(html.matches("class=\"swatch\"").count(), 2);
        assert!(html.contains("<h3>Frases</h3><ul><li>respira</li><li>ok</li></ul>"));
    }

    #[test]
    fn confirm_records_question() {
        let mut view = HtmlView::answering(false);
        assert!(!view.confirm("sure?"));
        view.set_confirm_answer(true);
        assert!(view.confirm("really?"));
        assert_eq!(view.questions, vec!["sure?", "really?"]);
    }
}
