use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything about a mood except its identity. This is also the create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MoodBody {
    #[serde(rename = "humor")]
    pub name: String,
    #[serde(rename = "cores", default)]
    pub colors: Vec<String>,
    #[serde(rename = "frases", default)]
    pub phrases: Vec<String>,
    #[serde(rename = "dicas_estudo", default)]
    pub study_tips: Vec<String>,
    #[serde(rename = "musicas", default)]
    pub music: Vec<String>,
    #[serde(default)]
    pub snacks: Vec<String>,
    #[serde(default)]
    pub emojis: Vec<String>,
    #[serde(rename = "metas_rapidas", default)]
    pub quick_goals: Vec<String>,
    #[serde(rename = "descanso", default)]
    pub rest_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mood {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub body: MoodBody,
}

/// The slice of a mood the catalog needs. Extra fields on the wire are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "humor")]
    pub name: String,
    #[serde(rename = "cores", default)]
    pub colors: Vec<String>,
}

impl From<&Mood> for MoodSummary {
    fn from(mood: &Mood) -> Self {
        Self {
            id: mood.id.clone(),
            name: mood.body.name.clone(),
            colors: mood.body.colors.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageStat {
    #[serde(rename = "humorId", default, skip_serializing_if = "Option::is_none")]
    pub mood_id: Option<String>,
    #[serde(rename = "humor")]
    pub mood_name: String,
    #[serde(rename = "uso")]
    pub use_count: u64,
    #[serde(rename = "ultimaConsultas", default)]
    pub recent_access: Vec<DateTime<Utc>>,
}

impl UsageStat {
    pub fn last_access(&self) -> Option<DateTime<Utc>> {
        self.recent_access.last().copied()
    }
}

#[derive(Debug, Deserialize)]
pub struct NameFilter {
    #[serde(rename = "humor", default)]
    pub name: String,
}

/// On-disk state of the reference store. Stats are keyed by mood id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default)]
    pub moods: Vec<Mood>,
    #[serde(default)]
    pub stats: BTreeMap<String, UsageStat>,
}

impl StoreData {
    pub fn find(&self, id: &str) -> Option<&Mood> {
        self.moods.iter().find(|mood| mood.id == id)
    }

    pub fn name_taken(&self, name: &str, except_id: Option<&str>) -> bool {
        self.moods
            .iter()
            .any(|mood| mood.body.name == name && Some(mood.id.as_str()) != except_id)
    }

    pub fn record_view(&mut self, id: &str, at: DateTime<Utc>) -> Option<UsageStat> {
        let name = self.find(id)?.body.name.clone();
        let entry = self.stats.entry(id.to_string()).or_insert_with(|| UsageStat {
            mood_id: Some(id.to_string()),
            mood_name: name.clone(),
            use_count: 0,
            recent_access: Vec::new(),
        });
        entry.mood_name = name;
        entry.use_count = entry.use_count.saturating_add(1);
        entry.recent_access.push(at);
        Some(entry.clone())
    }
}
