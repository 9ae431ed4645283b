use crate::models::UsageStat;
use crate::store::MoodStore;
use crate::ui::ViewPort;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use tracing::{debug, error};

pub const NEVER_LABEL: &str = "Nunca";
const SHORT_DATE_TIME: &str = "%d/%m/%Y, %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub name: String,
    pub use_count: u64,
    pub last_access: String,
}

impl StatLine {
    pub fn from_stat<Tz>(stat: &UsageStat, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            name: stat.mood_name.clone(),
            use_count: stat.use_count,
            last_access: format_last_access(stat.last_access(), tz),
        }
    }
}

/// Short day/month/year date and time in `tz`, or [`NEVER_LABEL`].
pub fn format_last_access<Tz>(at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match at {
        Some(at) => at.with_timezone(tz).format(SHORT_DATE_TIME).to_string(),
        None => NEVER_LABEL.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct StatisticsViewModel {
    lines: Vec<StatLine>,
}

impl StatisticsViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[StatLine] {
        &self.lines
    }

    pub fn line(&self, name: &str) -> Option<&StatLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    /// Replaces the displayed statistics. On failure the previous ones stay.
    pub async fn refresh<S: MoodStore, V: ViewPort>(&mut self, store: &S, view: &mut V) {
        match store.list_statistics().await {
            Ok(stats) => {
                self.lines = stats
                    .iter()
                    .map(|stat| StatLine::from_stat(stat, &Local))
                    .collect();
                view.render_statistics(&self.lines);
                debug!(count = self.lines.len(), "statistics refreshed");
            }
            Err(err) => error!("failed to load statistics: {err}"),
        }
    }
}
