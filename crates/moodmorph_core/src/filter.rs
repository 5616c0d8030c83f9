//! crates/moodmorph_core/src/filter.rs
//!
//! The Filter Engine: computes the visible subset of entries for a free-text
//! query and an optional calendar-day constraint.

use serde::Serialize;

use crate::calendar::{CalendarAdapter, Calendars};
use crate::domain::{JournalEntry, Locale};

/// A selected calendar day, only meaningful in the calendar system of `locale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateConstraint {
    pub locale: Locale,
    pub day: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("'{input}' is not a valid day in the {locale:?} calendar")]
pub struct DateInputError {
    pub input: String,
    pub locale: Locale,
}

/// Case-insensitive substring match against the entry's text fields and the
/// localized emotion label. An empty query matches everything.
pub fn matches_query(entry: &JournalEntry, query: &str, locale: Locale) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        entry.action.as_str(),
        entry.reaction.as_str(),
        entry.result.as_str(),
        entry.emotion.label(locale),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Calendar-day equality in the constraint's own calendar system.
pub fn matches_date(
    entry: &JournalEntry,
    date: Option<&DateConstraint>,
    locale: Locale,
    calendar: &dyn CalendarAdapter,
) -> bool {
    match date {
        None => true,
        Some(constraint) if constraint.locale != locale => false,
        Some(constraint) => calendar.day_string(entry.date) == constraint.day,
    }
}

/// Entries matching both the query and the date constraint, in store order.
pub fn filter_entries<'a>(
    entries: &'a [JournalEntry],
    query: &str,
    date: Option<&DateConstraint>,
    locale: Locale,
    calendar: &dyn CalendarAdapter,
) -> Vec<&'a JournalEntry> {
    entries
        .iter()
        .filter(|e| matches_query(e, query, locale) && matches_date(e, date, locale, calendar))
        .collect()
}

/// Display order of the journal list: most recent `date` first.
pub fn sort_newest_first(entries: &mut [&JournalEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

//=========================================================================================
// FilterState
//=========================================================================================

/// The active view over the journal: locale, search text and selected day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub locale: Locale,
    pub query: String,
    pub date: Option<DateConstraint>,
}

impl FilterState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Switches locale. A day selected in the previous calendar is dropped.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.date = None;
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Selects a day, normalized through the active locale's calendar.
    pub fn set_date(&mut self, input: &str, calendars: &Calendars) -> Result<(), DateInputError> {
        let day = calendars
            .for_locale(self.locale)
            .parse_day(input)
            .ok_or_else(|| DateInputError {
                input: input.to_string(),
                locale: self.locale,
            })?;
        self.date = Some(DateConstraint {
            locale: self.locale,
            day,
        });
        Ok(())
    }

    pub fn clear_date(&mut self) {
        self.date = None;
    }

    pub fn apply<'a>(&self, entries: &'a [JournalEntry], calendars: &Calendars) -> Vec<&'a JournalEntry> {
        filter_entries(
            entries,
            &self.query,
            self.date.as_ref(),
            self.locale,
            calendars.for_locale(self.locale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Emotion;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, day: u32, emotion: Emotion, action: &str) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
            action: action.to_string(),
            emotion,
            reaction: "Closed the laptop".to_string(),
            result: "Felt calmer".to_string(),
            intensity: 5,
        }
    }

    fn sample() -> Vec<JournalEntry> {
        vec![
            entry("a", 1, Emotion::Angry, "Traffic jam"),
            entry("b", 2, Emotion::Happy, "Lunch with Sara"),
            entry("c", 2, Emotion::Sad, "Rainy day"),
        ]
    }

    fn ids(entries: &[&JournalEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn no_query_and_no_date_is_identity() {
        let entries = sample();
        let state = FilterState::new(Locale::En);
        let visible = state.apply(&entries, &Calendars::default());
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
    }

    #[test]
    fn query_is_case_insensitive_over_text_fields() {
        let entries = sample();
        let cal = Calendars::default();
        let hit = filter_entries(&entries, "TRAFFIC", None, Locale::En, cal.for_locale(Locale::En));
        assert_eq!(ids(&hit), vec!["a"]);

        let hit = filter_entries(&entries, "calmer", None, Locale::En, cal.for_locale(Locale::En));
        assert_eq!(hit.len(), 3);
    }

    #[test]
    fn query_matches_localized_label_not_key() {
        let entries = sample();
        let cal = Calendars::default();
        let fa = filter_entries(&entries, "خوشحال", None, Locale::Fa, cal.for_locale(Locale::Fa));
        assert_eq!(ids(&fa), vec!["b"]);

        let key_in_fa = filter_entries(&entries, "happy", None, Locale::Fa, cal.for_locale(Locale::Fa));
        assert!(key_in_fa.is_empty());

        let en = filter_entries(&entries, "happy", None, Locale::En, cal.for_locale(Locale::En));
        assert_eq!(ids(&en), vec!["b"]);
    }

    #[test]
    fn date_constraint_and_query_combine() {
        let entries = sample();
        let calendars = Calendars::default();
        let mut state = FilterState::new(Locale::En);
        state.set_date("2024-05-02", &calendars).unwrap();
        assert_eq!(ids(&state.apply(&entries, &calendars)), vec!["b", "c"]);

        state.set_query("rain");
        assert_eq!(ids(&state.apply(&entries, &calendars)), vec!["c"]);
    }

    #[test]
    fn persian_date_constraint_uses_jalali_days() {
        let entries = sample();
        let calendars = Calendars::default();
        let mut state = FilterState::new(Locale::Fa);
        // 2024-05-01 is 1403/02/12.
        state.set_date("1403/02/12", &calendars).unwrap();
        assert_eq!(ids(&state.apply(&entries, &calendars)), vec!["a"]);
    }

    #[test]
    fn changing_locale_resets_date_constraint() {
        let calendars = Calendars::default();
        let mut state = FilterState::new(Locale::En);
        state.set_query("x");
        state.set_date("2024-05-02", &calendars).unwrap();

        state.set_locale(Locale::En);
        assert!(state.date.is_some());

        state.set_locale(Locale::Fa);
        assert_eq!(state.date, None);
        assert_eq!(state.query, "x");
    }

    #[test]
    fn constraint_from_another_calendar_never_matches() {
        let entries = sample();
        let calendars = Calendars::default();
        let foreign = DateConstraint {
            locale: Locale::En,
            day: "2024-05-01".to_string(),
        };
        let visible = filter_entries(
            &entries,
            "",
            Some(&foreign),
            Locale::Fa,
            calendars.for_locale(Locale::Fa),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn invalid_day_is_rejected_without_touching_state() {
        let calendars = Calendars::default();
        let mut state = FilterState::new(Locale::En);
        let err = state.set_date("2024-13-40", &calendars).unwrap_err();
        assert_eq!(err.locale, Locale::En);
        assert_eq!(state.date, None);
    }

    #[test]
    fn sort_newest_first_orders_by_date() {
        let entries = sample();
        let mut refs: Vec<&JournalEntry> = entries.iter().collect();
        sort_newest_first(&mut refs);
        assert_eq!(ids(&refs), vec!["b", "c", "a"]);
    }
}
