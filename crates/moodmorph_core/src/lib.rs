pub mod aggregate;
pub mod calendar;
pub mod codec;
pub mod domain;
pub mod filter;
pub mod i18n;
pub mod insight;
pub mod ports;
pub mod store;

pub use aggregate::{daily_summary, frequency_by_emotion, timeline, DailyMood, EmotionFrequency, TimeRange, TimelinePoint};
pub use calendar::{CalendarAdapter, Calendars, GregorianCalendar, PersianCalendar};
pub use codec::{export_file_name, export_json, parse_import, ImportError};
pub use domain::{Emotion, InsightResponse, JournalEntry, Locale, NewEntry};
pub use filter::{filter_entries, sort_newest_first, DateConstraint, DateInputError, FilterState};
pub use i18n::Message;
pub use insight::analyze;
pub use ports::{InsightService, KeyValueStorage, PortError, PortResult};
pub use store::{EntryStore, STORAGE_KEY};
