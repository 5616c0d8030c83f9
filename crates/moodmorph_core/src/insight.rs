//! crates/moodmorph_core/src/insight.rs
//!
//! The Local Insight Generator: a deterministic summary of the most recently
//! added entries.

use crate::domain::{Emotion, InsightResponse, JournalEntry, Locale};
use crate::i18n::Message;

/// Number of most recently added entries considered.
pub const INSIGHT_WINDOW: usize = 20;

/// Intensity at or above which an entry counts as a high-intensity event.
pub const HIGH_INTENSITY: u8 = 7;

/// Summarizes the first `INSIGHT_WINDOW` entries in store order.
///
/// Store order is insertion order, so the window holds the most recently
/// added entries regardless of their `date`.
pub fn analyze(entries: &[JournalEntry], locale: Locale) -> InsightResponse {
    if entries.is_empty() {
        return InsightResponse {
            summary: Message::NoDataSummary.render(locale),
            patterns: Vec::new(),
            advice: Message::NoDataAdvice.render(locale),
        };
    }

    let window = &entries[..entries.len().min(INSIGHT_WINDOW)];
    let top = top_emotion(window);
    let high_intensity = window.iter().any(|e| e.intensity >= HIGH_INTENSITY);

    let mut patterns = Vec::new();
    if let Some(emotion) = top {
        patterns.push(Message::TopEmotionPattern(emotion.label(locale)).render(locale));
    }
    if high_intensity {
        patterns.push(Message::HighIntensityPattern.render(locale));
    }

    let mixed = Message::MixedEmotions.render(locale);
    let label = top.map(|e| e.label(locale)).unwrap_or(mixed.as_str());

    InsightResponse {
        summary: Message::Summary(label).render(locale),
        patterns,
        advice: Message::Advice.render(locale),
    }
}

/// Most frequent emotion; ties go to the one counted first.
pub fn top_emotion(window: &[JournalEntry]) -> Option<Emotion> {
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for entry in window {
        match counts.iter_mut().find(|(emotion, _)| *emotion == entry.emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.emotion, 1)),
        }
    }

    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((emotion, count));
        }
    }
    best.map(|(emotion, _)| emotion)
}
