//! crates/moodmorph_core/src/i18n.rs
//!
//! Localized strings produced by the core (insight text and import notices).

use crate::domain::Locale;

/// A user-facing message, rendered per locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    NoDataSummary,
    NoDataAdvice,
    TopEmotionPattern(&'a str),
    HighIntensityPattern,
    Summary(&'a str),
    MixedEmotions,
    Advice,
    DataImported(usize),
    ImportNoNew,
    InvalidData,
    InvalidDate,
}

impl Message<'_> {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.render_en(),
            Locale::Fa => self.render_fa(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Message::NoDataSummary => "No entries to analyze yet.".to_string(),
            Message::NoDataAdvice => "Start logging your emotions to get insights.".to_string(),
            Message::TopEmotionPattern(label) => format!("Most frequent emotion: {}", label),
            Message::HighIntensityPattern => {
                "Several high intensity emotional events detected.".to_string()
            }
            Message::Summary(label) => format!("Recently you mostly felt {}.", label),
            Message::MixedEmotions => "mixed emotions".to_string(),
            Message::Advice => {
                "Pause before reacting, identify repeating triggers, and practice reflection."
                    .to_string()
            }
            Message::DataImported(count) => format!("{} entries imported successfully.", count),
            Message::ImportNoNew => "No new entries found in the file.".to_string(),
            Message::InvalidData => "The file does not contain valid journal data.".to_string(),
            Message::InvalidDate => "The selected date is not valid.".to_string(),
        }
    }

    fn render_fa(&self) -> String {
        match self {
            Message::NoDataSummary => "هنوز هیچ موردی برای تحلیل وجود ندارد.".to_string(),
            Message::NoDataAdvice => "برای دریافت بینش، احساسات خود را ثبت کنید.".to_string(),
            Message::TopEmotionPattern(label) => format!("احساس غالب شما: {}", label),
            Message::HighIntensityPattern => {
                "چند رویداد با شدت احساسی بالا ثبت شده است.".to_string()
            }
            Message::Summary(label) => format!("در این مدت بیشتر احساس {} داشته‌اید.", label),
            Message::MixedEmotions => "متغیر".to_string(),
            Message::Advice => {
                "قبل از واکنش، چند نفس عمیق بکشید و محرک‌های تکراری را شناسایی کنید.".to_string()
            }
            Message::DataImported(count) => format!("{} مورد با موفقیت وارد شد.", count),
            Message::ImportNoNew => "مورد جدیدی در فایل یافت نشد.".to_string(),
            Message::InvalidData => "فایل حاوی داده‌های معتبر نیست.".to_string(),
            Message::InvalidDate => "تاریخ انتخاب‌شده معتبر نیست.".to_string(),
        }
    }
}
