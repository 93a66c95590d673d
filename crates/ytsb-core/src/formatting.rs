//! Telegram HTML rendering for search outcomes and the bot's fixed replies.

use crate::{
    domain::VideoResult, intent::DEFAULT_TRIGGER_WORD,
    messaging::types::MessagingCapabilities, search::SearchOutcome,
};

/// Titles longer than this are cut and suffixed with [`ELLIPSIS`].
pub const MAX_TITLE_CHARS: usize = 50;
/// Channel names get the same treatment.
pub const MAX_CHANNEL_CHARS: usize = 50;
/// Echoed queries are capped so the reply stays within Telegram's limit.
pub const MAX_QUERY_ECHO_CHARS: usize = 100;

pub const ELLIPSIS: &str = "...";
pub const UNKNOWN_DURATION: &str = "غير معروف";
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Cut `s` to at most `max_chars` characters, the last three being `...`.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

pub fn truncate_title(title: &str) -> String {
    truncate_chars(title, MAX_TITLE_CHARS)
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_BASE}{video_id}")
}

/// Renders every user-visible message.
///
/// Holds the trigger word so hints always name the word the classifier
/// actually listens for.
#[derive(Clone, Debug)]
pub struct Formatter {
    trigger: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_WORD)
    }
}

impl Formatter {
    pub fn new(trigger: &str) -> Self {
        Self {
            trigger: escape_html(trigger),
        }
    }

    /// Render a search outcome. Error detail never reaches the user.
    pub fn format_outcome(&self, outcome: &SearchOutcome, query: &str) -> String {
        match outcome {
            SearchOutcome::Found(results) => self.results(results, query),
            SearchOutcome::Empty => self.no_results(query),
            SearchOutcome::ProviderFailure(_) => self.search_failed(),
        }
    }

    /// Like [`Formatter::format_outcome`], but drops trailing results until
    /// the message fits `caps`. At least one result is always kept.
    pub fn format_outcome_within(
        &self,
        outcome: &SearchOutcome,
        query: &str,
        caps: &MessagingCapabilities,
    ) -> String {
        let SearchOutcome::Found(results) = outcome else {
            return self.format_outcome(outcome, query);
        };

        let mut shown = results.len();
        loop {
            let html = self.results(&results[..shown], query);
            if shown <= 1 || caps.fits(&html) {
                return html;
            }
            shown -= 1;
        }
    }

    pub fn searching(&self, query: &str) -> String {
        format!(
            "🔍 <b>جاري البحث عن:</b> <code>{}</code>\n\n⏳ يرجى الانتظار...",
            echo_query(query)
        )
    }

    fn results(&self, results: &[VideoResult], query: &str) -> String {
        let mut out = format!(
            "🎵 <b>نتائج البحث لـ:</b> <code>{}</code>\n\n",
            echo_query(query)
        );

        for (i, video) in results.iter().enumerate() {
            let duration = video.duration.as_deref().unwrap_or(UNKNOWN_DURATION);
            out.push_str(&format!(
                "<b>{}. {}</b>\n   ⏱️ {} | 📺 {}\n   🔗 {}\n\n",
                i + 1,
                escape_html(&truncate_title(&video.title)),
                escape_html(duration),
                escape_html(&truncate_chars(&video.channel, MAX_CHANNEL_CHARS)),
                escape_html(&watch_url(&video.id)),
            ));
        }

        out.push_str(&format!(
            "💡 <b>للبحث مجددًا:</b> اكتب <code>{}</code> واسم الأغنية",
            self.trigger
        ));
        out
    }

    fn no_results(&self, query: &str) -> String {
        format!(
            "❌ <b>لم أجد نتائج لـ:</b> <code>{}</code>\n\n\
💡 <b>جرب:</b>\n\
• اسمًا آخر\n\
• أضف اسم المطرب\n\
• كلمات مختلفة",
            echo_query(query)
        )
    }

    fn search_failed(&self) -> String {
        "❌ <b>حدث خطأ أثناء البحث</b>\n\n\
💡 <b>حاول:</b>\n\
1. مرة أخرى بعد قليل\n\
2. بحثًا مختلفًا"
            .to_string()
    }

    pub fn welcome(&self, first_name: &str) -> String {
        let t = &self.trigger;
        format!(
            "🎵 <b>مرحبًا {}!</b>\n\n\
أنا بوت للبحث عن الأغاني والمقاطع في اليوتيوب 🎶\n\n\
🔍 <b>كيفية الاستخدام:</b>\n\
اكتب <b>{t}</b> متبوعة باسم الأغنية\n\n\
📝 <b>أمثلة:</b>\n\
• {t} أغنية حبيبي\n\
• {t} عبدالمجيد عبدالله\n\
• {t} طلعوا الصحاب\n\n\
استخدم /help للمساعدة",
            escape_html(first_name)
        )
    }

    pub fn help(&self) -> String {
        let t = &self.trigger;
        format!(
            "🎵 <b>كيفية استخدام البوت:</b>\n\n\
<b>الطريقة 1:</b> اكتب <code>{t}</code> ثم اسم الأغنية\n\
مثال: <code>{t} أغنية حبيبي</code>\n\n\
<b>الطريقة 2:</b> استخدم الأمر /search ثم اسم الأغنية\n\
مثال: <code>/search أغنية حبيبي</code>\n\n\
🎮 <b>الأوامر المتاحة:</b>\n\
/start - بدء البوت\n\
/help - هذه الرسالة\n\
/search - بحث مباشر\n\n\
🚀 <b>جرب الآن:</b> اكتب <code>{t}</code> وأي أغنية تريدها!"
        )
    }

    pub fn search_usage(&self) -> String {
        "⚠️ الرجاء كتابة اسم الأغنية بعد الأمر /search\n\
مثال: <code>/search أغنية حبيبي</code>"
            .to_string()
    }

    /// Reply to a bare trigger word.
    pub fn clarify(&self) -> String {
        let t = &self.trigger;
        format!(
            "🎵 <b>اكتب اسم الأغنية بعد '{t}'</b>\n\n\
مثال:\n\
• <code>{t} أغنية حبيبي</code>\n\
• <code>{t} عبدالمجيد عبدالله</code>"
        )
    }

    pub fn plain_text_hint(&self) -> String {
        let t = &self.trigger;
        format!(
            "🎶 <b>للبحث عن أغنية:</b>\n\n\
اكتب <code>{t}</code> متبوعة باسم الأغنية\n\n\
<b>مثال:</b>\n\
<code>{t} أغنية حبيبي</code>\n\
<code>{t} طلعوا الصحاب</code>\n\n\
استخدم /help للمساعدة"
        )
    }

    pub fn generic_error(&self) -> String {
        "⚠️ حدث خطأ. الرجاء المحاولة مرة أخرى.".to_string()
    }
}

fn echo_query(query: &str) -> String {
    escape_html(&truncate_chars(query, MAX_QUERY_ECHO_CHARS))
}
