use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn style(self) -> &'static str {
        match self {
            NoticeLevel::Info => "background: #eef4ff; border: 1px solid #9ab;",
            NoticeLevel::Warning => "background: #fff6e0; border: 1px solid #dba;",
            NoticeLevel::Error => "background: #fdecec; border: 1px solid #d88;",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Local>,
}

/// Transient, non-blocking notifications that expire after `ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
    ttl: Duration,
    next_id: u64,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
            next_id: 0,
        }
    }

    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Local>) {
        self.prune(now);
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            level,
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(level, message, Local::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn prune(&mut self, now: DateTime<Local>) {
        let ttl = self.ttl;
        self.items.retain(|notice| now - notice.raised_at < ttl);
    }

    /// Time until the oldest live notice expires.
    pub fn next_expiry(&self, now: DateTime<Local>) -> Option<std::time::Duration> {
        self.items
            .iter()
            .map(|notice| notice.raised_at + self.ttl - now)
            .filter(|left| *left > Duration::zero())
            .min()
            .and_then(|left| left.to_std().ok())
    }

    pub fn active(&self, now: DateTime<Local>) -> Vec<Notice> {
        self.items
            .iter()
            .filter(|notice| now - notice.raised_at < self.ttl)
            .cloned()
            .collect()
    }
}
