use reminder_notifier::schedule::AlertRecord;

/// Builder for creating test alert records with sensible defaults
pub struct AlertRecordBuilder {
    key: String,
    todo_id: String,
    title: String,
    body: String,
    alert_time: i64,
    fired: bool,
}

impl AlertRecordBuilder {
    pub fn new() -> Self {
        Self {
            key: "test-alert".to_string(),
            todo_id: "test-todo".to_string(),
            title: "Test Alert".to_string(),
            body: String::new(),
            alert_time: 0,
            fired: false,
        }
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn todo_id(mut self, todo_id: &str) -> Self {
        self.todo_id = todo_id.to_string();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Absolute target time in epoch milliseconds
    pub fn at(mut self, alert_time: i64) -> Self {
        self.alert_time = alert_time;
        self
    }

    /// Target time relative to a base instant
    pub fn offset_from(mut self, base_ms: i64, offset_ms: i64) -> Self {
        self.alert_time = base_ms + offset_ms;
        self
    }

    pub fn fired(mut self, fired: bool) -> Self {
        self.fired = fired;
        self
    }

    pub fn build(self) -> AlertRecord {
        let mut record = AlertRecord::new(self.key, self.todo_id, self.title, self.alert_time)
            .with_body(self.body);
        record.fired = self.fired;
        record
    }
}

impl Default for AlertRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
