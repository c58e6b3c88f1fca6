use std::{
    sync::{Arc, Mutex, MutexGuard, OnceLock, RwLock},
    time::Duration,
};

use crossterm::style::Color;
use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    const DEFAULT_DECAY: Duration = Duration::from_secs(5);
    const DEFAULT_MAX_VISIBLE: usize = 5;

    LOGGER.get_or_init(|| AppLogger::new(log::Level::Info, DEFAULT_DECAY, DEFAULT_MAX_VISIBLE))
}

pub fn init() {
    log::set_logger(get_logger()).unwrap();
    log::set_max_level(log::LevelFilter::Trace);
}

pub fn level_color(level: log::Level) -> Color {
    match level {
        log::Level::Error => Color::Red,
        log::Level::Warn => Color::Yellow,
        log::Level::Info => Color::White,
        log::Level::Debug => Color::Blue,
        log::Level::Trace => Color::Grey,
    }
}

#[derive(Clone)]
pub struct Message {
    pub level: log::Level,
    pub pushed: std::time::Instant,
    pub message: String,
    pub source: String,
}

struct Logs {
    logs: [Vec<Message>; 5], // there are 5 levels
}

impl Logs {
    fn push(&mut self, message: Message) {
        self.logs[message.level as usize - 1].insert(0, message);
    }

    fn clear_old(&mut self, decay: Duration) {
        let now = std::time::Instant::now();
        for level in self.logs.iter_mut() {
            level.retain(|msg| now.duration_since(msg.pushed) < decay);
        }
    }
}

pub struct LogsIter<'a> {
    logs: MutexGuard<'a, Logs>,
    level: usize,
    index: usize,
}

impl<'a> Iterator for LogsIter<'a> {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        while self.level < self.logs.logs.len() && self.index >= self.logs.logs[self.level].len() {
            self.level += 1;
            self.index = 0;
        }
        if self.level >= self.logs.logs.len() {
            return None;
        }

        let log = self.logs.logs[self.level][self.index].clone();
        self.index += 1;
        Some(log)
    }
}

pub struct AppLogger {
    pub min_level: Arc<RwLock<log::Level>>,
    pub decay: Duration,
    pub max_visible: usize,
    logs: Arc<Mutex<Logs>>,
}

impl AppLogger {
    fn new(min_level: log::Level, decay: Duration, max_visible: usize) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            decay,
            max_visible,
            logs: Arc::new(Mutex::new(Logs {
                logs: Default::default(),
            })),
        }
    }

    pub fn min_level(&self) -> log::Level {
        *self.min_level.read().unwrap()
    }

    pub fn set_min_level(&self, level: log::Level) {
        *self.min_level.write().unwrap() = level;
    }

    fn borrow_mut_logs(&self) -> MutexGuard<Logs> {
        self.logs
            .lock()
            .expect("thread holding log panicked, cannot use this logger")
    }

    /// Messages younger than the decay window, most severe level first and
    /// newest first within a level.
    pub fn get_logs(&self) -> impl Iterator<Item = Message> + '_ {
        let mut logs = self.borrow_mut_logs();
        logs.clear_old(self.decay);

        LogsIter {
            logs,
            level: 0,
            index: 0,
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.borrow_mut_logs().push(Message {
                level: record.level(),
                pushed: std::time::Instant::now(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            });
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(level: log::Level, text: &str) -> Message {
        Message {
            level,
            pushed: std::time::Instant::now(),
            message: text.to_string(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn severity_outranks_recency() {
        let logs = Mutex::new(Logs {
            logs: Default::default(),
        });
        {
            let mut guard = logs.lock().unwrap();
            guard.push(message(log::Level::Info, "first"));
            guard.push(message(log::Level::Error, "second"));
            guard.push(message(log::Level::Info, "third"));
        }

        let order: Vec<_> = LogsIter {
            logs: logs.lock().unwrap(),
            level: 0,
            index: 0,
        }
        .map(|m| m.message)
        .collect();
        assert_eq!(order, ["second", "third", "first"]);
    }

    #[test]
    fn decay_drops_expired_messages() {
        let mut logs = Logs {
            logs: Default::default(),
        };
        logs.push(message(log::Level::Warn, "short lived"));

        logs.clear_old(Duration::from_secs(60));
        assert_eq!(logs.logs[log::Level::Warn as usize - 1].len(), 1);

        logs.clear_old(Duration::ZERO);
        assert!(logs.logs.iter().all(|level| level.is_empty()));
    }
}
