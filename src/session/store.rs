use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::GameState;

/// 存储层错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no game state at key `{0}`")]
    NotFound(String),
    #[error("version conflict: expected {expected}, actual {actual}")]
    VersionConflict { expected: u64, actual: u64 },
}

/// 带版本号的状态快照
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

type Subscriber = Arc<dyn Fn(&GameState) + Send + Sync>;

struct Entry {
    state: GameState,
    version: u64,
    subscribers: Vec<Subscriber>,
}

/// 对局状态存储
///
/// 按键存取完整对局状态；每次写入递增版本号，
/// 人机并写通过 `update_if` 的版本比对串行化。
#[derive(Default)]
pub struct SessionStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取状态快照
    pub fn get(&self, key: &str) -> Option<Versioned<GameState>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).map(|entry| Versioned {
            value: entry.state.clone(),
            version: entry.version,
        })
    }

    /// 订阅指定键的每次写入
    pub fn subscribe<F>(&self, key: &str, callback: F)
    where
        F: Fn(&GameState) + Send + Sync + 'static,
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get_mut(key) {
            entry.subscribers.push(Arc::new(callback));
        }
    }

    /// 整体写入（新键从版本 1 起）
    pub fn set(&self, key: &str, state: GameState) -> u64 {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            state: state.clone(),
            version: 0,
            subscribers: Vec::new(),
        });
        entry.state = state;
        entry.version += 1;
        tracing::debug!(key, version = entry.version, "session state replaced");
        Self::notify(entry);
        entry.version
    }

    /// 就地修改（闭包内只改动需要的字段）
    pub fn update<F>(&self, key: &str, mutate: F) -> Result<u64, StoreError>
    where
        F: FnOnce(&mut GameState),
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        mutate(&mut entry.state);
        entry.version += 1;
        tracing::debug!(key, version = entry.version, "session state updated");
        Self::notify(entry);
        Ok(entry.version)
    }

    /// 乐观并发写入：版本号不符即拒绝，调用方须重读重试
    pub fn update_if(
        &self,
        key: &str,
        expected_version: u64,
        state: GameState,
    ) -> Result<u64, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        if entry.version != expected_version {
            tracing::warn!(
                key,
                expected = expected_version,
                actual = entry.version,
                "session write lost the version race"
            );
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: entry.version,
            });
        }
        entry.state = state;
        entry.version += 1;
        Self::notify(entry);
        Ok(entry.version)
    }

    /// 终局清理
    pub fn remove(&self, key: &str) -> Option<GameState> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key).map(|entry| {
            tracing::info!(key, "session state removed");
            entry.state
        })
    }

    fn notify(entry: &Entry) {
        for subscriber in &entry.subscribers {
            subscriber(&entry.state);
        }
    }
}
