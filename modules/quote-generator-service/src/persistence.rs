//! Persistence adapter: quotes and filter in the durable slot, last-shown
//! index in the session slot. Writes never fail towards the caller.

use crate::db::{Db, Slot};
use crate::store::quote_from_value;
use quote_generator_types::{CategoryFilter, Quote};
use std::sync::Arc;

pub const STORAGE_KEY: &str = "dynamicQuoteGenerator_quotes_v1";
pub const STORAGE_FILTER_KEY: &str = "dynamicQuoteGenerator_lastFilter_v1";
pub const SESSION_LAST_INDEX: &str = "dynamicQuoteGenerator_lastIndex_v1";

#[derive(Clone)]
pub struct Persistence {
    db: Arc<Db>,
}

impl Persistence {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn save(&self, quotes: &[Quote]) {
        let json = match serde_json::to_string(quotes) {
            Ok(j) => j,
            Err(e) => {
                log::error!("Failed to serialize quotes: {}", e);
                return;
            }
        };
        if let Err(e) = self.db.set(Slot::Durable, STORAGE_KEY, &json) {
            log::error!("Failed to save quotes: {}", e);
        }
    }

    /// Returns `None` when nothing usable is stored; the caller seeds instead.
    pub fn load(&self) -> Option<Vec<Quote>> {
        let raw = match self.db.get(Slot::Durable, STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to load quotes: {}", e);
                return None;
            }
        };

        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Stored quotes are not valid JSON: {}", e);
                return None;
            }
        };
        let entries = parsed.as_array()?;

        let quotes: Vec<Quote> = entries.iter().filter_map(quote_from_value).collect();
        if quotes.len() < entries.len() {
            log::warn!(
                "Dropped {} malformed stored quote(s)",
                entries.len() - quotes.len()
            );
        }

        if quotes.is_empty() {
            None
        } else {
            Some(quotes)
        }
    }

    pub fn save_filter(&self, filter: &CategoryFilter) {
        if let Err(e) = self.db.set(Slot::Durable, STORAGE_FILTER_KEY, filter.as_str()) {
            log::error!("Failed to save filter: {}", e);
        }
    }

    /// Raw persisted filter. Callers must check that the category still exists.
    pub fn load_filter(&self) -> Option<CategoryFilter> {
        match self.db.get(Slot::Durable, STORAGE_FILTER_KEY) {
            Ok(value) => value.map(CategoryFilter::from),
            Err(e) => {
                log::error!("Failed to load filter: {}", e);
                None
            }
        }
    }

    pub fn save_last_index(&self, index: usize) {
        if let Err(e) = self
            .db
            .set(Slot::Session, SESSION_LAST_INDEX, &index.to_string())
        {
            log::error!("Failed to save last index: {}", e);
        }
    }

    /// Only returns an index that is in bounds for a store of `store_len`.
    pub fn load_last_index(&self, store_len: usize) -> Option<usize> {
        let raw = match self.db.get(Slot::Session, SESSION_LAST_INDEX) {
            Ok(value) => value?,
            Err(e) => {
                log::error!("Failed to load last index: {}", e);
                return None;
            }
        };
        raw.trim()
            .parse::<usize>()
            .ok()
            .filter(|i| *i < store_len)
    }

    #[cfg(test)]
    pub fn db(&self) -> &Db {
        &self.db
    }
}
