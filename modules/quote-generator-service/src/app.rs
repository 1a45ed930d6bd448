//! Application state: the quote store plus its persistence, and the
//! user-facing operations that mutate or read them.

use crate::error::QuoteError;
use crate::persistence::Persistence;
use crate::render::render_quote;
use crate::selector::{pick_random, pick_random_in_category};
use crate::store::QuoteStore;
use crate::sync::merge_quotes;
use crate::transfer;
use quote_generator_types::{
    ALL_CATEGORIES, CategoryFilter, CategoryOptions, ImportReport, Quote, QuoteView,
};

pub struct QuoteApp {
    store: QuoteStore,
    persistence: Persistence,
}

impl QuoteApp {
    /// Loads persisted quotes, falling back to the built-in seed.
    pub fn init(persistence: Persistence) -> Self {
        let store = match persistence.load() {
            Some(quotes) => {
                log::info!("Loaded {} quotes from storage", quotes.len());
                QuoteStore::new(quotes)
            }
            None => {
                log::info!("No stored quotes found, using built-in seed");
                QuoteStore::seeded()
            }
        };
        Self { store, persistence }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let quote = Quote::new(text.trim(), category.trim());
        self.store.append(quote.clone())?;
        self.persistence.save(self.store.as_slice());
        Ok(quote)
    }

    /// Random quote from the whole store; remembers its index for the session.
    pub fn show_random(&self) -> Result<QuoteView, QuoteError> {
        let (index, quote) = pick_random(self.store.iter())?;
        self.persistence.save_last_index(index);
        Ok(render_quote(quote))
    }

    pub fn filter_quotes(&self, filter: &CategoryFilter) -> Result<QuoteView, QuoteError> {
        self.persistence.save_filter(filter);
        match filter {
            CategoryFilter::All => self.show_random(),
            CategoryFilter::Category(category) => {
                pick_random_in_category(&self.store, category).map(render_quote)
            }
        }
    }

    /// The persisted filter, or `All` when it names a category no longer present.
    pub fn selected_filter(&self) -> CategoryFilter {
        match self.persistence.load_filter() {
            Some(CategoryFilter::Category(c)) if self.store.has_category(&c) => {
                CategoryFilter::Category(c)
            }
            _ => CategoryFilter::All,
        }
    }

    pub fn category_options(&self) -> CategoryOptions {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.store.categories());
        CategoryOptions {
            options,
            selected: self.selected_filter(),
        }
    }

    pub fn last_viewed(&self) -> Option<QuoteView> {
        let index = self.persistence.load_last_index(self.store.len())?;
        self.store.get(index).map(render_quote)
    }

    pub fn import_document(&mut self, raw: &str) -> Result<ImportReport, QuoteError> {
        let report = transfer::import_document(&mut self.store, raw)?;
        if report.accepted > 0 {
            self.persistence.save(self.store.as_slice());
        }
        Ok(report)
    }

    pub fn export_document(&self) -> Result<String, QuoteError> {
        transfer::export_document(self.store.as_slice())
    }

    /// Merges a remote batch into the store. Returns `true` when the store
    /// changed and was persisted.
    pub fn apply_remote(&mut self, remote: Vec<Quote>) -> bool {
        let merged = merge_quotes(self.store.as_slice(), remote);
        if !differs(&merged, self.store.as_slice()) {
            return false;
        }
        self.store.replace_all(merged);
        self.persistence.save(self.store.as_slice());
        true
    }
}

/// Order- and field-sensitive comparison of two quote sequences, done on
/// their serialized form.
fn differs(a: &[Quote], b: &[Quote]) -> bool {
    match (serde_json::to_string(a), serde_json::to_string(b)) {
        (Ok(a), Ok(b)) => a != b,
        _ => a != b,
    }
}
