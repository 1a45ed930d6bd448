//! In-memory ordered quote store.

use crate::error::QuoteError;
use quote_generator_types::Quote;
use serde_json::Value;

/// Built-in quotes used whenever nothing usable is persisted.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The journey of a thousand miles begins with one step.",
            "Motivation",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new("Imagination is more important than knowledge.", "Creativity"),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn seeded() -> Self {
        Self::new(seed_quotes())
    }

    /// Appends a quote whose fields are non-empty after trimming.
    /// Duplicates are allowed here; callers that need de-duplication check
    /// [`QuoteStore::contains`] first.
    pub fn append(&mut self, quote: Quote) -> Result<(), QuoteError> {
        if quote.text.trim().is_empty() || quote.category.trim().is_empty() {
            return Err(QuoteError::Validation("Both fields required.".to_string()));
        }
        self.quotes.push(quote);
        Ok(())
    }

    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    pub fn by_category<'a, 'c>(
        &'a self,
        category: &'c str,
    ) -> impl Iterator<Item = &'a Quote> + Clone + use<'a, 'c> {
        self.quotes.iter().filter(move |q| q.category == category)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for q in &self.quotes {
            if !seen.iter().any(|c| c == &q.category) {
                seen.push(q.category.clone());
            }
        }
        seen
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.quotes.iter().any(|q| q.category == category)
    }

    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.iter().any(|q| q == quote)
    }

    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Reads a quote out of loosely-typed JSON. Both fields must be strings.
pub fn quote_from_value(value: &Value) -> Option<Quote> {
    let text = value.get("text")?.as_str()?;
    let category = value.get("category")?.as_str()?;
    Some(Quote::new(text, category))
}
