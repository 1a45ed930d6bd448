//! Uniform random selection over quote sequences.

use crate::error::QuoteError;
use crate::store::QuoteStore;
use quote_generator_types::Quote;
use rand::Rng;

/// Picks one quote uniformly. Returns its position within `quotes`.
pub fn pick_random<'a, I>(quotes: I) -> Result<(usize, &'a Quote), QuoteError>
where
    I: IntoIterator<Item = &'a Quote>,
{
    pick_random_with(&mut rand::thread_rng(), quotes)
}

pub fn pick_random_with<'a, R, I>(rng: &mut R, quotes: I) -> Result<(usize, &'a Quote), QuoteError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Quote>,
{
    let candidates: Vec<&Quote> = quotes.into_iter().collect();
    if candidates.is_empty() {
        return Err(QuoteError::NoQuotes);
    }
    let index = rng.gen_range(0..candidates.len());
    Ok((index, candidates[index]))
}

pub fn pick_random_in_category<'a>(
    store: &'a QuoteStore,
    category: &str,
) -> Result<&'a Quote, QuoteError> {
    pick_random(store.by_category(category))
        .map(|(_, q)| q)
        .map_err(|_| QuoteError::NoQuotesInCategory(category.to_string()))
}
