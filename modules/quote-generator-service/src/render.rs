//! Display rendering for quotes.

use quote_generator_types::{Quote, QuoteView};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_quote(quote: &Quote) -> QuoteView {
    QuoteView {
        text: quote.text.clone(),
        category: quote.category.clone(),
        html: format!(
            "\"{}\" — <strong>{}</strong>",
            escape_html(&quote.text),
            escape_html(&quote.category)
        ),
    }
}
