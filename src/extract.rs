use std::sync::LazyLock;

use regex::Regex;

use crate::page::PageDocument;

static SHORT_DESCRIPTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\{\{Short description\|(.*?)\}\}")
        .inspect_err(|err| tracing::error!(%err, "compile short description pattern"))
        .ok()
});

pub fn fallback_description(name: &str) -> String {
    format!("Description for {name} could not be found")
}

/// Returns the text of the first `{{Short description|...}}` block in
/// `body`, verbatim, or the fallback message for `name`.
///
/// `body` is read as a page document when it has a `pages` sequence (every
/// revision's content is concatenated); otherwise it is scanned as markup.
pub fn extract(name: &str, body: &str) -> String {
    let markup = PageDocument::parse(body).and_then(|doc| doc.markup());
    let markup = markup.as_deref().unwrap_or(body);

    find_short_description(markup)
        .map(str::to_owned)
        .unwrap_or_else(|| fallback_description(name))
}

pub fn find_short_description(markup: &str) -> Option<&str> {
    let pattern = SHORT_DESCRIPTION.as_ref()?;
    pattern
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
