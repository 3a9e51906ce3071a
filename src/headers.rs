use crate::constants::header;
use indexmap::IndexMap;

/// Response headers produced by the evaluator, in emission order.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_estimate(8)
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: impl Into<String>) {
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(&value.into());
        } else {
            self.headers.insert(name.to_owned(), value.into());
        }
    }

    pub(crate) fn add_vary(&mut self, value: &str) {
        let merged = merge_vary(self.headers.get(header::VARY).map(String::as_str), value);
        if merged.is_empty() {
            self.headers.shift_remove(header::VARY);
        } else {
            self.headers.insert(header::VARY.to_owned(), merged);
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Appends `incoming` to an existing `Vary` value.
///
/// Entries are comma-joined and de-duplicated case-insensitively, keeping the first
/// spelling seen.
pub fn merge_vary(existing: Option<&str>, incoming: &str) -> String {
    let mut entries: Vec<&str> = Vec::new();
    let parts = existing
        .into_iter()
        .flat_map(|value| value.split(','))
        .chain(incoming.split(','));

    for part in parts.map(str::trim).filter(|part| !part.is_empty()) {
        if !entries
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(part))
        {
            entries.push(part);
        }
    }

    entries.join(", ")
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
