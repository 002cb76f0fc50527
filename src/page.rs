use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct PageDocument {
    #[serde(default, deserialize_with = "lenient")]
    query: Option<QueryBody>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pages: Option<Vec<Page>>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default, deserialize_with = "lenient_seq")]
    pages: Option<Vec<Page>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub revisions: Option<Vec<Revision>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Revision {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

impl PageDocument {
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str(body) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::debug!(%err, "upstream body is not a page document");
                None
            }
        }
    }

    /// Pages at the top level win over pages nested under `query`.
    pub fn pages(&self) -> Option<&[Page]> {
        self.pages
            .as_deref()
            .or_else(|| self.query.as_ref().and_then(|q| q.pages.as_deref()))
    }

    // None when there is no `pages` sequence at all.
    pub fn markup(&self) -> Option<String> {
        let pages = self.pages()?;
        let mut markup = String::new();
        for revision in pages.iter().flat_map(|page| page.revisions.iter().flatten()) {
            if let Some(content) = revision.content.as_deref() {
                markup.push_str(content);
            }
        }
        Some(markup)
    }
}

impl Page {
    /// `missing: true` (formatversion=2) or any casing of the string `"true"`.
    pub fn is_missing(&self) -> bool {
        match &self.missing {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
    ))
}
