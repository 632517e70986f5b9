//! Solr XML update messages.
//!
//! ```text
//! <add><doc><field name="id">...</field>...</doc>...</add>
//! ```

use crate::types::IndexDocument;

/// Query parameters of one update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateParams {
    /// Ask the index to commit after applying this request.
    pub commit: bool,
    /// Id of the last document of a threshold batch. When present the request asks the service
    /// to infer field types (`lucidworks_fields=true`); the id itself is not sent.
    pub correlation_id: Option<String>,
    pub wait_flush: Option<bool>,
    pub wait_searcher: Option<bool>,
}

impl UpdateParams {
    /// Parameters for a mid-run batch flush.
    pub fn batch(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Default::default()
        }
    }

    /// Parameters for the final flush.
    pub fn last(commit: bool) -> Self {
        Self {
            commit,
            ..Default::default()
        }
    }
}

/// Relative update path, e.g. `update/?commit=false&lucidworks_fields=true`.
pub fn update_path(params: &UpdateParams) -> String {
    let mut query = vec![format!("commit={}", params.commit)];
    if let Some(v) = params.wait_flush {
        query.push(format!("waitFlush={v}"));
    }
    if let Some(v) = params.wait_searcher {
        query.push(format!("waitSearcher={v}"));
    }
    if params.correlation_id.is_some() {
        query.push("lucidworks_fields=true".to_string());
    }
    format!("update/?{}", query.join("&"))
}

/// Encode documents as an `<add>` message. An empty batch encodes as `<add></add>`.
pub fn build_add_message(docs: &[IndexDocument]) -> String {
    let mut out = String::with_capacity(64 + docs.len() * 512);
    out.push_str("<add>");
    for doc in docs {
        out.push_str("<doc>");
        for (name, value) in doc.fields() {
            out.push_str("<field name=\"");
            escape_into(&mut out, name);
            out.push_str("\">");
            escape_into(&mut out, value);
            out.push_str("</field>");
        }
        out.push_str("</doc>");
    }
    out.push_str("</add>");
    out
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_flush_sets_lucidworks_flag() {
        assert_eq!(
            update_path(&UpdateParams::batch("x")),
            "update/?commit=false&lucidworks_fields=true"
        );
        assert_eq!(update_path(&UpdateParams::last(false)), "update/?commit=false");
        assert_eq!(update_path(&UpdateParams::last(true)), "update/?commit=true");
    }

    #[test]
    fn wait_flags_are_rendered_before_lucidworks_flag() {
        let params = UpdateParams {
            wait_flush: Some(true),
            wait_searcher: Some(false),
            ..UpdateParams::batch("id")
        };
        assert_eq!(
            update_path(&params),
            "update/?commit=false&waitFlush=true&waitSearcher=false&lucidworks_fields=true"
        );
    }

    #[test]
    fn empty_batch_is_an_empty_add() {
        assert_eq!(build_add_message(&[]), "<add></add>");
    }
}
