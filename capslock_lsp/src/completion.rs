//! Completion provider for capslock LSP
//!
//! Offers a fixed pair of language names and fills in their details lazily
//! on `completionItem/resolve`.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use serde_json::Value;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

/// The closed set of completion candidates.
///
/// On the wire each variant travels as a numeric tag in `CompletionItem::data`
/// and must come back unchanged at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    TypeScript,
    JavaScript,
}

impl CompletionKind {
    pub const ALL: [CompletionKind; 2] = [CompletionKind::TypeScript, CompletionKind::JavaScript];

    pub fn label(self) -> &'static str {
        match self {
            CompletionKind::TypeScript => "TypeScript",
            CompletionKind::JavaScript => "JavaScript",
        }
    }

    /// Numeric tag stored in `CompletionItem::data`
    pub fn tag(self) -> u64 {
        match self {
            CompletionKind::TypeScript => 1,
            CompletionKind::JavaScript => 2,
        }
    }

    /// Recover the kind from a round-tripped `data` payload
    pub fn from_data(data: &Value) -> Option<Self> {
        match data.as_u64()? {
            1 => Some(CompletionKind::TypeScript),
            2 => Some(CompletionKind::JavaScript),
            _ => None,
        }
    }

    pub fn detail(self) -> String {
        format!("{} details", self.label())
    }

    pub fn documentation(self) -> String {
        format!("{} documentation", self.label())
    }

    fn to_item(self) -> CompletionItem {
        CompletionItem {
            label: self.label().to_string(),
            kind: Some(CompletionItemKind::TEXT),
            data: Some(Value::from(self.tag())),
            ..Default::default()
        }
    }
}

/// List completion candidates. Independent of cursor position and content.
pub fn list_completions() -> Vec<CompletionItem> {
    CompletionKind::ALL.into_iter().map(CompletionKind::to_item).collect()
}

/// Attach detail and documentation for a known tag.
///
/// Items without a recognized tag come back unchanged.
pub fn resolve_completion(mut item: CompletionItem) -> CompletionItem {
    let Some(kind) = item.data.as_ref().and_then(CompletionKind::from_data) else {
        tracing::debug!("resolve: unrecognized completion data on '{}'", item.label);
        return item;
    };

    item.detail = Some(kind.detail());
    item.documentation = Some(Documentation::String(kind.documentation()));
    item
}
