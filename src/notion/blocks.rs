// Block model and text renderer
//
// Notion returns blocks as `{ "id": ..., "type": "<t>", "<t>": {payload},
// "has_children": bool }`. The payload is only meaningful under the key
// matching `type`; anything else degrades to a placeholder line. Rendering
// is shallow: child blocks are noted but never fetched.
use serde::Deserialize;
use serde_json::Value;

use super::types::{plain_text, RichText};

#[derive(Debug, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToDoPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSource {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub caption: Vec<RichText>,
    pub file: Option<FileSource>,
    pub external: Option<FileSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconValue {
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalloutPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    pub icon: Option<IconValue>,
}

/// Typed view of a block's payload, one variant per rendered type.
///
/// `Other` carries a recognized `type` tag with no rendering rule;
/// `Unsupported` means the tag was absent or its payload key was missing.
#[derive(Debug)]
pub enum BlockPayload {
    Paragraph(TextPayload),
    Heading1(TextPayload),
    Heading2(TextPayload),
    Heading3(TextPayload),
    BulletedListItem(TextPayload),
    NumberedListItem(TextPayload),
    ToDo(ToDoPayload),
    Toggle(TextPayload),
    Quote(TextPayload),
    Callout(CalloutPayload),
    Code(CodePayload),
    Image(ImagePayload),
    Divider,
    Table,
    Other(String),
    Unsupported(String),
}

impl Block {
    /// Resolve the payload variant addressed by this block's `type` tag.
    pub fn payload(&self) -> BlockPayload {
        let kind = match &self.kind {
            Some(kind) => kind,
            None => return BlockPayload::Unsupported(String::new()),
        };
        let body = match self.extra.get(kind) {
            Some(body) => body,
            None => return BlockPayload::Unsupported(kind.clone()),
        };

        fn parse<T: Default + for<'de> Deserialize<'de>>(body: &Value) -> T {
            serde_json::from_value(body.clone()).unwrap_or_default()
        }

        match kind.as_str() {
            "paragraph" => BlockPayload::Paragraph(parse(body)),
            "heading_1" => BlockPayload::Heading1(parse(body)),
            "heading_2" => BlockPayload::Heading2(parse(body)),
            "heading_3" => BlockPayload::Heading3(parse(body)),
            "bulleted_list_item" => BlockPayload::BulletedListItem(parse(body)),
            "numbered_list_item" => BlockPayload::NumberedListItem(parse(body)),
            "to_do" => BlockPayload::ToDo(parse(body)),
            "toggle" => BlockPayload::Toggle(parse(body)),
            "quote" => BlockPayload::Quote(parse(body)),
            "callout" => BlockPayload::Callout(parse(body)),
            "code" => BlockPayload::Code(parse(body)),
            "image" => BlockPayload::Image(parse(body)),
            "divider" => BlockPayload::Divider,
            "table" => BlockPayload::Table,
            other => BlockPayload::Other(other.to_string()),
        }
    }
}

/// Render one block as readable text at the given indent depth.
///
/// Pure and infallible: missing sub-fields degrade to empty strings or
/// placeholder lines. Indentation is two spaces per level.
pub fn render_block(block: &Block, indent: usize) -> String {
    let pad = "  ".repeat(indent);

    let line = match block.payload() {
        BlockPayload::Unsupported(kind) => {
            return format!("{pad}[Unsupported block type: {kind}]");
        }
        BlockPayload::Paragraph(p) => format!("{pad}{}", plain_text(&p.rich_text)),
        BlockPayload::Heading1(p) => format!("{pad}# {}", plain_text(&p.rich_text)),
        BlockPayload::Heading2(p) => format!("{pad}## {}", plain_text(&p.rich_text)),
        BlockPayload::Heading3(p) => format!("{pad}### {}", plain_text(&p.rich_text)),
        BlockPayload::BulletedListItem(p) => format!("{pad}• {}", plain_text(&p.rich_text)),
        // Simplified: every item is numbered "1.", no running counter.
        BlockPayload::NumberedListItem(p) => format!("{pad}1. {}", plain_text(&p.rich_text)),
        BlockPayload::ToDo(p) => {
            let mark = if p.checked { "✓" } else { "☐" };
            format!("{pad}{mark} {}", plain_text(&p.rich_text))
        }
        BlockPayload::Toggle(p) => format!("{pad}▶ {}", plain_text(&p.rich_text)),
        BlockPayload::Quote(p) => format!("{pad}> {}", plain_text(&p.rich_text)),
        BlockPayload::Callout(p) => {
            let emoji = p
                .icon
                .and_then(|i| i.emoji)
                .unwrap_or_default();
            format!("{pad}{emoji} | {}", plain_text(&p.rich_text))
        }
        BlockPayload::Code(p) => {
            let text = plain_text(&p.rich_text);
            format!("{pad}```{}\n{pad}{text}\n{pad}```", p.language)
        }
        BlockPayload::Image(p) => {
            let caption = plain_text(&p.caption);
            let url = p
                .file
                .map(|f| f.url)
                .or_else(|| p.external.map(|e| e.url))
                .unwrap_or_default();
            if caption.is_empty() {
                format!("{pad}[Image]({url})")
            } else {
                format!("{pad}[Image - {caption}]({url})")
            }
        }
        BlockPayload::Divider => format!("{pad}---"),
        BlockPayload::Table => format!("{pad}[Table - use get_table_content to view]"),
        BlockPayload::Other(kind) => format!("{pad}[{kind} block]"),
    };

    if block.has_children {
        format!("{line}\n{pad}[This block has child blocks that aren't displayed here]")
    } else {
        line
    }
}
