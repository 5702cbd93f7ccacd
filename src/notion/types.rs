// Notion API value types - defensive, request-scoped models
use serde::Deserialize;
use serde_json::Value;

/// A single rich-text run. Only the pre-rendered `plain_text` is needed;
/// annotations and hrefs are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Concatenate the plain text of a run sequence, in order, with no separator.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: String,
    pub end: Option<String>,
}

/// A page or database-entry property value, tagged by its `type` field.
/// Property types without an extraction rule collapse into `Unknown`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        number: Option<f64>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Url {
        url: Option<String>,
    },
    Email {
        email: Option<String>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Parse a raw property value, degrading to `Unknown` on any shape mismatch.
pub fn parse_property(raw: &Value) -> PropertyValue {
    serde_json::from_value(raw.clone()).unwrap_or(PropertyValue::Unknown)
}

impl PropertyValue {
    /// Extract a display string for this property. Missing or null values
    /// render as "N/A".
    pub fn render(&self) -> String {
        match self {
            PropertyValue::Title { title } => plain_text(title),
            PropertyValue::RichText { rich_text } => plain_text(rich_text),
            PropertyValue::Number { number } => match number {
                Some(n) => n.to_string(),
                None => "N/A".to_string(),
            },
            PropertyValue::Select { select } => match select {
                Some(option) => option.name.clone(),
                None => "N/A".to_string(),
            },
            PropertyValue::MultiSelect { multi_select } => multi_select
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            PropertyValue::Date { date } => match date {
                Some(d) => match &d.end {
                    Some(end) if !end.is_empty() => format!("{} to {}", d.start, end),
                    _ => d.start.clone(),
                },
                None => "N/A".to_string(),
            },
            PropertyValue::Checkbox { checkbox } => {
                if *checkbox { "✓" } else { "☐" }.to_string()
            }
            PropertyValue::Url { url } => non_empty_or_na(url),
            PropertyValue::Email { email } => non_empty_or_na(email),
            PropertyValue::PhoneNumber { phone_number } => non_empty_or_na(phone_number),
            PropertyValue::Unknown => "N/A".to_string(),
        }
    }

    /// The rich-text runs of a title property, if this is one.
    pub fn title_runs(&self) -> Option<&[RichText]> {
        match self {
            PropertyValue::Title { title } => Some(title),
            _ => None,
        }
    }
}

fn non_empty_or_na(value: &Option<String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}
