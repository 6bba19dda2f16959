//! Block-dialect document model.
//!
//! A document is `{"blocks": [...], "version"?, "time"?}` where every block is
//! `{"id"?, "type", "data"}`. Blocks are decoded one at a time so a single
//! block with an unexpected payload becomes [`BlockData::Invalid`] instead of
//! failing the whole document.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::DocumentError;

/// A decoded block-dialect document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockDocument {
    pub blocks: Vec<Block>,
    /// Producer version string, informational only.
    pub version: Option<String>,
    /// Save timestamp in milliseconds, informational only.
    pub time: Option<i64>,
}

impl BlockDocument {
    /// Decode a document from serialized JSON.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    /// Decode a document from a parsed JSON value.
    ///
    /// The value must be an object with a `blocks` array; individual blocks
    /// never fail.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DocumentError::Shape("document is not an object".to_owned()))?;
        let blocks = obj
            .get("blocks")
            .and_then(Value::as_array)
            .ok_or_else(|| DocumentError::Shape("missing `blocks` array".to_owned()))?;

        Ok(Self {
            blocks: blocks.iter().map(Block::from_value).collect(),
            version: obj.get("version").and_then(Value::as_str).map(str::to_owned),
            time: obj.get("time").and_then(Value::as_i64),
        })
    }
}

impl<'de> Deserialize<'de> for BlockDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

/// A single block. The `id` is a presentation key and never rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: Option<String>,
    pub data: BlockData,
}

impl Block {
    /// Create a block without an id.
    pub fn new(data: BlockData) -> Self {
        Self { id: None, data }
    }

    /// Decode a block; never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::new(BlockData::Invalid {
                kind: String::new(),
                reason: "block is not an object".to_owned(),
            });
        };
        let id = obj.get("id").and_then(Value::as_str).map(str::to_owned);
        let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
        let data = obj.get("data").unwrap_or(&Value::Null);

        Self {
            id,
            data: BlockData::decode(kind, data),
        }
    }
}

/// Typed payload of a block.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockData {
    Paragraph {
        text: String,
    },
    Header {
        text: String,
        level: Option<i64>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Delimiter,
    Image(ImageData),
    Code {
        code: String,
        language: Option<String>,
    },
    Quote {
        text: String,
        caption: String,
        alignment: Option<String>,
    },
    Warning {
        title: String,
        message: String,
    },
    Checklist {
        items: Vec<ChecklistItem>,
    },
    /// Block type this renderer does not know.
    Unknown {
        kind: String,
    },
    /// Known block type whose payload has the wrong shape.
    Invalid {
        kind: String,
        reason: String,
    },
}

impl BlockData {
    /// Decode the payload of a block tagged `kind`.
    pub fn decode(kind: &str, data: &Value) -> Self {
        let decoded = match kind {
            "paragraph" => payload::<TextPayload>(data).map(|p| Self::Paragraph { text: p.text }),
            "header" => payload::<HeaderPayload>(data).map(|p| Self::Header {
                text: p.text,
                level: p.level,
            }),
            "list" => payload::<ListPayload>(data).map(|p| Self::List {
                ordered: p.style.as_deref() == Some("ordered"),
                items: p.items,
            }),
            "delimiter" => Ok(Self::Delimiter),
            "image" => payload::<ImagePayload>(data).map(|p| Self::Image(p.into())),
            "code" => payload::<CodePayload>(data).map(|p| Self::Code {
                code: p.code,
                language: p.language.filter(|l| !l.is_empty()),
            }),
            "quote" => payload::<QuotePayload>(data).map(|p| Self::Quote {
                text: p.text,
                caption: p.caption,
                alignment: p.alignment,
            }),
            "warning" => payload::<WarningPayload>(data).map(|p| Self::Warning {
                title: p.title,
                message: p.message,
            }),
            "checklist" => {
                payload::<ChecklistPayload>(data).map(|p| Self::Checklist { items: p.items })
            }
            other => {
                return Self::Unknown {
                    kind: other.to_owned(),
                };
            }
        };

        decoded.unwrap_or_else(|e| Self::Invalid {
            kind: kind.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Serialized `type` tag of this block.
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Header { .. } => "header",
            Self::List { .. } => "list",
            Self::Delimiter => "delimiter",
            Self::Image(_) => "image",
            Self::Code { .. } => "code",
            Self::Quote { .. } => "quote",
            Self::Warning { .. } => "warning",
            Self::Checklist { .. } => "checklist",
            Self::Unknown { kind } | Self::Invalid { kind, .. } => kind.as_str(),
        }
    }
}

/// Image block payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageData {
    /// Source URL from `file.url`, falling back to `url`.
    pub url: Option<String>,
    pub caption: String,
    pub with_border: bool,
    pub with_background: bool,
    pub stretched: bool,
}

/// List item: plain markup, or markup with a nested list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Nested(NestedListItem),
}

/// List item carrying its own sub-items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NestedListItem {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ListItem>,
}

/// Checklist entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub checked: bool,
}

/// Missing or `null` data decodes as an empty object so every field takes
/// its default.
fn payload<T: DeserializeOwned>(data: &Value) -> Result<T, serde_json::Error> {
    match data {
        Value::Null => T::deserialize(&Value::Object(Map::new())),
        data => T::deserialize(data),
    }
}

/// `null` decodes as the field's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Header level given as a number or a numeric string; anything else is unset.
fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct TextPayload {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct HeaderPayload {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "lenient_level")]
    level: Option<i64>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ListPayload {
    style: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    items: Vec<ListItem>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct FileRef {
    url: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImagePayload {
    file: Option<FileRef>,
    url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    caption: String,
    #[serde(deserialize_with = "null_as_default")]
    with_border: bool,
    #[serde(deserialize_with = "null_as_default")]
    with_background: bool,
    #[serde(deserialize_with = "null_as_default")]
    stretched: bool,
}

impl From<ImagePayload> for ImageData {
    fn from(p: ImagePayload) -> Self {
        let url = p
            .file
            .and_then(|f| f.url)
            .filter(|u| !u.is_empty())
            .or(p.url)
            .filter(|u| !u.is_empty());
        Self {
            url,
            caption: p.caption,
            with_border: p.with_border,
            with_background: p.with_background,
            stretched: p.stretched,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CodePayload {
    #[serde(deserialize_with = "null_as_default")]
    code: String,
    language: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct QuotePayload {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "null_as_default")]
    caption: String,
    alignment: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct WarningPayload {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    message: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ChecklistPayload {
    #[serde(deserialize_with = "null_as_default")]
    items: Vec<ChecklistItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_document_metadata() {
        let doc = BlockDocument::from_json(
            r#"{"time": 1700000000000, "version": "2.28.0", "blocks": []}"#,
        )
        .unwrap();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.version.as_deref(), Some("2.28.0"));
        assert_eq!(doc.time, Some(1_700_000_000_000));
    }

    #[test]
    fn test_document_requires_blocks_array() {
        let err = BlockDocument::from_json(r#"{"blocks": "nope"}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Shape(_)));

        let err = BlockDocument::from_json("[]").unwrap_err();
        assert!(matches!(err, DocumentError::Shape(_)));

        let err = BlockDocument::from_json("{").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_document_deserialize_impl() {
        let doc: BlockDocument =
            serde_json::from_value(json!({"blocks": [{"type": "delimiter"}]})).unwrap();
        assert_eq!(doc.blocks, vec![Block::new(BlockData::Delimiter)]);

        assert!(serde_json::from_value::<BlockDocument>(json!({})).is_err());
    }

    #[test]
    fn test_block_id_kept() {
        let block = Block::from_value(&json!({
            "id": "x1Yz",
            "type": "paragraph",
            "data": {"text": "Hi"}
        }));
        assert_eq!(block.id.as_deref(), Some("x1Yz"));
        assert_eq!(
            block.data,
            BlockData::Paragraph {
                text: "Hi".to_owned()
            }
        );
    }

    #[test]
    fn test_missing_data_uses_defaults() {
        let block = Block::from_value(&json!({"type": "header"}));
        assert_eq!(
            block.data,
            BlockData::Header {
                text: String::new(),
                level: None
            }
        );
    }

    #[test]
    fn test_unknown_block_type() {
        let block = Block::from_value(&json!({"type": "embed", "data": {"service": "youtube"}}));
        assert_eq!(
            block.data,
            BlockData::Unknown {
                kind: "embed".to_owned()
            }
        );
        assert_eq!(block.data.kind(), "embed");
    }

    #[test]
    fn test_wrong_payload_shape_is_invalid() {
        let block = Block::from_value(&json!({"type": "paragraph", "data": {"text": 5}}));
        assert!(matches!(
            block.data,
            BlockData::Invalid { ref kind, .. } if kind == "paragraph"
        ));
    }

    #[test]
    fn test_non_object_block_is_invalid() {
        let block = Block::from_value(&json!("paragraph"));
        assert!(matches!(block.data, BlockData::Invalid { .. }));
    }

    #[test]
    fn test_list_items_plain_and_nested() {
        let block = Block::from_value(&json!({
            "type": "list",
            "data": {
                "style": "ordered",
                "items": [
                    "first",
                    {"content": "second", "items": [{"content": "child", "items": []}]}
                ]
            }
        }));
        assert_eq!(
            block.data,
            BlockData::List {
                ordered: true,
                items: vec![
                    ListItem::Text("first".to_owned()),
                    ListItem::Nested(NestedListItem {
                        content: "second".to_owned(),
                        items: vec![ListItem::Nested(NestedListItem {
                            content: "child".to_owned(),
                            items: vec![],
                        })],
                    }),
                ],
            }
        );
    }

    #[test]
    fn test_image_url_sources() {
        let from_file = Block::from_value(&json!({
            "type": "image",
            "data": {"file": {"url": "https://cdn/a.png"}, "url": "https://other/b.png", "withBorder": true}
        }));
        let BlockData::Image(image) = from_file.data else {
            panic!("expected image");
        };
        assert_eq!(image.url.as_deref(), Some("https://cdn/a.png"));
        assert!(image.with_border);

        let from_url = Block::from_value(&json!({
            "type": "image",
            "data": {"url": "https://other/b.png", "caption": "B"}
        }));
        let BlockData::Image(image) = from_url.data else {
            panic!("expected image");
        };
        assert_eq!(image.url.as_deref(), Some("https://other/b.png"));
        assert_eq!(image.caption, "B");
    }

    #[test]
    fn test_code_empty_language_is_none() {
        let block = Block::from_value(&json!({
            "type": "code",
            "data": {"code": "x", "language": ""}
        }));
        assert_eq!(
            block.data,
            BlockData::Code {
                code: "x".to_owned(),
                language: None
            }
        );
    }

    #[test]
    fn test_checklist_items() {
        let block = Block::from_value(&json!({
            "type": "checklist",
            "data": {"items": [{"text": "a", "checked": true}, {"text": "b"}]}
        }));
        assert_eq!(
            block.data,
            BlockData::Checklist {
                items: vec![
                    ChecklistItem {
                        text: "a".to_owned(),
                        checked: true
                    },
                    ChecklistItem {
                        text: "b".to_owned(),
                        checked: false
                    },
                ]
            }
        );
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let quote = Block::from_value(&json!({
            "type": "quote",
            "data": {"text": "Keep me", "caption": null, "alignment": null}
        }));
        assert_eq!(
            quote.data,
            BlockData::Quote {
                text: "Keep me".to_owned(),
                caption: String::new(),
                alignment: None,
            }
        );

        let image = Block::from_value(&json!({
            "type": "image",
            "data": {"file": {"url": "a.png"}, "caption": null, "stretched": null}
        }));
        assert_eq!(
            image.data,
            BlockData::Image(ImageData {
                url: Some("a.png".to_owned()),
                ..ImageData::default()
            })
        );

        let checklist = Block::from_value(&json!({
            "type": "checklist",
            "data": {"items": [{"text": "task", "checked": null}]}
        }));
        assert_eq!(
            checklist.data,
            BlockData::Checklist {
                items: vec![ChecklistItem {
                    text: "task".to_owned(),
                    checked: false,
                }],
            }
        );
    }

    #[test]
    fn test_header_level_numeric_string() {
        let block = Block::from_value(&json!({
            "type": "header",
            "data": {"text": "Title", "level": " 2 "}
        }));
        assert_eq!(
            block.data,
            BlockData::Header {
                text: "Title".to_owned(),
                level: Some(2),
            }
        );

        let block = Block::from_value(&json!({
            "type": "header",
            "data": {"text": "Title", "level": "big"}
        }));
        assert_eq!(
            block.data,
            BlockData::Header {
                text: "Title".to_owned(),
                level: None,
            }
        );
    }
}
