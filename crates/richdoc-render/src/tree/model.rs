//! Tree-dialect node model.
//!
//! Mirrors the JSON schema emitted by the rich-text editing surface: every node
//! is an object with a `type` tag and optional `attrs`, `content`, `text` and
//! `marks` members. Decoding is total. Anything that is not an object with a
//! string `type` becomes [`NodeKind::Invalid`], so one corrupt node cannot
//! poison its siblings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::DocumentError;

/// Free-form node and mark attributes.
pub type Attrs = Map<String, Value>;

/// Tag of a tree-dialect node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    HardBreak,
    Image,
    Text,
    /// Tag not known to this renderer; kept verbatim for re-encoding.
    Unknown(String),
    /// Value that was not a node at all (`null`, a number, a tagless object).
    Invalid,
}

impl NodeKind {
    /// Map a serialized `type` tag to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "doc" => Self::Doc,
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "codeBlock" => Self::CodeBlock,
            "horizontalRule" => Self::HorizontalRule,
            "hardBreak" => Self::HardBreak,
            "image" => Self::Image,
            "text" => Self::Text,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Serialized `type` tag, `None` for [`NodeKind::Invalid`].
    pub fn tag(&self) -> Option<&str> {
        Some(match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "codeBlock",
            Self::HorizontalRule => "horizontalRule",
            Self::HardBreak => "hardBreak",
            Self::Image => "image",
            Self::Text => "text",
            Self::Unknown(tag) => tag.as_str(),
            Self::Invalid => return None,
        })
    }
}

/// Tag of an inline mark.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Strike,
    Code,
    Link,
    Unknown(String),
}

impl MarkKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "strike" => Self::Strike,
            "code" => Self::Code,
            "link" => Self::Link,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strike => "strike",
            Self::Code => "code",
            Self::Link => "link",
            Self::Unknown(tag) => tag.as_str(),
        }
    }
}

/// Inline formatting annotation on a text node.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub kind: MarkKind,
    pub attrs: Attrs,
}

impl Mark {
    /// Create a mark without attributes.
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    /// Create a link mark pointing at `href`.
    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("href".to_owned(), Value::String(href.into()));
        Self {
            kind: MarkKind::Link,
            attrs,
        }
    }

    /// Link target, `None` when absent or empty.
    pub fn href(&self) -> Option<&str> {
        non_empty_str(&self.attrs, "href")
    }

    /// Decode a mark; non-objects and tagless objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let tag = obj.get("type")?.as_str()?;
        Some(Self {
            kind: MarkKind::from_tag(tag),
            attrs: object_member(obj, "attrs"),
        })
    }

    /// Encode in the editing surface's JSON shape.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_owned(), Value::String(self.kind.tag().to_owned()));
        if !self.attrs.is_empty() {
            obj.insert("attrs".to_owned(), Value::Object(self.attrs.clone()));
        }
        Value::Object(obj)
    }
}

/// A tree-dialect node.
///
/// `text` and `marks` are only meaningful on [`NodeKind::Text`]; `content` on
/// everything else. Both are retained as decoded so re-encoding does not drop
/// anything the editing surface wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub attrs: Attrs,
    pub content: Vec<Node>,
    pub text: Option<String>,
    pub marks: Vec<Mark>,
}

impl Node {
    /// Create an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            content: Vec::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    /// Create a `doc` root with the given children.
    pub fn doc(content: Vec<Node>) -> Self {
        Self::new(NodeKind::Doc).with_content(content)
    }

    /// Create a `text` leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeKind::Text)
        }
    }

    /// Placeholder for a value that failed to decode.
    pub fn invalid() -> Self {
        Self::new(NodeKind::Invalid)
    }

    #[must_use]
    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    /// String attribute, `None` when absent, not a string, or empty.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        non_empty_str(&self.attrs, key)
    }

    /// Integer attribute; numeric strings are accepted.
    pub fn attr_int(&self, key: &str) -> Option<i64> {
        match self.attrs.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Heading level clamped to `1..=6`; missing or out-of-range values give 1.
    pub fn heading_level(&self) -> u8 {
        match self.attr_int("level") {
            Some(level @ 1..=6) => u8::try_from(level).unwrap_or(1),
            _ => 1,
        }
    }

    /// Decode a node from a parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::invalid();
        };
        let Some(tag) = obj.get("type").and_then(Value::as_str) else {
            return Self::invalid();
        };

        let content = obj
            .get("content")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(Self::from_value).collect())
            .unwrap_or_default();
        let marks = obj
            .get("marks")
            .and_then(Value::as_array)
            .map(|marks| marks.iter().filter_map(Mark::from_value).collect())
            .unwrap_or_default();

        Self {
            kind: NodeKind::from_tag(tag),
            attrs: object_member(obj, "attrs"),
            content,
            text: obj.get("text").and_then(Value::as_str).map(str::to_owned),
            marks,
        }
    }

    /// Decode a node from serialized JSON.
    ///
    /// Only invalid JSON is an error; any JSON value yields a node.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(&value))
    }

    /// Encode in the editing surface's JSON shape. Invalid nodes encode as `null`.
    pub fn to_value(&self) -> Value {
        let Some(tag) = self.kind.tag() else {
            return Value::Null;
        };

        let mut obj = Map::new();
        obj.insert("type".to_owned(), Value::String(tag.to_owned()));
        if !self.attrs.is_empty() {
            obj.insert("attrs".to_owned(), Value::Object(self.attrs.clone()));
        }
        if !self.content.is_empty() {
            let content = self.content.iter().map(Self::to_value).collect();
            obj.insert("content".to_owned(), Value::Array(content));
        }
        if let Some(text) = &self.text {
            obj.insert("text".to_owned(), Value::String(text.clone()));
        }
        if !self.marks.is_empty() {
            let marks = self.marks.iter().map(Mark::to_value).collect();
            obj.insert("marks".to_owned(), Value::Array(marks));
        }
        Value::Object(obj)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

fn object_member(obj: &Map<String, Value>, key: &str) -> Attrs {
    obj.get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn non_empty_str<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
