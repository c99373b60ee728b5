//! In-memory document object model.
//!
//! The engine never parses or serializes container files. Callers map their
//! word-processing or slide documents into these types, run the engine, and
//! write the mutated runs back. Every type is serde-serializable so the model
//! can cross a process boundary as JSON.

use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named highlight palette shared by word-processing and slide formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    None,
    Black,
    Yellow,
    BrightGreen,
    Turquoise,
    Pink,
    Blue,
    Red,
    DarkBlue,
    Teal,
    Green,
    Violet,
    DarkRed,
    DarkYellow,
    Gray,
    LightGray,
}

/// Formatting attributes of a run.
///
/// Opaque to the engine except for the attributes a redaction policy writes.
/// `None` means "inherited from the paragraph or style".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl RunFormat {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }
}

/// What a run carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunContent {
    Text { text: String },
    /// Embedded object (picture, field, chart). Occupies no characters.
    Object { kind: String },
}

/// Smallest independently formatted fragment of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub content: RunContent,
    #[serde(default)]
    pub format: RunFormat,
}

impl Run {
    /// Creates a text run with inherited formatting.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text { text: text.into() },
            format: RunFormat::default(),
        }
    }

    /// Creates an embedded-object run.
    pub fn object(kind: impl Into<String>) -> Self {
        Self {
            content: RunContent::Object { kind: kind.into() },
            format: RunFormat::default(),
        }
    }

    pub fn with_format(mut self, format: RunFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the run text, or `""` for embedded objects.
    pub fn as_str(&self) -> &str {
        match &self.content {
            RunContent::Text { text } => text,
            RunContent::Object { .. } => "",
        }
    }

    /// Length in chars, the engine's offset unit.
    pub fn char_len(&self) -> usize {
        self.as_str().chars().count()
    }

    pub fn is_object(&self) -> bool {
        matches!(self.content, RunContent::Object { .. })
    }

    /// Replaces the text of a text run. Embedded objects are left alone.
    pub fn set_text(&mut self, new_text: String) {
        if let RunContent::Text { text } = &mut self.content {
            *text = new_text;
        }
    }
}

/// Ordered sequence of runs sharing block-level context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Logical text reported by the upstream parser, if it exposes one
    /// separately from the runs. Must equal the run concatenation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_text: Option<String>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            reported_text: None,
        }
    }

    /// Builds a paragraph of plain text runs.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| Run::text(t.as_ref())).collect())
    }

    pub fn with_reported_text(mut self, text: impl Into<String>) -> Self {
        self.reported_text = Some(text.into());
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::as_str).collect()
    }
}

/// Word-processing document: body paragraphs followed by body tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDocument {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl WordDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// Table cell. Cells may nest further tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Cell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            tables: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }
}

/// Slide deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

/// Slide shape. Group shapes carry `children`; pictures and connectors have
/// neither text frame nor children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_frame: Option<TextFrame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Shape>,
}

impl Shape {
    pub fn with_text(name: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            name: name.into(),
            text_frame: Some(TextFrame { paragraphs }),
            children: Vec::new(),
        }
    }

    /// Shape without a text frame (picture, connector).
    pub fn without_text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text_frame: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>, children: Vec<Shape>) -> Self {
        Self {
            name: name.into(),
            text_frame: None,
            children,
        }
    }

    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}
