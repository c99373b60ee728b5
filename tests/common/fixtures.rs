//! Test fixtures and document builders.
//!
//! Provides builders for creating object-model documents with specific
//! content, following the Builder pattern for clean test setup.

use pii_redactor::{
    Cell, Paragraph, Presentation, Row, Run, RunFormat, Shape, Slide, Table, WordDocument,
};

/// Builder for word-processing test documents.
///
/// # Example
///
/// ```ignore
/// let doc = TestDocBuilder::new()
///     .with_paragraph(&["Jane ", "Doe works here"])
///     .with_table(&[&["Name", "Jane Doe"], &["Phone", "555-0100"]])
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestDocBuilder {
    doc: WordDocument,
}

impl TestDocBuilder {
    /// Creates an empty document builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body paragraph made of plain runs.
    pub fn with_paragraph(mut self, runs: &[&str]) -> Self {
        self.doc.paragraphs.push(Paragraph::from_texts(runs));
        self
    }

    /// Adds a body paragraph with explicit runs.
    pub fn with_runs(mut self, runs: Vec<Run>) -> Self {
        self.doc.paragraphs.push(Paragraph::new(runs));
        self
    }

    /// Adds a table where each cell holds one single-run paragraph.
    pub fn with_table(mut self, rows: &[&[&str]]) -> Self {
        self.doc.tables.push(simple_table(rows));
        self
    }

    /// Adds a prepared table.
    pub fn with_built_table(mut self, table: Table) -> Self {
        self.doc.tables.push(table);
        self
    }

    pub fn build(self) -> WordDocument {
        self.doc
    }
}

/// Table where each cell holds one single-run paragraph.
pub fn simple_table(rows: &[&[&str]]) -> Table {
    Table::new(
        rows.iter()
            .map(|cells| {
                Row::new(
                    cells
                        .iter()
                        .map(|text| Cell::new(vec![Paragraph::from_texts(&[*text])]))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Builder for slide deck test documents.
#[derive(Debug, Clone, Default)]
pub struct TestDeckBuilder {
    deck: Presentation,
}

impl TestDeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slide with the given shapes.
    pub fn with_slide(mut self, shapes: Vec<Shape>) -> Self {
        self.deck.slides.push(Slide::new(shapes));
        self
    }

    pub fn build(self) -> Presentation {
        self.deck
    }
}

/// Text shape holding one paragraph per entry.
pub fn text_shape(name: &str, paragraphs: &[&[&str]]) -> Shape {
    Shape::with_text(
        name,
        paragraphs.iter().map(|runs| Paragraph::from_texts(*runs)).collect(),
    )
}

/// A name split across a bold/italic boundary mid-word.
pub fn styled_name_paragraph() -> Paragraph {
    Paragraph::new(vec![
        Run::text("Signed: "),
        Run::text("Jo").with_format(RunFormat::bold()),
        Run::text("hn Sm").with_format(RunFormat::italic()),
        Run::text("ith"),
        Run::text(", CFO"),
    ])
}

/// Document covering body text, a table, and a nested table.
pub fn contract_document() -> WordDocument {
    let nested = simple_table(&[&["Witness", "Mary Major"]]);
    TestDocBuilder::new()
        .with_paragraph(&["This agreement is made with ", "Jane Doe", "."])
        .with_paragraph(&[""])
        .with_paragraph(&["Contact: ", "555-", "0100"])
        .with_table(&[&["Name", "Jane Doe"], &["Phone", "555-0100"]])
        .with_built_table(Table::new(vec![Row::new(vec![
            Cell::new(vec![Paragraph::from_texts(&["Signatures"])]).with_table(nested),
        ])]))
        .build()
}
