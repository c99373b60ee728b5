//! Word-processing adapter: body paragraphs, then tables, recursing into
//! tables nested in cells.

use super::{DocumentKind, ParagraphContainer};
use crate::domain::{CellCoord, Paragraph, ParagraphLocation, Table, WordDocument};

impl ParagraphContainer for WordDocument {
    fn kind(&self) -> DocumentKind {
        DocumentKind::WordProcessing
    }

    fn for_each_paragraph<F>(&mut self, mut f: F)
    where
        F: FnMut(ParagraphLocation, &mut Paragraph),
    {
        for (paragraph, para) in self.paragraphs.iter_mut().enumerate() {
            f(ParagraphLocation::Body { paragraph }, para);
        }

        let mut path = Vec::new();
        visit_tables(&mut self.tables, &mut path, &mut f);
    }
}

fn visit_tables<F>(tables: &mut [Table], path: &mut Vec<CellCoord>, f: &mut F)
where
    F: FnMut(ParagraphLocation, &mut Paragraph),
{
    for (table_idx, table) in tables.iter_mut().enumerate() {
        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            for (cell_idx, cell) in row.cells.iter_mut().enumerate() {
                path.push(CellCoord {
                    table: table_idx,
                    row: row_idx,
                    cell: cell_idx,
                });

                for (paragraph, para) in cell.paragraphs.iter_mut().enumerate() {
                    f(
                        ParagraphLocation::TableCell {
                            path: path.clone(),
                            paragraph,
                        },
                        para,
                    );
                }
                visit_tables(&mut cell.tables, path, f);

                path.pop();
            }
        }
    }
}
