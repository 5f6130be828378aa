//! Table rendering
//!
//! A table becomes one [`TableFragment`]: the grid itself plus the paragraph
//! that anchors it in the text flow. Every row is normalized to the column
//! count of the first non-empty row: short rows are padded with blank cells
//! and surplus cells are dropped.

use tracing::trace;

use md2hwpx_ast::Node;

use crate::constants::{CONTENT_WIDTH, TABLE_ID_OFFSET, TABLE_ROW_HEIGHT};
use crate::fragment::{Fragment, Paragraph, Table, TableCell, TableFragment};
use crate::preset::StyleName;
use crate::render::{HwpxRenderer, RenderState, Span};
use crate::style::ParaAlign;

/// Split `total` into `columns` widths
///
/// Every column gets `total / columns`; the last one also takes the
/// remainder so the widths always add up to `total`.
pub fn column_widths(total: i32, columns: usize) -> Vec<i32> {
    let Ok(count) = i32::try_from(columns) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    let base = total / count;
    let mut widths = vec![base; columns];
    if let Some(last) = widths.last_mut() {
        *last = total - base * (count - 1);
    }
    widths
}

impl HwpxRenderer {
    pub(crate) fn render_table(&self, rows: &[Node], st: &mut RenderState) -> Vec<Fragment> {
        let rows: Vec<&[Node]> = rows
            .iter()
            .filter_map(|row| match row {
                Node::TableRow { cells } if !cells.is_empty() => Some(cells.as_slice()),
                other => {
                    trace!(kind = other.kind_name(), "skipping empty or malformed table row");
                    None
                }
            })
            .collect();
        let Some(first) = rows.first() else {
            return Vec::new();
        };

        let col_count = first.len();
        let widths = column_widths(CONTENT_WIDTH, col_count);
        let table_id = st.last_paragraph_id() + TABLE_ID_OFFSET;

        let mut grid = Vec::with_capacity(rows.len());
        for (row_index, cells) in rows.iter().enumerate() {
            let row_header = matches!(cells.first(), Some(Node::TableCell { header: true, .. }));
            let mut row = Vec::with_capacity(col_count);
            for (col_index, &width) in widths.iter().enumerate() {
                let (paragraph, header) = self.render_cell(cells.get(col_index), row_header, st);
                row.push(TableCell {
                    row: row_index,
                    col: col_index,
                    header,
                    width,
                    height: TABLE_ROW_HEIGHT,
                    paragraph,
                });
            }
            grid.push(row);
        }

        let row_count = grid.len();
        let table = Table {
            id: table_id,
            row_count,
            col_count,
            width: CONTENT_WIDTH,
            height: TABLE_ROW_HEIGHT * i32::try_from(row_count).unwrap_or(i32::MAX),
            rows: grid,
        };

        let body = self.styles().body();
        let id = st.next_paragraph_id();
        let para_pr = st.registry.register_paragraph_style(&body.para);
        let char_pr = st.registry.register_character_style(&body.font);
        st.preview.push("[Table]".to_string());

        vec![Fragment::Table(TableFragment {
            id,
            para_pr,
            char_pr,
            table,
        })]
    }

    /// Render one cell's paragraph; `None` is a padding cell for a short row
    fn render_cell(&self, cell: Option<&Node>, row_header: bool, st: &mut RenderState) -> (Paragraph, bool) {
        let (header, align, children) = match cell {
            Some(Node::TableCell {
                align,
                header,
                children,
            }) => (*header, *align, children.as_slice()),
            Some(other) => (row_header, None, std::slice::from_ref(other)),
            None => (row_header, None, &[][..]),
        };

        let style = self.styles().style(if header {
            StyleName::TableHeader
        } else {
            StyleName::TableBody
        });
        let para = match align {
            Some(align) => style.para.derive(|p| p.align = ParaAlign::from(align)),
            None => style.para.clone(),
        };

        let mut spans = Vec::new();
        for child in children {
            self.collect_inline(child, &style.font, &mut spans);
        }
        if spans.is_empty() {
            spans.push(Span::new(" ", &style.font));
        }
        (st.paragraph(spans, &para), header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2hwpx_ast::{Alignment, Document};

    fn cell(text: &str, header: bool) -> Node {
        Node::TableCell {
            align: None,
            header,
            children: vec![Node::text(text)],
        }
    }

    fn row(cells: Vec<Node>) -> Node {
        Node::TableRow { cells }
    }

    fn render(table: Node) -> (Vec<Fragment>, Vec<String>) {
        let output = HwpxRenderer::default().render_fragments(&Document::from_nodes(vec![table]));
        (output.fragments, output.preview)
    }

    fn table_of(fragments: &[Fragment]) -> &TableFragment {
        match &fragments[0] {
            Fragment::Table(t) => t,
            Fragment::Paragraph(_) => panic!("expected a table"),
        }
    }

    #[test]
    fn test_column_widths_cover_content_width() {
        assert_eq!(column_widths(42520, 2), vec![21260, 21260]);
        let three = column_widths(42520, 3);
        assert_eq!(three, vec![14173, 14173, 14174]);
        assert_eq!(three.iter().sum::<i32>(), 42520);
        assert!(column_widths(42520, 0).is_empty());
    }

    #[test]
    fn test_simple_table_geometry() {
        let table = Node::Table {
            rows: vec![
                row(vec![cell("A", true), cell("B", true)]),
                row(vec![cell("1", false), cell("2", false)]),
            ],
        };
        let (fragments, preview) = render(table);
        assert_eq!(fragments.len(), 1);
        let t = table_of(&fragments);
        assert_eq!(t.table.row_count, 2);
        assert_eq!(t.table.col_count, 2);
        assert_eq!(t.table.width, CONTENT_WIDTH);
        assert_eq!(t.table.height, 2 * TABLE_ROW_HEIGHT);
        assert_eq!(t.table.id, TABLE_ID_OFFSET);
        assert!(t.table.rows[0][0].header);
        assert!(!t.table.rows[1][1].header);
        assert_eq!(t.table.rows[1][1].paragraph.runs[0].text, "2");
        assert_eq!(t.id, 5);
        assert_eq!(preview, vec!["[Table]"]);
    }

    #[test]
    fn test_short_rows_padded_and_long_rows_truncated() {
        let table = Node::Table {
            rows: vec![
                row(vec![cell("A", true), cell("B", true), cell("C", true)]),
                row(vec![cell("1", false)]),
                row(vec![
                    cell("x", false),
                    cell("y", false),
                    cell("z", false),
                    cell("overflow", false),
                ]),
            ],
        };
        let (fragments, _) = render(table);
        let t = table_of(&fragments);
        assert!(t.table.rows.iter().all(|r| r.len() == 3));
        let padded = &t.table.rows[1][2];
        assert_eq!(padded.paragraph.runs[0].text, " ");
        assert!(!padded.header);
        assert_eq!(t.table.rows[2][2].paragraph.runs[0].text, "z");
    }

    #[test]
    fn test_empty_rows_dropped_and_empty_table_renders_nothing() {
        let (fragments, preview) = render(Node::Table {
            rows: vec![row(vec![]), Node::paragraph("not a row")],
        });
        assert!(fragments.is_empty());
        assert!(preview.is_empty());

        let (fragments, _) = render(Node::Table {
            rows: vec![row(vec![]), row(vec![cell("only", false)])],
        });
        assert_eq!(table_of(&fragments).table.row_count, 1);
    }

    #[test]
    fn test_cell_alignment_and_blank_cells() {
        let table = Node::Table {
            rows: vec![row(vec![
                Node::TableCell {
                    align: Some(Alignment::Right),
                    header: false,
                    children: vec![Node::text("r")],
                },
                Node::TableCell {
                    align: None,
                    header: false,
                    children: vec![],
                },
            ])],
        };
        let output = HwpxRenderer::default().render_fragments(&Document::from_nodes(vec![table]));
        let t = table_of(&output.fragments);
        let paras = output.registry.paragraph_styles();
        assert_eq!(paras[t.table.rows[0][0].paragraph.para_pr].align, ParaAlign::Right);
        assert_eq!(paras[t.table.rows[0][1].paragraph.para_pr].align, ParaAlign::Left);
        assert_eq!(t.table.rows[0][1].paragraph.runs[0].text, " ");
    }
}
