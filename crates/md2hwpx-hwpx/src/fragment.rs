//! Rendered content fragments
//!
//! Fragments are the renderer's output: paragraphs and tables whose
//! formatting has already been resolved to registry IDs. The packager turns
//! them into `Contents/section0.xml`.

/// A span of text sharing one character property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Character property ID
    pub char_pr: usize,
    pub text: String,
}

/// A paragraph bound to registry IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph ID, unique within one render
    pub id: u32,
    /// Paragraph property ID
    pub para_pr: usize,
    pub runs: Vec<Run>,
}

/// One table cell with its single content paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub row: usize,
    pub col: usize,
    /// Whether the cell belongs to a header row
    pub header: bool,
    /// Cell width in HWPUNIT
    pub width: i32,
    /// Cell height in HWPUNIT
    pub height: i32,
    pub paragraph: Paragraph,
}

/// A table grid; every row holds exactly `col_count` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Object ID of the table control
    pub id: u32,
    pub row_count: usize,
    pub col_count: usize,
    /// Total width in HWPUNIT
    pub width: i32,
    /// Total height in HWPUNIT
    pub height: i32,
    pub rows: Vec<Vec<TableCell>>,
}

/// A table together with the paragraph that anchors it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFragment {
    /// ID of the anchoring paragraph
    pub id: u32,
    /// Paragraph property of the anchoring paragraph
    pub para_pr: usize,
    /// Character property of the anchoring run
    pub char_pr: usize,
    pub table: Table,
}

/// One top-level construct of the content part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Paragraph(Paragraph),
    Table(TableFragment),
}

impl Fragment {
    /// Highest paragraph ID used by this fragment, including cell paragraphs
    pub fn max_paragraph_id(&self) -> u32 {
        match self {
            Fragment::Paragraph(p) => p.id,
            Fragment::Table(t) => t
                .table
                .rows
                .iter()
                .flatten()
                .map(|cell| cell.paragraph.id)
                .fold(t.id, u32::max),
        }
    }

    /// Every character property ID referenced by this fragment
    pub fn char_refs(&self) -> Vec<usize> {
        match self {
            Fragment::Paragraph(p) => p.runs.iter().map(|run| run.char_pr).collect(),
            Fragment::Table(t) => {
                let mut refs = vec![t.char_pr];
                for cell in t.table.rows.iter().flatten() {
                    refs.extend(cell.paragraph.runs.iter().map(|run| run.char_pr));
                }
                refs
            }
        }
    }

    /// Every paragraph property ID referenced by this fragment
    pub fn para_refs(&self) -> Vec<usize> {
        match self {
            Fragment::Paragraph(p) => vec![p.para_pr],
            Fragment::Table(t) => std::iter::once(t.para_pr)
                .chain(t.table.rows.iter().flatten().map(|cell| cell.paragraph.para_pr))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(id: u32, para_pr: usize, char_pr: usize) -> Paragraph {
        Paragraph {
            id,
            para_pr,
            runs: vec![Run {
                char_pr,
                text: "x".to_string(),
            }],
        }
    }

    fn table_fragment() -> TableFragment {
        let cell = |col, id| TableCell {
            row: 0,
            col,
            header: true,
            width: 21260,
            height: 2886,
            paragraph: paragraph(id, 2, 3),
        };
        TableFragment {
            id: 4,
            para_pr: 0,
            char_pr: 0,
            table: Table {
                id: 1001,
                row_count: 1,
                col_count: 2,
                width: 42520,
                height: 2886,
                rows: vec![vec![cell(0, 2), cell(1, 3)]],
            },
        }
    }

    #[test]
    fn test_max_paragraph_id() {
        assert_eq!(Fragment::Paragraph(paragraph(7, 0, 0)).max_paragraph_id(), 7);
        assert_eq!(Fragment::Table(table_fragment()).max_paragraph_id(), 4);
    }

    #[test]
    fn test_refs_include_cells() {
        let fragment = Fragment::Table(table_fragment());
        assert_eq!(fragment.char_refs(), vec![0, 3, 3]);
        assert_eq!(fragment.para_refs(), vec![0, 2, 2]);
    }
}
