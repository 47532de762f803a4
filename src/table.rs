//! Box-drawn tables whose cells may hold other tables.

use crate::style::{Style, Styled};

/// One rendered line plus its width on screen (escape codes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub width: usize,
}

impl Line {
    fn blank() -> Self {
        Self {
            text: String::new(),
            width: 0,
        }
    }

    fn styled(text: &str, style: Style, colored: bool) -> Self {
        Self {
            text: style.paint(text, colored),
            width: text.chars().count(),
        }
    }
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    style: Style,
}

#[derive(Debug, Clone)]
pub enum Cell {
    /// Plain text takes the column's style, styled text keeps its own.
    Text { text: String, style: Option<Style> },
    Nested(Table),
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            style: None,
        }
    }

    fn lines(&self, column: &Column, colored: bool) -> Vec<Line> {
        match self {
            Cell::Text { text, style } => text
                .split('\n')
                .map(|l| Line::styled(l, style.unwrap_or(column.style), colored))
                .collect(),
            Cell::Nested(table) => table.render_lines(colored),
        }
    }
}

impl From<Styled> for Cell {
    fn from(s: Styled) -> Self {
        Cell::Text {
            text: s.text,
            style: Some(s.style),
        }
    }
}

impl From<Table> for Cell {
    fn from(t: Table) -> Self {
        Cell::Nested(t)
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    title: Option<Styled>,
    columns: Vec<Column>,
    show_header: bool,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// A table with one column per header, every column styled `style`.
    pub fn new(headers: &[&str], style: Style) -> Self {
        Self {
            title: None,
            columns: headers
                .iter()
                .map(|h| Column {
                    header: h.to_string(),
                    style,
                })
                .collect(),
            show_header: true,
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: Styled) -> Self {
        self.title = Some(title);
        self
    }

    pub fn without_header(mut self) -> Self {
        self.show_header = false;
        self
    }

    /// Rows longer than the header list grow the table by unstyled columns.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        while self.columns.len() < row.len() {
            self.columns.push(Column {
                header: String::new(),
                style: Style::Plain,
            });
        }
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn title(&self) -> Option<&Styled> {
        self.title.as_ref()
    }

    /// Text of the first column of every row that holds plain or styled text.
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row.first() {
                Some(Cell::Text { text, .. }) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn render(&self, colored: bool) -> Vec<String> {
        self.render_lines(colored)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    fn render_lines(&self, colored: bool) -> Vec<Line> {
        let header: Option<Vec<Vec<Line>>> = self.show_header.then(|| {
            self.columns
                .iter()
                .map(|c| vec![Line::styled(&c.header, Style::Header, colored)])
                .collect()
        });
        let body: Vec<Vec<Vec<Line>>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| match row.get(i) {
                        Some(cell) => cell.lines(column, colored),
                        None => vec![Line::blank()],
                    })
                    .collect()
            })
            .collect();

        let mut widths = vec![0; self.columns.len()];
        for row in header.iter().chain(body.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.iter().map(|l| l.width).max().unwrap_or(0);
                widths[i] = widths[i].max(w);
            }
        }

        let border = |s: &str| Style::Border.paint(s, colored);
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            let text = format!("{left}{}{right}", segments.join(mid));
            let width = text.chars().count();
            Line {
                text: border(&text),
                width,
            }
        };

        let mut out = Vec::new();
        let top = rule("┌", "┬", "┐");
        let total_width = top.width;

        if let Some(title) = &self.title {
            for part in title.text.split('\n') {
                if part.is_empty() {
                    out.push(Line::blank());
                    continue;
                }
                let pad = total_width.saturating_sub(part.chars().count()) / 2;
                let painted = title.style.paint(part, colored);
                out.push(Line {
                    text: format!("{}{painted}", " ".repeat(pad)),
                    width: pad + part.chars().count(),
                });
            }
        }

        out.push(top);
        if let Some(header) = &header {
            out.extend(row_lines(header, &widths, colored));
            out.push(rule("├", "┼", "┤"));
        }
        for row in &body {
            out.extend(row_lines(row, &widths, colored));
        }
        out.push(rule("└", "┴", "┘"));
        out
    }
}

fn row_lines(row: &[Vec<Line>], widths: &[usize], colored: bool) -> Vec<Line> {
    let height = row.iter().map(Vec::len).max().unwrap_or(1);
    let bar = Style::Border.paint("│", colored);
    let blank = Line::blank();
    (0..height)
        .map(|n| {
            let mut text = bar.clone();
            for (i, cell) in row.iter().enumerate() {
                let line = cell.get(n).unwrap_or(&blank);
                let pad = widths[i] - line.width;
                text.push(' ');
                text.push_str(&line.text);
                text.push_str(&" ".repeat(pad + 1));
                text.push_str(&bar);
            }
            let width = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
            Line { text, width }
        })
        .collect()
}
