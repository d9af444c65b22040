//! Selectable table result widget and column-width layout.

use crate::interpreter::{OnSelect, Selection};
use crate::tui::frame::{Line, Span, SpanStyle};
use crate::tui::settings;
use crate::tui::text::{fit_to_width, visible_width};
use crate::tui::widget::{pagination_line, Cursor, Nav, WidgetOutcome};
use crossterm::event::{KeyCode, KeyEvent};

/// Fit column widths into `width` terminal columns.
///
/// Every column gets an equal share of the row (minus gutter and cell
/// padding). Columns whose widest cell fits the share keep their natural
/// width; the leftover budget is split among the oversized columns in
/// proportion to their natural widths.
pub fn compute_column_widths(rows: &[Vec<String>], width: usize) -> Vec<usize> {
    let ncols = rows.first().map(Vec::len).unwrap_or(0);
    if ncols == 0 {
        return Vec::new();
    }

    let mut natural = vec![0usize; ncols];
    for row in rows {
        for (col, cell) in row.iter().take(ncols).enumerate() {
            natural[col] = natural[col].max(visible_width(cell));
        }
    }

    let available = width.saturating_sub(settings::ROW_GUTTER_WIDTH);
    let equal = (available / ncols).saturating_sub(2 * settings::CELL_PADDING);

    let small_sum: usize = natural.iter().filter(|&&w| w <= equal).sum();
    let big_sum: usize = natural.iter().filter(|&&w| w > equal).sum();
    if big_sum == 0 {
        return natural;
    }

    let remaining = (equal * ncols).saturating_sub(small_sum);
    natural
        .iter()
        .map(|&w| {
            if w <= equal {
                w
            } else {
                remaining * w / big_sum
            }
        })
        .collect()
}

pub struct TableWidget {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    on_select: Option<OnSelect<Vec<String>>>,
    interactive: bool,
    widths: Vec<usize>,
    cursor: Cursor,
    width: usize,
    height: usize,
}

impl TableWidget {
    /// `rows[0]` is the header. Data rows are padded or cut to its length.
    pub fn new(
        rows: Vec<Vec<String>>,
        on_select: Option<OnSelect<Vec<String>>>,
        width: usize,
        height: usize,
    ) -> Self {
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let ncols = header.len();
        let rows: Vec<Vec<String>> = rows
            .map(|mut row| {
                row.resize(ncols, String::new());
                row
            })
            .collect();

        let mut table = Self {
            header,
            rows,
            on_select,
            interactive: false,
            widths: Vec::new(),
            cursor: Cursor::default(),
            width,
            height,
        };
        table.relayout();
        table
    }

    /// Every row, unpaginated and without highlight.
    pub fn full(rows: Vec<Vec<String>>, width: usize) -> Vec<Line> {
        let height = rows.len() + settings::TABLE_RESERVED_ROWS;
        Self::new(rows, None, width, height).view()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn selected_row(&self) -> Option<&[String]> {
        self.rows.get(self.cursor.selected).map(Vec::as_slice)
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    fn relayout(&mut self) {
        let all: Vec<Vec<String>> = std::iter::once(self.header.clone())
            .chain(self.rows.iter().cloned())
            .collect();
        self.widths = compute_column_widths(&all, self.width);
        self.cursor.clamp(self.rows.len(), self.page_size());
    }

    fn page_size(&self) -> usize {
        self.height
            .saturating_sub(settings::TABLE_RESERVED_ROWS)
            .min(self.rows.len())
            .max(1)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> WidgetOutcome {
        if !self.interactive {
            return WidgetOutcome::Ignored;
        }
        if let Some(nav) = Nav::from_key(key) {
            let page = self.page_size();
            self.cursor.apply(nav, self.rows.len(), page);
            return WidgetOutcome::Updated;
        }
        if key.code != KeyCode::Enter {
            return WidgetOutcome::Ignored;
        }
        let (Some(callback), Some(row)) = (&self.on_select, self.selected_row()) else {
            return WidgetOutcome::Updated;
        };
        WidgetOutcome::Selected(Selection::Row {
            callback: callback.clone(),
            row: row.to_vec(),
        })
    }

    fn render_row(&self, cells: &[String]) -> String {
        let mut out = String::new();
        for (cell, &w) in cells.iter().zip(&self.widths) {
            out.push(' ');
            out.push_str(&fit_to_width(cell, w));
            out.push(' ');
        }
        out
    }

    pub fn view(&self) -> Vec<Line> {
        if self.header.is_empty() {
            return vec![Line::styled(
                format!("{}no rows", settings::ROW_GUTTER),
                SpanStyle::Dim,
            )];
        }

        let header = self.render_row(&self.header);
        let rule_width = visible_width(&header);
        let mut lines = vec![
            {
                let mut line = Line::plain(settings::ROW_GUTTER);
                line.push(Span::new(header, SpanStyle::Header));
                line
            },
            Line::styled(
                format!(
                    "{}{}",
                    settings::ROW_GUTTER,
                    settings::TABLE_RULE.to_string().repeat(rule_width)
                ),
                SpanStyle::Dim,
            ),
        ];

        let page = self.page_size();
        let end = (self.cursor.offset + page).min(self.rows.len());
        for pos in self.cursor.offset..end {
            let is_selected = self.interactive && pos == self.cursor.selected;
            let style = if is_selected {
                SpanStyle::Selected
            } else {
                SpanStyle::Plain
            };
            let mut line = Line::plain(settings::row_gutter(is_selected));
            line.push(Span::new(self.render_row(&self.rows[pos]), style));
            lines.push(line);
        }
        if let Some(footer) = pagination_line(self.cursor.offset, end - self.cursor.offset, self.rows.len()) {
            lines.push(footer);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::CommandResult;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn natural_widths_when_everything_fits() {
        let rows = vec![row(&["n", "name"]), row(&["1", "alpha"])];
        assert_eq!(compute_column_widths(&rows, 80), vec![1, 5]);
    }

    #[test]
    fn sole_oversized_column_takes_remaining_width() {
        // width 62: available 60, equal share 20 - 2 = 18 per column.
        let long = "x".repeat(100);
        let rows = vec![
            row(&["n", "col1", "col2"]),
            row(&["1", &long, "short"]),
        ];
        let widths = compute_column_widths(&rows, 62);
        assert_eq!(widths[0], 1);
        assert_eq!(widths[2], 5);
        assert_eq!(widths[1], 18 * 3 - 1 - 5);
    }

    #[test]
    fn oversized_columns_split_in_proportion() {
        // equal share is 18; budget left for the two big columns is 54 - 2.
        let rows = vec![
            row(&["id", "a", "b"]),
            row(&["10", &"x".repeat(30), &"y".repeat(90)]),
        ];
        let widths = compute_column_widths(&rows, 62);
        assert_eq!(widths, vec![2, 52 * 30 / 120, 52 * 90 / 120]);
    }

    #[test]
    fn rows_never_exceed_viewport() {
        let rows = vec![
            row(&["a", "b", "c"]),
            row(&[&"x".repeat(70), &"y".repeat(40), "z"]),
        ];
        let table = TableWidget::new(rows, None, 62, 20);
        for line in table.view() {
            assert!(line.width() <= 62, "row too wide: {:?}", line.text());
        }
    }

    #[test]
    fn inactive_table_renders_header_rule_and_rows() {
        let rows = vec![row(&["k", "v"]), row(&["a", "1"]), row(&["b"])];
        let table = TableWidget::new(rows, None, 40, 20);
        let texts: Vec<String> = table.view().iter().map(Line::text).collect();
        assert_eq!(texts, vec!["   k  v ", "  \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}", "   a  1 ", "   b    "]);
        assert_eq!(table.view(), table.view());
    }

    #[test]
    fn enter_on_focused_table_selects_row() {
        let callback: OnSelect<Vec<String>> =
            Arc::new(|r| Some(CommandResult::Simple(r.join(","))));
        let rows = vec![row(&["k", "v"]), row(&["a", "1"]), row(&["b", "2"])];
        let mut table = TableWidget::new(rows, Some(callback), 40, 20);

        assert!(matches!(table.handle_key(&key(KeyCode::Enter)), WidgetOutcome::Ignored));
        table.set_interactive(true);
        table.handle_key(&key(KeyCode::Char('j')));
        match table.handle_key(&key(KeyCode::Enter)) {
            WidgetOutcome::Selected(Selection::Row { row, .. }) => assert_eq!(row, vec!["b", "2"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn table_page_reserves_chrome_rows() {
        let mut rows = vec![row(&["n"])];
        rows.extend((0..20).map(|i| vec![i.to_string()]));
        let table = TableWidget::new(rows, None, 40, 10);
        // header + rule + 4 rows + footer
        assert_eq!(table.view().len(), 7);
        assert_eq!(TableWidget::full(
            std::iter::once(row(&["n"])).chain((0..20).map(|i| vec![i.to_string()])).collect(),
            40,
        ).len(), 22);
    }

    #[test]
    fn empty_table_renders_placeholder() {
        let table = TableWidget::new(Vec::new(), None, 40, 10);
        assert_eq!(table.view()[0].text(), "  no rows");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn column_widths_stay_within_viewport(
                rows in proptest::collection::vec(
                    proptest::collection::vec("[a-z]{0,60}", 3),
                    1..8
                ),
                width in 20usize..200,
            ) {
                let widths = compute_column_widths(&rows, width);
                prop_assert_eq!(widths.len(), 3);
                // Each column renders with one space of padding on each side.
                let total: usize = widths.iter().map(|w| w + 2).sum();
                prop_assert!(total <= width.saturating_sub(2));
            }
        }
    }
}
