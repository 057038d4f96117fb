//! Variables panel: the Name/Value/Type table over the flattened tree.

use super::constants::{
    marker, INDENT_WIDTH, NAME_COLUMN_PERCENT, TYPE_COLUMN_PERCENT, VALUE_COLUMN_PERCENT,
};
use super::styles::TreeStyles;
use crate::state::{AppState, Row};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row as TableRow, Table},
    Frame,
};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_SPACING: u16 = 1;

fn column_constraints() -> [Constraint; 3] {
    [
        Constraint::Percentage(NAME_COLUMN_PERCENT),
        Constraint::Percentage(VALUE_COLUMN_PERCENT),
        Constraint::Percentage(TYPE_COLUMN_PERCENT),
    ]
}

/// Truncate `text` to `max_width` display columns, ending with `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if text.width() <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(max_width + 2);
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    Cow::Owned(out)
}

/// Name column text: indentation, marker and name.
pub fn name_cell_text(row: &Row) -> String {
    let indent = " ".repeat(row.depth * INDENT_WIDTH);
    format!("{indent}{} {}", marker(row.expandable, row.expanded), row.name)
}

/// Render the rows visible at the current scroll offset.
pub fn render_variables(frame: &mut Frame, area: Rect, state: &AppState, rows: &[Row], styles: &TreeStyles) {
    let block = Block::default()
        .title(format!(" {} ", state.title()))
        .borders(Borders::ALL)
        .border_style(styles.border);
    let inner = block.inner(area);

    let widths = Layout::horizontal(column_constraints())
        .spacing(COLUMN_SPACING)
        .split(inner);
    let (name_width, value_width, type_width) = (
        usize::from(widths[0].width),
        usize::from(widths[1].width),
        usize::from(widths[2].width),
    );

    let body_height = usize::from(inner.height.saturating_sub(1));
    let offset = state.tree.scroll_offset().min(rows.len());
    let cursor = state.tree.cursor();

    let table_rows: Vec<TableRow> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(body_height)
        .map(|(index, row)| {
            let mut style = styles.for_row(row);
            if index == cursor {
                style = style.patch(styles.cursor);
            }
            let name = name_cell_text(row);
            TableRow::new(vec![
                Cell::from(truncate_to_width(&name, name_width).into_owned()),
                Cell::from(truncate_to_width(&row.summary, value_width).into_owned()),
                Cell::from(Span::styled(
                    truncate_to_width(&row.type_name, type_width).into_owned(),
                    styles.type_column,
                )),
            ])
            .style(style)
        })
        .collect();

    let header = TableRow::new(vec!["Name", "Value", "Type"]).style(styles.table_header);

    let table = Table::new(table_rows, column_constraints())
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(block);

    frame.render_widget(table, area);
}

// ===== Tests =====
