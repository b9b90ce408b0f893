use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use engine::{
    BudgetEntry, CategoryFilter, Classification, EditState, ReimbursementStatus, SortField,
    TypeFilter, classify, visible_entries,
};

use crate::{
    app::{AppState, EntriesMode, format_amount},
    ui::{
        components::card::Card,
        screens::{centered_rect, field_line},
        theme::Theme,
    },
};

use crate::app::forms::EntryField;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let Some(data) = &state.data else {
        return;
    };

    let rows = visible_entries(&data.entries, &data.categories, &state.entries_ui.view);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter/sort header
            Constraint::Length(1), // column header
            Constraint::Min(0),    // rows
            Constraint::Length(1), // edit line / row count
        ])
        .split(area);

    render_filters(frame, layout[0], state, rows.len(), data.entries.len(), &theme);
    render_columns(frame, layout[1], state, &theme);
    render_rows(frame, layout[2], state, data, &rows, &theme);
    render_footer(frame, layout[3], state, rows.len(), data.entries.len(), &theme);

    match state.entries_ui.mode {
        EntriesMode::Add => render_add_form(frame, area, state, data, &theme),
        EntriesMode::ConfirmDelete => render_confirm_delete(frame, area, &theme),
        EntriesMode::Upload => render_upload(frame, area, state, &theme),
        _ => {}
    }
}

fn render_filters(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    visible: usize,
    total: usize,
    theme: &Theme,
) {
    let view = &state.entries_ui.view;
    let searching = state.entries_ui.mode == EntriesMode::Search;

    let type_label = match view.type_filter {
        TypeFilter::All => "All Types",
        TypeFilter::Income => "Income",
        TypeFilter::Expense => "Expense",
    };
    let category_label = match view.category_filter {
        CategoryFilter::All => "All Categories".to_string(),
        CategoryFilter::One(id) => state
            .data
            .as_ref()
            .and_then(|data| data.categories.iter().find(|cat| cat.id == id))
            .map(|cat| cat.name.clone())
            .unwrap_or_else(|| "?".to_string()),
    };

    let mut spans = vec![
        Span::styled("Search", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(view.search.as_str(), Style::default().fg(theme.text)),
    ];
    if searching {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    spans.extend([
        Span::raw("   "),
        Span::styled("Type", Style::default().fg(theme.dim)),
        Span::raw(format!(": {type_label}   ")),
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(format!(": {category_label}   ")),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(
            ": {} {}   ",
            view.sort_field.label(),
            view.sort_direction.arrow()
        )),
        Span::styled(
            format!("{visible}/{total}"),
            Style::default().fg(theme.text_muted),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_columns(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let view = &state.entries_ui.view;
    let column = |index: &str, field: SortField| {
        let active = view.sort_field == field;
        let arrow = if active {
            view.sort_direction.arrow()
        } else {
            ""
        };
        let style = if active {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        (format!("{index} {}{arrow}", field.label()), style)
    };

    let (date, date_style) = column("1", SortField::EntryDate);
    let (cat, cat_style) = column("2", SortField::CategoryName);
    let (item, item_style) = column("3", SortField::ItemName);
    let (amount, amount_style) = column("4", SortField::Amount);

    let line = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{date:<13}"), date_style),
        Span::styled(format!("{cat:<16}"), cat_style),
        Span::styled(format!("{item:<26}"), item_style),
        Span::styled(format!("{amount:<14}"), amount_style),
        Span::styled(format!("{:<14}", "Payment"), Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:<18}", "Reimbursement"),
            Style::default().fg(theme.dim),
        ),
        Span::styled("Receipt", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_rows(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    data: &crate::app::EventData,
    rows: &[&BudgetEntry],
    theme: &Theme,
) {
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No entries found matching your filters.",
                Style::default().fg(theme.dim),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            area,
        );
        return;
    }

    let items = rows
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, data, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.entries_ui.selected));

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_line<'a>(entry: &'a BudgetEntry, data: &crate::app::EventData, theme: &Theme) -> Line<'a> {
    let classification = classify(entry, &data.categories);
    let category_name = data
        .categories
        .iter()
        .find(|cat| cat.id == entry.category_id)
        .map(|cat| cat.name.as_str())
        .unwrap_or("—");
    let category_style = match classification {
        Classification::Income => Style::default().fg(theme.positive),
        Classification::Expense => Style::default().fg(theme.negative),
        Classification::Unclassified => Style::default().fg(theme.dim),
    };

    let reimbursement = if entry.to_be_reimbursed {
        let label = match entry.reimbursement_status {
            ReimbursementStatus::Pending => "Pending",
            ReimbursementStatus::Completed => "Completed",
        };
        match &entry.reimbursement_source {
            Some(source) => format!("{label} ({source})"),
            None => label.to_string(),
        }
    } else {
        "No".to_string()
    };
    let reimbursement_style = if entry.to_be_reimbursed {
        match entry.reimbursement_status {
            ReimbursementStatus::Pending => Style::default().fg(theme.warning),
            ReimbursementStatus::Completed => Style::default().fg(theme.positive),
        }
    } else {
        Style::default().fg(theme.dim)
    };

    let receipt = if entry.receipt.is_some() { "✓" } else { "-" };

    Line::from(vec![
        Span::styled(
            format!("{:<13}", entry.entry_date.format("%Y-%m-%d")),
            Style::default().fg(theme.text),
        ),
        Span::styled(format!("{:<16}", truncate(category_name, 15)), category_style),
        Span::styled(
            format!("{:<26}", truncate(&entry.item_name, 25)),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("{:<14}", format_amount(entry.amount_minor)),
            category_style,
        ),
        Span::styled(
            format!(
                "{:<14}",
                truncate(entry.payment_method.as_deref().unwrap_or("-"), 13)
            ),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(format!("{:<18}", truncate(&reimbursement, 17)), reimbursement_style),
        Span::styled(receipt, Style::default().fg(theme.accent)),
    ])
}

fn render_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    visible: usize,
    total: usize,
    theme: &Theme,
) {
    if let EditState::Editing { locus, buffer } = &state.entries_ui.edit {
        let line = Line::from(vec![
            Span::styled("Edit ", Style::default().fg(theme.accent)),
            Span::styled(locus.field.label(), Style::default().fg(theme.accent)),
            Span::raw(": "),
            Span::styled(buffer.as_str(), Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent)),
            Span::styled(
                "  Enter save · Esc cancel",
                Style::default().fg(theme.dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Showing {visible} of {total} entries"),
            Style::default().fg(theme.dim),
        )),
        area,
    );
}

fn render_add_form(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    data: &crate::app::EventData,
    theme: &Theme,
) {
    let form = &state.entries_ui.form;
    let rect = centered_rect(area, 64, 16);
    frame.render_widget(Clear, rect);

    let card = Card::new("Add Budget Entry", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let category_label = form
        .category_idx
        .and_then(|idx| data.categories_raw.get(idx))
        .map(|cat| format!("[{}] {}", cat.kind.as_str(), cat.name))
        .unwrap_or_else(|| "Select category (↑/↓)".to_string());

    let mut lines = vec![
        field_line(
            "Category *",
            &category_label,
            form.focus == EntryField::Category,
            theme,
        ),
        field_line(
            "Item Name *",
            &form.item_name,
            form.focus == EntryField::ItemName,
            theme,
        ),
        field_line(
            "Amount (₱) *",
            &form.amount,
            form.focus == EntryField::Amount,
            theme,
        ),
        field_line(
            "Payment Method",
            &form.payment_method,
            form.focus == EntryField::PaymentMethod,
            theme,
        ),
        field_line(
            "Entry Date",
            &form.entry_date,
            form.focus == EntryField::EntryDate,
            theme,
        ),
        field_line(
            "Receipt Photo (path)",
            &form.receipt_path,
            form.focus == EntryField::ReceiptPath,
            theme,
        ),
        field_line(
            "To be reimbursed?",
            if form.to_be_reimbursed { "[x]" } else { "[ ]" },
            form.focus == EntryField::Reimbursed,
            theme,
        ),
    ];

    if form.to_be_reimbursed {
        lines.push(field_line(
            "Reimbursement Source",
            &form.reimbursement_source,
            form.focus == EntryField::ReimbursementSource,
            theme,
        ));
        lines.push(field_line(
            "Reimbursement Status",
            form.reimbursement_status.as_str(),
            form.focus == EntryField::ReimbursementStatus,
            theme,
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next · Space/↑/↓ toggle · Enter add · Esc cancel · Max 5MB image receipts",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm_delete(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let rect = centered_rect(area, 56, 7);
    frame.render_widget(Clear, rect);

    let card = Card::new("Delete Entry", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let lines = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this budget entry?",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(theme.warning),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_upload(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rect = centered_rect(area, 64, 7);
    frame.render_widget(Clear, rect);

    let card = Card::new("Upload Receipt", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let lines = vec![
        Line::from(vec![
            Span::styled("File path: ", Style::default().fg(theme.dim)),
            Span::styled(
                state.entries_ui.upload_path.as_str(),
                Style::default().fg(theme.text),
            ),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Image files up to 5MB · Enter upload · Esc cancel",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
