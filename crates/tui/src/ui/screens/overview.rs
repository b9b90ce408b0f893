use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::{compute_totals, count_entries, count_reimbursements, expense_distribution};

use crate::{
    app::{AppState, format_amount},
    ui::{
        components::{card::Card, card::StatCard, charts},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let Some(data) = &state.data else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No event loaded. Press r to refresh.",
                Style::default().fg(theme.dim),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            area,
        );
        return;
    };

    let totals = compute_totals(&data.entries, &data.categories);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    // Financial overview cards
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(layout[0]);

    StatCard::new(
        "Allocated Budget",
        format_amount(data.event.allocated_budget_minor),
        &theme,
    )
    .value_color(theme.accent)
    .render(frame, cards[0]);

    StatCard::new("Onhand Cash", format_amount(totals.onhand_cash_minor), &theme)
        .value_color(theme.positive)
        .render(frame, cards[1]);

    StatCard::new(
        "Total Spent",
        format_amount(totals.total_expenses_minor),
        &theme,
    )
    .value_color(theme.negative)
    .render(frame, cards[2]);

    let left_color = if totals.left_to_spend_minor >= 0 {
        theme.warning
    } else {
        theme.negative
    };
    StatCard::new(
        "Left to Spend",
        format_amount(totals.left_to_spend_minor),
        &theme,
    )
    .value_color(left_color)
    .render(frame, cards[3]);

    let ending_color = if totals.ending_balance_minor >= 0 {
        theme.positive
    } else {
        theme.negative
    };
    StatCard::new(
        "Ending Balance",
        format_amount(totals.ending_balance_minor),
        &theme,
    )
    .value_color(ending_color)
    .render(frame, cards[4]);

    // Cash flow chart + quick stats
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);

    let chart_card = Card::new("Cash Flow Summary", &theme);
    let chart_inner = chart_card.inner(panels[0]);
    chart_card.render_frame(frame, panels[0]);
    let slices = expense_distribution(&data.entries, &data.categories);
    charts::render_distribution(frame, chart_inner, &slices, &theme);

    render_quick_stats(frame, panels[1], state, &theme);
}

fn render_quick_stats(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(data) = &state.data else { return };

    let counts = count_entries(&data.entries, &data.categories);
    let reimbursements = count_reimbursements(&data.entries);

    let card = Card::new("Quick Stats", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let row = |label: &str, value: String, color| {
        Line::from(vec![
            Span::styled(format!("{label:<26}"), Style::default().fg(theme.dim)),
            Span::styled(value, Style::default().fg(color)),
        ])
    };

    let lines = vec![
        row("Total Entries:", counts.total.to_string(), theme.text),
        row("Income Entries:", counts.income.to_string(), theme.positive),
        row(
            "Expense Entries:",
            counts.expense.to_string(),
            theme.negative,
        ),
        row(
            "Pending Reimbursements:",
            reimbursements.pending.to_string(),
            theme.warning,
        ),
        row(
            "Completed Reimbursements:",
            reimbursements.completed.to_string(),
            theme.positive,
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
