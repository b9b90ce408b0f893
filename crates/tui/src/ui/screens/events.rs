use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use api_types::{CategoryType, event::EventView};

use crate::{
    app::{AppState, EventsMode, SettingsTab},
    ui::{
        components::{card::Card, money::styled_amount},
        screens::{centered_rect, field_line},
        theme::Theme,
    },
};

use crate::app::forms::{EventField, EventForm};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);

    match state.events.mode {
        EventsMode::List => {}
        EventsMode::CreateDetails => render_create_details(frame, area, state, &theme),
        EventsMode::CreateCategories => render_create_categories(frame, area, state, &theme),
        EventsMode::Settings => render_settings(frame, area, state, &theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let sort = if state.events.sort_by_status {
        "Status"
    } else {
        "Date"
    };

    let mut line = vec![
        Span::styled(
            "Event Budget Tracker",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Sort", Style::default().fg(theme.dim)),
        Span::raw(format!(": {sort}   ")),
        Span::styled(state.base_url.as_str(), Style::default().fg(theme.text_muted)),
    ];

    if let Some(err) = &state.events.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.events.items.is_empty() {
        let block = Block::default().borders(Borders::ALL).title(" Events ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No events found. Press a to create your first event.",
                Style::default().fg(theme.dim),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            inner,
        );
        return;
    }

    let items = state
        .events
        .items
        .iter()
        .map(|event| ListItem::new(event_line(event, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.events.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Events "))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn event_line<'a>(event: &'a EventView, theme: &Theme) -> Line<'a> {
    let venue = event.venue.as_deref().unwrap_or("Venue not set");
    let start = event
        .start_date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Not set".to_string());
    let end = event
        .end_date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Not set".to_string());

    Line::from(vec![
        Span::styled(
            format!("{:<28}", event.name),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("{:<10}", event.status.as_str()),
            Style::default().fg(theme.status_color(event.status)),
        ),
        Span::styled(
            format!("{:<22}", venue),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!("{start} - {end}  "),
            Style::default().fg(theme.text_muted),
        ),
        styled_amount(event.allocated_budget_minor, theme),
    ])
}

fn form_lines<'a>(form: &'a EventForm, theme: &Theme) -> Vec<Line<'a>> {
    vec![
        field_line(
            "Event Name *",
            &form.name,
            form.focus == EventField::Name,
            theme,
        ),
        field_line(
            "Allocated Budget (₱)",
            &form.budget,
            form.focus == EventField::Budget,
            theme,
        ),
        field_line("Venue", &form.venue, form.focus == EventField::Venue, theme),
        field_line(
            "Start Date",
            &form.start_date,
            form.focus == EventField::StartDate,
            theme,
        ),
        field_line(
            "End Date",
            &form.end_date,
            form.focus == EventField::EndDate,
            theme,
        ),
        field_line(
            "Status (↑/↓)",
            form.status.as_str(),
            form.focus == EventField::Status,
            theme,
        ),
    ]
}

fn render_create_details(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rect = centered_rect(area, 60, 12);
    frame.render_widget(Clear, rect);

    let card = Card::new("Add Event (1/2)", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let mut lines = form_lines(&state.events.create_form, theme);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next · Enter continue · Esc cancel",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_create_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let step = &state.events.create_categories;
    let rect = centered_rect(area, 60, (10 + step.drafts.len()).min(20) as u16);
    frame.render_widget(Clear, rect);

    let card = Card::new("Add Event (2/2) — Categories", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let kind_style = match step.kind {
        CategoryType::Income => Style::default().fg(theme.positive),
        CategoryType::Expense => Style::default().fg(theme.negative),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Kind (Tab): ", Style::default().fg(theme.dim)),
            Span::styled(format!("[{}]", step.kind.as_str()), kind_style),
        ]),
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(theme.dim)),
            Span::styled(step.input.as_str(), Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ]),
        Line::from(""),
    ];

    for draft in &step.drafts {
        let style = match draft.kind {
            CategoryType::Income => Style::default().fg(theme.positive),
            CategoryType::Expense => Style::default().fg(theme.negative),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", draft.kind.as_str()), style),
            Span::styled(draft.name.as_str(), Style::default().fg(theme.text)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter add · Enter on empty name create event · Backspace remove · Esc back",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_settings(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let settings = &state.events.settings;
    let rect = centered_rect(area, 64, 16);
    frame.render_widget(Clear, rect);

    let card = Card::new("Event Settings", theme);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let mut lines: Vec<Line> = Vec::new();

    // Tab strip
    let mut tab_spans = Vec::new();
    for tab in [
        SettingsTab::Basic,
        SettingsTab::Categories,
        SettingsTab::Danger,
    ] {
        let style = if tab == settings.tab {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        tab_spans.push(Span::styled(format!(" {} ", tab.label()), style));
        tab_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(tab_spans));
    lines.push(Line::from(Span::styled(
        "←/→ switch tab",
        Style::default().fg(theme.dim),
    )));
    lines.push(Line::from(""));

    match settings.tab {
        SettingsTab::Basic => {
            lines.extend(form_lines(&settings.form, theme));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Tab next · Enter save · Esc close",
                Style::default().fg(theme.dim),
            )));
        }
        SettingsTab::Categories => {
            let kind_style = match settings.category_kind {
                CategoryType::Income => Style::default().fg(theme.positive),
                CategoryType::Expense => Style::default().fg(theme.negative),
            };
            lines.push(Line::from(vec![
                Span::styled("New (Tab kind): ", Style::default().fg(theme.dim)),
                Span::styled(format!("[{}] ", settings.category_kind.as_str()), kind_style),
                Span::styled(settings.category_input.as_str(), Style::default().fg(theme.text)),
                Span::styled("▏", Style::default().fg(theme.accent)),
            ]));
            lines.push(Line::from(""));

            if settings.categories.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No categories yet.",
                    Style::default().fg(theme.dim),
                )));
            }
            for (i, category) in settings.categories.iter().enumerate() {
                let style = match category.kind {
                    CategoryType::Income => Style::default().fg(theme.positive),
                    CategoryType::Expense => Style::default().fg(theme.negative),
                };
                let marker = if i == settings.selected_category {
                    "» "
                } else {
                    "  "
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(format!("[{}] ", category.kind.as_str()), style),
                    Span::styled(category.name.as_str(), Style::default().fg(theme.text)),
                ]));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter add · ↑/↓ select · Del delete · Esc close",
                Style::default().fg(theme.dim),
            )));
        }
        SettingsTab::Danger => {
            lines.push(Line::from(Span::styled(
                "Deleting an event removes its categories and entries.",
                Style::default().fg(theme.warning),
            )));
            lines.push(Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(theme.warning),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Password: ", Style::default().fg(theme.dim)),
                Span::styled(
                    "*".repeat(settings.delete_password.chars().count()),
                    Style::default().fg(theme.text),
                ),
                Span::styled("▏", Style::default().fg(theme.accent)),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter admin password to confirm deletion · Enter delete · Esc close",
                Style::default().fg(theme.dim),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
