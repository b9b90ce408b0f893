pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, EntriesMode, EventsMode, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Events => render_events_shell(frame, area, state),
        Screen::Event => render_event_shell(frame, area, state),
    }
}

fn render_events_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    screens::events::render(frame, layout[0], state);
    render_bottom_bar(frame, layout[1], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_event_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Overview => screens::overview::render(frame, layout[2], state),
        Section::Entries => screens::entries::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(data) = &state.data else {
        return;
    };
    let event = &data.event;

    let venue = event.venue.as_deref().unwrap_or("Venue not set");
    let dates = format!(
        "{} - {}",
        event
            .start_date
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| "Not set".to_string()),
        event
            .end_date
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| "Not set".to_string()),
    );
    let refresh = state.last_refresh.as_deref().unwrap_or("-");

    let line = Line::from(vec![
        Span::styled(
            event.name.as_str(),
            Style::default()
                .fg(theme.text)
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            event.status.as_str(),
            Style::default().fg(theme.status_color(event.status)),
        ),
        Span::raw("  "),
        Span::styled(venue, Style::default().fg(theme.text_muted)),
        Span::raw("  "),
        Span::styled(dates, Style::default().fg(theme.text_muted)),
        Span::raw("  "),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = get_context_hints(state, theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Context-specific keyboard hints for the current screen and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));

    match state.screen {
        Screen::Events => match state.events.mode {
            EventsMode::List => vec![
                key("Enter"),
                Span::raw(" open  "),
                key("a"),
                Span::raw(" add event  "),
                key("g"),
                Span::raw(" settings  "),
                key("s"),
                Span::raw(" sort  "),
                key("r"),
                Span::raw(" refresh  "),
                key("j/k"),
                Span::raw(" move"),
            ],
            EventsMode::CreateDetails => vec![
                key("Tab"),
                Span::raw(" next field  "),
                key("Enter"),
                Span::raw(" continue  "),
                key("Esc"),
                Span::raw(" cancel"),
            ],
            EventsMode::CreateCategories => vec![
                key("Tab"),
                Span::raw(" kind  "),
                key("Enter"),
                Span::raw(" add / create  "),
                key("Esc"),
                Span::raw(" back"),
            ],
            EventsMode::Settings => vec![
                key("←/→"),
                Span::raw(" tab  "),
                key("Enter"),
                Span::raw(" apply  "),
                key("Esc"),
                Span::raw(" close"),
            ],
        },
        Screen::Event => match state.section {
            Section::Overview => vec![
                key("e"),
                Span::raw(" entries  "),
                key("a"),
                Span::raw(" add entry  "),
                key("r"),
                Span::raw(" refresh  "),
                key("b"),
                Span::raw(" back"),
            ],
            Section::Entries => get_entries_hints(state, theme),
        },
    }
}

fn get_entries_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));

    match state.entries_ui.mode {
        EntriesMode::List => vec![
            key("/"),
            Span::raw(" search  "),
            key("c"),
            Span::raw(" category  "),
            key("y"),
            Span::raw(" type  "),
            key("1-4"),
            Span::raw(" sort  "),
            key("e"),
            Span::raw(" edit  "),
            key("t"),
            Span::raw(" reimb  "),
            key("u"),
            Span::raw(" receipt  "),
            key("x"),
            Span::raw(" delete  "),
            key("a"),
            Span::raw(" add  "),
            key("o"),
            Span::raw(" overview"),
        ],
        EntriesMode::Search => vec![
            key("Enter"),
            Span::raw(" apply  "),
            key("Esc"),
            Span::raw(" clear"),
        ],
        EntriesMode::PickField => vec![
            key("d"),
            Span::raw(" date  "),
            key("i"),
            Span::raw(" item  "),
            key("a"),
            Span::raw(" amount  "),
            key("p"),
            Span::raw(" payment  "),
            key("Esc"),
            Span::raw(" cancel"),
        ],
        EntriesMode::Edit | EntriesMode::Upload => vec![
            key("Enter"),
            Span::raw(" save  "),
            key("Esc"),
            Span::raw(" cancel"),
        ],
        EntriesMode::Add => vec![
            key("Tab"),
            Span::raw(" next  "),
            key("Enter"),
            Span::raw(" add  "),
            key("Esc"),
            Span::raw(" cancel"),
        ],
        EntriesMode::ConfirmDelete => vec![
            key("y"),
            Span::raw(" delete  "),
            key("n"),
            Span::raw(" cancel"),
        ],
    }
}
