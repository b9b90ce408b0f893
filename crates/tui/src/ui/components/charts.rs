use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::DistributionSlice;

use crate::{app::format_amount, ui::theme::Theme};

/// Horizontal bar, `█` filled and `░` empty, sized by `value / max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Renders the expense distribution as one colored bar row per slice.
///
/// Each row shows the category, the summed amount, a bar scaled against the
/// largest slice, and the share of total expenses. Row color comes from the
/// slice's palette index.
pub fn render_distribution(
    frame: &mut Frame<'_>,
    area: Rect,
    slices: &[DistributionSlice],
    theme: &Theme,
) {
    if slices.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expense data to display",
                Style::default().fg(theme.dim),
            ))
            .alignment(ratatui::layout::Alignment::Center),
            area,
        );
        return;
    }

    let total: i64 = slices.iter().map(|slice| slice.amount_minor).sum();
    let max = slices
        .iter()
        .map(|slice| slice.amount_minor)
        .max()
        .unwrap_or(0);

    let rows: Vec<Line> = slices
        .iter()
        .take(area.height as usize)
        .map(|slice| {
            let color = theme.chart[slice.color_index];
            let pct = if total > 0 {
                (slice.amount_minor as f64 / total as f64 * 100.0) as u16
            } else {
                0
            };
            let bar = ascii_bar(slice.amount_minor as u64, max as u64, 20);

            Line::from(vec![
                Span::styled(
                    format!("{:<16}", truncate(&slice.category_name, 15)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>14}", format_amount(slice.amount_minor)),
                    Style::default().fg(color),
                ),
                Span::raw("  "),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(format!(" {pct:>3}%"), Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
