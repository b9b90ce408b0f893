use engine::{Currency, Money};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Styled span for a money amount with semantic coloring: positive green,
/// negative red, zero neutral.
#[must_use]
pub fn styled_amount(minor: i64, theme: &Theme) -> Span<'static> {
    let formatted = Money::new(minor).format(Currency::Php);

    let color = if minor > 0 {
        theme.positive
    } else if minor < 0 {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(formatted, Style::default().fg(color))
}
