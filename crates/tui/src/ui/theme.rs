use ratatui::style::Color;

use engine::PALETTE_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
    /// Slice colors for the cash-flow chart, light to deep rose; slices pick
    /// `chart[color_index]`.
    pub chart: [Color; PALETTE_SIZE],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(160, 160, 160),
            dim: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 70, 80),
            accent: Color::Rgb(131, 175, 240),
            positive: Color::Rgb(74, 222, 128),
            negative: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(250, 204, 21),
            error: Color::Rgb(200, 80, 80),
            chart: [
                Color::Rgb(0xfd, 0xa4, 0xaf),
                Color::Rgb(0xfb, 0x71, 0x85),
                Color::Rgb(0xf8, 0x71, 0x71),
                Color::Rgb(0xf4, 0x3f, 0x5e),
                Color::Rgb(0xef, 0x44, 0x44),
                Color::Rgb(0xe1, 0x1d, 0x48),
                Color::Rgb(0xdc, 0x26, 0x26),
                Color::Rgb(0xbe, 0x12, 0x3c),
            ],
        }
    }
}

impl Theme {
    /// Color for an event status badge.
    pub fn status_color(&self, status: api_types::EventStatus) -> Color {
        match status {
            api_types::EventStatus::Active => self.positive,
            api_types::EventStatus::Completed => self.accent,
            api_types::EventStatus::OnHold => self.warning,
            api_types::EventStatus::Cancelled => self.negative,
        }
    }
}
