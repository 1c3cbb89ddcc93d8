use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Span, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

pub fn highlight<'a>(text: impl Into<Cow<'a, str>>, needed: bool) -> Span<'a> {
    if needed {
        Span::styled(text, Style::default().bg(Color::White).fg(Color::Black))
    } else {
        Span::styled(text, Style::default())
    }
}

/// A message that stays on screen until the player dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
}

impl From<&str> for Notice {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub struct NoticePopup<'a> {
    pub notice: &'a Notice,
}

impl Widget for NoticePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Clear.render(area, buf);
        Paragraph::new(self.notice.message.as_str())
            .block(
                Block::bordered()
                    .title("Notice")
                    .title_bottom(Line::from("Enter to dismiss").centered())
                    .style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true })
            .centered()
            .render(area, buf);
    }
}
