use std::fmt::Display;

use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Line, StatefulWidget, Widget};
use ratatui::style::Color;
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_input::Input;
use types::domain::Move;

use crate::data::highlight;
use crate::handler::RAISE_INPUT_ID;

const ACTION_BUTTONS: [ActionFocus; 4] = [
    ActionFocus::Check,
    ActionFocus::Call,
    ActionFocus::Raise,
    ActionFocus::Fold,
];

pub struct TableWidget;

impl StatefulWidget for TableWidget {
    type State = TableData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [table, actions] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(5)]).areas(area);

        Paragraph::new("Waiting for the table to deal")
            .centered()
            .block(
                Block::bordered()
                    .title(Line::from("Poker table").centered())
                    .title_bottom(
                        Line::from(format!("Loaded at {}", state.loaded_at.format("%H:%M:%S")))
                            .right_aligned(),
                    )
                    .border_type(BorderType::Rounded),
            )
            .render(table, buf);

        let outer_block = Block::bordered()
            .title(Line::from("Actions").centered())
            .title_bottom(Line::from("Tab to switch, Enter to act, Esc to quit").centered())
            .border_type(BorderType::Rounded);
        let inner_area = outer_block.inner(actions);
        outer_block.render(actions, buf);

        let buttons: [Rect; 4] =
            Layout::horizontal(Constraint::from_ratios([(1, 4); 4])).areas(inner_area);
        buttons
            .into_iter()
            .zip(ACTION_BUTTONS)
            .for_each(|(button, action)| {
                action.paragraph(state).render(button, buf);
            });
    }
}

#[derive(Debug)]
pub struct TableData {
    pub raise_input: Input,
    pub focus: ActionFocus,
    pub loaded_at: DateTime<Local>,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            raise_input: Input::default(),
            focus: ActionFocus::default(),
            loaded_at: Local::now(),
        }
    }
}

impl TableData {
    /// Cursor position inside the raise box, kept within its borders.
    pub fn raise_cursor(&self, area: Rect) -> (u16, u16) {
        let raise = raise_area(area);
        let typed = u16::try_from(self.raise_input.visual_cursor()).unwrap_or(u16::MAX);
        let x = (raise.x + 1)
            .saturating_add(typed)
            .min(raise.right().saturating_sub(2));
        (x, raise.y + 1)
    }
}

fn raise_area(area: Rect) -> Rect {
    let [_, actions] = Layout::vertical([Constraint::Fill(1), Constraint::Length(5)]).areas(area);
    let inner = Block::bordered().inner(actions);
    let buttons: [Rect; 4] = Layout::horizontal(Constraint::from_ratios([(1, 4); 4])).areas(inner);
    buttons[ActionFocus::Raise.position_in_array()]
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum ActionFocus {
    #[default]
    Check,
    Call,
    Raise,
    Fold,
}

impl Display for ActionFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Check => "Check",
            Self::Call => "Call",
            Self::Raise => "Raise",
            Self::Fold => "Fold",
        };
        write!(f, "{}", s)
    }
}

impl ActionFocus {
    fn paragraph(&self, state: &TableData) -> Paragraph<'_> {
        let focused = state.focus == *self;
        let color = if focused { Color::White } else { Color::Gray };
        match self {
            ActionFocus::Raise => Paragraph::new(state.raise_input.value().to_string()).block(
                Block::bordered()
                    .title(highlight(self.to_string(), focused))
                    .title_bottom(Line::from(RAISE_INPUT_ID).right_aligned())
                    .style(color),
            ),
            _ => Paragraph::new(highlight(self.to_string(), focused).into_centered_line())
                .block(Block::bordered().style(color)),
        }
    }

    fn position_in_array(&self) -> usize {
        match self {
            ActionFocus::Check => 0,
            ActionFocus::Call => 1,
            ActionFocus::Raise => 2,
            ActionFocus::Fold => 3,
        }
    }

    pub fn switch(&self) -> Self {
        ACTION_BUTTONS[(self.position_in_array() + 1) % ACTION_BUTTONS.len()]
    }

    pub fn to_move(self) -> Move {
        match self {
            ActionFocus::Check => Move::Check,
            ActionFocus::Call => Move::Call,
            ActionFocus::Raise => Move::Raise,
            ActionFocus::Fold => Move::Fold,
        }
    }
}
