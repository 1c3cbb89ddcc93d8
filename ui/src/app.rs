use std::time::Duration;

use client::client::{ActionTransport, Client};
use color_eyre::{eyre, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui_input::backend::crossterm::EventHandler;
use types::domain::{PlayerAction, PlayerActionResponse};

use crate::data::{Notice, NoticePopup};
use crate::game::{ActionFocus, TableData, TableWidget};
use crate::handler::{self, View};

pub struct App {
    /// Is the application running?
    running: bool,
    client: Client,
    table: TableData,
    notice: Option<Notice>,
    replies_tx: UnboundedSender<Reply>,
    replies: UnboundedReceiver<Reply>,
}

/// A finished submission, waiting to be applied to the screen.
type Reply = (PlayerAction, eyre::Result<PlayerActionResponse>);

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(client: Client) -> Self {
        let (replies_tx, replies) = mpsc::unbounded_channel();
        Self {
            running: true,
            client,
            table: TableData::default(),
            notice: None,
            replies_tx,
            replies,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            self.apply_replies();
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_crossterm_events().await?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_stateful_widget(TableWidget, area, &mut self.table);

        if let Some(notice) = &self.notice {
            let [popup_area] = Layout::vertical([Constraint::Length(5)])
                .flex(Flex::Center)
                .areas(area);
            let [popup_area] = Layout::horizontal([Constraint::Percentage(50)])
                .flex(Flex::Center)
                .areas(popup_area);
            frame.render_widget(NoticePopup { notice }, popup_area);
        } else if self.table.focus == ActionFocus::Raise {
            frame.set_cursor_position(self.table.raise_cursor(area));
        }
    }

    async fn handle_crossterm_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key_event) = event::read()? {
                self.on_key_event(key_event);
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let (KeyModifiers::CONTROL, KeyCode::Char('c')) = (key.modifiers, key.code) {
            self.quit();
            return;
        }
        // an open notice swallows everything but its dismissal
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notice = None;
            }
            return;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => self.quit(),
            (KeyModifiers::NONE, KeyCode::Tab) => self.table.focus = self.table.focus.switch(),
            (KeyModifiers::NONE, KeyCode::Enter) => self.submit(),
            _ if self.table.focus == ActionFocus::Raise => {
                self.table.raise_input.handle_event(&Event::Key(key));
            }
            _ => {}
        }
    }

    /// Sends the focused move in the background; its reply lands in `replies`.
    fn submit(&mut self) {
        let action = PlayerAction::from(self.table.focus.to_move());
        let Some(request) = handler::prepare(action, self) else {
            return;
        };
        let client = self.client.clone();
        let replies = self.replies_tx.clone();
        tokio::spawn(async move {
            let response = client.submit(&request).await;
            // receiver is gone only once the app has shut down
            let _ = replies.send((request.action, response));
        });
    }

    fn apply_replies(&mut self) {
        while let Ok((action, response)) = self.replies.try_recv() {
            match response {
                Ok(response) => {
                    let outcome = handler::apply(&action, response, self);
                    debug!("player action finished: {:?}", outcome);
                }
                Err(e) => error!("player action {} failed: {:#}", action, e),
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

impl View for App {
    fn raise_amount(&self) -> String {
        self.table.raise_input.value().to_string()
    }

    fn alert(&mut self, message: &str) {
        self.notice = Some(message.into());
    }

    fn reload(&mut self) {
        self.table = TableData::default();
        self.notice = None;
        info!("table reloaded at {}", self.table.loaded_at);
    }
}

#[cfg(test)]
mod tests {
    use client::config::Config;
    use color_eyre::eyre::eyre;
    use crossterm::event::KeyEventState;
    use tui_input::Input;
    use types::domain::Move;

    use super::*;

    fn new_app() -> App {
        App::new(Client::new(Config::default()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key_event(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_only_reaches_raise_input_when_focused() {
        let mut app = new_app();
        type_text(&mut app, "12");
        assert_eq!(app.raise_amount(), "");

        app.on_key_event(press(KeyCode::Tab));
        app.on_key_event(press(KeyCode::Tab));
        assert_eq!(app.table.focus, ActionFocus::Raise);
        type_text(&mut app, "120");
        app.on_key_event(press(KeyCode::Backspace));
        assert_eq!(app.raise_amount(), "12");
    }

    #[test]
    fn invalid_raise_opens_blocking_notice() {
        let mut app = new_app();
        app.table.focus = ActionFocus::Raise;
        type_text(&mut app, "0");

        app.on_key_event(press(KeyCode::Enter));
        assert_eq!(
            app.notice,
            Some(Notice::from("Please enter a valid raise amount."))
        );

        // input is blocked while the notice is up
        type_text(&mut app, "5");
        app.on_key_event(press(KeyCode::Tab));
        assert_eq!(app.raise_amount(), "0");
        assert_eq!(app.table.focus, ActionFocus::Raise);

        app.on_key_event(press(KeyCode::Esc));
        assert!(app.notice.is_none());
        assert!(app.running);
    }

    #[test]
    fn reload_discards_table_state() {
        let mut app = new_app();
        app.table.focus = ActionFocus::Fold;
        app.table.raise_input = Input::new("40".to_string());
        app.alert("stale");
        let before = app.table.loaded_at;

        app.reload();

        assert_eq!(app.table.focus, ActionFocus::Check);
        assert_eq!(app.raise_amount(), "");
        assert!(app.notice.is_none());
        assert!(app.table.loaded_at >= before);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = new_app();
        app.on_key_event(press(KeyCode::Esc));
        assert!(!app.running);

        let mut app = new_app();
        app.alert("open");
        app.on_key_event(KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        });
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_silent_server_does_not_block_keys() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let mut app = App::new(Client::new(Config::with_base_url(&format!(
            "http://{}",
            address
        ))));

        app.on_key_event(press(KeyCode::Enter));
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.apply_replies();
        assert!(app.notice.is_none());

        app.on_key_event(press(KeyCode::Tab));
        assert_eq!(app.table.focus, ActionFocus::Call);
        app.on_key_event(press(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn replies_reload_or_alert() {
        let mut app = new_app();
        app.table.raise_input = Input::new("40".to_string());

        app.replies_tx
            .send((
                Move::Fold.into(),
                Ok(PlayerActionResponse {
                    success: false,
                    message: Some("Not your turn".to_string()),
                }),
            ))
            .unwrap();
        app.apply_replies();
        assert_eq!(app.notice, Some(Notice::from("Not your turn")));
        assert_eq!(app.raise_amount(), "40");

        app.replies_tx
            .send((
                Move::Call.into(),
                Ok(PlayerActionResponse {
                    success: true,
                    message: None,
                }),
            ))
            .unwrap();
        app.apply_replies();
        assert!(app.notice.is_none());
        assert_eq!(app.raise_amount(), "");
    }

    #[test]
    fn failed_reply_leaves_screen_alone() {
        let mut app = new_app();
        app.table.focus = ActionFocus::Fold;

        app.replies_tx
            .send((Move::Fold.into(), Err(eyre!("connection reset"))))
            .unwrap();
        app.apply_replies();

        assert!(app.notice.is_none());
        assert_eq!(app.table.focus, ActionFocus::Fold);
    }
}
