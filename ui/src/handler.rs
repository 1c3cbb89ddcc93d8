use client::client::ActionTransport;
use color_eyre::eyre::Result;
use log::{info, warn};
use types::domain::{PlayerAction, PlayerActionRequest, PlayerActionResponse};
use types::error::Error;
use validator::Validate;

/// Identifier of the control holding the raise amount.
pub const RAISE_INPUT_ID: &str = "raise-amount";

/// The screen a player action is taken from.
pub trait View {
    /// Current text of the [`RAISE_INPUT_ID`] control.
    fn raise_amount(&self) -> String;
    /// Shows a blocking notice.
    fn alert(&mut self, message: &str);
    /// Throws away all screen state and starts over.
    fn reload(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Invalid,
    Reloaded,
    Rejected(String),
}

/// Reads and validates the move. An invalid raise is alerted here and yields
/// no request.
pub fn prepare<V>(action: PlayerAction, view: &mut V) -> Option<PlayerActionRequest>
where
    V: View + ?Sized,
{
    if !action.is_raise() {
        return Some(PlayerActionRequest::without_raise(action));
    }

    let entered = view.raise_amount();
    let request = PlayerActionRequest::raise(entered.clone());
    if request.validate().is_err() {
        let error = Error::InvalidRaiseAmount { entered };
        warn!("{} rejected locally: {:?}", RAISE_INPUT_ID, error);
        view.alert(&error.alert_message());
        return None;
    }
    Some(request)
}

/// Reloads on success, otherwise alerts the server's message.
pub fn apply<V>(action: &PlayerAction, response: PlayerActionResponse, view: &mut V) -> Outcome
where
    V: View + ?Sized,
{
    if response.success {
        info!("{} accepted, reloading", action);
        view.reload();
        Outcome::Reloaded
    } else {
        let message = Error::Rejected(response.message).alert_message();
        info!("{} rejected by server: {}", action, message);
        view.alert(&message);
        Outcome::Rejected(message)
    }
}

/// Validates and submits one player action, then reloads or alerts.
///
/// Transport and decoding failures are handed back to the caller without
/// touching the view. The terminal app runs the same two halves with the
/// submission on its own task.
#[cfg_attr(not(test), allow(dead_code))]
pub async fn player_action<V, T>(
    action: PlayerAction,
    view: &mut V,
    transport: &T,
) -> Result<Outcome>
where
    V: View + ?Sized,
    T: ActionTransport + ?Sized,
{
    let Some(request) = prepare(action, view) else {
        return Ok(Outcome::Invalid);
    };
    let response = transport.submit(&request).await?;
    Ok(apply(&request.action, response, view))
}
