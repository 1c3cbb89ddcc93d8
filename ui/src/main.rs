pub use app::App;

pub mod app;
mod data;
mod game;
mod handler;

use cli_log::*;
use client::client::Client;
use client::config::Config;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    init_cli_log!("poker");
    color_eyre::install()?;
    let client = Client::new(Config::from_env());
    let terminal = ratatui::init();
    let result = App::new(client).run(terminal).await;
    ratatui::restore();
    result
}
