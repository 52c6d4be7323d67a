mod actions;
mod app;
mod config;
mod editor;
mod error;
mod format;
mod logging;
mod request;
mod state;
mod store;
mod tasks;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init_logging(&Config::app_dir()?)?;

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}
