mod action;
mod app;
mod cli;
mod components;
mod config;
mod core;
mod errors;
mod logging;
mod pages;
mod theme;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::{
    app::App,
    cli::{Cli, Cmd},
};

#[tokio::main]
async fn main() -> Result<()> {
    crate::errors::init()?;
    let args = Cli::parse();

    match args.cmd.clone().unwrap_or(Cmd::Run) {
        Cmd::Templates { json } => println!("{}", cli::render_templates(json)?),
        Cmd::Run => {
            crate::logging::init()?;
            let mut app = App::new(args.tick_rate, args.frame_rate)?;
            app.run().await?;
        }
    }
    Ok(())
}
