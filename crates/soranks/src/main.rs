#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod logging;
mod prelude;
mod ranks;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Stack Overflow rankings by location: scans users by descending reputation and \
                  writes the matches as JSON and/or Markdown"
)]
pub struct App {
    #[clap(flatten)]
    pub options: crate::ranks::RankOptions,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "SORANKS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    logging::init(app.global.verbose);

    if let Err(err) = crate::ranks::run(app.options).await {
        log::error!("{err}");
        std::process::exit(err.exit_code());
    }

    Ok(())
}
