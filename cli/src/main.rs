mod commands;
mod terminal;

use commands::{CommandLine, enumerate};
use subscout_common::config::Config;
use terminal::{logging, print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();

    spinner::init_logging();
    logging::install_panic_hook();

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    print::header("getting ready for enumeration", cfg.quiet);
    enumerate::enumerate(commands.domain, &cfg).await
}
