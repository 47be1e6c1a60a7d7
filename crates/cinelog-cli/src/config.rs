use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::commands::{genres::GenresCmd, list::ListCmd, seed::SeedCmd, stats::StatsCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for cinelog - manage and inspect movie collection on running cinelog server."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Seed(SeedCmd),
    List(ListCmd),
    Stats(StatsCmd),
    Genres(GenresCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Seed(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
            Command::Stats(cmd) => cmd.run().await,
            Command::Genres(cmd) => cmd.run().await,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(
        long,
        env = "CINELOG_SERVER_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of cinelog server"
    )]
    pub server_url: Url,
}

impl ServerArgs {
    pub fn api_url(&self, path: &str) -> anyhow::Result<Url> {
        let url = self.server_url.join("api/")?.join(path)?;
        Ok(url)
    }
}
