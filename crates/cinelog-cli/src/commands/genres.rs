use clap::Parser;

use crate::{
    commands::{read_json, Executor},
    config::ServerArgs,
};

#[derive(Parser, Debug)]
pub struct GenresCmd {
    #[command(flatten)]
    server: ServerArgs,
}

impl Executor for GenresCmd {
    async fn run(self) -> anyhow::Result<()> {
        let url = self.server.api_url("genres")?;
        let response = reqwest::get(url).await?;
        let genres: Vec<String> = read_json(response).await?;
        for genre in genres {
            println!("{genre}");
        }
        Ok(())
    }
}
