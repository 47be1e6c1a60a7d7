use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cinelog_dal::movie::Movie;
use clap::Parser;
use serde_json::json;
use tracing::debug;

use crate::{
    commands::{read_json, Executor},
    config::ServerArgs,
};

const SAMPLE_MOVIES: &str = include_str!("../../sample-data/movies.json");

#[derive(Parser, Debug)]
pub struct SeedCmd {
    #[command(flatten)]
    server: ServerArgs,
    #[arg(
        short,
        long,
        help = "JSON file with array of movies, if not provided built-in sample collection is used"
    )]
    file: Option<PathBuf>,
}

pub fn sample_movies() -> anyhow::Result<Vec<Movie>> {
    serde_json::from_str(SAMPLE_MOVIES).context("Invalid built-in sample data")
}

async fn load_movies(file: &Path) -> anyhow::Result<Vec<Movie>> {
    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let movies = serde_json::from_slice(&data)
        .with_context(|| format!("Invalid movies in {}", file.display()))?;
    Ok(movies)
}

impl Executor for SeedCmd {
    async fn run(self) -> anyhow::Result<()> {
        let movies = match &self.file {
            Some(file) => load_movies(file).await?,
            None => sample_movies()?,
        };
        debug!("Seeding {} movies", movies.len());
        let url = self.server.api_url("init")?;
        let response = reqwest::Client::new()
            .post(url)
            .json(&json!({ "movies": movies }))
            .send()
            .await?;
        let body: serde_json::Value = read_json(response).await?;
        println!("{}", body["message"].as_str().unwrap_or("Done"));
        Ok(())
    }
}
