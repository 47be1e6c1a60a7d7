use cinelog_dal::movie::Movie;
use clap::Parser;
use serde::Deserialize;

use crate::{
    commands::{read_json, Executor},
    config::ServerArgs,
};

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    server: ServerArgs,
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..), help = "Page number, starting from 1")]
    page: u32,
    #[arg(short, long, help = "Only movies of this genre")]
    genre: Option<String>,
    #[arg(short, long, help = "Only movies with this watch status")]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    current_page: u32,
    total_pages: u64,
    total_movies: u64,
}

#[derive(Debug, Deserialize)]
struct MoviePage {
    movies: Vec<Movie>,
    pagination: Pagination,
}

fn movie_line(movie: &Movie) -> String {
    let year = movie
        .release_year
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let rating = movie
        .personal_rating
        .map(|r| format!(" {r:.1}/10"))
        .unwrap_or_default();
    format!(
        "{:>4}  {}{}  [{}]{}",
        movie.id,
        movie.title,
        year,
        movie.watch_status.as_str(),
        rating
    )
}

impl Executor for ListCmd {
    async fn run(self) -> anyhow::Result<()> {
        let mut url = self.server.api_url("movies")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &self.page.to_string());
            if let Some(genre) = &self.genre {
                query.append_pair("genre", genre);
            }
            if let Some(status) = &self.status {
                query.append_pair("status", status);
            }
        }
        let response = reqwest::get(url).await?;
        let page: MoviePage = read_json(response).await?;
        for movie in &page.movies {
            println!("{}", movie_line(movie));
        }
        println!(
            "Page {} of {}, {} movies",
            page.pagination.current_page, page.pagination.total_pages, page.pagination.total_movies
        );
        Ok(())
    }
}
