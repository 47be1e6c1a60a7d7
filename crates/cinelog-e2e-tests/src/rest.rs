use anyhow::{Result, bail};
use cinelog_dal::movie::Movie;
use reqwest::Url;
use serde_json::Value;
use tracing::info;

pub async fn create_movie(client: &reqwest::Client, base_url: &Url, payload: Value) -> Result<Movie> {
    let api_url = base_url.join("api/movies")?;

    let response = client.post(api_url).json(&payload).send().await?;
    if response.status().as_u16() != 201 {
        let status = response.status();
        let body = response.text().await?;
        bail!("Movie not created, status {status}: {body}");
    }

    let new_movie: Movie = response.json().await?;
    info!("Created movie {}", new_movie.id);
    Ok(new_movie)
}

pub async fn get_json(client: &reqwest::Client, url: Url) -> Result<(u16, Value)> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let body: Value = response.json().await?;
    Ok((status, body))
}
