use crate::{
    Batch, Error, ListingParams,
    error::Result,
    input::{MovieDraft, MovieInput, null_as_empty},
    stats::CollectionStats,
};
use cinelog_store::{CollectionStore, JsonFileStore};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::format_description};
use tracing::debug;

pub const WANT_TO_WATCH: &str = "Want to Watch";
pub const WATCHING: &str = "Watching";
pub const COMPLETED: &str = "Completed";

/// Watch status, known values have own variants, any other text is kept as is
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WatchStatus {
    #[default]
    WantToWatch,
    Watching,
    Completed,
    Other(String),
}

impl WatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WatchStatus::WantToWatch => WANT_TO_WATCH,
            WatchStatus::Watching => WATCHING,
            WatchStatus::Completed => COMPLETED,
            WatchStatus::Other(s) => s.as_str(),
        }
    }

    /// Status of stored records that have none
    fn missing() -> Self {
        WatchStatus::Other(String::new())
    }
}

impl From<&str> for WatchStatus {
    fn from(value: &str) -> Self {
        match value {
            WANT_TO_WATCH => WatchStatus::WantToWatch,
            WATCHING => WatchStatus::Watching,
            COMPLETED => WatchStatus::Completed,
            other => WatchStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for WatchStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            WANT_TO_WATCH | WATCHING | COMPLETED => WatchStatus::from(value.as_str()),
            _ => WatchStatus::Other(value),
        }
    }
}

impl From<WatchStatus> for String {
    fn from(value: WatchStatus) -> Self {
        match value {
            WatchStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub director: String,
    #[serde(default)]
    pub release_year: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default = "WatchStatus::missing")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub watch_status: WatchStatus,
    #[serde(default)]
    pub personal_rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub review_notes: String,
    /// ISO 8601 UTC timestamp with trailing `Z`, set once on creation
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_added: String,
}

impl Movie {
    fn new(id: i64, draft: MovieDraft, date_added: String) -> Self {
        let mut movie = Movie {
            id,
            title: String::new(),
            director: String::new(),
            release_year: None,
            genre: String::new(),
            runtime: None,
            watch_status: WatchStatus::default(),
            personal_rating: None,
            review_notes: String::new(),
            date_added,
        };
        movie.apply(draft);
        movie
    }

    /// Overwrites all mutable fields, `id` and `date_added` stay
    fn apply(&mut self, draft: MovieDraft) {
        self.title = draft.title;
        self.director = draft.director;
        self.release_year = draft.release_year;
        self.genre = draft.genre;
        self.runtime = draft.runtime;
        self.watch_status = draft.watch_status;
        self.personal_rating = draft.personal_rating;
        self.review_notes = draft.review_notes;
    }
}

/// Exact match filters, empty value means no filtering
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    pub genre: Option<String>,
    pub status: Option<String>,
}

impl MovieFilter {
    fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

fn next_id(movies: &[Movie]) -> i64 {
    movies.iter().map(|m| m.id).max().unwrap_or(0) + 1
}

fn timestamp_now() -> Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
    );
    let ts = OffsetDateTime::now_utc().format(&format)?;
    Ok(ts)
}

fn not_found(id: i64) -> Error {
    Error::RecordNotFound(format!("Movie {id}"))
}

pub type MovieRepository = MovieRepositoryImpl<JsonFileStore>;

/// Operations over the movie collection.
///
/// Every call starts from freshly loaded collection, modifying calls save the whole
/// collection back while holding the store write lock, so ids cannot be assigned twice.
pub struct MovieRepositoryImpl<S> {
    store: S,
}

impl<S> MovieRepositoryImpl<S>
where
    S: CollectionStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, params: ListingParams, filter: MovieFilter) -> Batch<Movie> {
        let mut movies: Vec<Movie> = self.store.load().await;
        if let Some(genre) = filter.genre() {
            movies.retain(|m| m.genre == genre);
        }
        if let Some(status) = filter.status() {
            movies.retain(|m| m.watch_status.as_str() == status);
        }
        Batch::from_rows(movies, &params)
    }

    pub async fn list_all(&self) -> Vec<Movie> {
        self.store.load().await
    }

    pub async fn count(&self) -> usize {
        self.list_all().await.len()
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        let movies: Vec<Movie> = self.store.load().await;
        movies
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, payload: MovieInput) -> Result<Movie> {
        let draft = payload.parse()?;
        let _lock = self.store.write_lock().await;
        let mut movies: Vec<Movie> = self.store.load().await;
        let movie = Movie::new(next_id(&movies), draft, timestamp_now()?);
        movies.push(movie.clone());
        self.store.save(&movies).await?;
        debug!("Created movie {} with id {}", movie.title, movie.id);
        Ok(movie)
    }

    /// Validation problems are reported before checking that record exists
    pub async fn update(&self, id: i64, payload: MovieInput) -> Result<Movie> {
        let draft = payload.parse()?;
        let _lock = self.store.write_lock().await;
        let mut movies: Vec<Movie> = self.store.load().await;
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        movie.apply(draft);
        let movie = movie.clone();
        self.store.save(&movies).await?;
        debug!("Updated movie {id}");
        Ok(movie)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let _lock = self.store.write_lock().await;
        let mut movies: Vec<Movie> = self.store.load().await;
        let original_len = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == original_len {
            return Err(not_found(id));
        }
        self.store.save(&movies).await?;
        debug!("Deleted movie {id}");
        Ok(())
    }

    pub async fn stats(&self) -> CollectionStats {
        let movies: Vec<Movie> = self.store.load().await;
        CollectionStats::from_movies(&movies)
    }

    /// Distinct non empty genres, sorted
    pub async fn genres(&self) -> Vec<String> {
        let movies: Vec<Movie> = self.store.load().await;
        let mut genres: Vec<String> = movies
            .into_iter()
            .map(|m| m.genre)
            .filter(|g| !g.is_empty())
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }

    /// Bulk load of initial data, only possible when store has no data yet
    pub async fn init(&self, movies: Vec<Movie>) -> Result<usize> {
        let _lock = self.store.write_lock().await;
        if self.store.exists().await? {
            return Err(Error::AlreadyInitialized);
        }
        self.store.save(&movies).await?;
        debug!("Initialized collection with {} movies", movies.len());
        Ok(movies.len())
    }
}
