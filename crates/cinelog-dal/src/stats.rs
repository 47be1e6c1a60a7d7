use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::movie::{Movie, WatchStatus};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total: usize,
    pub completed: usize,
    pub watching: usize,
    pub want_to_watch: usize,
    /// mean of ratings greater than zero, rounded to one decimal
    pub average_rating: f64,
    /// minutes
    pub total_runtime: i64,
    pub genre_breakdown: HashMap<String, usize>,
    /// keyed by year as string
    pub year_breakdown: HashMap<String, usize>,
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl CollectionStats {
    pub fn from_movies(movies: &[Movie]) -> Self {
        let mut stats = CollectionStats {
            total: movies.len(),
            ..Default::default()
        };
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for movie in movies {
            match movie.watch_status {
                WatchStatus::Completed => stats.completed += 1,
                WatchStatus::Watching => stats.watching += 1,
                WatchStatus::WantToWatch => stats.want_to_watch += 1,
                WatchStatus::Other(_) => {}
            }
            if let Some(rating) = movie.personal_rating.filter(|r| *r > 0.0) {
                rating_sum += rating;
                rated += 1;
            }
            stats.total_runtime = stats
                .total_runtime
                .saturating_add(movie.runtime.unwrap_or(0));
            if !movie.genre.is_empty() {
                *stats
                    .genre_breakdown
                    .entry(movie.genre.clone())
                    .or_default() += 1;
            }
            if let Some(year) = movie.release_year {
                *stats.year_breakdown.entry(year.to_string()).or_default() += 1;
            }
        }

        if rated > 0 {
            stats.average_rating = round_to_tenth(rating_sum / rated as f64);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn movies(value: serde_json::Value) -> Vec<Movie> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_stats() {
        let stats = CollectionStats::from_movies(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_runtime, 0);
        assert!(stats.genre_breakdown.is_empty());
        assert!(stats.year_breakdown.is_empty());
    }

    #[test]
    fn test_stats() {
        let movies = movies(json!([
            {"id": 1, "title": "A", "genre": "Action", "releaseYear": 2024, "runtime": 120,
             "watchStatus": "Completed", "personalRating": 8.0},
            {"id": 2, "title": "B", "genre": "Action", "releaseYear": 2023, "runtime": 100,
             "watchStatus": "Watching", "personalRating": 7.5},
            {"id": 3, "title": "C", "genre": "Drama", "releaseYear": 2024, "runtime": null,
             "watchStatus": "Want to Watch", "personalRating": null},
            {"id": 4, "title": "D", "genre": "", "watchStatus": "Dropped", "personalRating": 0.0},
            {"id": 5, "title": "E", "runtime": 30}
        ]));
        let stats = CollectionStats::from_movies(&movies);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.watching, 1);
        assert_eq!(stats.want_to_watch, 1);
        // 8.0 and 7.5, zero rating ignored
        assert_eq!(stats.average_rating, 7.8);
        assert_eq!(stats.total_runtime, 250);
        assert_eq!(stats.genre_breakdown.len(), 2);
        assert_eq!(stats.genre_breakdown["Action"], 2);
        assert_eq!(stats.genre_breakdown["Drama"], 1);
        assert_eq!(stats.year_breakdown["2024"], 2);
        assert_eq!(stats.year_breakdown["2023"], 1);
    }

    #[test]
    fn test_runtime_sum_saturates() {
        let movies = movies(json!([
            {"id": 1, "title": "A", "runtime": i64::MAX},
            {"id": 2, "title": "B", "runtime": 10}
        ]));
        let stats = CollectionStats::from_movies(&movies);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_runtime, i64::MAX);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_tenth(8.26), 8.3);
        assert_eq!(round_to_tenth(8.0), 8.0);
        assert_eq!(round_to_tenth(7.7333), 7.7);
    }

    #[test]
    fn test_stats_wire_format() {
        let value = serde_json::to_value(CollectionStats::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "total": 0,
                "completed": 0,
                "watching": 0,
                "wantToWatch": 0,
                "averageRating": 0.0,
                "totalRuntime": 0,
                "genreBreakdown": {},
                "yearBreakdown": {}
            })
        );
    }
}
