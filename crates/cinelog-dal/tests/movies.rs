use cinelog_dal::{
    Error, JsonFileStore, ListingParams, MemoryStore,
    input::MovieInput,
    movie::{Movie, MovieFilter, MovieRepositoryImpl, WatchStatus},
};
use serde_json::json;

fn input(value: serde_json::Value) -> MovieInput {
    serde_json::from_value(value).unwrap()
}

fn repo() -> MovieRepositoryImpl<MemoryStore> {
    MovieRepositoryImpl::new(MemoryStore::new())
}

async fn fill(repo: &MovieRepositoryImpl<MemoryStore>, count: usize) {
    let genres = ["Action", "Drama", "action"];
    let statuses = ["Completed", "Watching", "Want to Watch"];
    for i in 0..count {
        repo.create(input(json!({
            "title": format!("Movie {}", i + 1),
            "genre": genres[i % genres.len()],
            "watchStatus": statuses[i % statuses.len()],
            "releaseYear": 2000 + i,
        })))
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_sequential_ids() {
    let repo = repo();
    fill(&repo, 5).await;
    let all = repo.list_all().await;
    let ids: Vec<i64> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(all[0].title, "Movie 1");
    assert_eq!(repo.count().await, 5);
}

#[tokio::test]
async fn test_create_get_roundtrip() {
    let repo = repo();
    let created = repo
        .create(input(json!({
            "title": " Oppenheimer ",
            "director": "Christopher Nolan",
            "releaseYear": "2023",
            "genre": "Drama",
            "runtime": "180",
            "personalRating": 9.5,
            "reviewNotes": "Masterpiece."
        })))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Oppenheimer");
    assert_eq!(created.watch_status, WatchStatus::WantToWatch);
    assert!(created.date_added.ends_with('Z'));

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invalid_create_persists_nothing() {
    let repo = repo();
    let res = repo.create(input(json!({"title": "  "}))).await;
    match res {
        Err(Error::InvalidInput(errors)) => {
            assert_eq!(errors.messages(), ["Title is required"]);
        }
        other => panic!("Unexpected result {other:?}"),
    }
    assert!(repo.list_all().await.is_empty());
}

#[tokio::test]
async fn test_update_keeps_id_and_date() {
    let repo = repo();
    fill(&repo, 2).await;
    let original = repo.get(2).await.unwrap();
    let updated = repo
        .update(
            2,
            input(json!({
                "id": 100,
                "dateAdded": "2000-01-01T00:00:00Z",
                "title": "Renamed",
                "watchStatus": "Completed",
                "personalRating": "7"
            })),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, 2);
    assert_eq!(updated.date_added, original.date_added);
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.genre, "");
    assert_eq!(updated.release_year, None);
    assert_eq!(updated.personal_rating, Some(7.0));
    assert_eq!(repo.get(2).await.unwrap(), updated);
    assert!(matches!(repo.get(100).await, Err(Error::RecordNotFound(_))));
}

#[tokio::test]
async fn test_update_errors() {
    let repo = repo();
    fill(&repo, 1).await;
    let res = repo.update(42, MovieInput::with_title("Missing")).await;
    assert!(matches!(res, Err(Error::RecordNotFound(_))));

    // validation goes first
    let res = repo.update(42, MovieInput::with_title("")).await;
    assert!(matches!(res, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_delete() {
    let repo = repo();
    fill(&repo, 3).await;
    repo.delete(2).await.unwrap();
    assert!(matches!(repo.get(2).await, Err(Error::RecordNotFound(_))));
    assert!(matches!(repo.delete(2).await, Err(Error::RecordNotFound(_))));
    let ids: Vec<i64> = repo.list_all().await.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);

    // max + 1
    let created = repo.create(MovieInput::with_title("Next")).await.unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn test_paging() {
    let repo = repo();
    fill(&repo, 15).await;

    let batch = repo
        .list(ListingParams::for_page(1, 10), MovieFilter::default())
        .await;
    assert_eq!(batch.total, 15);
    assert_eq!(batch.rows.len(), 10);
    assert_eq!(batch.rows[0].id, 1);

    let batch = repo
        .list(ListingParams::for_page(2, 10), MovieFilter::default())
        .await;
    assert_eq!(batch.rows.len(), 5);
    assert_eq!(batch.rows[0].id, 11);

    let batch = repo
        .list(ListingParams::for_page(5, 10), MovieFilter::default())
        .await;
    assert!(batch.rows.is_empty());
    assert_eq!(batch.total, 15);
}

#[tokio::test]
async fn test_filters() {
    let repo = repo();
    fill(&repo, 9).await;

    let filter = MovieFilter {
        genre: Some("Action".into()),
        status: None,
    };
    let batch = repo.list(ListingParams::default(), filter).await;
    assert_eq!(batch.total, 3);
    assert!(batch.rows.iter().all(|m| m.genre == "Action"));

    let filter = MovieFilter {
        genre: Some("Action".into()),
        status: Some("Completed".into()),
    };
    let batch = repo.list(ListingParams::default(), filter).await;
    assert_eq!(batch.total, 3);

    let filter = MovieFilter {
        genre: Some("Drama".into()),
        status: Some("Completed".into()),
    };
    let batch = repo.list(ListingParams::default(), filter).await;
    assert_eq!(batch.total, 0);

    let filter = MovieFilter {
        genre: Some(String::new()),
        status: Some("Watching".into()),
    };
    let batch = repo.list(ListingParams::default(), filter).await;
    assert_eq!(batch.total, 3);
    assert!(
        batch
            .rows
            .iter()
            .all(|m| m.watch_status == WatchStatus::Watching)
    );
}

#[tokio::test]
async fn test_genres_and_stats() {
    let repo = repo();
    assert!(repo.genres().await.is_empty());
    assert_eq!(repo.stats().await.total, 0);

    fill(&repo, 6).await;
    repo.create(MovieInput::with_title("No genre")).await.unwrap();
    assert_eq!(repo.genres().await, vec!["Action", "Drama", "action"]);

    let stats = repo.stats().await;
    assert_eq!(stats.total, 7);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.watching, 2);
    assert_eq!(stats.want_to_watch, 3);
    assert_eq!(stats.genre_breakdown.values().sum::<usize>(), 6);
}

#[tokio::test]
async fn test_init() {
    let repo = repo();
    let movies: Vec<Movie> = serde_json::from_value(json!([
        {"id": 1, "title": "Dune: Part Two", "genre": "Sci-Fi", "watchStatus": "Completed",
         "personalRating": 9.2, "dateAdded": "2024-03-01T10:00:00Z"},
        {"id": 2, "title": "Wicked", "genre": "Musical", "watchStatus": "Completed",
         "personalRating": 8.9, "dateAdded": "2024-11-22T10:00:00Z"}
    ]))
    .unwrap();
    assert_eq!(repo.init(movies.clone()).await.unwrap(), 2);
    assert_eq!(repo.list_all().await, movies);
    assert!(matches!(
        repo.init(movies).await,
        Err(Error::AlreadyInitialized)
    ));
    let created = repo.create(MovieInput::with_title("Third")).await.unwrap();
    assert_eq!(created.id, 3);
}

#[tokio::test]
async fn test_init_refused_after_create() {
    let repo = repo();
    repo.create(MovieInput::with_title("First")).await.unwrap();
    assert!(matches!(
        repo.init(Vec::new()).await,
        Err(Error::AlreadyInitialized)
    ));
}

#[tokio::test]
async fn test_corrupted_store_is_empty() {
    let repo = MovieRepositoryImpl::new(MemoryStore::with_raw("[{\"id\": 1, "));
    assert!(repo.list_all().await.is_empty());
    let created = repo.create(MovieInput::with_title("Fresh")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(repo.list_all().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_unique_ids() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp_dir.path().join("movies.json"));
    let tasks = (0..20).map(|i| {
        let repo = MovieRepositoryImpl::new(store.clone());
        tokio::spawn(async move {
            repo.create(MovieInput::with_title(format!("Parallel {i}")))
                .await
                .unwrap()
                .id
        })
    });
    let mut ids: Vec<i64> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());

    let repo = MovieRepositoryImpl::new(store);
    assert_eq!(repo.count().await, 20);
}
