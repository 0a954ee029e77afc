use std::sync::Arc;

use crate::{
    error::AppError,
    models::{MovieBundle, MovieId, Recommendations},
    services::{catalog::Catalog, providers::MovieProvider},
};

/// Resolves a title and fetches the searched movie plus its recommendations
///
/// Returns `None` when the title is not in the catalog. Every fetch is
/// independent: recommendations run in parallel tasks, results keep dataset
/// order, and a failed call only leaves its half of one bundle empty and adds
/// a warning.
pub async fn fetch_movie_and_recommendations(
    catalog: &Catalog,
    provider: Arc<dyn MovieProvider>,
    title: &str,
) -> Option<Recommendations> {
    let entry = catalog.find_entry(title)?;
    let searched_id = entry.searched().id;

    tracing::info!(
        title = %entry.searched().title,
        movie_id = searched_id,
        recommendation_count = entry.recommendations().len(),
        provider = provider.name(),
        "Fetching movie and recommendations"
    );

    let mut tasks = Vec::new();
    for reco in entry.recommendations() {
        let provider = provider.clone();
        let id = reco.id;
        let task = tokio::spawn(async move { fetch_bundle(provider.as_ref(), id).await });
        tasks.push((id, task));
    }

    let mut warnings = Vec::new();
    let searched = collect(fetch_bundle(provider.as_ref(), searched_id).await, &mut warnings);

    let mut recommended = Vec::with_capacity(tasks.len());
    for (id, task) in tasks {
        match task.await {
            Ok(fetched) => recommended.push(collect(fetched, &mut warnings)),
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Task join error");
                warnings.push(format!(
                    "Une erreur s'est produite pour l'ID {} : {}",
                    id, e
                ));
                recommended.push(MovieBundle {
                    id,
                    info: None,
                    credits: None,
                });
            }
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            movie_id = searched_id,
            error_count = warnings.len(),
            "Partial metadata fetch failure"
        );
    }

    Some(Recommendations {
        searched,
        recommended,
        warnings,
    })
}

/// Bundle plus the warnings raised while fetching it
struct Fetched {
    bundle: MovieBundle,
    warnings: Vec<String>,
}

fn collect(fetched: Fetched, warnings: &mut Vec<String>) -> MovieBundle {
    warnings.extend(fetched.warnings);
    fetched.bundle
}

/// Fetches info and credits for one id concurrently
async fn fetch_bundle(provider: &dyn MovieProvider, id: MovieId) -> Fetched {
    let (info, credits) = tokio::join!(provider.fetch_info(id), provider.fetch_credits(id));
    let mut warnings = Vec::new();

    let info = info
        .map_err(|e| {
            tracing::error!(movie_id = id, error = %e, "Movie info fetch failed");
            warnings.push(failure_warning(&e, || {
                format!("Erreur lors de la récupération des données pour l'ID {}", id)
            }));
        })
        .ok();

    let credits = credits
        .map_err(|e| {
            tracing::error!(movie_id = id, error = %e, "Movie credits fetch failed");
            warnings.push(failure_warning(&e, || {
                format!("Erreur lors de la récupération du casting pour l'ID {}", id)
            }));
        })
        .ok();

    Fetched {
        bundle: MovieBundle { id, info, credits },
        warnings,
    }
}

/// Transport failures carry the client error, API failures the generic message
fn failure_warning(error: &AppError, api_message: impl FnOnce() -> String) -> String {
    match error {
        AppError::HttpClient(e) => format!("Une erreur s'est produite : {}", e),
        _ => api_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{MovieCredits, MovieInfo},
        services::providers::MockMovieProvider,
    };

    const DATASET: &str = r#"[
        [{"title_fr": "Intouchables", "id_recherche": 77338},
         [{"id_reco": 1}, {"id_reco": 2}, {"id_reco": 3}, {"id_reco": 2}]],
        [{"title_fr": "La Haine", "id_recherche": 406}, []]
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json(DATASET).unwrap()
    }

    fn info(id: MovieId) -> MovieInfo {
        MovieInfo {
            id,
            title: Some(format!("Movie {}", id)),
            poster_path: None,
            backdrop_path: None,
            runtime: None,
            vote_average: None,
            genres: vec![],
            release_date: None,
            overview: None,
        }
    }

    fn mock_provider() -> MockMovieProvider {
        let mut mock = MockMovieProvider::new();
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_recommendations_in_dataset_order() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().returning(|id| Ok(info(id)));
        mock.expect_fetch_credits()
            .returning(|_| Ok(MovieCredits::default()));

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "intouchables")
            .await
            .unwrap();

        assert_eq!(result.searched.id, 77338);
        let ids: Vec<MovieId> = result.recommended.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 2]);
        assert_eq!(
            result.recommended[2].info.as_ref().unwrap().title.as_deref(),
            Some("Movie 3")
        );
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_fetched_each_time() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().times(5).returning(|id| Ok(info(id)));
        mock.expect_fetch_credits()
            .times(5)
            .returning(|_| Ok(MovieCredits::default()));

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "Intouchables")
            .await
            .unwrap();
        assert_eq!(result.recommended.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_title_makes_no_calls() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().never();
        mock.expect_fetch_credits().never();

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "Inception").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_recommendation_list() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().returning(|id| Ok(info(id)));
        mock.expect_fetch_credits()
            .returning(|_| Ok(MovieCredits::default()));

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "LA HAINE")
            .await
            .unwrap();
        assert_eq!(result.searched.id, 406);
        assert!(result.recommended.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_isolated_and_reported() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().returning(|id| {
            if id == 2 {
                Err(AppError::ExternalApi("boom".to_string()))
            } else {
                Ok(info(id))
            }
        });
        mock.expect_fetch_credits().returning(|id| {
            if id == 3 {
                Err(AppError::ExternalApi("boom".to_string()))
            } else {
                Ok(MovieCredits {
                    directors: vec!["Someone".to_string()],
                    actors: vec![],
                })
            }
        });

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "Intouchables")
            .await
            .unwrap();

        assert!(result.searched.info.is_some());
        assert!(result.recommended[0].info.is_some());
        assert!(result.recommended[1].info.is_none());
        assert!(result.recommended[1].credits.is_some());
        assert!(result.recommended[2].info.is_some());
        assert!(result.recommended[2].credits.is_none());
        assert!(result.recommended[3].info.is_none());

        // id 2 appears twice, id 3 once
        assert_eq!(result.warnings.len(), 3);
        assert!(result.warnings[0].contains("l'ID 2"));
    }

    fn transport_error() -> AppError {
        let error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        AppError::HttpClient(error)
    }

    #[tokio::test]
    async fn test_transport_failure_reports_client_error() {
        let mut mock = mock_provider();
        mock.expect_fetch_info().returning(|id| {
            if id == 406 {
                Err(transport_error())
            } else {
                Ok(info(id))
            }
        });
        mock.expect_fetch_credits()
            .returning(|_| Ok(MovieCredits::default()));

        let result = fetch_movie_and_recommendations(&catalog(), Arc::new(mock), "La Haine")
            .await
            .unwrap();

        assert!(result.searched.info.is_none());
        assert!(result.searched.credits.is_some());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Une erreur s'est produite : "));
        assert!(!result.warnings[0].contains("l'ID 406"));
    }
}
