use std::collections::HashSet;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::get,
};
use chrono::Utc;
use lecturer_assess_be::{
    client::{AssessClient, FormGate, PortalEntry, RatingPortal, portal::INACTIVE_MODULE_NOTICE},
    errors::AppError,
    guard::{ALREADY_RATED_NOTICE, MemoryPreferenceStore, PreferenceStore},
    models::{LecturerModule, Rating, rating::RatingPayload},
};
use uuid::Uuid;

const ADMIN_TOKEN: &str = "stub-admin-token";

/// In-process stand-in for the API, serving fixed data.
#[derive(Clone)]
struct Backend {
    modules: Vec<LecturerModule>,
    ratings: Vec<Rating>,
}

async fn active_modules(State(backend): State<Backend>) -> Json<Vec<LecturerModule>> {
    Json(backend.modules.into_iter().filter(|m| m.is_active).collect())
}

async fn all_modules(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<Json<Vec<LecturerModule>>, (StatusCode, String)> {
    let expected = format!("Bearer {ADMIN_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(Json(backend.modules)),
        _ => Err((StatusCode::UNAUTHORIZED, "Unauthorized - Invalid token".into())),
    }
}

async fn list_ratings(State(backend): State<Backend>) -> Json<Vec<Rating>> {
    Json(backend.ratings)
}

async fn submit_rating(
    Json(payload): Json<RatingPayload>,
) -> Result<Json<Rating>, (StatusCode, String)> {
    let new_rating = payload.validate().map_err(|e| e.to_response())?;
    let [c1, c2, c3, c4, c5] = new_rating.scores;

    Ok(Json(Rating {
        id: Uuid::new_v4(),
        lecturer_module_id: new_rating.lecturer_module_id,
        criteria_1_score: c1,
        criteria_2_score: c2,
        criteria_3_score: c3,
        criteria_4_score: c4,
        criteria_5_score: c5,
        remarks: new_rating.remarks,
        created_at: Utc::now(),
        ip_address: None,
        user_agent: None,
    }))
}

async fn serve(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/modules", get(active_modules))
        .route("/api/modules/all", get(all_modules))
        .route("/api/ratings", get(list_ratings).post(submit_rating))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Reads fine, but every write fails.
#[derive(Clone, Default)]
struct ReadOnlyStore;

#[async_trait]
impl PreferenceStore for ReadOnlyStore {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        Ok(HashSet::new())
    }

    async fn record_rated(&self, _module_id: Uuid) -> Result<(), AppError> {
        Err(AppError::Io(std::io::Error::other("storage quota exceeded")))
    }

    async fn clear(&self) -> Result<(), AppError> {
        Ok(())
    }
}

fn rating(module_id: Uuid, score: i16) -> Rating {
    Rating {
        id: Uuid::new_v4(),
        lecturer_module_id: module_id,
        criteria_1_score: score,
        criteria_2_score: score,
        criteria_3_score: score,
        criteria_4_score: score,
        criteria_5_score: score,
        remarks: None,
        created_at: Utc::now(),
        ip_address: None,
        user_agent: None,
    }
}

fn module(is_active: bool) -> LecturerModule {
    LecturerModule {
        id: Uuid::new_v4(),
        lecturer_name: "Barbara Liskov".into(),
        module_name: "Data Abstraction".into(),
        module_description: "Types and substitutability".into(),
        module_objectives: None,
        email: None,
        is_active,
        created_at: Utc::now(),
    }
}

// Nothing listens on port 9; tests below must not reach the network
fn portal(store: MemoryPreferenceStore) -> RatingPortal<MemoryPreferenceStore> {
    RatingPortal::new(AssessClient::new("http://127.0.0.1:9"), store)
}

#[tokio::test]
async fn test_form_opens_for_unrated_active_module() {
    let module = module(true);

    match portal(MemoryPreferenceStore::new()).open_form(&module).await {
        FormGate::Open(form) => assert_eq!(form.module_id(), module.id),
        FormGate::Refused { notice } => panic!("unexpected refusal: {notice}"),
    }
}

#[tokio::test]
async fn test_form_refused_when_already_rated() {
    let module = module(true);
    let store = MemoryPreferenceStore::new();
    store.record_rated(module.id).await.unwrap();

    let gate = portal(store).open_form(&module).await;
    assert_eq!(
        gate,
        FormGate::Refused {
            notice: ALREADY_RATED_NOTICE.to_string()
        }
    );
}

#[tokio::test]
async fn test_form_refused_for_inactive_module() {
    let gate = portal(MemoryPreferenceStore::new())
        .open_form(&module(false))
        .await;
    assert_eq!(
        gate,
        FormGate::Refused {
            notice: INACTIVE_MODULE_NOTICE.to_string()
        }
    );
}

#[tokio::test]
async fn test_invalid_submission_is_caught_locally() {
    let module = module(true);
    let store = MemoryPreferenceStore::new();
    let portal = portal(store.clone());

    let FormGate::Open(form) = portal.open_form(&module).await else {
        panic!("form should open");
    };

    let err = portal.submit(form, [5, 5, 0, 5, 5], None).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Nothing was submitted, so nothing is remembered
    assert!(store.rated_modules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_transport_leaves_record_untouched() {
    let module = module(true);
    let store = MemoryPreferenceStore::new();
    let portal = portal(store.clone());

    let FormGate::Open(form) = portal.open_form(&module).await else {
        panic!("form should open");
    };

    let err = portal.submit(form, [4, 4, 4, 4, 4], None).await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert!(!store.rated_modules().await.unwrap().contains(&module.id));
}

#[test]
fn test_entry_summary() {
    let mut entry = PortalEntry {
        module: module(true),
        total_ratings: 0,
        overall_average: 0.0,
        already_rated: false,
    };
    assert_eq!(entry.summary(), None);

    entry.total_ratings = 2;
    entry.overall_average = 3.65;
    assert_eq!(entry.summary().as_deref(), Some("3.7"));
}

#[tokio::test]
async fn test_successful_submission_is_remembered() {
    let module = module(true);
    let base_url = serve(Backend {
        modules: vec![module.clone()],
        ratings: Vec::new(),
    })
    .await;
    let store = MemoryPreferenceStore::new();
    let portal = RatingPortal::new(AssessClient::new(base_url), store.clone());

    let FormGate::Open(form) = portal.open_form(&module).await else {
        panic!("form should open");
    };

    let rating = portal
        .submit(form, [5, 4, 3, 4, 5], Some("  Clear slides ".into()))
        .await
        .unwrap();
    assert_eq!(rating.lecturer_module_id, module.id);
    assert_eq!(rating.scores(), [5, 4, 3, 4, 5]);
    assert_eq!(rating.remarks.as_deref(), Some("Clear slides"));

    assert!(store.rated_modules().await.unwrap().contains(&module.id));
    assert_eq!(
        portal.open_form(&module).await,
        FormGate::Refused {
            notice: ALREADY_RATED_NOTICE.to_string()
        }
    );
}

#[tokio::test]
async fn test_submission_succeeds_when_record_cannot_be_written() {
    let module = module(true);
    let base_url = serve(Backend {
        modules: vec![module.clone()],
        ratings: Vec::new(),
    })
    .await;
    let portal = RatingPortal::new(AssessClient::new(base_url), ReadOnlyStore);

    let FormGate::Open(form) = portal.open_form(&module).await else {
        panic!("form should open");
    };

    let rating = portal.submit(form, [3, 3, 3, 3, 3], None).await.unwrap();
    assert_eq!(rating.lecturer_module_id, module.id);

    // Nothing was remembered, so the form still opens
    assert!(matches!(portal.open_form(&module).await, FormGate::Open(_)));
}

#[tokio::test]
async fn test_listing_reports_averages_and_rated_flags() {
    let rated = module(true);
    let unrated = module(true);
    let retired = module(false);
    let base_url = serve(Backend {
        modules: vec![rated.clone(), unrated.clone(), retired.clone()],
        ratings: vec![
            rating(rated.id, 4),
            rating(rated.id, 2),
            rating(retired.id, 5),
        ],
    })
    .await;

    let store = MemoryPreferenceStore::new();
    store.record_rated(rated.id).await.unwrap();
    let portal = RatingPortal::new(AssessClient::new(base_url), store);

    let entries = portal.listing().await.unwrap();
    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert_eq!(first.module.id, rated.id);
    assert_eq!(first.total_ratings, 2);
    assert_eq!(first.overall_average, 3.0);
    assert!(first.already_rated);
    assert_eq!(first.summary().as_deref(), Some("3.0"));

    let second = &entries[1];
    assert_eq!(second.module.id, unrated.id);
    assert_eq!(second.total_ratings, 0);
    assert_eq!(second.overall_average, 0.0);
    assert!(!second.already_rated);
    assert_eq!(second.summary(), None);
}

#[tokio::test]
async fn test_admin_listing_sends_bearer_token() {
    let active = module(true);
    let inactive = module(false);
    let base_url = serve(Backend {
        modules: vec![active, inactive],
        ratings: Vec::new(),
    })
    .await;

    let modules = AssessClient::new(base_url.clone())
        .with_token(ADMIN_TOKEN)
        .list_all_modules()
        .await
        .unwrap();
    assert_eq!(modules.len(), 2);

    let err = AssessClient::new(base_url.clone())
        .with_token("wrong")
        .list_all_modules()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // No token at all never reaches the network
    let err = AssessClient::new(base_url).list_all_modules().await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
