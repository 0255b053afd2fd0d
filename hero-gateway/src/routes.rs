//! Axum route handlers for the superheroes API.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use hero_core::{HeroId, NewHeroPower, PowerDescription, PowerId, Strength};
use hero_store::HeroStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    dto::{
        CreateHeroPowerBody, HeroDetail, HeroPowerCreated, HeroSummary, PowerDetail, PowerSummary,
        UpdatePowerBody,
    },
    error::{ApiError, HERO_NOT_FOUND, HERO_OR_POWER_NOT_FOUND, POWER_NOT_FOUND},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Store handle shared by every handler.
pub type Store = Arc<dyn HeroStore>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given store.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/heroes", get(list_heroes))
        .route("/heroes/{id}", get(get_hero))
        .route("/powers", get(list_powers))
        .route("/powers/{id}", get(get_power).patch(update_power))
        .route("/hero_powers", post(create_hero_power))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /`: static landing fragment.
pub async fn home() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// `GET /health`: liveness probe that round-trips the store.
///
/// # Errors
/// Returns [`ApiError::Store`] if the store cannot be reached.
pub async fn health(State(store): State<Store>) -> Result<impl IntoResponse, ApiError> {
    store.ping().await?;
    Ok((StatusCode::OK, Json(serde_json::json!({"status": "ok"}))))
}

/// `GET /heroes`: every hero, without associations.
///
/// # Errors
/// Returns [`ApiError::Store`] if the query fails.
pub async fn list_heroes(State(store): State<Store>) -> Result<Json<Vec<HeroSummary>>, ApiError> {
    let heroes = store.list_heroes().await?;
    Ok(Json(heroes.into_iter().map(HeroSummary::from).collect()))
}

/// `GET /heroes/{id}`: one hero with its powers.
///
/// # Errors
/// Returns [`ApiError::NotFound`] if the id is unknown or not an integer.
pub async fn get_hero(
    State(store): State<Store>,
    id: Result<Path<HeroId>, PathRejection>,
) -> Result<Json<HeroDetail>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound(HERO_NOT_FOUND));
    };
    let hero = store.hero(id).await?.ok_or(ApiError::NotFound(HERO_NOT_FOUND))?;
    Ok(Json(hero.into()))
}

/// `GET /powers`: every power, without associations.
///
/// # Errors
/// Returns [`ApiError::Store`] if the query fails.
pub async fn list_powers(
    State(store): State<Store>,
) -> Result<Json<Vec<PowerSummary>>, ApiError> {
    let powers = store.list_powers().await?;
    Ok(Json(powers.into_iter().map(PowerSummary::from).collect()))
}

/// `GET /powers/{id}`: one power with its heroes.
///
/// # Errors
/// Returns [`ApiError::NotFound`] if the id is unknown or not an integer.
pub async fn get_power(
    State(store): State<Store>,
    id: Result<Path<PowerId>, PathRejection>,
) -> Result<Json<PowerDetail>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound(POWER_NOT_FOUND));
    };
    let power = store.power(id).await?.ok_or(ApiError::NotFound(POWER_NOT_FOUND))?;
    Ok(Json(power.into()))
}

/// `PATCH /powers/{id}`: replace the description of a power.
///
/// An unknown id wins over a bad body: a rejected body is only reported once
/// the power is known to exist.
///
/// # Errors
/// Returns [`ApiError::NotFound`] if the power does not exist, or
/// [`ApiError::Validation`] if the body is malformed or the description is
/// too short. Nothing is written on error.
pub async fn update_power(
    State(store): State<Store>,
    id: Result<Path<PowerId>, PathRejection>,
    body: Result<Json<UpdatePowerBody>, JsonRejection>,
) -> Result<Json<PowerDetail>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound(POWER_NOT_FOUND));
    };
    let update = body.map_err(ApiError::from).and_then(|Json(body)| {
        body.description
            .map(PowerDescription::new)
            .transpose()
            .map_err(ApiError::from)
    });

    match update {
        Ok(Some(description)) => {
            let updated = store.update_power_description(id, &description).await?;
            Ok(Json(updated.into()))
        }
        Ok(None) => {
            let current = store.power(id).await?.ok_or(ApiError::NotFound(POWER_NOT_FOUND))?;
            Ok(Json(current.into()))
        }
        Err(rejected) => {
            store.power(id).await?.ok_or(ApiError::NotFound(POWER_NOT_FOUND))?;
            Err(rejected)
        }
    }
}

/// `POST /hero_powers`: link a hero to a power, replacing any existing link
/// between the two.
///
/// # Errors
/// Returns [`ApiError::Validation`] if the strength is missing or unknown
/// (checked before the ids), [`ApiError::NotFound`] if either end is missing,
/// or [`ApiError::Store`] on any other failure.
pub async fn create_hero_power(
    State(store): State<Store>,
    body: Result<Json<CreateHeroPowerBody>, JsonRejection>,
) -> Result<Json<HeroPowerCreated>, ApiError> {
    let Json(body) = body?;
    let strength: Strength = body.strength.as_deref().ok_or(ApiError::Validation)?.parse()?;
    let (Some(hero_id), Some(power_id)) = (body.hero_id, body.power_id) else {
        return Err(ApiError::NotFound(HERO_OR_POWER_NOT_FOUND));
    };

    let written = store
        .upsert_hero_power(NewHeroPower { strength, hero_id, power_id })
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(HERO_OR_POWER_NOT_FOUND)
            } else {
                ApiError::Store(e)
            }
        })?;
    Ok(Json(written.into()))
}
