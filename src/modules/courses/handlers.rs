//! Request handlers for the course catalogue.
//!
//! Failures are answered through [`AppError`], which renders them as a plain
//! JSON string with status 200.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Html,
    Json,
};
use courses_http::error::{ApiResult, AppError};

use super::ids::IdGenerator;
use super::models::Course;
use super::store::CourseStore;

pub const GREETING: &str = "<h1>Welcome to API by GO Lang !</h1>";
pub const COURSE_NOT_FOUND: &str = "No Course found with given Id";
pub const EMPTY_COURSE: &str = "Please send some data";
pub const COURSE_UPDATED: &str = "Value updated successfully";
pub const UPDATE_NOT_FOUND: &str = "COurse Not Found ! Invalid Id";
pub const COURSE_DELETED: &str = "Course deleted successfully";
pub const DELETE_NOT_FOUND: &str = "No course matched by Id ! Unable to delete course.";

/// State shared by the course handlers
#[derive(Clone)]
pub struct CoursesState {
    pub store: Arc<CourseStore>,
    pub ids: Arc<dyn IdGenerator>,
}

pub async fn serve_home() -> Html<&'static str> {
    Html(GREETING)
}

pub async fn find_all_courses(State(state): State<CoursesState>) -> Json<BTreeMap<String, Course>> {
    tracing::info!("fetching all courses");
    Json(state.store.all().await)
}

pub async fn find_one_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
) -> ApiResult<Course> {
    tracing::info!(%id, "fetching course");

    let course = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

    Ok(Json(course))
}

/// Any id sent in the body is replaced by a generated one.
pub async fn create_one_course(State(state): State<CoursesState>, body: Bytes) -> ApiResult<Course> {
    let mut course = Course::from_body(&body);
    if course.is_empty() {
        return Err(AppError::invalid_input(EMPTY_COURSE));
    }

    course.id = state.ids.next_id();
    if state.store.contains(&course.id).await {
        tracing::warn!(id = %course.id, "generated id already in use, overwriting course");
    }
    state.store.set(course.id.clone(), course.clone()).await;

    tracing::info!(id = %course.id, name = %course.name, "course created");
    Ok(Json(course))
}

/// Replaces the whole record; the path id stays the key whatever the body says.
pub async fn update_one_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<&'static str> {
    tracing::info!(%id, "updating course");

    let course = Course::from_body(&body);
    if !state.store.replace_existing(&id, course).await {
        return Err(AppError::not_found(UPDATE_NOT_FOUND));
    }

    Ok(Json(COURSE_UPDATED))
}

pub async fn delete_one_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
) -> ApiResult<&'static str> {
    tracing::info!(%id, "deleting course");

    if !state.store.delete(&id).await {
        return Err(AppError::not_found(DELETE_NOT_FOUND));
    }

    Ok(Json(COURSE_DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::courses::ids::SequentialId;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn create_overwrites_course_on_id_collision() {
        let store = Arc::new(CourseStore::new());
        store.seed().await;
        let state = CoursesState {
            store: store.clone(),
            ids: Arc::new(SequentialId::starting_at(1)),
        };
        let app = Router::new()
            .route("/course", post(create_one_course))
            .with_state(state);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/course")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Svelte","price":99}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: Course = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(created.id, "1");
        assert_eq!(store.len().await, 5);
        let stored = store.get("1").await.unwrap();
        assert_eq!(stored.name, "Svelte");
        assert_eq!(stored.author, None);
    }
}
