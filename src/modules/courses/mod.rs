pub mod handlers;
pub mod ids;
pub mod models;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use courses_kernel::{settings::CourseSettings, InitCtx, Module};
use serde_json::json;

use handlers::CoursesState;
use store::CourseStore;

/// Course catalogue: CRUD over an in-memory store
pub struct CoursesModule {
    state: CoursesState,
}

impl CoursesModule {
    pub fn new(settings: &CourseSettings) -> Self {
        // Sequential ids start after the seeded catalogue.
        let first_sequential = if settings.seed {
            models::seed_catalogue().len() as u64 + 1
        } else {
            1
        };

        Self {
            state: CoursesState {
                store: Arc::new(CourseStore::new()),
                ids: ids::from_strategy(settings.id_strategy, first_sequential),
            },
        }
    }

    /// Store backing this module
    pub fn store(&self) -> &Arc<CourseStore> {
        &self.state.store
    }
}

#[async_trait]
impl Module for CoursesModule {
    fn name(&self) -> &'static str {
        "courses"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let seeded = if ctx.settings.courses.seed {
            self.state.store.seed().await
        } else {
            0
        };

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            id_strategy = ?ctx.settings.courses.id_strategy,
            seeded,
            "courses module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::serve_home))
            .route("/courses", get(handlers::find_all_courses))
            .route("/course", post(handlers::create_one_course))
            .route(
                "/course/{id}",
                get(handlers::find_one_course)
                    .put(handlers::update_one_course)
                    .delete(handlers::delete_one_course),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let message = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Message" }
                    }
                }
            })
        };
        let course = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Course" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let course_body = json!({
            "required": false,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Course" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Greeting page",
                        "tags": ["Courses"],
                        "responses": {
                            "200": {
                                "description": "HTML greeting",
                                "content": {
                                    "text/html": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                },
                "/courses": {
                    "get": {
                        "summary": "List all courses keyed by id",
                        "tags": ["Courses"],
                        "responses": {
                            "200": {
                                "description": "Map of id to course",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "additionalProperties": {
                                                "$ref": "#/components/schemas/Course"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/course": {
                    "post": {
                        "summary": "Create a course with a generated id",
                        "tags": ["Courses"],
                        "requestBody": course_body,
                        "responses": {
                            "200": course("Created course, or a message when no name was sent")
                        }
                    }
                },
                "/course/{id}": {
                    "get": {
                        "summary": "Get one course",
                        "tags": ["Courses"],
                        "parameters": [id_param],
                        "responses": {
                            "200": course("The course, or a message when the id is unknown")
                        }
                    },
                    "put": {
                        "summary": "Replace a course",
                        "tags": ["Courses"],
                        "parameters": [id_param],
                        "requestBody": course_body,
                        "responses": {
                            "200": message("Update status")
                        }
                    },
                    "delete": {
                        "summary": "Delete a course",
                        "tags": ["Courses"],
                        "parameters": [id_param],
                        "responses": {
                            "200": message("Delete status")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "fullname": { "type": "string" },
                            "website": { "type": "string" }
                        }
                    },
                    "Course": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Identifier, generated on create"
                            },
                            "name": {
                                "type": "string",
                                "description": "Must be non-empty on create"
                            },
                            "price": { "type": "integer", "format": "int64" },
                            "author": { "$ref": "#/components/schemas/Author" }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let courses = self.state.store.len().await;
        tracing::info!(
            module = self.name(),
            courses,
            "courses module stopped, catalogue discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the courses module
pub fn create_module(settings: &CourseSettings) -> Arc<dyn Module> {
    Arc::new(CoursesModule::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use courses_kernel::settings::{IdStrategy, Settings};

    #[tokio::test]
    async fn init_seeds_when_enabled() {
        let settings = Settings::default();
        let module = CoursesModule::new(&settings.courses);
        module
            .init(&InitCtx {
                settings: &settings,
            })
            .await
            .unwrap();

        assert_eq!(module.store().len().await, 5);
    }

    #[tokio::test]
    async fn init_leaves_store_empty_without_seed() {
        let mut settings = Settings::default();
        settings.courses.seed = false;
        let module = CoursesModule::new(&settings.courses);
        module
            .init(&InitCtx {
                settings: &settings,
            })
            .await
            .unwrap();

        assert!(module.store().is_empty().await);
    }

    #[tokio::test]
    async fn lifecycle_runs_on_spawned_task() {
        let settings = Settings::default();
        let module = create_module(&settings.courses);

        let handle = tokio::spawn(async move {
            let ctx = InitCtx {
                settings: &settings,
            };
            module.init(&ctx).await?;
            module.start(&ctx).await?;
            module.stop().await
        });

        handle.await.unwrap().unwrap();
    }

    #[test]
    fn sequential_ids_start_after_seed() {
        let mut settings = Settings::default();
        settings.courses.id_strategy = IdStrategy::Sequential;
        let module = CoursesModule::new(&settings.courses);
        assert_eq!(module.state.ids.next_id(), "6");
    }

    #[test]
    fn openapi_fragment_describes_every_route() {
        let module = CoursesModule::new(&CourseSettings::default());
        let spec = module.openapi().unwrap();
        for path in ["/", "/courses", "/course", "/course/{id}"] {
            assert!(spec["paths"][path].is_object(), "missing {path}");
        }
        assert!(spec["paths"]["/course/{id}"]["delete"].is_object());
        assert!(spec["components"]["schemas"]["Course"].is_object());
    }
}
