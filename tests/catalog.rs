mod common;

use budget_manager_frontend::catalog::{self, Loaded};
use budget_manager_frontend::model::{CategoryKind, GlobalCategoryDraft, TemplateCategoryDraft, TemplateDraft};
use common::FakeBackend;
use serde_json::json;

#[tokio::test]
async fn missing_template_tables_ask_for_migration() {
    let backend = FakeBackend::new();
    backend.fail("get_budget_templates", "no such table: budget_templates");

    let loaded = catalog::load_catalog(&backend).await.unwrap();

    assert_eq!(loaded, Loaded::NeedsMigration);
    assert_eq!(backend.call_names(), vec!["get_budget_templates"]);
}

#[tokio::test]
async fn other_failures_are_reported_as_errors() {
    let backend = FakeBackend::new();
    backend.fail("get_global_categories", "permission denied");

    let err = catalog::load_global_categories(&backend).await.unwrap_err();

    assert!(!err.is_schema_not_ready());
    assert_eq!(err.to_string(), "permission denied");
}

#[tokio::test]
async fn catalog_loads_templates_and_categories() {
    let backend = FakeBackend::new();
    backend
        .respond(
            "get_budget_templates",
            json!([{
                "template_id": 3,
                "name": "Lean month",
                "description": null,
                "created_at": "2025-02-01 08:00:00",
                "category_count": 2,
                "total_amount": 900.0
            }]),
        )
        .respond(
            "get_global_categories",
            json!([{"global_category_id": 1, "name": "Rent", "description": null, "created_at": "2025-01-01"}]),
        );

    let Loaded::Ready(loaded) = catalog::load_catalog(&backend).await.unwrap() else {
        panic!("expected a loaded catalog");
    };
    assert_eq!(loaded.templates[0].name, "Lean month");
    assert_eq!(loaded.global_categories[0].name, "Rent");
}

#[tokio::test]
async fn migration_returns_the_backend_message() {
    let backend = FakeBackend::new();
    backend.respond("run_migration", json!("Migration completed"));

    assert_eq!(catalog::run_migration(&backend).await.unwrap(), "Migration completed");
}

#[tokio::test]
async fn blank_global_category_is_refused_locally() {
    let backend = FakeBackend::new();
    let draft = GlobalCategoryDraft {
        name: "   ".to_string(),
        description: Some("anything".to_string()),
    };

    let err = catalog::create_global_category(&backend, &draft).await.unwrap_err();

    assert!(err.field_errors().and_then(|f| f.get("name")).is_some());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn editing_a_template_sends_an_update() {
    let backend = FakeBackend::new();
    backend.respond(
        "update_budget_template",
        json!({
            "template_id": 3,
            "name": "Lean month",
            "description": null,
            "created_at": "2025-02-01 08:00:00",
            "categories": []
        }),
    );
    let draft = TemplateDraft {
        name: " Lean month ".to_string(),
        description: Some("  ".to_string()),
        categories: vec![TemplateCategoryDraft {
            global_category_id: 1,
            allocated_amount: 900.0,
            category_type: CategoryKind::Savings,
            sort_order: 0,
        }],
    };

    let saved = catalog::save_template(&backend, Some(3), &draft).await.unwrap();

    assert_eq!(saved.template_id, 3);
    let args = backend.last_args("update_budget_template").unwrap();
    assert_eq!(args["templateId"], json!(3));
    assert_eq!(args["args"]["name"], json!("Lean month"));
    assert_eq!(args["args"]["categories"][0]["category_type"], json!("savings"));
}
