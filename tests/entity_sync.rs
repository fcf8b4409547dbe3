mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{harness, harness_with, config_for, project_json, tag_json, technology_json, user_json};
use folio::api::ListQuery;
use folio::model::{Project, ProjectForm, Tag, TagColor, TagForm, Technology, User};
use folio::notification::NotificationKind;
use folio::store::{Action, EntityAction, EntityCommand, OpState, Phase};
use folio::LinkOp;
use serde_json::json;

fn tag_form(name: &str) -> TagForm {
    TagForm {
        name: name.to_string(),
        color: TagColor::Green,
    }
}

fn project_form(name: &str) -> ProjectForm {
    ProjectForm {
        name: name.to_string(),
        description: "A project".to_string(),
        user_id: 1,
        cover: None,
        domain: None,
        repo: None,
        details: None,
    }
}

#[tokio::test]
async fn paged_fetch_sends_offset_and_keeps_total_pages() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [tag_json(11, "axum")], "totalPages": 3 })),
        )
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Tag>::FetchList(ListQuery::page(2).limit(10)))
        .await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/tags");
    assert_eq!(requests[0].query.as_deref(), Some("offset=10&limit=10"));

    let tags = h.store.slice::<Tag>();
    assert_eq!(tags.total_pages, 3);
    assert_eq!(tags.list.len(), 1);
    assert_eq!(tags.list[0].name, "axum");
}

#[tokio::test]
async fn missing_or_zero_total_pages_reads_as_one() {
    let backend = MockBackend::start().await;
    backend
        .once("GET", "/tags", MockResponse::json(json!({ "tags": [] })))
        .await;
    backend
        .once(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [], "totalPages": 0 })),
        )
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;
    assert_eq!(h.store.slice::<Tag>().total_pages, 1);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;
    assert_eq!(h.store.slice::<Tag>().total_pages, 1);
}

#[tokio::test]
async fn list_fetch_replaces_and_reports_each_phase_once() {
    let backend = MockBackend::start().await;
    backend
        .once(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [tag_json(1, "a"), tag_json(2, "b")] })),
        )
        .await;
    backend
        .once(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [tag_json(3, "c")] })),
        )
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;
    let mut actions = h.store.subscribe();
    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;

    let tags = h.store.slice::<Tag>();
    assert_eq!(tags.list.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(tags.fetch_list, OpState::Succeeded);

    let mut phases = Vec::new();
    while let Ok(action) = actions.try_recv() {
        if let Action::Tags(EntityAction::FetchList(phase)) = action {
            phases.push(matches!(phase, Phase::Pending));
        }
    }
    assert_eq!(phases, vec![true, false]);
}

#[tokio::test]
async fn technologies_without_page_fetch_everything() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "GET",
            "/technologies",
            MockResponse::json(json!({ "technologies": [technology_json(1, "Rust")] })),
        )
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Technology>::refresh()).await;

    let requests = backend.requests_to("GET", "/technologies").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, None);
    assert_eq!(h.store.slice::<Technology>().list.len(), 1);
}

#[tokio::test]
async fn search_uses_the_resource_field() {
    let backend = MockBackend::start().await;
    backend
        .on("GET", "/projects", MockResponse::json(json!({ "projects": [] })))
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Project>::FetchList(
            ListQuery::page(1).search("folio"),
        ))
        .await;

    let requests = backend.requests_to("GET", "/projects").await;
    assert_eq!(
        requests[0].query.as_deref(),
        Some("offset=0&limit=10&name=folio")
    );
}

#[tokio::test]
async fn failed_fetch_sets_error_and_notifies() {
    let backend = MockBackend::start().await;
    backend
        .on("GET", "/tags", MockResponse::error(500, "boom"))
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;

    let state = h.store.state();
    assert_eq!(state.tags.fetch_list.error(), Some("GET /tags returned HTTP 500"));
    assert!(!state.tags.fetch_list.is_loading());
    assert!(state.notification.visible);
    assert_eq!(state.notification.kind, NotificationKind::Error);
    assert_eq!(state.notification.text, "Failed to load tags.");
}

#[tokio::test]
async fn malformed_body_is_a_rejection() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [{ "id": "not-a-number" }] })),
        )
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;

    let error = h.store.slice::<Tag>().fetch_list.error().map(str::to_string);
    assert!(error.unwrap().starts_with("Unexpected response from GET /tags"));
}

#[tokio::test]
async fn transport_failure_is_a_rejection() {
    // Nothing listens on port 9 on the loopback interface.
    let h = harness_with(config_for("http://127.0.0.1:9"), None);

    h.store.dispatch(EntityCommand::<Tag>::FetchOne(1)).await;

    let state = h.store.state();
    assert!(matches!(state.tags.fetch_one, OpState::Failed(_)));
    assert_eq!(state.notification.text, "Failed to load tag.");
}

#[tokio::test]
async fn delete_refetches_the_list_exactly_once() {
    let backend = MockBackend::start().await;
    backend
        .on("DELETE", "/tags/4", MockResponse::json(json!({ "id": 4 })))
        .await;
    backend
        .on("GET", "/tags", MockResponse::json(json!({ "tags": [tag_json(1, "kept")] })))
        .await;
    let h = harness_with(config_for(&backend.base_url()), Some("abc"));

    h.store.dispatch(EntityCommand::<Tag>::Delete(4)).await;
    h.store.settle().await;

    let deletes = backend.requests_to("DELETE", "/tags/4").await;
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].header("authorization"), Some("Bearer abc"));

    let lists = backend.requests_to("GET", "/tags").await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].query.as_deref(), Some("offset=0&limit=10"));

    let state = h.store.state();
    assert_eq!(state.tags.delete, OpState::Succeeded);
    assert_eq!(state.tags.list.len(), 1);
    assert_eq!(state.notification.text, "Tag deleted successfully!");
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn create_refetches_once_and_schedules_one_redirect() {
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/tags", MockResponse::json(tag_json(9, "tokio")))
        .await;
    backend
        .on("GET", "/tags", MockResponse::json(json!({ "tags": [tag_json(9, "tokio")] })))
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::Create(tag_form("tokio"))).await;
    h.store.settle().await;

    assert_eq!(
        backend.requests_to("POST", "/tags").await[0].json(),
        json!({ "name": "tokio", "color": "green" })
    );
    assert_eq!(backend.requests_to("GET", "/tags").await.len(), 1);

    let state = h.store.state();
    assert_eq!(state.tags.detail.as_ref().map(|t| t.id), Some(9));
    assert_eq!(state.notification.text, "Tag created successfully!");
    assert_eq!(state.notification.kind, NotificationKind::Success);
    assert_eq!(h.store.pending_navigations(), 1);
    assert!(h.navigator.routes().is_empty());

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(h.navigator.routes(), vec!["/admin/tags".to_string()]);
}

#[tokio::test]
async fn project_without_domain_round_trips_through_create_and_list() {
    let stored = json!({
        "id": 7,
        "name": "Site",
        "description": "A project",
        "cover": null,
        "domain": null,
        "repo": null,
        "details": null,
        "userId": 1
    });
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/projects", MockResponse::json(stored.clone()))
        .await;
    backend
        .on(
            "GET",
            "/projects",
            MockResponse::json(json!({ "projects": [stored], "totalPages": 1 })),
        )
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Project>::Create(project_form("Site")))
        .await;
    h.store.settle().await;

    assert_eq!(
        backend.requests_to("POST", "/projects").await[0].json()["domain"],
        json!(null)
    );
    let projects = h.store.slice::<Project>();
    assert_eq!(projects.create, OpState::Succeeded);
    assert_eq!(projects.fetch_list, OpState::Succeeded);
    assert_eq!(projects.list.len(), 1);
    assert_eq!(projects.list[0].domain, None);
    assert_eq!(h.store.state().notification.text, "Project created successfully!");
    assert_eq!(h.store.pending_navigations(), 1);
}

#[tokio::test]
async fn failed_create_has_no_follow_ups() {
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/tags", MockResponse::error(400, "bad"))
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::Create(tag_form("x"))).await;
    h.store.settle().await;

    assert!(backend.requests_to("GET", "/tags").await.is_empty());
    assert_eq!(h.store.pending_navigations(), 0);
    assert_eq!(h.store.state().notification.text, "Failed to create tag.");
}

#[tokio::test]
async fn update_writes_detail_and_refetches() {
    let backend = MockBackend::start().await;
    backend
        .on("PUT", "/projects/1", MockResponse::json(project_json(1, "Renamed", vec![])))
        .await;
    backend
        .on(
            "GET",
            "/projects",
            MockResponse::json(json!({ "projects": [project_json(1, "Renamed", vec![])] })),
        )
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Project>::Update {
            id: 1,
            data: project_form("Renamed"),
        })
        .await;
    h.store.settle().await;

    let body = backend.requests_to("PUT", "/projects/1").await[0].json();
    assert_eq!(body["userId"], json!(1));
    assert!(body.get("cover").is_none());

    let projects = h.store.slice::<Project>();
    assert_eq!(projects.detail.as_ref().map(|p| p.name.as_str()), Some("Renamed"));
    assert_eq!(projects.list.len(), 1);
    assert_eq!(backend.requests_to("GET", "/projects").await.len(), 1);
    assert_eq!(h.store.state().notification.text, "Project updated successfully!");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_updates_keep_the_last_response() {
    let backend = MockBackend::start().await;
    backend
        .on_body(
            "PUT",
            "/projects/1",
            "\"name\":\"A\"",
            MockResponse::json(project_json(1, "A", vec![])).with_delay(300),
        )
        .await;
    backend
        .on_body(
            "PUT",
            "/projects/1",
            "\"name\":\"B\"",
            MockResponse::json(project_json(1, "B", vec![])).with_delay(10),
        )
        .await;
    backend
        .on("GET", "/projects", MockResponse::json(json!({ "projects": [] })))
        .await;
    let h = harness(&backend);

    let first = {
        let store = h.store.clone();
        tokio::spawn(async move {
            store
                .dispatch(EntityCommand::<Project>::Update {
                    id: 1,
                    data: project_form("A"),
                })
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = {
        let store = h.store.clone();
        tokio::spawn(async move {
            store
                .dispatch(EntityCommand::<Project>::Update {
                    id: 1,
                    data: project_form("B"),
                })
                .await
        })
    };

    second.await.unwrap();
    assert_eq!(
        h.store.slice::<Project>().detail.map(|p| p.name),
        Some("B".to_string())
    );

    first.await.unwrap();
    h.store.settle().await;
    assert_eq!(
        h.store.slice::<Project>().detail.map(|p| p.name),
        Some("A".to_string())
    );
    assert_eq!(backend.requests_to("PUT", "/projects/1").await.len(), 2);
}

#[tokio::test]
async fn link_posts_relation_and_refetches_owner() {
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/projects/add-tech", MockResponse::json(json!({ "ok": true })))
        .await;
    backend
        .on(
            "GET",
            "/projects/1",
            MockResponse::json(project_json(1, "Site", vec![technology_json(2, "Rust")])),
        )
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Project>::Link {
            op: LinkOp::Add,
            owner: 1,
            target: 2,
        })
        .await;
    h.store.settle().await;

    let posts = backend.requests_to("POST", "/projects/add-tech").await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].json(), json!({ "projectId": 1, "technologyId": 2 }));

    let project = h.store.slice::<Project>().detail.unwrap();
    assert_eq!(project.technologies.len(), 1);
    assert_eq!(h.store.slice::<Project>().link, OpState::Succeeded);
    assert!(!h.store.state().notification.visible);
}

#[tokio::test]
async fn remove_tag_from_technology() {
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/technologies/remove-tag", MockResponse::error(404, "missing"))
        .await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Technology>::Link {
            op: LinkOp::Remove,
            owner: 5,
            target: 6,
        })
        .await;
    h.store.settle().await;

    let posts = backend.requests_to("POST", "/technologies/remove-tag").await;
    assert_eq!(posts[0].json(), json!({ "technologyId": 5, "tagId": 6 }));
    assert!(backend.requests_to("GET", "/technologies/5").await.is_empty());
    assert_eq!(
        h.store.state().notification.text,
        "Failed to remove tag from technology."
    );
}

#[tokio::test]
async fn relation_on_unlinked_entity_is_rejected_without_request() {
    let backend = MockBackend::start().await;
    let h = harness(&backend);

    h.store
        .dispatch(EntityCommand::<Tag>::Link {
            op: LinkOp::Add,
            owner: 1,
            target: 2,
        })
        .await;

    assert!(backend.captured_requests().await.is_empty());
    assert!(matches!(h.store.slice::<Tag>().link, OpState::Failed(_)));
    assert_eq!(
        h.store.state().notification.text,
        "relation change is not supported for this resource"
    );
}

#[tokio::test]
async fn user_detail_is_public() {
    let backend = MockBackend::start().await;
    backend
        .on("GET", "/users/1", MockResponse::json(user_json(1)))
        .await;
    backend
        .on("GET", "/projects/1", MockResponse::json(project_json(1, "Site", vec![])))
        .await;
    let h = harness_with(config_for(&backend.base_url()), Some("abc"));

    h.store.dispatch(EntityCommand::<User>::FetchOne(1)).await;
    h.store.dispatch(EntityCommand::<Project>::FetchOne(1)).await;

    assert_eq!(
        backend.requests_to("GET", "/users/1").await[0].header("authorization"),
        None
    );
    assert_eq!(
        backend.requests_to("GET", "/projects/1").await[0].header("authorization"),
        Some("Bearer abc")
    );
    assert_eq!(
        h.store.slice::<User>().detail.map(|u| u.first_name),
        Some("Ada".to_string())
    );
}

#[tokio::test]
async fn detail_and_list_are_not_reconciled() {
    let backend = MockBackend::start().await;
    backend
        .once(
            "GET",
            "/tags",
            MockResponse::json(json!({ "tags": [tag_json(1, "old")] })),
        )
        .await;
    backend
        .on("GET", "/tags/1", MockResponse::json(tag_json(1, "new")))
        .await;
    let h = harness(&backend);

    h.store.dispatch(EntityCommand::<Tag>::refresh()).await;
    h.store.dispatch(EntityCommand::<Tag>::FetchOne(1)).await;

    let tags = h.store.slice::<Tag>();
    assert_eq!(tags.list[0].name, "old");
    assert_eq!(tags.detail.unwrap().name, "new");
}
