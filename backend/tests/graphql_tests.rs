//! Named queries against a local stand-in for the GraphQL endpoint.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use backend::api::saved_searches::{create_saved_search, my_saved_searches};
use backend::api::search::{run_named_query, search_list};
use backend::config::BackendConfig;
use backend::db_utils::graphql_utils::{GraphqlClient, RemoteQueryError};
use backend::graphql_query_service::GraphqlQueryService;
use common::query_service::{LookupKind, QueryService, lookup_entities};
use common::saved_search::SavedSearchInput;
use common::search_object_type::SearchObjectType;
use common::search_query::SerializedQuery;
use common::search_result::SearchListRequest;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn graphql(State(recorded): State<Recorded>, Json(request): Json<Value>) -> (StatusCode, Json<Value>) {
    recorded.requests.lock().unwrap().push(request.clone());
    let document = request["query"].as_str().unwrap_or_default().to_string();
    let response = if document.contains("organizations(uuids: $uuids)") {
        let rows = request["variables"]["uuids"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|uuid| match uuid.as_str() {
                Some("O1") => json!({ "uuid": "O1", "name": "EF 1" }),
                _ => Value::Null,
            })
            .collect::<Vec<_>>();
        json!({ "data": { "organizations": rows } })
    } else if document.contains("reportList(query: $query)") {
        json!({ "data": { "reportList": {
            "pageNum": request["variables"]["query"]["pageNum"],
            "pageSize": request["variables"]["query"]["pageSize"],
            "totalCount": 3,
            "list": [{ "uuid": "R1", "intent": "Meet the mayor" }]
        } } })
    } else if document.contains("mySearches") {
        json!({ "data": { "mySearches": [
            { "uuid": "S2", "name": "Later", "objectType": "TASKS", "query": "{}", "displayInHomepage": false, "priority": 2.0 },
            { "uuid": "S1", "name": "First", "objectType": "PEOPLE", "query": "{\"text\":\"smith\"}", "displayInHomepage": true, "priority": 1.0 }
        ] } })
    } else if document.contains("createSavedSearch") {
        json!({ "data": { "createSavedSearch": { "uuid": "S3" } } })
    } else if document.contains("people(uuids: $uuids)") {
        json!({ "data": null, "errors": [{ "message": "Not authorized" }] })
    } else {
        return (StatusCode::BAD_REQUEST, Json(json!("unexpected document")));
    };
    (StatusCode::OK, Json(response))
}

async fn fake_endpoint() -> (GraphqlClient, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new().route("/graphql", post(graphql)).with_state(recorded.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    let config = BackendConfig { graphql_url: format!("http://{}/graphql", addr), ..Default::default() };
    (GraphqlClient::new(&config), recorded)
}

#[tokio::test]
async fn batch_lookup_goes_through_the_query_service() {
    let (client, recorded) = fake_endpoint().await;
    let service: Rc<dyn QueryService> = Rc::new(GraphqlQueryService::new(client));

    let found = lookup_entities(&service, LookupKind::Organization, vec!["O1".to_string(), "gone".to_string()])
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "EF 1");
    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests[0]["variables"], json!({ "uuids": ["O1", "gone"] }));
}

#[tokio::test]
async fn list_page_is_parsed() {
    let (client, recorded) = fake_endpoint().await;
    let mut query = SerializedQuery::new();
    query.insert("state", json!(["DRAFT"]));
    let request = SearchListRequest { object_type: SearchObjectType::Reports, query, page_num: 1 };

    let page = search_list(&client, request, 1).await.unwrap();

    assert_eq!(page.page_num, 1);
    assert_eq!(page.total_count, 3);
    assert!(page.has_next_page());
    assert_eq!(page.list[0]["intent"], json!("Meet the mayor"));
    let requests = recorded.requests.lock().unwrap();
    assert_eq!(
        requests[0]["variables"],
        json!({ "query": { "state": ["DRAFT"], "pageNum": 1, "pageSize": 1 } })
    );
}

#[tokio::test]
async fn graphql_errors_surface_as_errors() {
    let (client, _) = fake_endpoint().await;
    let err = run_named_query(&client, "people", json!({ "uuids": ["P1"] })).await.unwrap_err();
    match err.downcast_ref::<RemoteQueryError>() {
        Some(RemoteQueryError::Graphql(messages)) => assert_eq!(messages, &vec!["Not authorized".to_string()]),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unknown_names_never_reach_the_endpoint() {
    let (client, recorded) = fake_endpoint().await;
    let err = run_named_query(&client, "dropAllTables", json!({})).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<RemoteQueryError>(), Some(RemoteQueryError::UnknownQuery(_))));
    assert!(recorded.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn saved_searches_come_back_by_priority() {
    let (client, _) = fake_endpoint().await;
    let searches = my_saved_searches(&client).await.unwrap();
    let names = searches.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["First", "Later"]);
    assert_eq!(searches[0].share_query().to_query_string(), "objectType=PEOPLE&text=smith");
}

#[tokio::test]
async fn saving_sends_the_query_as_json_text() {
    let (client, recorded) = fake_endpoint().await;
    let share = SerializedQuery::from_query_string("objectType=REPORTS&state=DRAFT&state=APPROVED");
    let input = SavedSearchInput::from_share_query("Drafts", false, &share);

    let uuid = create_saved_search(&client, input).await.unwrap();

    assert_eq!(uuid, "S3");
    let requests = recorded.requests.lock().unwrap();
    assert_eq!(
        requests[0]["variables"],
        json!({ "savedSearch": {
            "name": "Drafts",
            "objectType": "REPORTS",
            "query": "{\"state\":[\"DRAFT\",\"APPROVED\"]}",
            "displayInHomepage": false
        } })
    );
}

#[tokio::test]
async fn unnamed_search_is_not_sent() {
    let (client, recorded) = fake_endpoint().await;
    let input = SavedSearchInput::from_share_query("  ", false, &SerializedQuery::new());
    assert!(create_saved_search(&client, input).await.is_err());
    assert!(recorded.requests.lock().unwrap().is_empty());
}
