// tests/client_tests.rs
//! End-to-end client calls against a scripted transport: request shapes,
//! pagination, error classification and the closed state.

mod common;

use common::ScriptedTransport;
use notionkit::api::{HttpMethod, RequestAuth};
use notionkit::model::query::{CheckboxPredicate, DatePredicate, NumberPredicate};
use notionkit::{
    DatabaseId, DatabaseQuery, DatabaseQueryPropertyFilter, DatabaseQuerySort, FormulaValue,
    MutableBlockList, NotionClientError, NotionErrorCode, OAuthCredentials, PageId, Pagination,
    PropertyData, PropertySort, PropertyValueList, SortDirection, UserId, UserKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const PAGE_ID: &str = "6a6d2b4e-0b0c-4a4c-9b5a-0f0e8c0d1a2b";
const DATABASE_ID: &str = "0f3c2d1e-5b4a-4c3d-8e2f-1a0b9c8d7e6f";

fn page_json(id: &str, title: &str) -> String {
    format!(
        r#"{{
            "object": "page",
            "id": "{id}",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-03-02T08:30:00.000Z",
            "archived": false,
            "parent": {{"type": "database_id", "database_id": "{db}"}},
            "properties": {{
                "Name": {{"id": "title", "type": "title", "title": [
                    {{"type": "text", "text": {{"content": "{title}"}}, "plain_text": "{title}"}}
                ]}}
            }}
        }}"#,
        id = id,
        db = DATABASE_ID,
        title = title
    )
}

#[tokio::test]
async fn test_get_user() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        "users/u-1",
        r#"{"object": "user", "id": "u-1", "type": "person", "name": "Leia",
            "avatar_url": null, "person": {"email": "leia@rebellion.org"}}"#,
    );
    let client = transport.client();

    let user = client
        .users()
        .get_user(&UserId::from_wire("u-1"))
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("Leia"));
    assert_eq!(user.email(), Some("leia@rebellion.org"));
    assert!(matches!(user.kind, UserKind::Person { .. }));
}

#[tokio::test]
async fn test_user_list_follows_cursors_in_order() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        "users",
        r#"{"object": "list", "results": [{"object": "user", "id": "u-1", "type": "bot", "bot": {}}],
            "next_cursor": "cursor-2", "has_more": true}"#,
    );
    transport.respond(
        HttpMethod::Get,
        "users",
        r#"{"object": "list", "results": [{"object": "user", "id": "u-2", "type": "bot", "bot": {}}],
            "next_cursor": null, "has_more": false}"#,
    );
    let client = transport.client();

    let users = client.users().get_all_user_list().await.unwrap();

    let ids: Vec<_> = users.iter().map(|u| u.id.to_string()).collect();
    assert_eq!(ids, vec!["u-1", "u-2"]);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].query_param("start_cursor"), None);
    assert_eq!(calls[0].query_param("page_size"), Some("100"));
    assert_eq!(calls[1].query_param("start_cursor"), Some("cursor-2"));
}

#[tokio::test]
async fn test_query_database_body() {
    let transport = ScriptedTransport::new();
    let path = format!("databases/{}/query", DATABASE_ID);
    transport.respond(
        HttpMethod::Post,
        &path,
        &format!(
            r#"{{"object": "list", "results": [{}], "next_cursor": null, "has_more": false}}"#,
            page_json(PAGE_ID, "Han")
        ),
    );
    let client = transport.client();

    let query = DatabaseQuery::new()
        .all(DatabaseQueryPropertyFilter::number(
            "Legs",
            NumberPredicate::equals(3),
        ))
        .all(DatabaseQueryPropertyFilter::date(
            "Seen",
            DatePredicate::IsPastWeek,
        ));
    let sort = DatabaseQuerySort::new().descending("Legs");

    let page = client
        .databases()
        .query_database(
            &DatabaseId::from_wire(DATABASE_ID),
            Some(&query),
            Some(&sort),
            Some(Pagination::new("abc")),
        )
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.next_pagination, None);

    let body = transport.calls()[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "filter": {"and": [
                {"property": "Legs", "number": {"equals": 3.0}},
                {"property": "Seen", "date": {"past_week": {}}}
            ]},
            "sorts": [{"property": "Legs", "direction": "descending"}],
            "page_size": 100,
            "start_cursor": "abc"
        })
    );
}

#[tokio::test]
async fn test_query_without_filter_or_sort_sends_neither() {
    let transport = ScriptedTransport::new();
    let path = format!("databases/{}/query", DATABASE_ID);
    transport.respond(
        HttpMethod::Post,
        &path,
        r#"{"object": "list", "results": [], "next_cursor": null, "has_more": false}"#,
    );
    let client = transport.client();

    let rows = client
        .databases()
        .query_database_all(
            &DatabaseId::from_wire(DATABASE_ID),
            Some(&DatabaseQuery::new()),
            Some(&DatabaseQuerySort::new()),
        )
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        transport.calls()[0].body,
        Some(json!({"page_size": 100}))
    );
}

#[tokio::test]
async fn test_unchecked_checkbox_filter() {
    let transport = ScriptedTransport::new();
    let path = format!("databases/{}/query", DATABASE_ID);
    transport.respond(
        HttpMethod::Post,
        &path,
        r#"{"object": "list", "results": [], "next_cursor": null, "has_more": false}"#,
    );
    let client = transport.client();

    let query = DatabaseQuery::new().any(DatabaseQueryPropertyFilter::checkbox(
        "Done",
        CheckboxPredicate::is_checked(false),
    ));
    client
        .databases()
        .query_database(&DatabaseId::from_wire(DATABASE_ID), Some(&query), None, None)
        .await
        .unwrap();

    let body = transport.calls()[0].body.clone().unwrap();
    assert_eq!(
        body["filter"],
        json!({"or": [{"property": "Done", "checkbox": {"does_not_equal": true}}]})
    );
}

#[tokio::test]
async fn test_create_page_in_database() {
    let transport = ScriptedTransport::new();
    transport.respond(HttpMethod::Post, "pages", &page_json(PAGE_ID, "Chewie"));
    let client = transport.client();

    let properties = PropertyValueList::new()
        .title("Name", "Chewie")
        .number("Legs", 2)
        .checkbox("Wookiee", true)
        .select_by_name("Ship", "Falcon");
    let content = MutableBlockList::new().heading1("Bio").paragraph("Co-pilot");

    let page = client
        .pages()
        .create_page_in_database(
            &DatabaseId::from_wire(DATABASE_ID),
            properties,
            Some(content),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(page.id, PageId::from_wire(PAGE_ID));

    let body = transport.calls()[0].body.clone().unwrap();
    assert_eq!(
        body["parent"],
        json!({"type": "database_id", "database_id": DATABASE_ID})
    );
    assert_eq!(body["properties"]["Legs"], json!({"number": 2.0}));
    assert_eq!(body["properties"]["Wookiee"], json!({"checkbox": true}));
    assert_eq!(body["properties"]["Ship"], json!({"select": {"name": "Falcon"}}));
    assert_eq!(body["children"][0]["type"], json!("heading_1"));
    assert_eq!(body["children"][1]["type"], json!("paragraph"));
    assert!(body.get("icon").is_none());
}

#[tokio::test]
async fn test_create_sub_page_uses_title_key() {
    let transport = ScriptedTransport::new();
    transport.respond(HttpMethod::Post, "pages", &page_json(PAGE_ID, "Notes"));
    let client = transport.client();

    client
        .pages()
        .create_page_in_page(&PageId::from_wire(PAGE_ID), "Notes", None, None, None)
        .await
        .unwrap();

    let body = transport.calls()[0].body.clone().unwrap();
    assert_eq!(body["parent"], json!({"type": "page_id", "page_id": PAGE_ID}));
    assert_eq!(
        body["properties"]["title"]["title"][0]["text"]["content"],
        json!("Notes")
    );
}

#[tokio::test]
async fn test_archive_page() {
    let transport = ScriptedTransport::new();
    let path = format!("pages/{}", PAGE_ID);
    transport.respond(HttpMethod::Patch, &path, &page_json(PAGE_ID, "Old"));
    let client = transport.client();

    client
        .pages()
        .set_page_archived(&PageId::from_wire(PAGE_ID), true)
        .await
        .unwrap();

    assert_eq!(transport.calls()[0].body, Some(json!({"archived": true})));
}

#[tokio::test]
async fn test_read_only_property_is_rejected_before_sending() {
    let transport = ScriptedTransport::new();
    let client = transport.client();

    let properties = PropertyValueList::new().add(
        "Total",
        PropertyData::Formula(FormulaValue::Number(Some(1.0))),
    );
    let result = client
        .pages()
        .update_page(&PageId::from_wire(PAGE_ID), properties)
        .await;

    assert!(matches!(result, Err(NotionClientError::Conversion(_))));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_error_envelope_becomes_request_error() {
    let transport = ScriptedTransport::new();
    let path = format!("pages/{}", PAGE_ID);
    transport.fail(
        HttpMethod::Get,
        &path,
        400,
        r#"{"object": "error", "status": 400, "code": "validation_error",
            "message": "body failed validation", "details": {"field": "parent"}}"#,
    );
    let client = transport.client();

    let err = client
        .pages()
        .get_page(&PageId::from_wire(PAGE_ID))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.error_code(), Some(NotionErrorCode::ValidationFailed));
    match err {
        NotionClientError::Request {
            message, details, ..
        } => {
            assert_eq!(message, "body failed validation");
            assert_eq!(details, r#"{"field":"parent"}"#);
        }
        other => panic!("expected a request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_unexpected() {
    let transport = ScriptedTransport::new();
    transport.fail(HttpMethod::Get, "users", 502, "<html>Bad Gateway</html>");
    let client = transport.client();

    let err = client.users().get_user_list(None).await.unwrap_err();

    assert_eq!(err.error_code(), Some(NotionErrorCode::Unexpected));
    assert_eq!(err.status(), Some(502));
    match err {
        NotionClientError::Request {
            message, details, ..
        } => {
            assert!(message.starts_with("Unexpected error: "));
            assert!(message.contains("Bad Gateway"));
            assert_eq!(details, "{}");
        }
        other => panic!("expected a request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_closed_client_rejects_calls() {
    let transport = ScriptedTransport::new();
    let client = transport.client();

    assert!(!client.is_closed());
    client.close();
    client.close();
    assert!(client.is_closed());

    let result = client.users().get_user(&UserId::from_wire("u-1")).await;
    assert!(matches!(result, Err(NotionClientError::Closed)));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_oauth_token_exchange_uses_basic_auth() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Post,
        "oauth/token",
        r#"{"access_token": "secret_abc", "token_type": "bearer", "bot_id": "bot-1",
            "workspace_id": "ws-1", "workspace_name": "Rebellion", "workspace_icon": null}"#,
    );
    let client = transport.client();
    let credentials = OAuthCredentials {
        client_id: "client-1".to_string(),
        client_secret: "shh".to_string(),
        redirect_uri: "https://example.org/callback".to_string(),
    };

    let token = client
        .oauth()
        .get_access_token(&credentials, "code-42")
        .await
        .unwrap();

    assert_eq!(token.access_token, "secret_abc");
    assert_eq!(token.workspace_name.as_deref(), Some("Rebellion"));

    let call = &transport.calls()[0];
    assert_eq!(
        call.auth,
        RequestAuth::Basic {
            user: "client-1".to_string(),
            password: "shh".to_string()
        }
    );
    assert_eq!(
        call.body,
        Some(json!({
            "grant_type": "authorization_code",
            "code": "code-42",
            "redirect_uri": "https://example.org/callback"
        }))
    );
}

#[tokio::test]
async fn test_search_body() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Post,
        "search",
        r#"{"object": "list", "results": [], "next_cursor": null, "has_more": false}"#,
    );
    let client = transport.client();

    client
        .search()
        .search_databases(
            Some("ships"),
            Some(&PropertySort::last_edited(SortDirection::Ascending)),
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        transport.calls()[0].body,
        Some(json!({
            "query": "ships",
            "sort": {"timestamp": "last_edited_time", "direction": "ascending"},
            "filter": {"property": "object", "value": "database"},
            "page_size": 100
        }))
    );
}
