// tests/block_tree_tests.rs
//! Recursive block fetching: nesting, sibling order, failure, concurrency and
//! cancellation.

mod common;

use common::ScriptedTransport;
use notionkit::api::HttpMethod;
use notionkit::{Block, BlockId, Children, MutableBlockList, NotionClientError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn paragraph(id: &str, text: &str, has_children: bool) -> String {
    format!(
        r#"{{
            "object": "block",
            "id": "{id}",
            "type": "paragraph",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-03-01T19:05:00.000Z",
            "has_children": {has_children},
            "paragraph": {{
                "rich_text": [{{"type": "text", "text": {{"content": "{text}"}}, "plain_text": "{text}"}}],
                "color": "default"
            }}
        }}"#,
        id = id,
        text = text,
        has_children = has_children
    )
}

fn listing(blocks: &[String]) -> String {
    format!(
        r#"{{"object": "list", "results": [{}], "next_cursor": null, "has_more": false}}"#,
        blocks.join(",")
    )
}

fn children_path(id: &str) -> String {
    format!("blocks/{}/children", id)
}

fn texts(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .map(|b| b.text().and_then(|t| t.plain_text()).unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_nested_children_are_fetched() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        &children_path("root"),
        &listing(&[
            paragraph("b1", "one", false),
            paragraph("b2", "two", true),
            paragraph("b3", "three", false),
        ]),
    );
    transport.respond(
        HttpMethod::Get,
        &children_path("b2"),
        &listing(&[paragraph("b2a", "two-a", true)]),
    );
    transport.respond(
        HttpMethod::Get,
        &children_path("b2a"),
        &listing(&[paragraph("b2a1", "two-a-one", false)]),
    );
    let client = transport.client();

    let blocks = client
        .blocks()
        .get_all_block_list_recursively(&BlockId::from_wire("root"))
        .await
        .unwrap();

    assert_eq!(texts(&blocks), vec!["one", "two", "three"]);
    assert_eq!(blocks[0].children(), &Children::NotApplicable);

    let nested = blocks[1].children().fetched().unwrap();
    assert_eq!(texts(nested), vec!["two-a"]);
    let deepest = nested[0].children().fetched().unwrap();
    assert_eq!(texts(deepest), vec!["two-a-one"]);

    assert_eq!(blocks.iter().map(Block::subtree_len).sum::<usize>(), 5);
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_sibling_order_survives_uneven_latency() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        &children_path("root"),
        &listing(&[
            paragraph("slow", "slow", true),
            paragraph("fast", "fast", true),
        ]),
    );
    transport.respond(
        HttpMethod::Get,
        &children_path("slow"),
        &listing(&[paragraph("slow-1", "slow child", false)]),
    );
    transport.respond(
        HttpMethod::Get,
        &children_path("fast"),
        &listing(&[paragraph("fast-1", "fast child", false)]),
    );
    transport.delay(HttpMethod::Get, &children_path("slow"), Duration::from_millis(80));
    let client = transport.client();

    let blocks = client
        .blocks()
        .get_all_block_list_recursively(&BlockId::from_wire("root"))
        .await
        .unwrap();

    assert_eq!(texts(&blocks), vec!["slow", "fast"]);
    assert_eq!(
        texts(blocks[0].children().fetched().unwrap()),
        vec!["slow child"]
    );
    assert_eq!(
        texts(blocks[1].children().fetched().unwrap()),
        vec!["fast child"]
    );
}

#[tokio::test]
async fn test_siblings_are_fetched_concurrently() {
    let transport = ScriptedTransport::new();
    let ids = ["c1", "c2", "c3", "c4"];
    let parents: Vec<_> = ids.iter().map(|id| paragraph(id, id, true)).collect();
    transport.respond(HttpMethod::Get, &children_path("root"), &listing(&parents));
    for id in ids {
        transport.respond(HttpMethod::Get, &children_path(id), &listing(&[]));
        transport.delay(HttpMethod::Get, &children_path(id), Duration::from_millis(50));
    }
    let client = transport.client();

    let blocks = client
        .blocks()
        .get_all_block_list_recursively(&BlockId::from_wire("root"))
        .await
        .unwrap();

    assert_eq!(blocks.len(), 4);
    assert!(blocks
        .iter()
        .all(|b| b.children().fetched() == Some(&[][..])));
    assert!(transport.max_in_flight() > 1);
}

#[tokio::test]
async fn test_failure_in_subtree_fails_the_whole_fetch() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        &children_path("root"),
        &listing(&[
            paragraph("ok", "ok", true),
            paragraph("gone", "gone", true),
        ]),
    );
    transport.respond(HttpMethod::Get, &children_path("ok"), &listing(&[]));
    transport.fail(
        HttpMethod::Get,
        &children_path("gone"),
        404,
        r#"{"object": "error", "status": 404, "code": "object_not_found", "message": "Could not find block"}"#,
    );
    let client = transport.client();

    let err = client
        .blocks()
        .get_all_block_list_recursively(&BlockId::from_wire("root"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NotionClientError::Request { ref code, .. } if code == "object_not_found"
    ));
}

#[tokio::test]
async fn test_flat_listing_leaves_children_unfetched() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        &children_path("root"),
        &listing(&[paragraph("b1", "one", true)]),
    );
    let client = transport.client();

    let blocks = client
        .blocks()
        .get_all_block_list(&BlockId::from_wire("root"))
        .await
        .unwrap();

    assert!(blocks[0].children().needs_fetch());
    assert_eq!(blocks[0].children().as_slice().map(|c| c.len()), Some(0));
}

#[tokio::test]
async fn test_append_block_list_body() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Patch,
        &children_path("root"),
        &listing(&[paragraph("new", "appended", false)]),
    );
    let client = transport.client();

    let content = MutableBlockList::new()
        .to_do("Fix the hyperdrive", false)
        .divider();
    client
        .blocks()
        .append_block_list(&BlockId::from_wire("root"), &content)
        .await
        .unwrap();

    let body = transport.calls()[0].body.clone().unwrap();
    let children = body["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["type"], json!("to_do"));
    assert_eq!(children[0]["to_do"]["checked"], json!(false));
    assert_eq!(children[1]["type"], json!("divider"));
}

#[tokio::test]
async fn test_dropping_the_fetch_cancels_pending_subtrees() {
    let transport = ScriptedTransport::new();
    transport.respond(
        HttpMethod::Get,
        &children_path("root"),
        &listing(&[paragraph("a", "a", true)]),
    );
    transport.respond(
        HttpMethod::Get,
        &children_path("a"),
        &listing(&[paragraph("b", "b", true)]),
    );
    transport.respond(HttpMethod::Get, &children_path("b"), &listing(&[]));
    transport.delay(HttpMethod::Get, &children_path("a"), Duration::from_millis(200));
    let client = transport.client();

    let root = BlockId::from_wire("root");
    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        client.blocks().get_all_block_list_recursively(&root),
    )
    .await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(
        transport.paths(),
        vec![children_path("root"), children_path("a")]
    );
}
