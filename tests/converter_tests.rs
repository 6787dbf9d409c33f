// tests/converter_tests.rs
//! Whole-object fixtures through the public converters.
//!
//! The fixtures are trimmed responses in the shape the API returns them,
//! including fields this client ignores.

use chrono::NaiveDate;
use notionkit::api::converters::{
    DatabaseConverter, DatabaseCreateConverter, DatabaseCreateParameters, PageConverter,
};
use notionkit::api::wire::{ApiDatabase, ApiPage};
use notionkit::{
    ApiConverter, Color, ConversionError, DatabaseId, DateOrDateRange, DateOrDateTime,
    EmojiOrFile, FileRef, FormulaValue, NumberFormat, PageId, PropertyData, PropertySpecKind,
    PropertySpecList, Reference, RichTextList, RollupFunction, RollupValue, SelectOption,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const DATABASE_FIXTURE: &str = r#"{
    "object": "database",
    "id": "bc1211ca-e3f1-4939-ae34-5260b16f627c",
    "created_time": "2021-07-08T23:50:00.000Z",
    "last_edited_time": "2021-07-08T23:50:00.000Z",
    "icon": {"type": "emoji", "emoji": "🎉"},
    "cover": {"type": "external", "external": {"url": "https://example.org/cover.png"}},
    "url": "https://www.notion.so/bc1211cae3f14939ae345260b16f627c",
    "title": [{"type": "text", "text": {"content": "Grocery List", "link": null},
               "annotations": {"bold": false, "italic": false, "strikethrough": false,
                               "underline": false, "code": false, "color": "default"},
               "plain_text": "Grocery List", "href": null}],
    "parent": {"type": "page_id", "page_id": "98ad959b-2b6a-4774-80ee-00246fb0ea9b"},
    "properties": {
        "Name": {"id": "title", "name": "Name", "type": "title", "title": {}},
        "Price": {"id": "%40Q%5BM", "name": "Price", "type": "number",
                  "number": {"format": "dollar"}},
        "Store": {"id": "%3AUPp", "name": "Store", "type": "select",
                  "select": {"options": [
                      {"id": "c1", "name": "Gristedes", "color": "red"},
                      {"id": "c2", "name": "Whole Foods", "color": "mauve"}
                  ]}},
        "Cost of next trip": {"id": "WOd%3B", "name": "Cost of next trip", "type": "formula",
                              "formula": {"expression": "if(prop(\"In stock\"), 0, prop(\"Price\"))"}},
        "Recipes": {"id": "YfIu", "name": "Recipes", "type": "relation",
                    "relation": {"database_id": "668d797c-76fa-4934-9b05-ad288df2d136",
                                 "type": "dual_property",
                                 "dual_property": {"synced_property_name": "Ingredients",
                                                   "synced_property_id": "aXo%3D"}}},
        "Total": {"id": "kzm%5B", "name": "Total", "type": "rollup",
                  "rollup": {"rollup_property_name": "Price", "relation_property_name": "Recipes",
                             "rollup_property_id": "%40Q%5BM", "relation_property_id": "YfIu",
                             "function": "sum"}},
        "Status": {"id": "st", "name": "Status", "type": "status", "status": {"options": []}}
    }
}"#;

const PAGE_FIXTURE: &str = r#"{
    "object": "page",
    "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
    "created_time": "2022-03-01T19:05:00.000Z",
    "last_edited_time": "2022-07-06T20:25:00.000Z",
    "created_by": {"object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4"},
    "cover": {"type": "file", "file": {"url": "https://s3.example.org/cover.png",
                                        "expiry_time": "2022-07-06T21:25:00.000Z"}},
    "icon": null,
    "parent": {"type": "database_id", "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce"},
    "archived": false,
    "url": "https://www.notion.so/59833787",
    "properties": {
        "Name": {"id": "title", "type": "title", "title": [
            {"type": "text", "text": {"content": "Tuscan kale"}, "plain_text": "Tuscan kale"}
        ]},
        "Price": {"id": "BJXS", "type": "number", "number": 2.5},
        "In stock": {"id": "Ux%3A", "type": "checkbox", "checked": null, "checkbox": true},
        "Store": {"id": "%3AUPp", "type": "select",
                  "select": {"id": "c1", "name": "Gristedes", "color": "red"}},
        "Tags": {"id": "tg", "type": "multi_select", "multi_select": []},
        "Harvested": {"id": "hv", "type": "date",
                      "date": {"start": "2022-06-01", "end": "2022-06-03", "time_zone": null}},
        "Cost": {"id": "WOd%3B", "type": "formula", "formula": {"type": "number", "number": 0}},
        "Recipes": {"id": "YfIu", "type": "relation",
                    "relation": [{"id": "4f4d5b2c-1111-4c3d-8e2f-1a0b9c8d7e6f"}], "has_more": false},
        "Total": {"id": "kzm%5B", "type": "rollup",
                  "rollup": {"type": "number", "number": 7.5, "function": "sum"}},
        "Photo": {"id": "ph", "type": "files", "files": [
            {"name": "kale.png", "type": "external", "external": {"url": "https://example.org/kale.png"}}
        ]},
        "Link": {"id": "ln", "type": "url", "url": null},
        "Status": {"id": "st", "type": "status", "status": {"name": "Ripe"}}
    }
}"#;

#[test]
fn test_database_fixture() {
    let api: ApiDatabase = serde_json::from_str(DATABASE_FIXTURE).unwrap();
    let database = DatabaseConverter.api_to_model(api).unwrap();

    assert_eq!(
        database.id,
        DatabaseId::from_wire("bc1211ca-e3f1-4939-ae34-5260b16f627c")
    );
    assert_eq!(
        database.parent,
        Reference::Page(PageId::from_wire("98ad959b-2b6a-4774-80ee-00246fb0ea9b"))
    );
    assert_eq!(database.title.plain_text().as_deref(), Some("Grocery List"));
    assert_eq!(database.icon, Some(EmojiOrFile::emoji("🎉")));
    assert_eq!(
        database.cover,
        Some(EmojiOrFile::external("https://example.org/cover.png"))
    );

    let names: Vec<_> = database
        .property_specs
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Name", "Price", "Store", "Cost of next trip", "Recipes", "Total", "Status"]
    );

    let kind = |name: &str| database.property_spec(name).unwrap().kind.clone();
    assert_eq!(kind("Name"), PropertySpecKind::Title);
    assert_eq!(
        kind("Price"),
        PropertySpecKind::Number {
            format: NumberFormat::Dollar
        }
    );
    assert_eq!(
        kind("Store"),
        PropertySpecKind::Select {
            options: vec![
                SelectOption {
                    id: Some("c1".to_string()),
                    name: "Gristedes".to_string(),
                    color: Color::Red,
                },
                SelectOption {
                    id: Some("c2".to_string()),
                    name: "Whole Foods".to_string(),
                    color: Color::Unknown,
                },
            ]
        }
    );
    assert_eq!(
        kind("Recipes"),
        PropertySpecKind::Relation {
            database_id: DatabaseId::from_wire("668d797c-76fa-4934-9b05-ad288df2d136"),
            synced_property_name: Some("Ingredients".to_string()),
            synced_property_id: Some("aXo%3D".to_string()),
        }
    );
    assert!(matches!(
        kind("Total"),
        PropertySpecKind::Rollup {
            function: RollupFunction::Sum,
            ..
        }
    ));
    assert_eq!(
        kind("Status"),
        PropertySpecKind::Unknown {
            type_name: "status".to_string()
        }
    );
    assert_eq!(
        database.property_spec("%40Q%5BM").map(|s| s.name.as_str()),
        Some("Price")
    );
}

#[test]
fn test_page_fixture() {
    let api: ApiPage = serde_json::from_str(PAGE_FIXTURE).unwrap();
    let page = PageConverter.api_to_model(api).unwrap();

    assert_eq!(
        page.title().and_then(|t| t.plain_text()).as_deref(),
        Some("Tuscan kale")
    );
    assert_eq!(page.icon, None);
    assert!(matches!(
        &page.cover,
        Some(EmojiOrFile::File { url, expiry_time: Some(_) }) if url == "https://s3.example.org/cover.png"
    ));

    let value = |name: &str| page.property(name).unwrap().value.clone();
    assert_eq!(value("Price"), PropertyData::Number(Some(2.5)));
    assert_eq!(value("In stock"), PropertyData::Checkbox(true));
    assert!(matches!(
        value("Store"),
        PropertyData::Select(Some(SelectOption { ref name, color: Color::Red, .. })) if name == "Gristedes"
    ));
    assert_eq!(value("Tags"), PropertyData::MultiSelect(vec![]));
    assert_eq!(
        value("Harvested"),
        PropertyData::Date(Some(DateOrDateRange::range(
            NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 6, 3).unwrap(),
        )))
    );
    assert_eq!(
        value("Cost"),
        PropertyData::Formula(FormulaValue::Number(Some(0.0)))
    );
    assert_eq!(
        value("Recipes"),
        PropertyData::Relation(vec![PageId::from_wire(
            "4f4d5b2c-1111-4c3d-8e2f-1a0b9c8d7e6f"
        )])
    );
    assert_eq!(
        value("Total"),
        PropertyData::Rollup(RollupValue::Number(Some(7.5)))
    );
    assert_eq!(
        value("Photo"),
        PropertyData::Files(vec![FileRef {
            name: "kale.png".to_string(),
            url: Some("https://example.org/kale.png".to_string()),
        }])
    );
    assert_eq!(value("Link"), PropertyData::Url(None));
    assert_eq!(
        value("Status"),
        PropertyData::Unknown {
            type_name: "status".to_string()
        }
    );

    let date = match value("Harvested") {
        PropertyData::Date(Some(date)) => date,
        other => panic!("expected a date, got {:?}", other),
    };
    assert!(matches!(date.start, DateOrDateTime::Date(_)));
    assert_eq!(page.property("BJXS").map(|p| p.name.as_str()), Some("Price"));
}

#[test]
fn test_create_database_body() {
    let params = DatabaseCreateParameters {
        parent_page_id: PageId::from_wire("98ad959b-2b6a-4774-80ee-00246fb0ea9b"),
        title: RichTextList::plain("Grocery List"),
        icon: None,
        cover: None,
        properties: PropertySpecList::new()
            .title("Name")
            .number("Price", NumberFormat::Dollar)
            .select(
                "Store",
                vec![SelectOption::new("Gristedes", Color::Red)],
            )
            .relation(
                "Recipes",
                DatabaseId::from_wire("668d797c-76fa-4934-9b05-ad288df2d136"),
            )
            .checkbox("In stock"),
    };

    let body = DatabaseCreateConverter.model_to_api(&params).unwrap();

    assert_eq!(
        body["parent"],
        json!({"type": "page_id", "page_id": "98ad959b-2b6a-4774-80ee-00246fb0ea9b"})
    );
    assert_eq!(body["title"][0]["text"]["content"], json!("Grocery List"));
    assert_eq!(body["properties"]["Name"], json!({"title": {}}));
    assert_eq!(
        body["properties"]["Price"],
        json!({"number": {"format": "dollar"}})
    );
    assert_eq!(
        body["properties"]["Store"],
        json!({"select": {"options": [{"name": "Gristedes", "color": "red"}]}})
    );
    assert_eq!(
        body["properties"]["Recipes"],
        json!({"relation": {
            "database_id": "668d797c-76fa-4934-9b05-ad288df2d136",
            "type": "single_property",
            "single_property": {}
        }})
    );
    assert_eq!(body["properties"]["In stock"], json!({"checkbox": {}}));
}

#[test]
fn test_unknown_number_format_cannot_be_sent() {
    let params = DatabaseCreateParameters {
        parent_page_id: PageId::from_wire("98ad959b-2b6a-4774-80ee-00246fb0ea9b"),
        title: RichTextList::plain("Prices"),
        icon: None,
        cover: None,
        properties: PropertySpecList::new()
            .title("Name")
            .number("Price", NumberFormat::Unknown),
    };

    assert!(matches!(
        DatabaseCreateConverter.model_to_api(&params),
        Err(ConversionError::UnknownVariant { .. })
    ));
}
