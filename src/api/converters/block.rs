// src/api/converters/block.rs
//! Blocks, in both directions.
//!
//! Inbound, the `type` field picks the variant and its sub-object is read
//! from the key of the same name. Unknown types become
//! `Block::UnknownType`. `has_children` sets the children state; the
//! children themselves are fetched separately.
//!
//! Outbound, blocks become `{object, type, <type>: {...}}` with nested
//! `children` when the model holds them.

use super::color::{color_or_default, ColorConverter};
use super::date::TimestampConverter;
use super::emoji_or_file::EmojiOrFileConverter;
use super::rich_text::{rich_text_to_json, RichTextListConverter};
use crate::api::converter::ApiConverter;
use crate::api::wire::{take_payload, ApiBlock, ApiBlockContent};
use crate::error::ConversionError;
use crate::model::*;
use crate::types::BlockId;
use serde_json::{json, Map, Value};

const FAMILY: &str = "block";

const KNOWN_TYPES: &[&str] = &[
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "to_do",
    "toggle",
    "child_page",
    "child_database",
    "code",
    "equation",
    "callout",
    "quote",
    "embed",
    "bookmark",
    "divider",
    "table_of_contents",
];

fn text_content(content: &mut ApiBlockContent) -> Result<TextBlockContent, ConversionError> {
    Ok(TextBlockContent {
        text: RichTextListConverter.api_to_model(std::mem::take(&mut content.rich_text))?,
        color: color_or_default(content.color.take())?,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, ConversionError> {
    value.ok_or_else(|| ConversionError::MissingField {
        family: FAMILY,
        field: field.to_string(),
    })
}

/// wire → model
pub struct BlockConverter;

impl ApiConverter for BlockConverter {
    type Api = ApiBlock;
    type Model = Block;
    const NAME: &'static str = "BlockConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiBlock) -> Result<Block, ConversionError> {
        let ApiBlock {
            id,
            kind,
            created_time,
            last_edited_time,
            has_children,
            mut payload,
        } = api;

        let common = BlockCommon {
            id: BlockId::from_wire(id),
            created: created_time
                .map(|t| TimestampConverter.api_to_model(t))
                .transpose()?,
            last_edited: last_edited_time
                .map(|t| TimestampConverter.api_to_model(t))
                .transpose()?,
            children: Children::from_has_children(has_children),
        };

        if !KNOWN_TYPES.contains(&kind.as_str()) {
            log::warn!("Unknown block type '{}', keeping it as UnknownType", kind);
            return Ok(Block::UnknownType(UnknownTypeBlock {
                common,
                block_type: kind,
            }));
        }

        let mut content: ApiBlockContent = take_payload(&mut payload, FAMILY, &kind)?;

        let block = match kind.as_str() {
            "paragraph" => Block::Paragraph(ParagraphBlock {
                common,
                content: text_content(&mut content)?,
            }),
            "heading_1" => Block::Heading1(Heading1Block {
                common,
                content: text_content(&mut content)?,
            }),
            "heading_2" => Block::Heading2(Heading2Block {
                common,
                content: text_content(&mut content)?,
            }),
            "heading_3" => Block::Heading3(Heading3Block {
                common,
                content: text_content(&mut content)?,
            }),
            "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: text_content(&mut content)?,
            }),
            "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
                common,
                content: text_content(&mut content)?,
            }),
            "to_do" => Block::ToDo(ToDoBlock {
                common,
                checked: content.checked,
                content: text_content(&mut content)?,
            }),
            "toggle" => Block::Toggle(ToggleBlock {
                common,
                content: text_content(&mut content)?,
            }),
            "quote" => Block::Quote(QuoteBlock {
                common,
                content: text_content(&mut content)?,
            }),
            "callout" => Block::Callout(CalloutBlock {
                common,
                icon: content
                    .icon
                    .take()
                    .map(|icon| EmojiOrFileConverter.api_to_model(icon))
                    .transpose()?,
                content: text_content(&mut content)?,
            }),
            "code" => Block::Code(CodeBlock {
                common,
                language: content.language.take().unwrap_or_default(),
                caption: RichTextListConverter.api_to_model(std::mem::take(&mut content.caption))?,
                content: text_content(&mut content)?,
            }),
            "equation" => Block::Equation(EquationBlock {
                common,
                expression: required(content.expression, "expression")?,
            }),
            "child_page" => Block::ChildPage(ChildPageBlock {
                common,
                title: content.title.unwrap_or_default(),
            }),
            "child_database" => Block::ChildDatabase(ChildDatabaseBlock {
                common,
                title: content.title.unwrap_or_default(),
            }),
            "embed" => Block::Embed(EmbedBlock {
                common,
                url: required(content.url, "url")?,
                caption: RichTextListConverter.api_to_model(content.caption)?,
            }),
            "bookmark" => Block::Bookmark(BookmarkBlock {
                common,
                url: required(content.url, "url")?,
                caption: RichTextListConverter.api_to_model(content.caption)?,
            }),
            "divider" => Block::Divider(DividerBlock { common }),
            "table_of_contents" => Block::TableOfContents(TableOfContentsBlock {
                common,
                color: color_or_default(content.color)?,
            }),
            // KNOWN_TYPES and this match list the same names
            other => Block::UnknownType(UnknownTypeBlock {
                common,
                block_type: other.to_string(),
            }),
        };
        Ok(block)
    }
}

fn text_payload(content: &TextBlockContent) -> Result<Map<String, Value>, ConversionError> {
    let mut payload = Map::new();
    payload.insert("rich_text".to_string(), rich_text_to_json(&content.text)?);
    payload.insert(
        "color".to_string(),
        Value::String(ColorConverter.model_to_api(&content.color)?),
    );
    Ok(payload)
}

/// model → wire, for page content and block appends
pub struct BlockOutConverter;

impl ApiConverter for BlockOutConverter {
    type Api = Value;
    type Model = Block;
    const NAME: &'static str = "BlockOutConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &Block) -> Result<Value, ConversionError> {
        let mut payload = match model {
            Block::Paragraph(b) => text_payload(&b.content)?,
            Block::Heading1(b) => text_payload(&b.content)?,
            Block::Heading2(b) => text_payload(&b.content)?,
            Block::Heading3(b) => text_payload(&b.content)?,
            Block::BulletedListItem(b) => text_payload(&b.content)?,
            Block::NumberedListItem(b) => text_payload(&b.content)?,
            Block::Toggle(b) => text_payload(&b.content)?,
            Block::Quote(b) => text_payload(&b.content)?,
            Block::ToDo(b) => {
                let mut payload = text_payload(&b.content)?;
                payload.insert("checked".to_string(), Value::Bool(b.checked));
                payload
            }
            Block::Callout(b) => {
                let mut payload = text_payload(&b.content)?;
                if let Some(icon) = &b.icon {
                    let icon = EmojiOrFileConverter.model_to_api(icon)?;
                    payload.insert("icon".to_string(), json!(icon));
                }
                payload
            }
            Block::Code(b) => {
                let mut payload = Map::new();
                payload.insert("rich_text".to_string(), rich_text_to_json(&b.content.text)?);
                payload.insert("caption".to_string(), rich_text_to_json(&b.caption)?);
                payload.insert("language".to_string(), Value::String(b.language.clone()));
                payload
            }
            Block::Equation(b) => {
                let mut payload = Map::new();
                payload.insert("expression".to_string(), Value::String(b.expression.clone()));
                payload
            }
            Block::Embed(EmbedBlock { url, caption, .. })
            | Block::Bookmark(BookmarkBlock { url, caption, .. }) => {
                let mut payload = Map::new();
                payload.insert("url".to_string(), Value::String(url.clone()));
                payload.insert("caption".to_string(), rich_text_to_json(caption)?);
                payload
            }
            Block::TableOfContents(b) => {
                let mut payload = Map::new();
                payload.insert(
                    "color".to_string(),
                    Value::String(ColorConverter.model_to_api(&b.color)?),
                );
                payload
            }
            Block::Divider(_) => Map::new(),
            Block::ChildPage(_) => {
                return Err(ConversionError::ReadOnly {
                    family: FAMILY,
                    variant: "child_page",
                })
            }
            Block::ChildDatabase(_) => {
                return Err(ConversionError::ReadOnly {
                    family: FAMILY,
                    variant: "child_database",
                })
            }
            Block::UnknownType(b) => {
                return Err(ConversionError::UnknownVariant {
                    family: FAMILY,
                    type_name: b.block_type.clone(),
                })
            }
        };

        if let Children::Fetched(children) = model.children() {
            payload.insert(
                "children".to_string(),
                Value::Array(self.model_to_api_list(children)?),
            );
        }

        let kind = model.block_type();
        Ok(json!({
            "object": "block",
            "type": kind,
            kind: payload,
        }))
    }
}
