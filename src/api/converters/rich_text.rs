//! Rich text runs, their annotations and mentions.

use super::color::{color_or_default, ColorConverter};
use super::date::DateRangeConverter;
use super::user::UserConverter;
use crate::api::converter::ApiConverter;
use crate::api::wire::{ApiAnnotations, ApiEquation, ApiIdRef, ApiLink, ApiMention, ApiRichText, ApiText};
use crate::error::ConversionError;
use crate::model::{Annotations, Mention, RichText, RichTextKind, RichTextList};
use crate::types::{DatabaseId, PageId};

pub struct AnnotationsConverter;

impl ApiConverter for AnnotationsConverter {
    type Api = ApiAnnotations;
    type Model = Annotations;
    const NAME: &'static str = "AnnotationsConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiAnnotations) -> Result<Annotations, ConversionError> {
        Ok(Annotations {
            bold: api.bold,
            italic: api.italic,
            strikethrough: api.strikethrough,
            underline: api.underline,
            code: api.code,
            color: color_or_default(Some(api.color))?,
        })
    }

    fn model_to_api(&self, model: &Annotations) -> Result<ApiAnnotations, ConversionError> {
        Ok(ApiAnnotations {
            bold: model.bold,
            italic: model.italic,
            strikethrough: model.strikethrough,
            underline: model.underline,
            code: model.code,
            color: ColorConverter.model_to_api(&model.color)?,
        })
    }
}

pub struct MentionConverter;

impl ApiConverter for MentionConverter {
    type Api = ApiMention;
    type Model = Mention;
    const NAME: &'static str = "MentionConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiMention) -> Result<Mention, ConversionError> {
        let missing = |field: &str| ConversionError::MissingField {
            family: "mention",
            field: field.to_string(),
        };
        Ok(match api.kind.as_str() {
            "user" => Mention::User(
                UserConverter.api_to_model(api.user.ok_or_else(|| missing("user"))?)?,
            ),
            "page" => Mention::Page(PageId::from_wire(
                api.page.ok_or_else(|| missing("page"))?.id,
            )),
            "database" => Mention::Database(DatabaseId::from_wire(
                api.database.ok_or_else(|| missing("database"))?.id,
            )),
            "date" => Mention::Date(
                DateRangeConverter.api_to_model(api.date.ok_or_else(|| missing("date"))?)?,
            ),
            other => {
                log::warn!("Unknown mention type '{}', keeping it as Unknown", other);
                Mention::Unknown {
                    type_name: other.to_string(),
                }
            }
        })
    }

    fn model_to_api(&self, model: &Mention) -> Result<ApiMention, ConversionError> {
        let mut api = ApiMention {
            kind: String::new(),
            user: None,
            page: None,
            database: None,
            date: None,
        };
        match model {
            Mention::User(user) => {
                api.kind = "user".to_string();
                api.user = Some(UserConverter.model_to_api(user)?);
            }
            Mention::Page(id) => {
                api.kind = "page".to_string();
                api.page = Some(ApiIdRef { id: id.to_string() });
            }
            Mention::Database(id) => {
                api.kind = "database".to_string();
                api.database = Some(ApiIdRef { id: id.to_string() });
            }
            Mention::Date(date) => {
                api.kind = "date".to_string();
                api.date = Some(DateRangeConverter.model_to_api(date)?);
            }
            Mention::Unknown { type_name } => {
                return Err(ConversionError::UnknownVariant {
                    family: "mention",
                    type_name: type_name.clone(),
                })
            }
        }
        Ok(api)
    }
}

pub struct RichTextConverter;

impl ApiConverter for RichTextConverter {
    type Api = ApiRichText;
    type Model = RichText;
    const NAME: &'static str = "RichTextConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiRichText) -> Result<RichText, ConversionError> {
        let missing = |field: &str| ConversionError::MissingField {
            family: "rich text",
            field: field.to_string(),
        };
        let annotations = api
            .annotations
            .map(|a| AnnotationsConverter.api_to_model(a))
            .transpose()?
            .unwrap_or_default();
        // Client-built payloads carry no plain_text; the text content stands in.
        let mut plain_text = api.plain_text;
        let kind = match api.kind.as_str() {
            "text" => {
                let text = api.text.ok_or_else(|| missing("text"))?;
                plain_text.get_or_insert(text.content);
                RichTextKind::Text {
                    link_url: text.link.map(|link| link.url),
                }
            }
            "mention" => RichTextKind::Mention(
                MentionConverter.api_to_model(api.mention.ok_or_else(|| missing("mention"))?)?,
            ),
            "equation" => RichTextKind::Equation {
                expression: api.equation.ok_or_else(|| missing("equation"))?.expression,
            },
            other => {
                log::warn!("Unknown rich text type '{}', keeping it as Unknown", other);
                RichTextKind::Unknown {
                    type_name: other.to_string(),
                }
            }
        };
        Ok(RichText {
            plain_text: plain_text.unwrap_or_default(),
            href: api.href,
            annotations,
            kind,
        })
    }

    fn model_to_api(&self, model: &RichText) -> Result<ApiRichText, ConversionError> {
        let annotations = if model.annotations.is_default() {
            None
        } else {
            Some(AnnotationsConverter.model_to_api(&model.annotations)?)
        };
        let mut api = ApiRichText {
            kind: String::new(),
            plain_text: None,
            href: None,
            annotations,
            text: None,
            mention: None,
            equation: None,
        };
        match &model.kind {
            RichTextKind::Text { link_url } => {
                api.kind = "text".to_string();
                api.text = Some(ApiText {
                    content: model.plain_text.clone(),
                    link: link_url.clone().map(|url| ApiLink { url }),
                });
            }
            RichTextKind::Mention(mention) => {
                api.kind = "mention".to_string();
                api.mention = Some(MentionConverter.model_to_api(mention)?);
            }
            RichTextKind::Equation { expression } => {
                api.kind = "equation".to_string();
                api.equation = Some(ApiEquation {
                    expression: expression.clone(),
                });
            }
            RichTextKind::Unknown { type_name } => {
                return Err(ConversionError::UnknownVariant {
                    family: "rich text",
                    type_name: type_name.clone(),
                })
            }
        }
        Ok(api)
    }
}

pub struct RichTextListConverter;

impl ApiConverter for RichTextListConverter {
    type Api = Vec<ApiRichText>;
    type Model = RichTextList;
    const NAME: &'static str = "RichTextListConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: Vec<ApiRichText>) -> Result<RichTextList, ConversionError> {
        RichTextConverter
            .api_to_model_list(api)
            .map(RichTextList::from_items)
    }

    fn model_to_api(&self, model: &RichTextList) -> Result<Vec<ApiRichText>, ConversionError> {
        RichTextConverter.model_to_api_list(model.items())
    }
}

/// Encodes rich text straight to its JSON array.
pub(crate) fn rich_text_to_json(text: &RichTextList) -> Result<serde_json::Value, ConversionError> {
    let api = RichTextListConverter.model_to_api(text)?;
    serde_json::to_value(api).map_err(|source| ConversionError::Malformed {
        family: "rich text",
        source,
    })
}
