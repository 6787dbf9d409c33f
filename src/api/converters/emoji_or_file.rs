use super::date::TimestampConverter;
use crate::api::converter::ApiConverter;
use crate::api::wire::{ApiEmojiOrFile, ApiExternal};
use crate::error::ConversionError;
use crate::model::EmojiOrFile;

/// Icons and covers. Hosted and external files both decode to
/// `EmojiOrFile::File`; files are always sent as external links.
pub struct EmojiOrFileConverter;

impl ApiConverter for EmojiOrFileConverter {
    type Api = ApiEmojiOrFile;
    type Model = EmojiOrFile;
    const NAME: &'static str = "EmojiOrFileConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiEmojiOrFile) -> Result<EmojiOrFile, ConversionError> {
        let missing = |field: &str| ConversionError::MissingField {
            family: "icon",
            field: field.to_string(),
        };
        match api.kind.as_str() {
            "emoji" => Ok(EmojiOrFile::Emoji(
                api.emoji.ok_or_else(|| missing("emoji"))?,
            )),
            "file" => {
                let file = api.file.ok_or_else(|| missing("file"))?;
                Ok(EmojiOrFile::File {
                    url: file.url,
                    expiry_time: file
                        .expiry_time
                        .map(|time| TimestampConverter.api_to_model(time))
                        .transpose()?,
                })
            }
            "external" => Ok(EmojiOrFile::external(
                api.external.ok_or_else(|| missing("external"))?.url,
            )),
            other => {
                log::warn!("Unknown icon type '{}', keeping it as Unknown", other);
                Ok(EmojiOrFile::Unknown {
                    type_name: other.to_string(),
                })
            }
        }
    }

    fn model_to_api(&self, model: &EmojiOrFile) -> Result<ApiEmojiOrFile, ConversionError> {
        match model {
            EmojiOrFile::Emoji(emoji) => Ok(ApiEmojiOrFile {
                kind: "emoji".to_string(),
                emoji: Some(emoji.clone()),
                file: None,
                external: None,
            }),
            EmojiOrFile::File { url, .. } => Ok(ApiEmojiOrFile {
                kind: "external".to_string(),
                emoji: None,
                file: None,
                external: Some(ApiExternal { url: url.clone() }),
            }),
            EmojiOrFile::Unknown { type_name } => Err(ConversionError::UnknownVariant {
                family: "icon",
                type_name: type_name.clone(),
            }),
        }
    }
}
