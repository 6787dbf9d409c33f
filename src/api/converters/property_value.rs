// src/api/converters/property_value.rs

use super::date::{DateRangeConverter, TimestampConverter};
use super::property_spec::SelectOptionConverter;
use super::rich_text::{rich_text_to_json, RichTextListConverter};
use super::user::UserConverter;
use crate::api::converter::ApiConverter;
use crate::api::wire::{
    encode, take_payload, ApiDate, ApiFileRef, ApiFormulaValue, ApiIdRef, ApiPropertyValue,
    ApiRichText, ApiRollupValue, ApiSelectOption, ApiUser,
};
use crate::error::ConversionError;
use crate::model::{
    FileRef, FormulaValue, PropertyData, PropertyValue, RollupValue, SelectOption,
};
use crate::types::PageId;
use serde_json::{json, Map, Value};

const FAMILY: &str = "property value";

/// Decodes the typed payload of a property value. The page converter
/// attaches the ID and name; rollup arrays reuse it for their items.
pub struct PropertyDataConverter;

impl ApiConverter for PropertyDataConverter {
    type Api = ApiPropertyValue;
    type Model = PropertyData;
    const NAME: &'static str = "PropertyDataConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiPropertyValue) -> Result<PropertyData, ConversionError> {
        let ApiPropertyValue {
            kind, mut payload, ..
        } = api;
        let payload = &mut payload;

        let data = match kind.as_str() {
            "title" => PropertyData::Title(
                RichTextListConverter
                    .api_to_model(take_payload::<Vec<ApiRichText>>(payload, FAMILY, "title")?)?,
            ),
            "rich_text" => PropertyData::RichText(RichTextListConverter.api_to_model(
                take_payload::<Vec<ApiRichText>>(payload, FAMILY, "rich_text")?,
            )?),
            "number" => PropertyData::Number(take_payload(payload, FAMILY, "number")?),
            "select" => PropertyData::Select(
                take_payload::<Option<ApiSelectOption>>(payload, FAMILY, "select")?
                    .map(|option| SelectOptionConverter.api_to_model(option))
                    .transpose()?,
            ),
            "multi_select" => PropertyData::MultiSelect(
                SelectOptionConverter.api_to_model_list(take_payload(
                    payload,
                    FAMILY,
                    "multi_select",
                )?)?,
            ),
            "date" => PropertyData::Date(
                take_payload::<Option<ApiDate>>(payload, FAMILY, "date")?
                    .map(|date| DateRangeConverter.api_to_model(date))
                    .transpose()?,
            ),
            "formula" => PropertyData::Formula(
                FormulaValueConverter.api_to_model(take_payload(payload, FAMILY, "formula")?)?,
            ),
            "relation" => PropertyData::Relation(
                take_payload::<Vec<ApiIdRef>>(payload, FAMILY, "relation")?
                    .into_iter()
                    .map(|reference| PageId::from_wire(reference.id))
                    .collect(),
            ),
            "rollup" => PropertyData::Rollup(
                RollupValueConverter.api_to_model(take_payload(payload, FAMILY, "rollup")?)?,
            ),
            "people" => PropertyData::People(
                UserConverter.api_to_model_list(take_payload(payload, FAMILY, "people")?)?,
            ),
            "files" => PropertyData::Files(
                take_payload::<Vec<ApiFileRef>>(payload, FAMILY, "files")?
                    .into_iter()
                    .map(file_ref)
                    .collect(),
            ),
            "checkbox" => PropertyData::Checkbox(take_payload(payload, FAMILY, "checkbox")?),
            "url" => PropertyData::Url(take_payload(payload, FAMILY, "url")?),
            "email" => PropertyData::Email(take_payload(payload, FAMILY, "email")?),
            "phone_number" => {
                PropertyData::PhoneNumber(take_payload(payload, FAMILY, "phone_number")?)
            }
            "created_time" => PropertyData::CreatedTime(
                TimestampConverter.api_to_model(take_payload(payload, FAMILY, "created_time")?)?,
            ),
            "last_edited_time" => PropertyData::LastEditedTime(TimestampConverter.api_to_model(
                take_payload(payload, FAMILY, "last_edited_time")?,
            )?),
            "created_by" => PropertyData::CreatedBy(
                UserConverter.api_to_model(take_payload::<ApiUser>(payload, FAMILY, "created_by")?)?,
            ),
            "last_edited_by" => PropertyData::LastEditedBy(UserConverter.api_to_model(
                take_payload::<ApiUser>(payload, FAMILY, "last_edited_by")?,
            )?),
            other => {
                log::warn!("Unknown property value type '{}', keeping it as Unknown", other);
                PropertyData::Unknown {
                    type_name: other.to_string(),
                }
            }
        };
        Ok(data)
    }
}

fn file_ref(api: ApiFileRef) -> FileRef {
    let url = api
        .file
        .map(|file| file.url)
        .or_else(|| api.external.map(|external| external.url));
    FileRef {
        name: api.name,
        url,
    }
}

pub struct FormulaValueConverter;

impl ApiConverter for FormulaValueConverter {
    type Api = ApiFormulaValue;
    type Model = FormulaValue;
    const NAME: &'static str = "FormulaValueConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiFormulaValue) -> Result<FormulaValue, ConversionError> {
        Ok(match api.kind.as_str() {
            "string" => FormulaValue::String(api.string),
            "number" => FormulaValue::Number(api.number),
            "boolean" => FormulaValue::Boolean(api.boolean),
            "date" => FormulaValue::Date(
                api.date
                    .map(|date| DateRangeConverter.api_to_model(date))
                    .transpose()?,
            ),
            other => {
                log::warn!("Unknown formula result type '{}'", other);
                FormulaValue::Unknown {
                    type_name: other.to_string(),
                }
            }
        })
    }
}

pub struct RollupValueConverter;

impl ApiConverter for RollupValueConverter {
    type Api = ApiRollupValue;
    type Model = RollupValue;
    const NAME: &'static str = "RollupValueConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiRollupValue) -> Result<RollupValue, ConversionError> {
        Ok(match api.kind.as_str() {
            "number" => RollupValue::Number(api.number),
            "date" => RollupValue::Date(
                api.date
                    .map(|date| DateRangeConverter.api_to_model(date))
                    .transpose()?,
            ),
            "array" => RollupValue::Array(PropertyDataConverter.api_to_model_list(api.array)?),
            other => {
                log::warn!("Unknown rollup result type '{}'", other);
                RollupValue::Unknown {
                    type_name: other.to_string(),
                }
            }
        })
    }
}

/// Select options are sent by name; options known only by ID go by ID.
fn select_option_reference(option: &SelectOption) -> Value {
    match &option.id {
        Some(id) if option.name.is_empty() => json!({ "id": id }),
        _ => json!({ "name": option.name }),
    }
}

fn read_only(variant: &'static str) -> ConversionError {
    ConversionError::ReadOnly {
        family: FAMILY,
        variant,
    }
}

/// model → wire: `{<type>: payload}`, the value of one entry of a page's
/// `properties` map
pub struct PropertyValueOutConverter;

impl ApiConverter for PropertyValueOutConverter {
    type Api = Value;
    type Model = PropertyValue;
    const NAME: &'static str = "PropertyValueOutConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &PropertyValue) -> Result<Value, ConversionError> {
        let payload = match &model.value {
            PropertyData::Title(text) | PropertyData::RichText(text) => rich_text_to_json(text)?,
            PropertyData::Number(number) => json!(number),
            PropertyData::Select(option) => match option {
                Some(option) => select_option_reference(option),
                None => Value::Null,
            },
            PropertyData::MultiSelect(options) => {
                Value::Array(options.iter().map(select_option_reference).collect())
            }
            PropertyData::Date(date) => match date {
                Some(date) => encode(&DateRangeConverter.model_to_api(date)?, FAMILY)?,
                None => Value::Null,
            },
            PropertyData::Relation(pages) => Value::Array(
                pages
                    .iter()
                    .map(|page| json!({ "id": page.as_str() }))
                    .collect(),
            ),
            PropertyData::People(users) => {
                encode(&UserConverter.model_to_api_list(users)?, FAMILY)?
            }
            PropertyData::Checkbox(checked) => Value::Bool(*checked),
            PropertyData::Url(text)
            | PropertyData::Email(text)
            | PropertyData::PhoneNumber(text) => json!(text),
            PropertyData::Formula(_) => return Err(read_only("formula")),
            PropertyData::Rollup(_) => return Err(read_only("rollup")),
            PropertyData::Files(_) => return Err(read_only("files")),
            PropertyData::CreatedTime(_) => return Err(read_only("created_time")),
            PropertyData::CreatedBy(_) => return Err(read_only("created_by")),
            PropertyData::LastEditedTime(_) => return Err(read_only("last_edited_time")),
            PropertyData::LastEditedBy(_) => return Err(read_only("last_edited_by")),
            PropertyData::Unknown { type_name } => {
                return Err(ConversionError::UnknownVariant {
                    family: FAMILY,
                    type_name: type_name.clone(),
                })
            }
        };

        let mut entry = Map::new();
        entry.insert(model.value.type_name().to_string(), payload);
        Ok(Value::Object(entry))
    }
}

/// The `properties` object of a page create or update request, keyed by
/// property name or ID.
pub(crate) fn property_values_to_api(values: &[PropertyValue]) -> Result<Value, ConversionError> {
    let mut properties = Map::new();
    for value in values {
        properties.insert(
            value.id_or_name().to_string(),
            PropertyValueOutConverter.model_to_api(value)?,
        );
    }
    Ok(Value::Object(properties))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateOrDateRange, PropertyValueList, UserKind};
    use crate::types::{Color, UserId};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn decode(value: Value) -> PropertyData {
        PropertyDataConverter
            .api_to_model(serde_json::from_value(value).unwrap())
            .unwrap()
    }

    #[test]
    fn test_decode_scalar_values() {
        assert_eq!(
            decode(json!({"id": "a", "type": "number", "number": 42})),
            PropertyData::Number(Some(42.0))
        );
        assert_eq!(
            decode(json!({"id": "a", "type": "number", "number": null})),
            PropertyData::Number(None)
        );
        assert_eq!(
            decode(json!({"id": "b", "type": "checkbox", "checkbox": true})),
            PropertyData::Checkbox(true)
        );
        assert_eq!(
            decode(json!({"id": "c", "type": "select", "select": {"id": "o", "name": "Red", "color": "red"}})),
            PropertyData::Select(Some(SelectOption {
                id: Some("o".to_string()),
                name: "Red".to_string(),
                color: Color::Red,
            }))
        );
        assert_eq!(
            decode(json!({"id": "d", "type": "date", "date": {"start": "2021-03-04", "end": null}})),
            PropertyData::Date(Some(DateOrDateRange::single(
                NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()
            )))
        );
    }

    #[test]
    fn test_decode_computed_values() {
        assert_eq!(
            decode(json!({"id": "f", "type": "formula", "formula": {"type": "string", "string": "hi"}})),
            PropertyData::Formula(FormulaValue::String(Some("hi".to_string())))
        );

        let rollup = decode(json!({
            "id": "r", "type": "rollup",
            "rollup": {"type": "array", "function": "show_original", "array": [
                {"type": "title", "title": [{"type": "text", "text": {"content": "Luke"}, "plain_text": "Luke"}]},
                {"type": "number", "number": 3}
            ]}
        }));
        match rollup {
            PropertyData::Rollup(RollupValue::Array(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1], PropertyData::Number(Some(3.0)));
                assert_eq!(
                    items[0].as_rich_text().and_then(|t| t.plain_text()),
                    Some("Luke".to_string())
                );
            }
            other => panic!("expected rollup array, got {:?}", other),
        }

        let people = decode(json!({"id": "p", "type": "people", "people": [{"object": "user", "id": "u1"}]}));
        match people {
            PropertyData::People(users) => assert_eq!(users[0].kind, UserKind::Partial),
            other => panic!("expected people, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_kept() {
        assert_eq!(
            decode(json!({"id": "s", "type": "status", "status": {"name": "Done"}})),
            PropertyData::Unknown {
                type_name: "status".to_string()
            }
        );
    }

    #[test]
    fn test_encode_builder_values() {
        let values = PropertyValueList::new()
            .title("Name", "Greedo")
            .number("Legs", 3)
            .multi_select_by_names("Planets", ["Tatooine", "Bespin"])
            .people("Owner", vec![UserId::from_wire("u1")])
            .relation("Friends", vec![PageId::from_wire("p1")])
            .checkbox("Is Greedo", true);

        assert_eq!(
            property_values_to_api(values.values()).unwrap(),
            json!({
                "Name": {"title": [{"type": "text", "text": {"content": "Greedo"}}]},
                "Legs": {"number": 3.0},
                "Planets": {"multi_select": [{"name": "Tatooine"}, {"name": "Bespin"}]},
                "Owner": {"people": [{"object": "user", "id": "u1"}]},
                "Friends": {"relation": [{"id": "p1"}]},
                "Is Greedo": {"checkbox": true}
            })
        );
    }

    #[test]
    fn test_computed_values_are_read_only() {
        let value = PropertyValue {
            id: "f".to_string(),
            name: "Total".to_string(),
            value: PropertyData::Formula(FormulaValue::Number(Some(1.0))),
        };
        assert!(matches!(
            PropertyValueOutConverter.model_to_api(&value),
            Err(ConversionError::ReadOnly {
                variant: "formula",
                ..
            })
        ));
    }

    #[test]
    fn test_select_by_id_when_name_unknown() {
        let option = SelectOption {
            id: Some("opt".to_string()),
            name: String::new(),
            color: Color::Default,
        };
        assert_eq!(select_option_reference(&option), json!({"id": "opt"}));
    }
}
