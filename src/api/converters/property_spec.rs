// src/api/converters/property_spec.rs
//! Database column definitions.

use super::color::{color_or_default, ColorConverter};
use crate::api::converter::ApiConverter;
use crate::api::wire::{
    take_payload, ApiFormulaSpec, ApiNumberSpec, ApiPropertySpec, ApiRelationSpec, ApiRollupSpec,
    ApiSelectOption, ApiSelectSpec,
};
use crate::error::ConversionError;
use crate::model::{NumberFormat, PropertySpec, PropertySpecKind, RollupFunction, SelectOption};
use crate::types::DatabaseId;
use serde_json::{json, Map, Value};

const FAMILY: &str = "property spec";

/// Select options as read from specs and values. Encodes the spec form,
/// `{name, color}`.
pub struct SelectOptionConverter;

impl ApiConverter for SelectOptionConverter {
    type Api = ApiSelectOption;
    type Model = SelectOption;
    const NAME: &'static str = "SelectOptionConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiSelectOption) -> Result<SelectOption, ConversionError> {
        Ok(SelectOption {
            id: api.id,
            name: api.name.unwrap_or_default(),
            color: color_or_default(api.color)?,
        })
    }
}

pub struct SelectOptionSpecOutConverter;

impl ApiConverter for SelectOptionSpecOutConverter {
    type Api = Value;
    type Model = SelectOption;
    const NAME: &'static str = "SelectOptionSpecOutConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &SelectOption) -> Result<Value, ConversionError> {
        Ok(json!({
            "name": model.name,
            "color": ColorConverter.model_to_api(&model.color)?,
        }))
    }
}

/// wire → model
pub struct PropertySpecConverter;

impl ApiConverter for PropertySpecConverter {
    type Api = ApiPropertySpec;
    type Model = PropertySpec;
    const NAME: &'static str = "PropertySpecConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiPropertySpec) -> Result<PropertySpec, ConversionError> {
        let ApiPropertySpec {
            id,
            name,
            kind,
            mut payload,
        } = api;

        let spec_kind = match kind.as_str() {
            "title" => PropertySpecKind::Title,
            "rich_text" => PropertySpecKind::RichText,
            "date" => PropertySpecKind::Date,
            "people" => PropertySpecKind::People,
            "files" => PropertySpecKind::Files,
            "checkbox" => PropertySpecKind::Checkbox,
            "url" => PropertySpecKind::Url,
            "email" => PropertySpecKind::Email,
            "phone_number" => PropertySpecKind::PhoneNumber,
            "created_time" => PropertySpecKind::CreatedTime,
            "created_by" => PropertySpecKind::CreatedBy,
            "last_edited_time" => PropertySpecKind::LastEditedTime,
            "last_edited_by" => PropertySpecKind::LastEditedBy,
            "number" => {
                let number: ApiNumberSpec = take_payload(&mut payload, FAMILY, "number")?;
                let format = number.format.as_deref().unwrap_or("number");
                let parsed = NumberFormat::from_wire(format);
                if parsed == NumberFormat::Unknown {
                    log::warn!("Unknown number format '{}', keeping it as Unknown", format);
                }
                PropertySpecKind::Number { format: parsed }
            }
            "select" | "multi_select" => {
                let select: ApiSelectSpec = take_payload(&mut payload, FAMILY, &kind)?;
                let options = SelectOptionConverter.api_to_model_list(select.options)?;
                if kind == "select" {
                    PropertySpecKind::Select { options }
                } else {
                    PropertySpecKind::MultiSelect { options }
                }
            }
            "formula" => {
                let formula: ApiFormulaSpec = take_payload(&mut payload, FAMILY, "formula")?;
                PropertySpecKind::Formula {
                    expression: formula.expression,
                }
            }
            "relation" => {
                let relation: ApiRelationSpec = take_payload(&mut payload, FAMILY, "relation")?;
                let (synced_property_name, synced_property_id) = match relation.dual_property {
                    Some(dual) => (dual.synced_property_name, dual.synced_property_id),
                    None => (relation.synced_property_name, relation.synced_property_id),
                };
                PropertySpecKind::Relation {
                    database_id: DatabaseId::from_wire(relation.database_id),
                    synced_property_name,
                    synced_property_id,
                }
            }
            "rollup" => {
                let rollup: ApiRollupSpec = take_payload(&mut payload, FAMILY, "rollup")?;
                let function = rollup.function.as_deref().unwrap_or_default();
                let parsed = RollupFunction::from_wire(function);
                if parsed == RollupFunction::Unknown {
                    log::warn!("Unknown rollup function '{}', keeping it as Unknown", function);
                }
                PropertySpecKind::Rollup {
                    relation_property_name: rollup.relation_property_name,
                    relation_property_id: rollup.relation_property_id,
                    rollup_property_name: rollup.rollup_property_name,
                    rollup_property_id: rollup.rollup_property_id,
                    function: parsed,
                }
            }
            other => {
                log::warn!("Unknown property type '{}', keeping it as Unknown", other);
                PropertySpecKind::Unknown {
                    type_name: other.to_string(),
                }
            }
        };

        Ok(PropertySpec {
            id,
            name,
            kind: spec_kind,
        })
    }
}

fn insert_some(config: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        config.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// model → wire: `{<type>: configuration}`, the value of one entry of a
/// database's `properties` map
pub struct PropertySpecOutConverter;

impl ApiConverter for PropertySpecOutConverter {
    type Api = Value;
    type Model = PropertySpec;
    const NAME: &'static str = "PropertySpecOutConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &PropertySpec) -> Result<Value, ConversionError> {
        let config = match &model.kind {
            PropertySpecKind::Title
            | PropertySpecKind::RichText
            | PropertySpecKind::Date
            | PropertySpecKind::People
            | PropertySpecKind::Files
            | PropertySpecKind::Checkbox
            | PropertySpecKind::Url
            | PropertySpecKind::Email
            | PropertySpecKind::PhoneNumber
            | PropertySpecKind::CreatedTime
            | PropertySpecKind::CreatedBy
            | PropertySpecKind::LastEditedTime
            | PropertySpecKind::LastEditedBy => json!({}),
            PropertySpecKind::Number { format } => {
                let format = format.as_str().ok_or_else(|| ConversionError::UnknownVariant {
                    family: "number format",
                    type_name: "unknown".to_string(),
                })?;
                json!({ "format": format })
            }
            PropertySpecKind::Select { options } | PropertySpecKind::MultiSelect { options } => {
                json!({ "options": SelectOptionSpecOutConverter.model_to_api_list(options)? })
            }
            PropertySpecKind::Formula { expression } => json!({ "expression": expression }),
            PropertySpecKind::Relation { database_id, .. } => json!({
                "database_id": database_id.as_str(),
                "type": "single_property",
                "single_property": {},
            }),
            PropertySpecKind::Rollup {
                relation_property_name,
                relation_property_id,
                rollup_property_name,
                rollup_property_id,
                function,
            } => {
                let function = function.as_str().ok_or_else(|| ConversionError::UnknownVariant {
                    family: "rollup function",
                    type_name: "unknown".to_string(),
                })?;
                let mut config = Map::new();
                insert_some(&mut config, "relation_property_name", relation_property_name);
                insert_some(&mut config, "relation_property_id", relation_property_id);
                insert_some(&mut config, "rollup_property_name", rollup_property_name);
                insert_some(&mut config, "rollup_property_id", rollup_property_id);
                config.insert("function".to_string(), Value::String(function.to_string()));
                Value::Object(config)
            }
            PropertySpecKind::Unknown { type_name } => {
                return Err(ConversionError::UnknownVariant {
                    family: FAMILY,
                    type_name: type_name.clone(),
                })
            }
        };

        let mut entry = Map::new();
        entry.insert(model.kind.type_name().to_string(), config);
        Ok(Value::Object(entry))
    }
}

/// The `properties` object of a database create or update request, keyed by
/// column name.
pub(crate) fn property_specs_to_api(specs: &[PropertySpec]) -> Result<Value, ConversionError> {
    let mut properties = Map::new();
    for spec in specs {
        properties.insert(spec.name.clone(), PropertySpecOutConverter.model_to_api(spec)?);
    }
    Ok(Value::Object(properties))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertySpecList;
    use crate::types::Color;
    use pretty_assertions::assert_eq;

    fn decode(value: Value) -> PropertySpec {
        PropertySpecConverter
            .api_to_model(serde_json::from_value(value).unwrap())
            .unwrap()
    }

    #[test]
    fn test_decode_configured_kinds() {
        let number = decode(json!({
            "id": "a%3Ab", "name": "Price", "type": "number",
            "number": {"format": "yen"}
        }));
        assert_eq!(
            number.kind,
            PropertySpecKind::Number {
                format: NumberFormat::Yen
            }
        );

        let select = decode(json!({
            "id": "c", "name": "Planet", "type": "select",
            "select": {"options": [{"id": "o1", "name": "Tatooine", "color": "orange"}]}
        }));
        assert_eq!(
            select.kind,
            PropertySpecKind::Select {
                options: vec![SelectOption {
                    id: Some("o1".to_string()),
                    name: "Tatooine".to_string(),
                    color: Color::Orange,
                }]
            }
        );

        let relation = decode(json!({
            "id": "d", "name": "Friends", "type": "relation",
            "relation": {
                "database_id": "db1",
                "type": "dual_property",
                "dual_property": {"synced_property_name": "Friends of", "synced_property_id": "x"}
            }
        }));
        assert!(matches!(
            relation.kind,
            PropertySpecKind::Relation { synced_property_name: Some(ref name), .. } if name == "Friends of"
        ));
    }

    #[test]
    fn test_unknown_type_and_format() {
        let status = decode(json!({
            "id": "e", "name": "Status", "type": "status", "status": {"options": []}
        }));
        assert_eq!(
            status.kind,
            PropertySpecKind::Unknown {
                type_name: "status".to_string()
            }
        );
        assert!(PropertySpecOutConverter.model_to_api(&status).is_err());

        let price = decode(json!({
            "id": "f", "name": "Price", "type": "number", "number": {"format": "argentine_peso"}
        }));
        assert_eq!(
            price.kind,
            PropertySpecKind::Number {
                format: NumberFormat::Unknown
            }
        );
        assert!(PropertySpecOutConverter.model_to_api(&price).is_err());
    }

    #[test]
    fn test_encode_spec_list() {
        let specs = PropertySpecList::new()
            .title("Name")
            .number("Legs", NumberFormat::Number)
            .select("Planet", vec![SelectOption::new("Tatooine", Color::Orange)])
            .rollup("Count", "Friends", "Name", RollupFunction::CountAll);

        assert_eq!(
            property_specs_to_api(specs.specs()).unwrap(),
            json!({
                "Name": {"title": {}},
                "Legs": {"number": {"format": "number"}},
                "Planet": {"select": {"options": [{"name": "Tatooine", "color": "orange"}]}},
                "Count": {"rollup": {
                    "relation_property_name": "Friends",
                    "rollup_property_name": "Name",
                    "function": "count_all"
                }}
            })
        );
    }
}
