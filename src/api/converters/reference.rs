use crate::api::converter::ApiConverter;
use crate::api::wire::ApiReference;
use crate::error::ConversionError;
use crate::model::Reference;
use crate::types::{DatabaseId, PageId};

/// Parent references. A workspace parent decodes, but is rejected as the
/// parent of an object being created.
pub struct ReferenceConverter;

impl ApiConverter for ReferenceConverter {
    type Api = ApiReference;
    type Model = Reference;
    const NAME: &'static str = "ReferenceConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiReference) -> Result<Reference, ConversionError> {
        let missing = |field: &str| ConversionError::MissingField {
            family: "reference",
            field: field.to_string(),
        };
        Ok(match api.kind.as_str() {
            "database_id" => Reference::Database(DatabaseId::from_wire(
                api.database_id.ok_or_else(|| missing("database_id"))?,
            )),
            "page_id" => Reference::Page(PageId::from_wire(
                api.page_id.ok_or_else(|| missing("page_id"))?,
            )),
            "workspace" => Reference::Workspace,
            other => {
                log::warn!("Unknown parent type '{}', keeping it as Unknown", other);
                Reference::Unknown {
                    type_name: other.to_string(),
                }
            }
        })
    }

    fn model_to_api(&self, model: &Reference) -> Result<ApiReference, ConversionError> {
        match model {
            Reference::Database(id) => Ok(ApiReference {
                kind: "database_id".to_string(),
                database_id: Some(id.to_string()),
                page_id: None,
                workspace: None,
            }),
            Reference::Page(id) => Ok(ApiReference {
                kind: "page_id".to_string(),
                database_id: None,
                page_id: Some(id.to_string()),
                workspace: None,
            }),
            Reference::Workspace => Err(ConversionError::WorkspaceNotAllowed),
            Reference::Unknown { type_name } => Err(ConversionError::UnknownVariant {
                family: "reference",
                type_name: type_name.clone(),
            }),
        }
    }
}
