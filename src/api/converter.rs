// src/api/converter.rs
//! The converter contract between wire shapes and the domain model.
//!
//! Each converter maps one wire type to one model type. Either direction
//! may be left unimplemented: the default reports `NotSupported` instead of
//! guessing, and `DECODES`/`ENCODES` let callers check up front.

use crate::error::{ConversionError, Direction};

pub trait ApiConverter {
    type Api;
    type Model;

    /// Name used in `NotSupported` errors.
    const NAME: &'static str;
    const DECODES: bool = false;
    const ENCODES: bool = false;

    /// wire → model
    fn api_to_model(&self, api: Self::Api) -> Result<Self::Model, ConversionError> {
        let _ = api;
        Err(ConversionError::NotSupported {
            converter: Self::NAME,
            direction: Direction::Decode,
        })
    }

    /// model → wire
    fn model_to_api(&self, model: &Self::Model) -> Result<Self::Api, ConversionError> {
        let _ = model;
        Err(ConversionError::NotSupported {
            converter: Self::NAME,
            direction: Direction::Encode,
        })
    }

    fn supports_decode(&self) -> bool {
        Self::DECODES
    }

    fn supports_encode(&self) -> bool {
        Self::ENCODES
    }

    /// Decodes each element independently, keeping order. Fails on the
    /// first element that fails.
    fn api_to_model_list(&self, api: Vec<Self::Api>) -> Result<Vec<Self::Model>, ConversionError> {
        api.into_iter().map(|item| self.api_to_model(item)).collect()
    }

    fn model_to_api_list(&self, models: &[Self::Model]) -> Result<Vec<Self::Api>, ConversionError> {
        models.iter().map(|model| self.model_to_api(model)).collect()
    }
}
