use crate::api::converter::ApiConverter;
use crate::error::ConversionError;
use crate::types::Color;

/// Color names. Unrecognized names decode to `Color::Unknown`, which
/// cannot be sent back.
pub struct ColorConverter;

impl ApiConverter for ColorConverter {
    type Api = String;
    type Model = Color;
    const NAME: &'static str = "ColorConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: String) -> Result<Color, ConversionError> {
        let color = Color::from_wire(&api);
        if color == Color::Unknown {
            log::warn!("Unknown color '{}', keeping it as Unknown", api);
        }
        Ok(color)
    }

    fn model_to_api(&self, model: &Color) -> Result<String, ConversionError> {
        model
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ConversionError::UnknownVariant {
                family: "color",
                type_name: "unknown".to_string(),
            })
    }
}

/// Decodes an optional color, treating absence as `Color::Default`.
pub(crate) fn color_or_default(api: Option<String>) -> Result<Color, ConversionError> {
    api.map_or(Ok(Color::Default), |name| ColorConverter.api_to_model(name))
}
