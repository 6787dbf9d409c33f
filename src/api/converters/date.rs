//! Dates and timestamps.
//!
//! A date value on the wire is either `yyyy-MM-dd` or an RFC 3339
//! date-time. Date-times are sent with millisecond precision and the
//! value's own offset.

use crate::api::converter::ApiConverter;
use crate::api::wire::ApiDate;
use crate::error::ConversionError;
use crate::model::{DateOrDateRange, DateOrDateTime};
use chrono::{DateTime, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

pub struct DateStringConverter;

impl ApiConverter for DateStringConverter {
    type Api = String;
    type Model = DateOrDateTime;
    const NAME: &'static str = "DateStringConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: String) -> Result<DateOrDateTime, ConversionError> {
        if let Ok(date) = NaiveDate::parse_from_str(&api, DATE_FORMAT) {
            return Ok(DateOrDateTime::Date(date));
        }
        DateTime::parse_from_rfc3339(&api)
            .map(DateOrDateTime::DateTime)
            .map_err(|_| ConversionError::InvalidDate(api))
    }

    fn model_to_api(&self, model: &DateOrDateTime) -> Result<String, ConversionError> {
        Ok(match model {
            DateOrDateTime::Date(date) => date.format(DATE_FORMAT).to_string(),
            DateOrDateTime::DateTime(date_time) => date_time.format(DATE_TIME_FORMAT).to_string(),
        })
    }
}

pub struct DateRangeConverter;

impl ApiConverter for DateRangeConverter {
    type Api = ApiDate;
    type Model = DateOrDateRange;
    const NAME: &'static str = "DateRangeConverter";
    const DECODES: bool = true;
    const ENCODES: bool = true;

    fn api_to_model(&self, api: ApiDate) -> Result<DateOrDateRange, ConversionError> {
        Ok(DateOrDateRange {
            start: DateStringConverter.api_to_model(api.start)?,
            end: api
                .end
                .map(|end| DateStringConverter.api_to_model(end))
                .transpose()?,
        })
    }

    fn model_to_api(&self, model: &DateOrDateRange) -> Result<ApiDate, ConversionError> {
        Ok(ApiDate {
            start: DateStringConverter.model_to_api(&model.start)?,
            end: model
                .end
                .as_ref()
                .map(|end| DateStringConverter.model_to_api(end))
                .transpose()?,
        })
    }
}

/// Server timestamps such as `created_time`. Read-only.
pub struct TimestampConverter;

impl ApiConverter for TimestampConverter {
    type Api = String;
    type Model = DateTime<Utc>;
    const NAME: &'static str = "TimestampConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: String) -> Result<DateTime<Utc>, ConversionError> {
        DateTime::parse_from_rfc3339(&api)
            .map(|date_time| date_time.with_timezone(&Utc))
            .map_err(|_| ConversionError::InvalidDate(api))
    }
}
