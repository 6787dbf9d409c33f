// src/api/converters/pagination.rs

use crate::api::converter::ApiConverter;
use crate::api::wire::ApiResultPage;
use crate::error::ConversionError;
use crate::model::{Pagination, ResultPage};

/// One page of a listing, with each result decoded by `C`.
///
/// Only `next_cursor` decides whether there is a next page.
pub struct ResultPageConverter<C>(pub C);

impl<C: ApiConverter> ApiConverter for ResultPageConverter<C> {
    type Api = ApiResultPage<C::Api>;
    type Model = ResultPage<C::Model>;
    const NAME: &'static str = "ResultPageConverter";
    const DECODES: bool = C::DECODES;

    fn api_to_model(&self, api: Self::Api) -> Result<Self::Model, ConversionError> {
        Ok(ResultPage {
            results: self.0.api_to_model_list(api.results)?,
            next_pagination: api.next_cursor.map(Pagination::new),
        })
    }
}
