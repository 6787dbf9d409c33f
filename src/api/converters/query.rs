// src/api/converters/query.rs
//! Query filters and sorts. Encode-only: the server never sends these back.

use super::date::DateStringConverter;
use crate::api::converter::ApiConverter;
use crate::error::ConversionError;
use crate::model::query::{
    CheckboxPredicate, DatePredicate, FilesPredicate, FormulaPredicate, MultiSelectPredicate,
    NumberPredicate, PeoplePredicate, RelationPredicate, SelectPredicate, TextPredicate,
};
use crate::model::{
    DatabaseQuery, DatabaseQueryPropertyFilter, DatabaseQuerySort, DateOrDateTime, PropertyFilter,
    PropertySort,
};
use serde_json::{json, Map, Value};

fn condition(operator: &str, operand: Value) -> Value {
    let mut object = Map::new();
    object.insert(operator.to_string(), operand);
    Value::Object(object)
}

fn text_condition(predicate: &TextPredicate) -> Value {
    match predicate {
        TextPredicate::Equals(value) => condition("equals", json!(value)),
        TextPredicate::DoesNotEqual(value) => condition("does_not_equal", json!(value)),
        TextPredicate::Contains(value) => condition("contains", json!(value)),
        TextPredicate::DoesNotContain(value) => condition("does_not_contain", json!(value)),
        TextPredicate::StartsWith(value) => condition("starts_with", json!(value)),
        TextPredicate::EndsWith(value) => condition("ends_with", json!(value)),
        TextPredicate::IsEmpty => condition("is_empty", json!(true)),
        TextPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

/// Numbers always go out as floating point, so `3` is sent as `3.0`.
fn number_condition(predicate: &NumberPredicate) -> Value {
    match predicate {
        NumberPredicate::Equals(n) => condition("equals", json!(n.value())),
        NumberPredicate::DoesNotEqual(n) => condition("does_not_equal", json!(n.value())),
        NumberPredicate::GreaterThan(n) => condition("greater_than", json!(n.value())),
        NumberPredicate::LessThan(n) => condition("less_than", json!(n.value())),
        NumberPredicate::GreaterThanOrEqualTo(n) => {
            condition("greater_than_or_equal_to", json!(n.value()))
        }
        NumberPredicate::LessThanOrEqualTo(n) => {
            condition("less_than_or_equal_to", json!(n.value()))
        }
        NumberPredicate::IsEmpty => condition("is_empty", json!(true)),
        NumberPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn checkbox_condition(predicate: &CheckboxPredicate) -> Value {
    match predicate {
        CheckboxPredicate::Equals(value) => condition("equals", json!(value)),
        CheckboxPredicate::DoesNotEqual(value) => condition("does_not_equal", json!(value)),
    }
}

fn select_condition(predicate: &SelectPredicate) -> Value {
    match predicate {
        SelectPredicate::Equals(value) => condition("equals", json!(value)),
        SelectPredicate::DoesNotEqual(value) => condition("does_not_equal", json!(value)),
        SelectPredicate::IsEmpty => condition("is_empty", json!(true)),
        SelectPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn multi_select_condition(predicate: &MultiSelectPredicate) -> Value {
    match predicate {
        MultiSelectPredicate::Contains(value) => condition("contains", json!(value)),
        MultiSelectPredicate::DoesNotContain(value) => condition("does_not_contain", json!(value)),
        MultiSelectPredicate::IsEmpty => condition("is_empty", json!(true)),
        MultiSelectPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn date_condition(predicate: &DatePredicate) -> Result<Value, ConversionError> {
    let date = |operator: &str, value: &DateOrDateTime| -> Result<Value, ConversionError> {
        Ok(condition(
            operator,
            Value::String(DateStringConverter.model_to_api(value)?),
        ))
    };
    Ok(match predicate {
        DatePredicate::Equals(value) => date("equals", value)?,
        DatePredicate::Before(value) => date("before", value)?,
        DatePredicate::After(value) => date("after", value)?,
        DatePredicate::OnOrBefore(value) => date("on_or_before", value)?,
        DatePredicate::OnOrAfter(value) => date("on_or_after", value)?,
        DatePredicate::IsPastWeek => condition("past_week", json!({})),
        DatePredicate::IsPastMonth => condition("past_month", json!({})),
        DatePredicate::IsPastYear => condition("past_year", json!({})),
        DatePredicate::IsNextWeek => condition("next_week", json!({})),
        DatePredicate::IsNextMonth => condition("next_month", json!({})),
        DatePredicate::IsNextYear => condition("next_year", json!({})),
        DatePredicate::IsEmpty => condition("is_empty", json!(true)),
        DatePredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    })
}

fn people_condition(predicate: &PeoplePredicate) -> Value {
    match predicate {
        PeoplePredicate::Contains(user) => condition("contains", json!(user.as_str())),
        PeoplePredicate::DoesNotContain(user) => {
            condition("does_not_contain", json!(user.as_str()))
        }
        PeoplePredicate::IsEmpty => condition("is_empty", json!(true)),
        PeoplePredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn files_condition(predicate: &FilesPredicate) -> Value {
    match predicate {
        FilesPredicate::IsEmpty => condition("is_empty", json!(true)),
        FilesPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn relation_condition(predicate: &RelationPredicate) -> Value {
    match predicate {
        RelationPredicate::Contains(page) => condition("contains", json!(page.as_str())),
        RelationPredicate::DoesNotContain(page) => {
            condition("does_not_contain", json!(page.as_str()))
        }
        RelationPredicate::IsEmpty => condition("is_empty", json!(true)),
        RelationPredicate::IsNotEmpty => condition("is_not_empty", json!(true)),
    }
}

fn formula_condition(predicate: &FormulaPredicate) -> Result<Value, ConversionError> {
    Ok(match predicate {
        FormulaPredicate::Text(text) => condition("string", text_condition(text)),
        FormulaPredicate::Checkbox(checkbox) => condition("checkbox", checkbox_condition(checkbox)),
        FormulaPredicate::Number(number) => condition("number", number_condition(number)),
        FormulaPredicate::Date(date) => condition("date", date_condition(date)?),
    })
}

/// One `{property, <type>: {<operator>: operand}}` filter object.
pub struct PropertyFilterConverter;

impl ApiConverter for PropertyFilterConverter {
    type Api = Value;
    type Model = DatabaseQueryPropertyFilter;
    const NAME: &'static str = "PropertyFilterConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &DatabaseQueryPropertyFilter) -> Result<Value, ConversionError> {
        let (key, operand) = match &model.filter {
            PropertyFilter::Title(p) => ("title", text_condition(p)),
            PropertyFilter::Text(p) => ("rich_text", text_condition(p)),
            PropertyFilter::Number(p) => ("number", number_condition(p)),
            PropertyFilter::Checkbox(p) => ("checkbox", checkbox_condition(p)),
            PropertyFilter::Select(p) => ("select", select_condition(p)),
            PropertyFilter::MultiSelect(p) => ("multi_select", multi_select_condition(p)),
            PropertyFilter::Date(p) => ("date", date_condition(p)?),
            PropertyFilter::People(p) => ("people", people_condition(p)),
            PropertyFilter::Files(p) => ("files", files_condition(p)),
            PropertyFilter::Relation(p) => ("relation", relation_condition(p)),
            PropertyFilter::Formula(p) => ("formula", formula_condition(p)?),
            PropertyFilter::Url(p) => ("url", text_condition(p)),
            PropertyFilter::Email(p) => ("email", text_condition(p)),
            PropertyFilter::Phone(p) => ("phone_number", text_condition(p)),
            PropertyFilter::CreatedBy(p) => ("created_by", people_condition(p)),
            PropertyFilter::CreatedTime(p) => ("created_time", date_condition(p)?),
            PropertyFilter::LastEditedBy(p) => ("last_edited_by", people_condition(p)),
            PropertyFilter::LastEditedTime(p) => ("last_edited_time", date_condition(p)?),
        };

        let mut filter = Map::new();
        filter.insert(
            "property".to_string(),
            Value::String(model.property_id_or_name.clone()),
        );
        filter.insert(key.to_string(), operand);
        Ok(Value::Object(filter))
    }
}

/// The `filter` member of a query body: `{or?, and?}`, each group omitted
/// when empty. `None` when the query has no filters at all.
pub struct DatabaseQueryConverter;

impl ApiConverter for DatabaseQueryConverter {
    type Api = Option<Value>;
    type Model = DatabaseQuery;
    const NAME: &'static str = "DatabaseQueryConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &DatabaseQuery) -> Result<Option<Value>, ConversionError> {
        let mut filter = Map::new();

        let any = model
            .any_filters()
            .map(|f| PropertyFilterConverter.model_to_api(f))
            .collect::<Result<Vec<_>, _>>()?;
        if !any.is_empty() {
            filter.insert("or".to_string(), Value::Array(any));
        }

        let all = model
            .all_filters()
            .map(|f| PropertyFilterConverter.model_to_api(f))
            .collect::<Result<Vec<_>, _>>()?;
        if !all.is_empty() {
            filter.insert("and".to_string(), Value::Array(all));
        }

        Ok(if filter.is_empty() {
            None
        } else {
            Some(Value::Object(filter))
        })
    }
}

pub struct DatabaseQuerySortConverter;

impl ApiConverter for DatabaseQuerySortConverter {
    type Api = Vec<Value>;
    type Model = DatabaseQuerySort;
    const NAME: &'static str = "DatabaseQuerySortConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &DatabaseQuerySort) -> Result<Vec<Value>, ConversionError> {
        Ok(model
            .sorting()
            .iter()
            .map(|(property, direction)| {
                json!({ "property": property, "direction": direction.as_str() })
            })
            .collect())
    }
}

/// Search results can only be sorted by last edit time.
pub struct PropertySortConverter;

impl ApiConverter for PropertySortConverter {
    type Api = Value;
    type Model = PropertySort;
    const NAME: &'static str = "PropertySortConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &PropertySort) -> Result<Value, ConversionError> {
        Ok(json!({
            "timestamp": "last_edited_time",
            "direction": model.direction.as_str(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDirection;
    use crate::types::PageId;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_query_has_no_filter() {
        assert_eq!(
            DatabaseQueryConverter
                .model_to_api(&DatabaseQuery::new())
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_only_non_empty_groups_are_sent() {
        let query = DatabaseQuery::new().all(DatabaseQueryPropertyFilter::number(
            "Legs",
            NumberPredicate::greater_than(3),
        ));
        assert_eq!(
            DatabaseQueryConverter.model_to_api(&query).unwrap(),
            Some(json!({"and": [{"property": "Legs", "number": {"greater_than": 3.0}}]}))
        );
    }

    #[test]
    fn test_filter_keys() {
        let encode = |filter| PropertyFilterConverter.model_to_api(&filter).unwrap();

        assert_eq!(
            encode(DatabaseQueryPropertyFilter::text(
                "Bio",
                TextPredicate::Contains("smuggler".into())
            )),
            json!({"property": "Bio", "rich_text": {"contains": "smuggler"}})
        );
        assert_eq!(
            encode(DatabaseQueryPropertyFilter::new(
                "Phone",
                PropertyFilter::Phone(TextPredicate::IsEmpty)
            )),
            json!({"property": "Phone", "phone_number": {"is_empty": true}})
        );
        assert_eq!(
            encode(DatabaseQueryPropertyFilter::formula(
                "Label",
                FormulaPredicate::Text(TextPredicate::Equals("x".into()))
            )),
            json!({"property": "Label", "formula": {"string": {"equals": "x"}}})
        );
        assert_eq!(
            encode(DatabaseQueryPropertyFilter::relation(
                "Friends",
                RelationPredicate::Contains(PageId::from_wire("p1"))
            )),
            json!({"property": "Friends", "relation": {"contains": "p1"}})
        );
    }

    #[test]
    fn test_date_conditions() {
        let encode = |predicate| {
            PropertyFilterConverter
                .model_to_api(&DatabaseQueryPropertyFilter::date("Due", predicate))
                .unwrap()
        };
        assert_eq!(
            encode(DatePredicate::OnOrAfter(
                NaiveDate::from_ymd_opt(2021, 1, 31).unwrap().into()
            )),
            json!({"property": "Due", "date": {"on_or_after": "2021-01-31"}})
        );
        assert_eq!(
            encode(DatePredicate::IsPastMonth),
            json!({"property": "Due", "date": {"past_month": {}}})
        );
        assert_eq!(
            encode(DatePredicate::IsNextYear),
            json!({"property": "Due", "date": {"next_year": {}}})
        );
    }

    #[test]
    fn test_sorts() {
        let sort = DatabaseQuerySort::new().ascending("Name").descending("Legs");
        assert_eq!(
            DatabaseQuerySortConverter.model_to_api(&sort).unwrap(),
            vec![
                json!({"property": "Name", "direction": "ascending"}),
                json!({"property": "Legs", "direction": "descending"}),
            ]
        );
        assert_eq!(
            PropertySortConverter
                .model_to_api(&PropertySort::last_edited(SortDirection::Descending))
                .unwrap(),
            json!({"timestamp": "last_edited_time", "direction": "descending"})
        );
    }
}
