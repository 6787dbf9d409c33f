// src/model/query.rs
//! Database query filters and sorts, and the search sort.
//!
//! A filter pairs a property (by ID or name) with a property-type family;
//! the family's predicate picks the operator. `DatabaseQuery` groups
//! filters into an AND set and an OR set.

use super::date::DateOrDateTime;
use crate::types::{PageId, UserId};
use indexmap::IndexSet;
use std::hash::{Hash, Hasher};

/// A number operand. Always sent as a double, whatever the caller's
/// integer or float type.
#[derive(Debug, Clone, Copy)]
pub struct FilterNumber(pub f64);

impl FilterNumber {
    pub fn value(self) -> f64 {
        self.0
    }
}

// Integers above 2^53 lose precision, as they would in the JSON body anyway.
macro_rules! filter_number_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for FilterNumber {
                fn from(value: $source) -> Self {
                    FilterNumber(value as f64)
                }
            }
        )*
    };
}

filter_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl PartialEq for FilterNumber {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FilterNumber {}

impl Hash for FilterNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Operators over text-like properties (title, rich text, url, email, phone)
/// and text formulas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextPredicate {
    Equals(String),
    DoesNotEqual(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberPredicate {
    Equals(FilterNumber),
    DoesNotEqual(FilterNumber),
    GreaterThan(FilterNumber),
    LessThan(FilterNumber),
    GreaterThanOrEqualTo(FilterNumber),
    LessThanOrEqualTo(FilterNumber),
    IsEmpty,
    IsNotEmpty,
}

impl NumberPredicate {
    pub fn equals(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::Equals(value.into())
    }

    pub fn does_not_equal(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::DoesNotEqual(value.into())
    }

    pub fn greater_than(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::GreaterThan(value.into())
    }

    pub fn less_than(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::LessThan(value.into())
    }

    pub fn greater_than_or_equal_to(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::GreaterThanOrEqualTo(value.into())
    }

    pub fn less_than_or_equal_to(value: impl Into<FilterNumber>) -> Self {
        NumberPredicate::LessThanOrEqualTo(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckboxPredicate {
    Equals(bool),
    DoesNotEqual(bool),
}

impl CheckboxPredicate {
    pub fn is_checked(checked: bool) -> Self {
        if checked {
            CheckboxPredicate::Equals(true)
        } else {
            CheckboxPredicate::DoesNotEqual(true)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectPredicate {
    Equals(String),
    DoesNotEqual(String),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MultiSelectPredicate {
    Contains(String),
    DoesNotContain(String),
    IsEmpty,
    IsNotEmpty,
}

/// Operators over dates. The relative windows are evaluated by the server
/// against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePredicate {
    Equals(DateOrDateTime),
    Before(DateOrDateTime),
    After(DateOrDateTime),
    OnOrBefore(DateOrDateTime),
    OnOrAfter(DateOrDateTime),
    IsPastWeek,
    IsPastMonth,
    IsPastYear,
    IsNextWeek,
    IsNextMonth,
    IsNextYear,
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeoplePredicate {
    Contains(UserId),
    DoesNotContain(UserId),
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilesPredicate {
    IsEmpty,
    IsNotEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationPredicate {
    Contains(PageId),
    DoesNotContain(PageId),
    IsEmpty,
    IsNotEmpty,
}

/// Operators over a formula, by the formula's result type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormulaPredicate {
    Text(TextPredicate),
    Checkbox(CheckboxPredicate),
    Number(NumberPredicate),
    Date(DatePredicate),
}

/// The property-type family a filter applies to, with its operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyFilter {
    Title(TextPredicate),
    Text(TextPredicate),
    Number(NumberPredicate),
    Checkbox(CheckboxPredicate),
    Select(SelectPredicate),
    MultiSelect(MultiSelectPredicate),
    Date(DatePredicate),
    People(PeoplePredicate),
    Files(FilesPredicate),
    Relation(RelationPredicate),
    Formula(FormulaPredicate),
    Url(TextPredicate),
    Email(TextPredicate),
    Phone(TextPredicate),
    CreatedBy(PeoplePredicate),
    CreatedTime(DatePredicate),
    LastEditedBy(PeoplePredicate),
    LastEditedTime(DatePredicate),
}

/// A filter on one property of a database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseQueryPropertyFilter {
    pub property_id_or_name: String,
    pub filter: PropertyFilter,
}

impl DatabaseQueryPropertyFilter {
    pub fn new(property_id_or_name: impl Into<String>, filter: PropertyFilter) -> Self {
        Self {
            property_id_or_name: property_id_or_name.into(),
            filter,
        }
    }

    pub fn title(property: impl Into<String>, predicate: TextPredicate) -> Self {
        Self::new(property, PropertyFilter::Title(predicate))
    }

    pub fn text(property: impl Into<String>, predicate: TextPredicate) -> Self {
        Self::new(property, PropertyFilter::Text(predicate))
    }

    pub fn number(property: impl Into<String>, predicate: NumberPredicate) -> Self {
        Self::new(property, PropertyFilter::Number(predicate))
    }

    pub fn checkbox(property: impl Into<String>, predicate: CheckboxPredicate) -> Self {
        Self::new(property, PropertyFilter::Checkbox(predicate))
    }

    pub fn select(property: impl Into<String>, predicate: SelectPredicate) -> Self {
        Self::new(property, PropertyFilter::Select(predicate))
    }

    pub fn multi_select(property: impl Into<String>, predicate: MultiSelectPredicate) -> Self {
        Self::new(property, PropertyFilter::MultiSelect(predicate))
    }

    pub fn date(property: impl Into<String>, predicate: DatePredicate) -> Self {
        Self::new(property, PropertyFilter::Date(predicate))
    }

    pub fn people(property: impl Into<String>, predicate: PeoplePredicate) -> Self {
        Self::new(property, PropertyFilter::People(predicate))
    }

    pub fn files(property: impl Into<String>, predicate: FilesPredicate) -> Self {
        Self::new(property, PropertyFilter::Files(predicate))
    }

    pub fn relation(property: impl Into<String>, predicate: RelationPredicate) -> Self {
        Self::new(property, PropertyFilter::Relation(predicate))
    }

    pub fn formula(property: impl Into<String>, predicate: FormulaPredicate) -> Self {
        Self::new(property, PropertyFilter::Formula(predicate))
    }
}

/// Filters combined into an AND group and an OR group.
///
/// Adding the same filter twice to a group has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseQuery {
    all: IndexSet<DatabaseQueryPropertyFilter>,
    any: IndexSet<DatabaseQueryPropertyFilter>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require this filter (AND group).
    pub fn all(mut self, filter: DatabaseQueryPropertyFilter) -> Self {
        self.all.insert(filter);
        self
    }

    /// Accept this filter (OR group).
    pub fn any(mut self, filter: DatabaseQueryPropertyFilter) -> Self {
        self.any.insert(filter);
        self
    }

    pub fn all_filters(&self) -> impl Iterator<Item = &DatabaseQueryPropertyFilter> {
        self.all.iter()
    }

    pub fn any_filters(&self) -> impl Iterator<Item = &DatabaseQueryPropertyFilter> {
        self.any.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Ordered sort keys for a database query; earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseQuerySort {
    sorting: Vec<(String, SortDirection)>,
}

impl DatabaseQuerySort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascending(mut self, property_id_or_name: impl Into<String>) -> Self {
        self.sorting
            .push((property_id_or_name.into(), SortDirection::Ascending));
        self
    }

    pub fn descending(mut self, property_id_or_name: impl Into<String>) -> Self {
        self.sorting
            .push((property_id_or_name.into(), SortDirection::Descending));
        self
    }

    pub fn sorting(&self) -> &[(String, SortDirection)] {
        &self.sorting
    }

    pub fn is_empty(&self) -> bool {
        self.sorting.is_empty()
    }
}

/// Sort of search results. The API only sorts search by last edit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertySort {
    pub direction: SortDirection,
}

impl PropertySort {
    pub fn last_edited(direction: SortDirection) -> Self {
        Self { direction }
    }
}
