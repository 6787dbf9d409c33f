// src/model/property_value.rs
//! Typed values attached to a page's properties.

use super::date::{DateOrDateRange, DateOrDateTime};
use super::emoji_or_file::FileRef;
use super::property_spec::SelectOption;
use super::rich_text::RichTextList;
use super::user::User;
use crate::types::{PageId, UserId};
use chrono::{DateTime, Utc};

/// A page property: its column ID and name, and the typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub id: String,
    pub name: String,
    pub value: PropertyData,
}

impl PropertyValue {
    /// Key used when sending this value: the name, or the ID when the name is empty.
    pub fn id_or_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// The payload of a property value, keyed by the same `type` vocabulary as
/// [`PropertySpecKind`](super::PropertySpecKind).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    Title(RichTextList),
    RichText(RichTextList),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateOrDateRange>),
    /// Computed; read-only
    Formula(FormulaValue),
    Relation(Vec<PageId>),
    /// Computed; read-only
    Rollup(RollupValue),
    People(Vec<User>),
    /// Read-only through this client
    Files(Vec<FileRef>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    CreatedTime(DateTime<Utc>),
    CreatedBy(User),
    LastEditedTime(DateTime<Utc>),
    LastEditedBy(User),
    /// A property type this client doesn't recognize yet
    Unknown { type_name: String },
}

impl PropertyData {
    /// The wire `type` discriminator.
    pub fn type_name(&self) -> &str {
        match self {
            PropertyData::Title(_) => "title",
            PropertyData::RichText(_) => "rich_text",
            PropertyData::Number(_) => "number",
            PropertyData::Select(_) => "select",
            PropertyData::MultiSelect(_) => "multi_select",
            PropertyData::Date(_) => "date",
            PropertyData::Formula(_) => "formula",
            PropertyData::Relation(_) => "relation",
            PropertyData::Rollup(_) => "rollup",
            PropertyData::People(_) => "people",
            PropertyData::Files(_) => "files",
            PropertyData::Checkbox(_) => "checkbox",
            PropertyData::Url(_) => "url",
            PropertyData::Email(_) => "email",
            PropertyData::PhoneNumber(_) => "phone_number",
            PropertyData::CreatedTime(_) => "created_time",
            PropertyData::CreatedBy(_) => "created_by",
            PropertyData::LastEditedTime(_) => "last_edited_time",
            PropertyData::LastEditedBy(_) => "last_edited_by",
            PropertyData::Unknown { type_name } => type_name,
        }
    }

    /// Rich text payload of title and text properties.
    pub fn as_rich_text(&self) -> Option<&RichTextList> {
        match self {
            PropertyData::Title(text) | PropertyData::RichText(text) => Some(text),
            _ => None,
        }
    }
}

/// Result of a formula column. Each payload is `None` when the formula
/// produced no value for this page.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateOrDateRange>),
    Unknown { type_name: String },
}

/// Result of a rollup column.
#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateOrDateRange>),
    /// One entry per related page, each decoded like a property value
    Array(Vec<PropertyData>),
    Unknown { type_name: String },
}

/// Property values accumulated for a page create or update request,
/// each keyed by property ID or name.
///
/// ```ignore
/// let values = PropertyValueList::new()
///     .title("Name", "Greedo")
///     .number("Legs", 2)
///     .multi_select_by_names("Planets", ["Tatooine", "Bespin"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValueList {
    values: Vec<PropertyValue>,
}

impl PropertyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn add(mut self, id_or_name: impl Into<String>, value: PropertyData) -> Self {
        self.values.push(PropertyValue {
            id: String::new(),
            name: id_or_name.into(),
            value,
        });
        self
    }

    pub fn number(self, id_or_name: impl Into<String>, number: impl Into<f64>) -> Self {
        self.add(id_or_name, PropertyData::Number(Some(number.into())))
    }

    pub fn text(self, id_or_name: impl Into<String>, text: impl Into<RichTextList>) -> Self {
        self.add(id_or_name, PropertyData::RichText(text.into()))
    }

    pub fn title(self, id_or_name: impl Into<String>, title: impl Into<RichTextList>) -> Self {
        self.add(id_or_name, PropertyData::Title(title.into()))
    }

    pub fn select_by_name(self, id_or_name: impl Into<String>, option: impl Into<String>) -> Self {
        self.add(
            id_or_name,
            PropertyData::Select(Some(SelectOption::named(option))),
        )
    }

    pub fn multi_select_by_names<I, S>(self, id_or_name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(SelectOption::named).collect();
        self.add(id_or_name, PropertyData::MultiSelect(options))
    }

    pub fn date(self, id_or_name: impl Into<String>, date: impl Into<DateOrDateRange>) -> Self {
        self.add(id_or_name, PropertyData::Date(Some(date.into())))
    }

    pub fn date_time(self, id_or_name: impl Into<String>, date: impl Into<DateOrDateTime>) -> Self {
        self.date(id_or_name, DateOrDateRange::single(date))
    }

    pub fn relation(self, id_or_name: impl Into<String>, pages: Vec<PageId>) -> Self {
        self.add(id_or_name, PropertyData::Relation(pages))
    }

    pub fn people(self, id_or_name: impl Into<String>, users: Vec<UserId>) -> Self {
        let users = users.into_iter().map(User::reference).collect();
        self.add(id_or_name, PropertyData::People(users))
    }

    pub fn checkbox(self, id_or_name: impl Into<String>, checked: bool) -> Self {
        self.add(id_or_name, PropertyData::Checkbox(checked))
    }

    pub fn url(self, id_or_name: impl Into<String>, url: impl Into<String>) -> Self {
        self.add(id_or_name, PropertyData::Url(Some(url.into())))
    }

    pub fn email(self, id_or_name: impl Into<String>, email: impl Into<String>) -> Self {
        self.add(id_or_name, PropertyData::Email(Some(email.into())))
    }

    pub fn phone_number(self, id_or_name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.add(id_or_name, PropertyData::PhoneNumber(Some(phone.into())))
    }
}
