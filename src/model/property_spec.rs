// src/model/property_spec.rs
//! Database column definitions.

use crate::types::{Color, DatabaseId};

/// Declares a closed wire vocabulary with an `Unknown` fallback:
/// `from_wire` never fails, `as_str` is `None` only for `Unknown`.
macro_rules! wire_vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A value this client doesn't recognize yet
            Unknown,
        }

        impl $name {
            pub fn from_wire(s: &str) -> Self {
                match s {
                    $($wire => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            pub fn as_str(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($wire),)+
                    Self::Unknown => None,
                }
            }
        }
    };
}

wire_vocabulary! {
    /// Display format of a number column
    NumberFormat {
        Number => "number",
        NumberWithCommas => "number_with_commas",
        Percent => "percent",
        Dollar => "dollar",
        CanadianDollar => "canadian_dollar",
        Euro => "euro",
        Pound => "pound",
        Yen => "yen",
        Ruble => "ruble",
        Rupee => "rupee",
        Won => "won",
        Yuan => "yuan",
        Real => "real",
        Lira => "lira",
        Rupiah => "rupiah",
        Franc => "franc",
        HongKongDollar => "hong_kong_dollar",
        NewZealandDollar => "new_zealand_dollar",
        Krona => "krona",
        NorwegianKrone => "norwegian_krone",
        MexicanPeso => "mexican_peso",
        Rand => "rand",
        NewTaiwanDollar => "new_taiwan_dollar",
        DanishKrone => "danish_krone",
        Zloty => "zloty",
        Baht => "baht",
        Forint => "forint",
        Koruna => "koruna",
        Shekel => "shekel",
        ChileanPeso => "chilean_peso",
        PhilippinePeso => "philippine_peso",
        Dirham => "dirham",
        ColombianPeso => "colombian_peso",
        Riyal => "riyal",
        Ringgit => "ringgit",
        Leu => "leu",
    }
}

wire_vocabulary! {
    /// Aggregation applied by a rollup column
    RollupFunction {
        CountAll => "count_all",
        CountValues => "count_values",
        CountUniqueValues => "count_unique_values",
        CountEmpty => "count_empty",
        CountNotEmpty => "count_not_empty",
        PercentEmpty => "percent_empty",
        PercentNotEmpty => "percent_not_empty",
        Sum => "sum",
        Average => "average",
        Median => "median",
        Min => "min",
        Max => "max",
        Range => "range",
    }
}

/// An option of a select or multi-select column.
///
/// `id` is absent on options built client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption {
    pub id: Option<String>,
    pub name: String,
    pub color: Color,
}

impl SelectOption {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            id: None,
            name: name.into(),
            color,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Color::Default)
    }
}

/// A database column: its name, server ID and typed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub id: String,
    pub name: String,
    pub kind: PropertySpecKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySpecKind {
    Title,
    RichText,
    Number {
        format: NumberFormat,
    },
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula {
        expression: String,
    },
    Relation {
        database_id: DatabaseId,
        synced_property_name: Option<String>,
        synced_property_id: Option<String>,
    },
    Rollup {
        relation_property_name: Option<String>,
        relation_property_id: Option<String>,
        rollup_property_name: Option<String>,
        rollup_property_id: Option<String>,
        function: RollupFunction,
    },
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    /// A column type this client doesn't recognize yet
    Unknown {
        type_name: String,
    },
}

impl PropertySpecKind {
    /// The wire `type` discriminator.
    pub fn type_name(&self) -> &str {
        match self {
            PropertySpecKind::Title => "title",
            PropertySpecKind::RichText => "rich_text",
            PropertySpecKind::Number { .. } => "number",
            PropertySpecKind::Select { .. } => "select",
            PropertySpecKind::MultiSelect { .. } => "multi_select",
            PropertySpecKind::Date => "date",
            PropertySpecKind::People => "people",
            PropertySpecKind::Files => "files",
            PropertySpecKind::Checkbox => "checkbox",
            PropertySpecKind::Url => "url",
            PropertySpecKind::Email => "email",
            PropertySpecKind::PhoneNumber => "phone_number",
            PropertySpecKind::Formula { .. } => "formula",
            PropertySpecKind::Relation { .. } => "relation",
            PropertySpecKind::Rollup { .. } => "rollup",
            PropertySpecKind::CreatedTime => "created_time",
            PropertySpecKind::CreatedBy => "created_by",
            PropertySpecKind::LastEditedTime => "last_edited_time",
            PropertySpecKind::LastEditedBy => "last_edited_by",
            PropertySpecKind::Unknown { type_name } => type_name,
        }
    }
}

/// Column definitions accumulated for a database create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySpecList {
    specs: Vec<PropertySpec>,
}

impl PropertySpecList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specs(&self) -> &[PropertySpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn add(mut self, name: impl Into<String>, kind: PropertySpecKind) -> Self {
        self.specs.push(PropertySpec {
            id: String::new(),
            name: name.into(),
            kind,
        });
        self
    }

    pub fn title(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Title)
    }

    pub fn text(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::RichText)
    }

    pub fn number(self, name: impl Into<String>, format: NumberFormat) -> Self {
        self.add(name, PropertySpecKind::Number { format })
    }

    pub fn select(self, name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        self.add(name, PropertySpecKind::Select { options })
    }

    pub fn multi_select(self, name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        self.add(name, PropertySpecKind::MultiSelect { options })
    }

    pub fn date(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Date)
    }

    pub fn people(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::People)
    }

    pub fn files(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Files)
    }

    pub fn checkbox(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Checkbox)
    }

    pub fn url(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Url)
    }

    pub fn email(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::Email)
    }

    pub fn phone_number(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::PhoneNumber)
    }

    pub fn formula(self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.add(
            name,
            PropertySpecKind::Formula {
                expression: expression.into(),
            },
        )
    }

    pub fn relation(self, name: impl Into<String>, database_id: DatabaseId) -> Self {
        self.add(
            name,
            PropertySpecKind::Relation {
                database_id,
                synced_property_name: None,
                synced_property_id: None,
            },
        )
    }

    pub fn rollup(
        self,
        name: impl Into<String>,
        relation_property_name: impl Into<String>,
        rollup_property_name: impl Into<String>,
        function: RollupFunction,
    ) -> Self {
        self.add(
            name,
            PropertySpecKind::Rollup {
                relation_property_name: Some(relation_property_name.into()),
                relation_property_id: None,
                rollup_property_name: Some(rollup_property_name.into()),
                rollup_property_id: None,
                function,
            },
        )
    }

    pub fn created_time(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::CreatedTime)
    }

    pub fn created_by(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::CreatedBy)
    }

    pub fn last_edited_time(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::LastEditedTime)
    }

    pub fn last_edited_by(self, name: impl Into<String>) -> Self {
        self.add(name, PropertySpecKind::LastEditedBy)
    }
}
