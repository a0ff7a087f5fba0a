//! Census income column definitions.

use super::ColumnKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw text of the positive income class, exactly as it appears in the file.
///
/// The census export pads a space after every comma, so the literal keeps its
/// leading space and label cells are compared untrimmed.
pub const POSITIVE_LABEL: &str = " >50K";

/// Number of columns in the raw training file.
pub const COLUMN_COUNT: usize = 15;

/// Number of attribute columns once the label is dropped.
pub const FEATURE_COUNT: usize = 14;

/// The census columns in file order (14 attributes followed by the label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CensusColumn {
    /// Age in years
    Age,

    /// Employer type
    Workclass,

    /// Census sampling weight
    Fnlwgt,

    /// Highest education level attained
    Education,

    /// Education level as an ordinal
    EducationNum,

    /// Marital status
    MaritalStatus,

    /// Occupation category
    Occupation,

    /// Household relationship
    Relationship,

    /// Race
    Race,

    /// Sex
    Sex,

    /// Capital gains in dollars
    CapitalGain,

    /// Capital losses in dollars
    CapitalLoss,

    /// Hours worked per week
    HoursPerWeek,

    /// Country of origin
    NativeCountry,

    /// Income class, the training label
    IncomeLevel,
}

impl CensusColumn {
    /// Returns all columns in file order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Age,
            Self::Workclass,
            Self::Fnlwgt,
            Self::Education,
            Self::EducationNum,
            Self::MaritalStatus,
            Self::Occupation,
            Self::Relationship,
            Self::Race,
            Self::Sex,
            Self::CapitalGain,
            Self::CapitalLoss,
            Self::HoursPerWeek,
            Self::NativeCountry,
            Self::IncomeLevel,
        ]
    }

    /// Returns the column name used in the data frame.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Workclass => "workclass",
            Self::Fnlwgt => "fnlwgt",
            Self::Education => "education",
            Self::EducationNum => "education-num",
            Self::MaritalStatus => "marital-status",
            Self::Occupation => "occupation",
            Self::Relationship => "relationship",
            Self::Race => "race",
            Self::Sex => "sex",
            Self::CapitalGain => "capital-gain",
            Self::CapitalLoss => "capital-loss",
            Self::HoursPerWeek => "hours-per-week",
            Self::NativeCountry => "native-country",
            Self::IncomeLevel => "income-level",
        }
    }

    /// Returns the zero-based position in the raw file.
    pub const fn index(&self) -> usize {
        match self {
            Self::Age => 0,
            Self::Workclass => 1,
            Self::Fnlwgt => 2,
            Self::Education => 3,
            Self::EducationNum => 4,
            Self::MaritalStatus => 5,
            Self::Occupation => 6,
            Self::Relationship => 7,
            Self::Race => 8,
            Self::Sex => 9,
            Self::CapitalGain => 10,
            Self::CapitalLoss => 11,
            Self::HoursPerWeek => 12,
            Self::NativeCountry => 13,
            Self::IncomeLevel => 14,
        }
    }

    /// Returns how the column participates in training.
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Age
            | Self::Fnlwgt
            | Self::EducationNum
            | Self::CapitalGain
            | Self::CapitalLoss
            | Self::HoursPerWeek => ColumnKind::Numeric,
            Self::Workclass
            | Self::Education
            | Self::MaritalStatus
            | Self::Occupation
            | Self::Relationship
            | Self::Race
            | Self::Sex
            | Self::NativeCountry => ColumnKind::Categorical,
            Self::IncomeLevel => ColumnKind::Label,
        }
    }

    /// Parse a column from its data frame name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.name() == name)
    }

    /// Returns the attribute columns (everything except the label), in order.
    pub fn feature_columns() -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|c| c.kind() != ColumnKind::Label)
            .collect()
    }

    /// Returns the categorical attribute columns, in file order.
    pub fn categorical_columns() -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|c| c.kind() == ColumnKind::Categorical)
            .collect()
    }

    /// Returns the numeric attribute columns, in file order.
    pub fn numeric_columns() -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
            .collect()
    }
}

impl fmt::Display for CensusColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
