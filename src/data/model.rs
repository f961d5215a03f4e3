use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use super::filter::FilteredView;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Categorical domains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    /// The full species domain, in display order.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Chinstrap => "Chinstrap",
            Species::Gentoo => "Gentoo",
        }
    }
}

impl FromStr for Species {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adelie" => Ok(Species::Adelie),
            "chinstrap" => Ok(Species::Chinstrap),
            "gentoo" => Ok(Species::Gentoo),
            _ => Err(DataError::UnknownSpecies(s.to_string())),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Island {
    Biscoe,
    Dream,
    Torgersen,
}

impl Island {
    pub fn as_str(self) -> &'static str {
        match self {
            Island::Biscoe => "Biscoe",
            Island::Dream => "Dream",
            Island::Torgersen => "Torgersen",
        }
    }
}

impl FromStr for Island {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "biscoe" => Ok(Island::Biscoe),
            "dream" => Ok(Island::Dream),
            "torgersen" => Ok(Island::Torgersen),
            _ => Err(DataError::UnknownIsland(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }

    /// Parse a sex cell, mapping the usual missing markers to `None`.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, DataError> {
        if is_missing_marker(s) {
            return Ok(None);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Some(Sex::Female)),
            "male" | "m" => Ok(Some(Sex::Male)),
            _ => Err(DataError::UnknownSex(s.to_string())),
        }
    }
}

/// `true` for the textual markers the source tables use for a missing cell.
pub fn is_missing_marker(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan")
}

// ---------------------------------------------------------------------------
// Column – the fixed schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Species,
    Island,
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
    Sex,
    Year,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLengthMm,
        Column::BillDepthMm,
        Column::FlipperLengthMm,
        Column::BodyMassG,
        Column::Sex,
        Column::Year,
    ];

    /// Columns offered by the attribute selector.
    pub const NUMERIC: [Column; 5] = [
        Column::BillLengthMm,
        Column::BillDepthMm,
        Column::FlipperLengthMm,
        Column::BodyMassG,
        Column::Year,
    ];

    /// Column name as it appears in the source tables.
    pub fn name(self) -> &'static str {
        match self {
            Column::Species => "species",
            Column::Island => "island",
            Column::BillLengthMm => "bill_length_mm",
            Column::BillDepthMm => "bill_depth_mm",
            Column::FlipperLengthMm => "flipper_length_mm",
            Column::BodyMassG => "body_mass_g",
            Column::Sex => "sex",
            Column::Year => "year",
        }
    }

    /// Human-readable axis / header label.
    pub fn label(self) -> &'static str {
        match self {
            Column::Species => "Species",
            Column::Island => "Island",
            Column::BillLengthMm => "Bill Length (mm)",
            Column::BillDepthMm => "Bill Depth (mm)",
            Column::FlipperLengthMm => "Flipper Length (mm)",
            Column::BodyMassG => "Body Mass (g)",
            Column::Sex => "Sex",
            Column::Year => "Year",
        }
    }

    pub fn is_numeric(self) -> bool {
        Column::NUMERIC.contains(&self)
    }
}

impl FromStr for Column {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.name() == s.trim())
            .ok_or_else(|| DataError::UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – one cell, for tabular display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(&'static str),
    Float(f64),
    Integer(i64),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Missing => write!(f, "NA"),
        }
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Penguin {
    pub species: Species,
    pub island: Island,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<Sex>,
    pub year: Option<i64>,
}

impl Penguin {
    /// Numeric value of `column`, or `None` when the cell is missing, NaN,
    /// or the column is categorical.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        let v = match column {
            Column::BillLengthMm => self.bill_length_mm,
            Column::BillDepthMm => self.bill_depth_mm,
            Column::FlipperLengthMm => self.flipper_length_mm,
            Column::BodyMassG => self.body_mass_g,
            Column::Year => self.year.map(|y| y as f64),
            Column::Species | Column::Island | Column::Sex => None,
        };
        v.filter(|v| v.is_finite())
    }

    pub fn cell(&self, column: Column) -> CellValue {
        let float = |v: Option<f64>| match v {
            Some(v) if !v.is_nan() => CellValue::Float(v),
            _ => CellValue::Missing,
        };
        match column {
            Column::Species => CellValue::Text(self.species.as_str()),
            Column::Island => CellValue::Text(self.island.as_str()),
            Column::BillLengthMm => float(self.bill_length_mm),
            Column::BillDepthMm => float(self.bill_depth_mm),
            Column::FlipperLengthMm => float(self.flipper_length_mm),
            Column::BodyMassG => float(self.body_mass_g),
            Column::Sex => self
                .sex
                .map_or(CellValue::Missing, |s| CellValue::Text(s.as_str())),
            Column::Year => self.year.map_or(CellValue::Missing, CellValue::Integer),
        }
    }
}

/// An untyped row as it comes out of a file, before domain validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPenguin {
    pub species: String,
    pub island: String,
    #[serde(default, deserialize_with = "measurement")]
    pub bill_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "measurement")]
    pub bill_depth_mm: Option<f64>,
    #[serde(default, deserialize_with = "measurement")]
    pub flipper_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "measurement")]
    pub body_mass_g: Option<f64>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "year")]
    pub year: Option<i64>,
}

// -- Numeric cells: number, missing marker, or null --

struct MeasurementVisitor;

impl<'de> Visitor<'de> for MeasurementVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a missing marker such as \"NA\", or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| !v.is_nan()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if is_missing_marker(v) {
            return Ok(None);
        }
        v.trim()
            .parse::<f64>()
            .map(|n| Some(n).filter(|n| !n.is_nan()))
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(MeasurementVisitor)
    }
}

/// A measurement cell. Anything other than a number, a missing marker or
/// null is an error naming the offending value.
fn measurement<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_option(MeasurementVisitor)
}

fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(measurement(deserializer)?.map(|y| y as i64))
}

impl TryFrom<RawPenguin> for Penguin {
    type Error = DataError;

    fn try_from(raw: RawPenguin) -> Result<Self, Self::Error> {
        let sex = match raw.sex.as_deref() {
            Some(s) => Sex::parse_optional(s)?,
            None => None,
        };
        let measure = |v: Option<f64>| v.filter(|v| !v.is_nan());
        Ok(Penguin {
            species: raw.species.parse()?,
            island: raw.island.parse()?,
            bill_length_mm: measure(raw.bill_length_mm),
            bill_depth_mm: measure(raw.bill_depth_mm),
            flipper_length_mm: measure(raw.flipper_length_mm),
            body_mass_g: measure(raw.body_mass_g),
            sex,
            year: raw.year,
        })
    }
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full table. Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenguinDataset {
    rows: Vec<Penguin>,
}

impl PenguinDataset {
    pub fn from_rows(rows: Vec<Penguin>) -> Self {
        PenguinDataset { rows }
    }

    pub fn rows(&self) -> &[Penguin] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Penguin> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Species that occur in at least one row.
    pub fn species_present(&self) -> BTreeSet<Species> {
        self.rows.iter().map(|p| p.species).collect()
    }

    /// Materialize a view into a standalone dataset, keeping row order.
    pub fn subset(&self, view: &FilteredView) -> PenguinDataset {
        PenguinDataset::from_rows(view.rows(self).cloned().collect())
    }
}
