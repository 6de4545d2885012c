// ── Homepage statistics ──
//
// Statistics have no identity of their own: the board is an ordered array
// addressed by index and saved as a whole.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistic {
    /// Icon key understood by the public site ("home", "users", ...).
    pub icon: String,
    /// Display value, kept as text ("1200", "98%").
    pub value: String,
    pub label: String,
    pub description: String,
}

impl Statistic {
    fn new(icon: &str, value: &str, label: &str, description: &str) -> Self {
        Self {
            icon: icon.into(),
            value: value.into(),
            label: label.into(),
            description: description.into(),
        }
    }

    pub fn get(&self, field: StatisticField) -> &str {
        match field {
            StatisticField::Icon => &self.icon,
            StatisticField::Value => &self.value,
            StatisticField::Label => &self.label,
            StatisticField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: StatisticField, value: impl Into<String>) {
        let slot = match field {
            StatisticField::Icon => &mut self.icon,
            StatisticField::Value => &mut self.value,
            StatisticField::Label => &mut self.label,
            StatisticField::Description => &mut self.description,
        };
        *slot = value.into();
    }
}

/// Editable field of a [`Statistic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatisticField {
    Icon,
    Value,
    Label,
    Description,
}

/// The full, ordered statistics array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsBoard(pub Vec<Statistic>);

impl Default for StatisticsBoard {
    /// The figures shown before the backend has answered.
    fn default() -> Self {
        Self(vec![
            Statistic::new(
                "home",
                "500",
                "Properties Sold",
                "Successfully completed property transactions",
            ),
            Statistic::new(
                "users",
                "1200",
                "Happy Clients",
                "Satisfied customers across all services",
            ),
            Statistic::new(
                "calendar",
                "15",
                "Years Experience",
                "Expertise in real estate market",
            ),
            Statistic::new(
                "star",
                "98",
                "Customer Satisfaction",
                "Based on client feedback and reviews",
            ),
        ])
    }
}

impl StatisticsBoard {
    pub fn entries(&self) -> &[Statistic] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edit one field of the statistic at `index`.
    pub fn set_field(
        &mut self,
        index: usize,
        field: StatisticField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let len = self.0.len();
        let stat = self.0.get_mut(index).ok_or_else(|| CoreError::InvalidInput {
            field: "index".into(),
            reason: format!("{index} is out of range (board has {len} entries)"),
        })?;
        stat.set(field, value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_four_homepage_figures() {
        let board = StatisticsBoard::default();
        let labels: Vec<_> = board.entries().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Properties Sold",
                "Happy Clients",
                "Years Experience",
                "Customer Satisfaction"
            ]
        );
        assert_eq!(board.entries()[1].value, "1200");
    }

    #[test]
    fn set_field_by_index() {
        let mut board = StatisticsBoard::default();
        board.set_field(2, StatisticField::Value, "16").unwrap();
        assert_eq!(board.entries()[2].get(StatisticField::Value), "16");
        assert_eq!(board.entries()[2].label, "Years Experience");
    }

    #[test]
    fn set_field_out_of_range() {
        let mut board = StatisticsBoard::default();
        let err = board.set_field(9, StatisticField::Label, "x").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(board, StatisticsBoard::default());
    }

    #[test]
    fn field_names_parse() {
        assert_eq!(
            "Description".parse::<StatisticField>().unwrap(),
            StatisticField::Description
        );
    }
}
