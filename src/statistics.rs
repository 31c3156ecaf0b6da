//! Typed access to the columns of a LUCY statistics file.
//!
//! LUCY reports, per time step, the mean, minimum, maximum and standard
//! deviation of the total anthropogenic heat flux and of its three
//! components (buildings, vehicles, human metabolism).

use chrono::{Duration, NaiveDate, NaiveDateTime};
use ndarray::Array1;
use std::fmt;

use crate::error::{LucyError, Result};
use crate::table::Table;

/// Heat flux component reported in a statistics file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Total anthropogenic heat flux
    Ahf,
    /// Heat released by buildings (Qb)
    Building,
    /// Heat released by traffic (Qv)
    Vehicle,
    /// Human metabolism (Qm)
    Metabolism,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Ahf,
        Component::Building,
        Component::Vehicle,
        Component::Metabolism,
    ];

    /// Column name prefix used by LUCY
    pub fn prefix(&self) -> &'static str {
        match self {
            Component::Ahf => "AHF",
            Component::Building => "Qb",
            Component::Vehicle => "Qv",
            Component::Metabolism => "Qm",
        }
    }

    /// Human readable label for legends and titles
    pub fn label(&self) -> &'static str {
        match self {
            Component::Ahf => "AHF",
            Component::Building => "building",
            Component::Vehicle => "vehicle",
            Component::Metabolism => "metabolism",
        }
    }
}

/// Which statistic of a component a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Mean,
    Min,
    Max,
    Std,
}

impl Statistic {
    fn suffix(&self) -> &'static str {
        match self {
            Statistic::Mean => "Mean",
            Statistic::Min => "Min",
            Statistic::Max => "Max",
            Statistic::Std => "Std",
        }
    }
}

/// One of the sixteen known statistics columns, e.g. `AHFMean` or `QvStd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatColumn {
    pub component: Component,
    pub statistic: Statistic,
}

impl StatColumn {
    pub const fn new(component: Component, statistic: Statistic) -> Self {
        Self {
            component,
            statistic,
        }
    }

    /// Column name as written in the file header
    pub fn name(&self) -> String {
        format!("{}{}", self.component.prefix(), self.statistic.suffix())
    }

    /// Extract this column from a table
    pub fn extract(&self, table: &Table) -> Result<Array1<f64>> {
        Ok(table.column(&self.name())?.to_owned())
    }
}

impl fmt::Display for StatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.component.prefix(), self.statistic.suffix())
    }
}

/// Mean, min, max and standard deviation series of one component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    pub component: Component,
    pub mean: Array1<f64>,
    pub min: Array1<f64>,
    pub max: Array1<f64>,
    pub std: Array1<f64>,
}

impl ComponentStats {
    /// Pull the four statistics columns of `component` out of `table`
    pub fn from_table(table: &Table, component: Component) -> Result<Self> {
        let get = |statistic| StatColumn::new(component, statistic).extract(table);
        Ok(Self {
            component,
            mean: get(Statistic::Mean)?,
            min: get(Statistic::Min)?,
            max: get(Statistic::Max)?,
            std: get(Statistic::Std)?,
        })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `mean - std` and `mean + std` series
    pub fn std_band(&self) -> (Array1<f64>, Array1<f64>) {
        (&self.mean - &self.std, &self.mean + &self.std)
    }
}

/// Statistics of all four components of a file
pub fn all_components(table: &Table) -> Result<Vec<ComponentStats>> {
    Component::ALL
        .iter()
        .map(|&c| ComponentStats::from_table(table, c))
        .collect()
}

/// Hourly time axis starting at midnight of `start`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyAxis {
    start: NaiveDateTime,
}

impl HourlyAxis {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start: start.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// Parse a `YYYY-MM-DD` start date
    pub fn parse(start: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|e| {
            LucyError::InvalidParameter {
                param: "start_date".to_string(),
                message: format!("'{}' is not a YYYY-MM-DD date: {}", start, e),
            }
        })?;
        Ok(Self::new(date))
    }

    /// Timestamp of step `index`
    pub fn at(&self, index: f64) -> NaiveDateTime {
        self.start + Duration::minutes((index * 60.0).round() as i64)
    }

    /// Tick label for step `index`
    pub fn label(&self, index: f64) -> String {
        self.at(index).format("%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stats_table() -> Table {
        let mut header = Vec::new();
        for c in Component::ALL {
            for s in ["Mean", "Min", "Max", "Std"] {
                header.push(format!("{}{}", c.prefix(), s));
            }
        }
        let row1: Vec<String> = (0..16).map(|i| i.to_string()).collect();
        let row2: Vec<String> = (0..16).map(|i| (i * 2).to_string()).collect();
        let text = format!(
            "{}\n{}\n{}\n",
            header.join(" "),
            row1.join(" "),
            row2.join(" ")
        );
        Table::parse(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_column_names() {
        assert_eq!(
            StatColumn::new(Component::Ahf, Statistic::Mean).name(),
            "AHFMean"
        );
        assert_eq!(
            StatColumn::new(Component::Vehicle, Statistic::Std).to_string(),
            "QvStd"
        );
        assert_eq!(
            StatColumn::new(Component::Metabolism, Statistic::Min).name(),
            "QmMin"
        );
    }

    #[test]
    fn test_component_stats_from_table() {
        let table = stats_table();
        let qb = ComponentStats::from_table(&table, Component::Building).unwrap();
        assert_eq!(qb.len(), 2);
        assert_eq!(qb.mean.to_vec(), vec![4.0, 8.0]);
        assert_eq!(qb.std.to_vec(), vec![7.0, 14.0]);

        let (lo, hi) = qb.std_band();
        assert_eq!(lo.to_vec(), vec![-3.0, -6.0]);
        assert_eq!(hi.to_vec(), vec![11.0, 22.0]);
    }

    #[test]
    fn test_all_components() {
        let stats = all_components(&stats_table()).unwrap();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[3].component, Component::Metabolism);
    }

    #[test]
    fn test_missing_component_column() {
        let table = Table::parse(Cursor::new("AHFMean AHFMin AHFMax\n1 0 2\n")).unwrap();
        assert!(matches!(
            ComponentStats::from_table(&table, Component::Ahf),
            Err(LucyError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_hourly_axis() {
        let axis = HourlyAxis::parse("2005-01-01").unwrap();
        assert_eq!(axis.label(0.0), "01-01 00:00");
        assert_eq!(axis.label(25.0), "01-02 01:00");
        assert!(HourlyAxis::parse("01/01/2005").is_err());
    }
}
