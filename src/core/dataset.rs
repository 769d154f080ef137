use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::SeriesId;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One series definition used to build a [`SeriesDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub id: SeriesId,
    pub name: String,
    pub color: Color,
    pub values: Vec<f64>,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        values: Vec<f64>,
    ) -> Self {
        Self {
            id: SeriesId::new(id),
            name: name.into(),
            color,
            values,
        }
    }
}

/// Columnar time-series dataset shared by a chart and its preview.
///
/// Timestamps are unix milliseconds and must ascend; every column holds one
/// value per timestamp index. The dataset is immutable after construction —
/// visibility is controlled externally through [`ActiveSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDataset {
    timestamps: Vec<i64>,
    columns: IndexMap<SeriesId, Vec<f64>>,
    names: IndexMap<SeriesId, String>,
    colors: IndexMap<SeriesId, Color>,
}

impl SeriesDataset {
    pub fn new(timestamps: Vec<i64>, series: Vec<SeriesSpec>) -> ChartResult<Self> {
        if timestamps.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ChartError::InvalidData(
                "timestamps must be ascending".to_owned(),
            ));
        }

        let mut columns = IndexMap::new();
        let mut names = IndexMap::new();
        let mut colors = IndexMap::new();

        for spec in series {
            if spec.values.len() != timestamps.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} values for {} timestamps",
                    spec.id,
                    spec.values.len(),
                    timestamps.len()
                )));
            }
            if spec.values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` contains non-finite values",
                    spec.id
                )));
            }
            spec.color.validate()?;
            if columns.insert(spec.id.clone(), spec.values).is_some() {
                return Err(ChartError::InvalidData(format!(
                    "duplicate series id `{}`",
                    spec.id
                )));
            }
            names.insert(spec.id.clone(), spec.name);
            colors.insert(spec.id, spec.color);
        }

        Ok(Self {
            timestamps,
            columns,
            names,
            colors,
        })
    }

    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Series columns in insertion order; this order is the render order.
    #[must_use]
    pub fn columns(&self) -> &IndexMap<SeriesId, Vec<f64>> {
        &self.columns
    }

    #[must_use]
    pub fn series_ids(&self) -> impl Iterator<Item = &SeriesId> {
        self.columns.keys()
    }

    #[must_use]
    pub fn name(&self, id: &SeriesId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn color(&self, id: &SeriesId) -> Option<Color> {
        self.colors.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Order-preserving series-id -> enabled mapping.
///
/// Unknown ids read as inactive, so a stale toggle for a removed series is
/// harmless.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActiveSeries(IndexMap<SeriesId, bool>);

impl ActiveSeries {
    /// Starts with every dataset series enabled.
    #[must_use]
    pub fn all_active(dataset: &SeriesDataset) -> Self {
        Self(
            dataset
                .series_ids()
                .map(|id| (id.clone(), true))
                .collect(),
        )
    }

    pub fn set(&mut self, id: SeriesId, active: bool) {
        self.0.insert(id, active);
    }

    #[must_use]
    pub fn is_active(&self, id: &SeriesId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.0.values().filter(|active| **active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveSeries, SeriesDataset, SeriesSpec};
    use crate::render::Color;

    fn spec(id: &str, values: Vec<f64>) -> SeriesSpec {
        SeriesSpec::new(id, id.to_uppercase(), Color::rgb(0.2, 0.4, 0.6), values)
    }

    #[test]
    fn rejects_ragged_columns() {
        let result = SeriesDataset::new(vec![0, 1, 2], vec![spec("a", vec![1.0, 2.0])]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_descending_timestamps() {
        let result = SeriesDataset::new(vec![2, 1], vec![spec("a", vec![1.0, 2.0])]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_series_reads_inactive() {
        let dataset =
            SeriesDataset::new(vec![0, 1], vec![spec("a", vec![1.0, 2.0])]).expect("valid");
        let active = ActiveSeries::all_active(&dataset);
        assert!(active.is_active(&crate::core::SeriesId::new("a")));
        assert!(!active.is_active(&crate::core::SeriesId::new("zz")));
    }
}
