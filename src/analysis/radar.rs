use std::f64::consts::TAU;

use crate::data::model::{ColumnKey, SurveyTable};

/// Averaged scores laid out as a closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    /// (field label, mean) in column-group order.
    pub points: Vec<(String, f64)>,
    /// `N + 1` angles in radians; the last repeats the first.
    pub angles: Vec<f64>,
    /// `N + 1` values; the last repeats the first.
    pub values: Vec<f64>,
}

impl RadarChart {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest mean, used to size the radial axis.
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0_f64, f64::max)
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the numeric answers in a column, rounded to two decimals.
/// `None` when the column has no numeric answer.
pub fn column_mean(table: &SurveyTable, key: &ColumnKey) -> Option<f64> {
    let (sum, count) = table
        .column(key)
        .filter_map(|c| c.as_f64())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(round2(sum / count as f64))
    }
}

/// Build the radar polygon for the numeric group.
///
/// Columns without a mean are left out; `None` when nothing remains.
pub fn radar_chart(table: &SurveyTable, numeric: &[ColumnKey]) -> Option<RadarChart> {
    let points: Vec<(String, f64)> = numeric
        .iter()
        .filter_map(|key| column_mean(table, key).map(|mean| (key.field.clone(), mean)))
        .collect();
    if points.is_empty() {
        return None;
    }

    let n = points.len();
    let mut angles: Vec<f64> = (0..n).map(|i| TAU * i as f64 / n as f64).collect();
    let mut values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    angles.push(angles[0]);
    values.push(values[0]);

    Some(RadarChart {
        points,
        angles,
        values,
    })
}

/// Chart title shown above the radar.
pub fn radar_title(section: &str) -> String {
    format!("{section} 各面向平均分數雷達圖")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::Cell;

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> SurveyTable {
        SurveyTable::new(
            columns.iter().map(|f| ColumnKey::new("s", *f)).collect(),
            rows,
        )
    }

    fn keys(fields: &[&str]) -> Vec<ColumnKey> {
        fields.iter().map(|f| ColumnKey::new("s", *f)).collect()
    }

    #[test]
    fn mean_ignores_missing_and_rounds() {
        let t = table(
            &["a"],
            vec![
                vec![Cell::Number(1.0)],
                vec![Cell::Missing],
                vec![Cell::Number(2.0)],
                vec![Cell::Number(2.0)],
            ],
        );
        assert_eq!(column_mean(&t, &ColumnKey::new("s", "a")), Some(1.67));
    }

    #[test]
    fn all_missing_mean_is_none_and_omitted_from_radar() {
        let t = table(
            &["a", "b"],
            vec![vec![Cell::Missing, Cell::Number(3.0)]],
        );
        assert_eq!(column_mean(&t, &ColumnKey::new("s", "a")), None);

        let radar = radar_chart(&t, &keys(&["a", "b"])).unwrap();
        assert_eq!(radar.points, vec![("b".to_string(), 3.0)]);

        assert_eq!(radar_chart(&t, &keys(&["a"])), None);
    }

    #[test]
    fn polygon_is_closed() {
        let t = table(
            &["a", "b", "c", "d"],
            vec![vec![
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Number(4.0),
            ]],
        );
        let radar = radar_chart(&t, &keys(&["a", "b", "c", "d"])).unwrap();

        assert_eq!(radar.angles.len(), 5);
        assert_eq!(radar.values.len(), 5);
        assert_eq!(radar.angles[0], 0.0);
        assert_eq!(radar.angles[4], 0.0);
        assert_eq!(radar.values[0], radar.values[4]);
        assert!((radar.angles[1] - TAU / 4.0).abs() < 1e-12);
        assert!((radar.angles[3] - 3.0 * TAU / 4.0).abs() < 1e-12);
        assert_eq!(radar.max_value(), 4.0);
    }

    #[test]
    fn single_axis_is_a_point_at_zero() {
        let t = table(&["a"], vec![vec![Cell::Number(4.5)]]);
        let radar = radar_chart(&t, &keys(&["a"])).unwrap();
        assert_eq!(radar.angles, vec![0.0, 0.0]);
        assert_eq!(radar.values, vec![4.5, 4.5]);
    }

    #[test]
    fn empty_group_has_no_chart() {
        let t = table(&["a"], vec![vec![Cell::Number(1.0)]]);
        assert_eq!(radar_chart(&t, &[]), None);
    }

    #[test]
    fn title_names_the_section() {
        assert_eq!(radar_title("滿意度"), "滿意度 各面向平均分數雷達圖");
    }
}
