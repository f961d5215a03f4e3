use serde::Serialize;

use crate::color::ColorMap;
use crate::data::filter::FilteredView;
use crate::data::model::{Column, PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Scatter options (fixed per process, from config)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    pub title: String,
    pub x: Column,
    pub y: Column,
    /// Upper bound on the marker diameter, in points.
    pub max_marker_size: f32,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            title: "Penguins Plot (Plotly Express)".to_string(),
            x: Column::FlipperLengthMm,
            y: Column::BodyMassG,
            max_marker_size: 8.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter spec – what the plot slot draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub species: Species,
    pub color: [u8; 3],
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_column: Column,
    pub y_column: Column,
    pub x_label: String,
    pub y_label: String,
    pub color_by: Column,
    pub max_marker_size: f32,
    pub series: Vec<ScatterSeries>,
}

impl ScatterSpec {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the scatter spec for a filtered view: one point per row, grouped
/// and coloured by species.
///
/// Rows missing either plotted value are left out of the chart; the view
/// itself is untouched. An empty view gives a chart with no series.
pub fn render_scatter(
    dataset: &PenguinDataset,
    view: &FilteredView,
    options: &ScatterOptions,
    colors: &ColorMap,
) -> ScatterSpec {
    let series = Species::ALL
        .into_iter()
        .filter_map(|species| {
            let points: Vec<[f64; 2]> = view
                .rows(dataset)
                .filter(|p| p.species == species)
                .filter_map(|p| Some([p.numeric(options.x)?, p.numeric(options.y)?]))
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(ScatterSeries {
                name: species.to_string(),
                species,
                color: colors.rgb_for(species),
                points,
            })
        })
        .collect();

    ScatterSpec {
        title: options.title.clone(),
        x_column: options.x,
        y_column: options.y,
        x_label: options.x.label().to_string(),
        y_label: options.y.label().to_string(),
        color_by: Column::Species,
        max_marker_size: options.max_marker_size,
        series,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::filter_by_species;
    use crate::data::model::{Island, Penguin};
    use pretty_assertions::assert_eq;

    fn penguin(species: Species, flipper: Option<f64>, mass: Option<f64>) -> Penguin {
        Penguin {
            species,
            island: Island::Biscoe,
            bill_length_mm: Some(40.0),
            bill_depth_mm: Some(18.0),
            flipper_length_mm: flipper,
            body_mass_g: mass,
            sex: None,
            year: Some(2008),
        }
    }

    fn three_rows() -> PenguinDataset {
        PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, Some(180.0), Some(3700.0)),
            penguin(Species::Gentoo, Some(210.0), Some(5000.0)),
            penguin(Species::Chinstrap, Some(195.0), Some(3800.0)),
        ])
    }

    #[test]
    fn scenario_two_species_two_points() {
        let ds = three_rows();
        let view = filter_by_species(&ds, &BTreeSet::from([Species::Adelie, Species::Gentoo]));
        let spec = render_scatter(&ds, &view, &ScatterOptions::default(), &ColorMap::default());

        assert_eq!(spec.point_count(), 2);
        let names: Vec<_> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Adelie", "Gentoo"]);
        assert_eq!(spec.series[0].points, vec![[180.0, 3700.0]]);
        assert_eq!(spec.series[1].points, vec![[210.0, 5000.0]]);
    }

    #[test]
    fn empty_view_renders_empty_chart() {
        let ds = three_rows();
        let spec = render_scatter(
            &ds,
            &FilteredView::default(),
            &ScatterOptions::default(),
            &ColorMap::default(),
        );
        assert!(spec.is_empty());
        assert!(spec.series.is_empty());
        assert_eq!(spec.x_label, "Flipper Length (mm)");
    }

    #[test]
    fn rows_with_missing_plotted_values_are_omitted() {
        let ds = PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, Some(181.0), Some(3750.0)),
            penguin(Species::Adelie, None, Some(3800.0)),
            penguin(Species::Adelie, Some(190.0), None),
            penguin(Species::Adelie, Some(f64::NAN), Some(3600.0)),
        ]);
        let view = FilteredView::all(&ds);
        let spec = render_scatter(&ds, &view, &ScatterOptions::default(), &ColorMap::default());
        assert_eq!(view.len(), 4);
        assert_eq!(spec.point_count(), 1);
    }

    #[test]
    fn labels_marker_size_and_grouping() {
        let ds = three_rows();
        let options = ScatterOptions {
            max_marker_size: 6.0,
            ..ScatterOptions::default()
        };
        let colors = ColorMap::default();
        let spec = render_scatter(&ds, &FilteredView::all(&ds), &options, &colors);

        assert_eq!(spec.title, "Penguins Plot (Plotly Express)");
        assert_eq!(spec.x_label, "Flipper Length (mm)");
        assert_eq!(spec.y_label, "Body Mass (g)");
        assert_eq!(spec.color_by, Column::Species);
        assert_eq!(spec.max_marker_size, 6.0);
        assert_eq!(spec.series.len(), 3);
        for s in &spec.series {
            assert_eq!(s.color, colors.rgb_for(s.species));
        }
    }

    #[test]
    fn spec_serialises_to_json() {
        let ds = three_rows();
        let spec = render_scatter(
            &ds,
            &FilteredView::all(&ds),
            &ScatterOptions::default(),
            &ColorMap::default(),
        );
        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["x_column"], "flipper_length_mm");
        assert_eq!(json["series"][0]["name"], "Adelie");
        assert_eq!(json["series"][0]["points"][0][1], 3700.0);
    }
}
