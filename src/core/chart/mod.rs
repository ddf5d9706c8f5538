//! Chart construction from directive tables
//!
//! [`build`] dispatches on a [`KindSpec`] from the [`kinds::KINDS`] table and
//! produces a Plotly-compatible [`Figure`].

pub mod figure;
pub mod kinds;

pub use figure::{Figure, Layout, Title};
pub use kinds::{lookup, Category, KindSpec, Variant, KINDS};

use crate::core::table::DataTable;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Default zoom for tile maps centered on the mean position.
const MAPBOX_ZOOM: u8 = 3;

/// Failure to build a chart from otherwise valid data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A positional column is beyond the table width
    #[error("column {index} is required but the data has only {available} column(s)")]
    MissingColumn {
        /// Zero-based column position
        index: usize,
        /// Number of columns present
        available: usize,
    },
    /// A column required by name is absent
    #[error("column '{0}' is required")]
    MissingNamedColumn(String),
    /// A cell that must be numeric is not
    #[error("column '{column}' row {row}: '{value}' is not a number")]
    NotNumeric {
        /// Column name
        column: String,
        /// Zero-based row index
        row: usize,
        /// Offending cell text
        value: String,
    },
    /// Rows carry no columns at all
    #[error("data rows have no columns")]
    NoColumns,
    /// No column is fully numeric
    #[error("no numeric columns to plot")]
    NoNumericColumns,
}

/// Build a figure for one chart kind
///
/// The title is left empty; the renderer applies it afterwards.
///
/// # Errors
/// Returns a [`ChartError`] when the table lacks a required column or holds a
/// non-numeric value where the kind needs a number.
pub fn build(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    if table.columns().is_empty() {
        return Err(ChartError::NoColumns);
    }
    match spec.category {
        Category::BasicXy => basic_xy(spec, table),
        Category::PartOfWhole => part_of_whole(spec, table),
        Category::Distribution1d => distribution_1d(spec, table),
        Category::Distribution2d => distribution_2d(spec, table),
        Category::Matrix => matrix(spec, table),
        Category::ThreeD => three_d(spec, table),
        Category::ScatterMatrix => Ok(Figure::new(
            spec.name,
            vec![trace(spec, [("dimensions", dimensions(table, false)?)])],
        )),
        Category::ParallelCoordinates => parallel_coordinates(spec, table),
        Category::ParallelCategories => Ok(Figure::new(
            spec.name,
            vec![trace(spec, [("dimensions", dimensions(table, true)?)])],
        )),
        Category::TileMap => tile_map(spec, table),
        Category::OutlineMap => outline_map(spec, table),
        Category::Polar => polar(spec, table),
        Category::Ternary => ternary(spec, table),
        Category::Table => Ok(table_figure(spec, table)),
    }
}

/// Trace object with `type`, optional `mode` and the given attributes
fn trace<const N: usize>(spec: &KindSpec, attrs: [(&str, Value); N]) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!(spec.trace));
    if let Some(mode) = spec.mode {
        object.insert("mode".to_string(), json!(mode));
    }
    for (key, value) in attrs {
        object.insert(key.to_string(), value);
    }
    Value::Object(object)
}

fn axis_title(text: &str) -> Value {
    json!({ "title": { "text": text } })
}

fn basic_xy(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let (x_name, y_name) = (table.column_name(0)?, table.column_name(1)?);
    let mut data = trace(
        spec,
        [("x", json!(table.values(0)?)), ("y", json!(table.values(1)?))],
    );
    match spec.variant {
        Variant::Area => data["fill"] = json!("tozeroy"),
        Variant::Horizontal => data["orientation"] = json!("h"),
        _ => {}
    }
    Ok(Figure::new(spec.name, vec![data])
        .with_layout("xaxis", axis_title(x_name))
        .with_layout("yaxis", axis_title(y_name)))
}

fn part_of_whole(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let labels = table.text_column(0)?;
    let values = table.numbers(1)?;
    let mut data = trace(spec, [("labels", json!(labels)), ("values", json!(values))]);
    if matches!(spec.trace, "sunburst" | "treemap" | "icicle") {
        data["parents"] = json!(vec![""; table.len()]);
        data["branchvalues"] = json!("total");
    }
    Ok(Figure::new(spec.name, vec![data]))
}

fn distribution_1d(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let x_name = table.column_name(0)?;
    let figure = match spec.variant {
        Variant::Ecdf => {
            let (x, y) = ecdf(table.numbers(0)?);
            let mut data = trace(spec, [("x", json!(x)), ("y", json!(y))]);
            data["line"] = json!({ "shape": "hv" });
            Figure::new(spec.name, vec![data]).with_layout("yaxis", axis_title("probability"))
        }
        Variant::Strip => {
            let mut data = trace(spec, [("x", json!(table.values(0)?))]);
            data["boxpoints"] = json!("all");
            data["fillcolor"] = json!("rgba(255,255,255,0)");
            data["line"] = json!({ "color": "rgba(255,255,255,0)" });
            data["hoveron"] = json!("points");
            Figure::new(spec.name, vec![data])
        }
        _ => {
            let figure = Figure::new(spec.name, vec![trace(spec, [("x", json!(table.values(0)?))])]);
            if spec.trace == "histogram" {
                figure.with_layout("yaxis", axis_title("count"))
            } else {
                figure
            }
        }
    };
    Ok(figure.with_layout("xaxis", axis_title(x_name)))
}

/// Sorted sample values paired with their cumulative proportion
fn ecdf(mut samples: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
    samples.sort_by(f64::total_cmp);
    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let proportions = (1..=samples.len()).map(|i| i as f64 / n).collect();
    (samples, proportions)
}

fn distribution_2d(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let (x_name, y_name) = (table.column_name(0)?, table.column_name(1)?);
    let data = trace(
        spec,
        [("x", json!(table.values(0)?)), ("y", json!(table.values(1)?))],
    );
    Ok(Figure::new(spec.name, vec![data])
        .with_layout("xaxis", axis_title(x_name))
        .with_layout("yaxis", axis_title(y_name)))
}

fn matrix(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let columns = (0..table.columns().len())
        .map(|index| table.numbers(index))
        .collect::<Result<Vec<_>, _>>()?;
    let z: Vec<Vec<f64>> = (0..table.len())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();
    let data = trace(
        spec,
        [
            ("z", json!(z)),
            ("x", json!(table.columns())),
            ("y", json!((0..table.len()).collect::<Vec<_>>())),
        ],
    );
    Ok(Figure::new(spec.name, vec![data]).with_layout("yaxis", json!({ "autorange": "reversed" })))
}

fn three_d(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let names = [
        table.column_name(0)?,
        table.column_name(1)?,
        table.column_name(2)?,
    ];
    let data = trace(
        spec,
        [
            ("x", json!(table.values(0)?)),
            ("y", json!(table.values(1)?)),
            ("z", json!(table.values(2)?)),
        ],
    );
    Ok(Figure::new(spec.name, vec![data]).with_layout(
        "scene",
        json!({
            "xaxis": axis_title(names[0]),
            "yaxis": axis_title(names[1]),
            "zaxis": axis_title(names[2]),
        }),
    ))
}

/// One `{label, values}` dimension per column
fn dimensions(table: &DataTable, as_text: bool) -> Result<Value, ChartError> {
    let dims = table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let values = if as_text {
                json!(table.text_column(index)?)
            } else {
                json!(table.values(index)?)
            };
            Ok(json!({ "label": label, "values": values }))
        })
        .collect::<Result<Vec<_>, ChartError>>()?;
    Ok(json!(dims))
}

fn parallel_coordinates(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let dims = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(index, _)| table.is_numeric(*index))
        .map(|(index, label)| Ok(json!({ "label": label, "values": table.numbers(index)? })))
        .collect::<Result<Vec<_>, ChartError>>()?;
    if dims.is_empty() {
        return Err(ChartError::NoNumericColumns);
    }
    Ok(Figure::new(
        spec.name,
        vec![trace(spec, [("dimensions", json!(dims))])],
    ))
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn tile_map(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let lat_index = table.position("latitude")?;
    let lon_index = table.position("longitude")?;
    let lat = table.numbers(lat_index)?;
    let lon = table.numbers(lon_index)?;
    let extra = (0..table.columns().len()).find(|i| *i != lat_index && *i != lon_index);

    let mut data = trace(spec, [("lat", json!(lat)), ("lon", json!(lon))]);
    match (spec.trace, spec.variant, extra) {
        ("densitymapbox", _, Some(index)) if table.is_numeric(index) => {
            data["z"] = json!(table.numbers(index)?);
        }
        (_, Variant::Colored, Some(index)) => {
            data["marker"] = json!({ "color": table.values(index)?, "showscale": true });
            data["text"] = json!(table.text_column(index)?);
        }
        (_, _, Some(index)) if spec.trace == "scattermapbox" => {
            data["text"] = json!(table.text_column(index)?);
        }
        _ => {}
    }

    Ok(Figure::new(spec.name, vec![data]).with_layout(
        "mapbox",
        json!({
            "style": "open-street-map",
            "center": { "lat": mean(&lat), "lon": mean(&lon) },
            "zoom": MAPBOX_ZOOM,
        }),
    ))
}

fn outline_map(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let locations = table.text_column(table.position("iso_alpha")?)?;
    let color_name = table.column_name(1)?;
    let mut data = if spec.trace == "choropleth" {
        let mut data = trace(
            spec,
            [
                ("locations", json!(locations)),
                ("z", json!(table.numbers(1)?)),
            ],
        );
        data["colorbar"] = json!({ "title": { "text": color_name } });
        data
    } else {
        trace(
            spec,
            [
                ("locations", json!(locations)),
                ("marker", json!({ "color": table.values(1)? })),
            ],
        )
    };
    data["locationmode"] = json!("ISO-3");
    Ok(Figure::new(spec.name, vec![data]))
}

fn polar(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let data = trace(
        spec,
        [
            ("r", json!(table.numbers(1)?)),
            ("theta", json!(table.values(0)?)),
        ],
    );
    Ok(Figure::new(spec.name, vec![data]))
}

fn ternary(spec: &KindSpec, table: &DataTable) -> Result<Figure, ChartError> {
    let names = [
        table.column_name(0)?,
        table.column_name(1)?,
        table.column_name(2)?,
    ];
    let data = trace(
        spec,
        [
            ("a", json!(table.numbers(0)?)),
            ("b", json!(table.numbers(1)?)),
            ("c", json!(table.numbers(2)?)),
        ],
    );
    Ok(Figure::new(spec.name, vec![data]).with_layout(
        "ternary",
        json!({
            "aaxis": axis_title(names[0]),
            "baxis": axis_title(names[1]),
            "caxis": axis_title(names[2]),
        }),
    ))
}

fn table_figure(spec: &KindSpec, table: &DataTable) -> Figure {
    let cells: Vec<Vec<&str>> = (0..table.columns().len())
        .map(|index| table.rows().iter().map(|row| row[index].as_str()).collect())
        .collect();
    let data = trace(
        spec,
        [
            (
                "header",
                json!({
                    "values": table.columns(),
                    "fill": { "color": "paleturquoise" },
                    "align": "left",
                }),
            ),
            (
                "cells",
                json!({
                    "values": cells,
                    "fill": { "color": "lavender" },
                    "align": "left",
                }),
            ),
        ],
    );
    Figure::new(spec.name, vec![data])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Row;

    fn table(rows: &[&[(&str, &str)]]) -> DataTable {
        let rows: Vec<Row> = rows
            .iter()
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect()
            })
            .collect();
        DataTable::from_rows(&rows)
    }

    fn kind(name: &str) -> &'static KindSpec {
        lookup(name).unwrap()
    }

    #[test]
    fn test_line_uses_first_two_columns() {
        let data = table(&[&[("day", "mon"), ("visits", "3")], &[("day", "tue"), ("visits", "5")]]);
        let figure = build(kind("line"), &data).unwrap();

        assert_eq!(figure.data[0]["type"], "scatter");
        assert_eq!(figure.data[0]["mode"], "lines");
        assert_eq!(figure.data[0]["x"], json!(["mon", "tue"]));
        assert_eq!(figure.data[0]["y"], json!([3.0, 5.0]));
        assert_eq!(figure.layout.extra["xaxis"]["title"]["text"], "day");
    }

    #[test]
    fn test_area_fills_to_zero() {
        let data = table(&[&[("x", "1"), ("y", "2")]]);
        let figure = build(kind("area"), &data).unwrap();
        assert_eq!(figure.data[0]["fill"], "tozeroy");
    }

    #[test]
    fn test_basic_xy_needs_two_columns() {
        let data = table(&[&[("x", "1")]]);
        assert_eq!(
            build(kind("scatter"), &data),
            Err(ChartError::MissingColumn {
                index: 1,
                available: 1
            })
        );
    }

    #[test]
    fn test_treemap_has_root_parents() {
        let data = table(&[&[("n", "a"), ("v", "1")], &[("n", "b"), ("v", "2")]]);
        let figure = build(kind("treemap"), &data).unwrap();
        assert_eq!(figure.data[0]["parents"], json!(["", ""]));
        assert_eq!(figure.data[0]["labels"], json!(["a", "b"]));
    }

    #[test]
    fn test_pie_rejects_text_values() {
        let data = table(&[&[("n", "a"), ("v", "lots")]]);
        assert!(matches!(
            build(kind("pie"), &data),
            Err(ChartError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_ecdf_is_sorted_cumulative() {
        let data = table(&[&[("v", "3")], &[("v", "1")], &[("v", "2")], &[("v", "2")]]);
        let figure = build(kind("ecdf"), &data).unwrap();
        assert_eq!(figure.data[0]["x"], json!([1.0, 2.0, 2.0, 3.0]));
        assert_eq!(figure.data[0]["y"], json!([0.25, 0.5, 0.75, 1.0]));
    }

    #[test]
    fn test_imshow_transposes_columns_into_rows() {
        let data = table(&[&[("a", "1"), ("b", "2")], &[("a", "3"), ("b", "4")]]);
        let figure = build(kind("imshow"), &data).unwrap();
        assert_eq!(figure.data[0]["z"], json!([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(figure.data[0]["x"], json!(["a", "b"]));
    }

    #[test]
    fn test_scatter_3d_needs_three_columns() {
        let data = table(&[&[("x", "1"), ("y", "2")]]);
        assert!(matches!(
            build(kind("scatter_3d"), &data),
            Err(ChartError::MissingColumn { index: 2, .. })
        ));
    }

    #[test]
    fn test_parallel_coordinates_skips_text_columns() {
        let data = table(&[&[("name", "a"), ("w", "1"), ("h", "2")]]);
        let figure = build(kind("parallel_coordinates"), &data).unwrap();
        let dims = figure.data[0]["dimensions"].as_array().unwrap();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0]["label"], "w");

        let text_only = table(&[&[("name", "a")]]);
        assert_eq!(
            build(kind("parallel_coordinates"), &text_only),
            Err(ChartError::NoNumericColumns)
        );
    }

    #[test]
    fn test_tile_map_uses_named_columns_and_osm() {
        let data = table(&[
            &[("city", "A"), ("latitude", "10"), ("longitude", "20")],
            &[("city", "B"), ("latitude", "30"), ("longitude", "40")],
        ]);
        let figure = build(kind("scatter_mapbox"), &data).unwrap();
        assert_eq!(figure.data[0]["lat"], json!([10.0, 30.0]));
        assert_eq!(figure.data[0]["lon"], json!([20.0, 40.0]));
        assert_eq!(figure.layout.extra["mapbox"]["style"], "open-street-map");
        assert_eq!(figure.layout.extra["mapbox"]["center"]["lat"], 20.0);
    }

    #[test]
    fn test_tile_map_without_latitude() {
        let data = table(&[&[("lat", "1"), ("lon", "2")]]);
        assert_eq!(
            build(kind("density_mapbox"), &data),
            Err(ChartError::MissingNamedColumn("latitude".to_string()))
        );
    }

    #[test]
    fn test_choropleth_uses_iso_alpha() {
        let data = table(&[&[("iso_alpha", "FRA"), ("gdp", "2.9")]]);
        let figure = build(kind("choropleth"), &data).unwrap();
        assert_eq!(figure.data[0]["locations"], json!(["FRA"]));
        assert_eq!(figure.data[0]["z"], json!([2.9]));
        assert_eq!(figure.data[0]["locationmode"], "ISO-3");
    }

    #[test]
    fn test_polar_swaps_columns() {
        let data = table(&[&[("direction", "N"), ("speed", "4")]]);
        let figure = build(kind("bar_polar"), &data).unwrap();
        assert_eq!(figure.data[0]["theta"], json!(["N"]));
        assert_eq!(figure.data[0]["r"], json!([4.0]));
    }

    #[test]
    fn test_ternary_needs_numbers() {
        let data = table(&[&[("a", "1"), ("b", "x"), ("c", "3")]]);
        assert!(matches!(
            build(kind("scatter_ternary"), &data),
            Err(ChartError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_table_styling() {
        let data = table(&[&[("a", "1")], &[("b", "2")]]);
        let figure = build(kind("table"), &data).unwrap();
        assert_eq!(figure.data[0]["header"]["values"], json!(["a", "b"]));
        assert_eq!(figure.data[0]["header"]["fill"]["color"], "paleturquoise");
        assert_eq!(figure.data[0]["cells"]["fill"]["color"], "lavender");
        assert_eq!(figure.data[0]["cells"]["values"], json!([["1", ""], ["", "2"]]));
    }

    #[test]
    fn test_rows_without_columns() {
        let data = table(&[&[]]);
        assert_eq!(build(kind("table"), &data), Err(ChartError::NoColumns));
    }

    #[test]
    fn test_every_kind_builds_from_a_generic_table() {
        let data = table(&[
            &[
                ("iso_alpha", "USA"),
                ("latitude", "1"),
                ("longitude", "2"),
                ("v", "3"),
            ],
            &[
                ("iso_alpha", "CAN"),
                ("latitude", "4"),
                ("longitude", "5"),
                ("v", "6"),
            ],
        ]);
        for spec in KINDS.iter().filter(|s| {
            !matches!(
                s.category,
                Category::PartOfWhole | Category::Matrix | Category::Ternary | Category::Polar
            ) && s.name != "ecdf"
                && s.name != "choropleth"
        }) {
            let figure = build(spec, &data).unwrap_or_else(|e| panic!("{}: {e}", spec.name));
            assert_eq!(figure.kind, spec.name);
            assert_eq!(figure.data[0]["type"], spec.trace);
        }
    }
}
