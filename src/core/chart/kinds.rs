//! Lookup table of supported chart kinds
//!
//! Adding a chart kind is a new row in [`KINDS`]; the renderer, the `kinds`
//! command and the rendering-capabilities prompt all read from this table.

use std::fmt;

/// Construction strategy shared by a group of kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// x = column 0, y = column 1
    BasicXy,
    /// names = column 0, values = column 1
    PartOfWhole,
    /// x = column 0
    Distribution1d,
    /// x = column 0, y = column 1, binned
    Distribution2d,
    /// Whole table as a numeric matrix
    Matrix,
    /// x, y, z = columns 0..3
    ThreeD,
    /// Every column as a dimension
    ScatterMatrix,
    /// Every numeric column as an axis
    ParallelCoordinates,
    /// Every column as a categorical axis
    ParallelCategories,
    /// `latitude` / `longitude` columns on an open-street-map base layer
    TileMap,
    /// `iso_alpha` locations, color = column 1
    OutlineMap,
    /// theta = column 0, r = column 1
    Polar,
    /// a, b, c = columns 0..3
    Ternary,
    /// Header and cells from every column
    Table,
}

impl Category {
    /// Every category, in catalogue order
    pub const ALL: [Self; 14] = [
        Self::BasicXy,
        Self::PartOfWhole,
        Self::Distribution1d,
        Self::Distribution2d,
        Self::Matrix,
        Self::ThreeD,
        Self::ScatterMatrix,
        Self::ParallelCoordinates,
        Self::ParallelCategories,
        Self::TileMap,
        Self::OutlineMap,
        Self::Polar,
        Self::Ternary,
        Self::Table,
    ];

    /// Group heading used in listings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicXy => "Basics",
            Self::PartOfWhole => "Part-of-Whole",
            Self::Distribution1d => "1D Distributions",
            Self::Distribution2d => "2D Distributions",
            Self::Matrix => "Matrix or Image Input",
            Self::ThreeD => "3-Dimensional",
            Self::ScatterMatrix | Self::ParallelCoordinates | Self::ParallelCategories => {
                "Multidimensional"
            }
            Self::TileMap => "Tile Maps",
            Self::OutlineMap => "Outline Maps",
            Self::Polar => "Polar Charts",
            Self::Ternary => "Ternary Charts",
            Self::Table => "Tables",
        }
    }

    /// Human-readable column requirements
    #[must_use]
    pub const fn columns(self) -> &'static str {
        match self {
            Self::BasicXy | Self::Distribution2d => "x = 1st column, y = 2nd column",
            Self::PartOfWhole => "names = 1st column, numeric values = 2nd column",
            Self::Distribution1d => "x = 1st column",
            Self::Matrix => "all columns numeric (matrix)",
            Self::ThreeD => "x, y, z = first three columns",
            Self::ScatterMatrix | Self::ParallelCategories | Self::Table => "all columns",
            Self::ParallelCoordinates => "all numeric columns",
            Self::TileMap => "numeric 'latitude' and 'longitude' columns",
            Self::OutlineMap => "'iso_alpha' column for locations, color = 2nd column",
            Self::Polar => "theta = 1st column, numeric r = 2nd column",
            Self::Ternary => "numeric a, b, c = first three columns",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-kind adjustments on top of the category's strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// No adjustment
    Plain,
    /// Fill the area under the line
    Area,
    /// Horizontal bars
    Horizontal,
    /// Individual points only, no box
    Strip,
    /// Empirical cumulative distribution computed from the column
    Ecdf,
    /// Markers colored by the first non-coordinate column
    Colored,
}

/// Descriptor of one chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    /// Identifier used in the `type` attribute
    pub name: &'static str,
    /// Construction strategy
    pub category: Category,
    /// Plotly trace type
    pub trace: &'static str,
    /// Plotly scatter mode, for trace types that take one
    pub mode: Option<&'static str>,
    /// Per-kind adjustment
    pub variant: Variant,
}

const fn kind(
    name: &'static str,
    category: Category,
    trace: &'static str,
    mode: Option<&'static str>,
    variant: Variant,
) -> KindSpec {
    KindSpec {
        name,
        category,
        trace,
        mode,
        variant,
    }
}

const MARKERS: Option<&str> = Some("markers");
const LINES: Option<&str> = Some("lines");

/// Every supported chart kind
pub static KINDS: [KindSpec; 38] = [
    kind("scatter", Category::BasicXy, "scatter", MARKERS, Variant::Plain),
    kind("line", Category::BasicXy, "scatter", LINES, Variant::Plain),
    kind("area", Category::BasicXy, "scatter", LINES, Variant::Area),
    kind("bar", Category::BasicXy, "bar", None, Variant::Plain),
    kind("funnel", Category::BasicXy, "funnel", None, Variant::Plain),
    kind("timeline", Category::BasicXy, "bar", None, Variant::Horizontal),
    kind("pie", Category::PartOfWhole, "pie", None, Variant::Plain),
    kind("sunburst", Category::PartOfWhole, "sunburst", None, Variant::Plain),
    kind("treemap", Category::PartOfWhole, "treemap", None, Variant::Plain),
    kind("icicle", Category::PartOfWhole, "icicle", None, Variant::Plain),
    kind("funnel_area", Category::PartOfWhole, "funnelarea", None, Variant::Plain),
    kind("histogram", Category::Distribution1d, "histogram", None, Variant::Plain),
    kind("box", Category::Distribution1d, "box", None, Variant::Plain),
    kind("violin", Category::Distribution1d, "violin", None, Variant::Plain),
    kind("strip", Category::Distribution1d, "box", None, Variant::Strip),
    kind("ecdf", Category::Distribution1d, "scatter", LINES, Variant::Ecdf),
    kind("density_heatmap", Category::Distribution2d, "histogram2d", None, Variant::Plain),
    kind("density_contour", Category::Distribution2d, "histogram2dcontour", None, Variant::Plain),
    kind("imshow", Category::Matrix, "heatmap", None, Variant::Plain),
    kind("scatter_3d", Category::ThreeD, "scatter3d", MARKERS, Variant::Plain),
    kind("line_3d", Category::ThreeD, "scatter3d", LINES, Variant::Plain),
    kind("scatter_matrix", Category::ScatterMatrix, "splom", None, Variant::Plain),
    kind("parallel_coordinates", Category::ParallelCoordinates, "parcoords", None, Variant::Plain),
    kind("parallel_categories", Category::ParallelCategories, "parcats", None, Variant::Plain),
    kind("scatter_mapbox", Category::TileMap, "scattermapbox", MARKERS, Variant::Plain),
    kind("line_mapbox", Category::TileMap, "scattermapbox", LINES, Variant::Plain),
    kind("choropleth_mapbox", Category::TileMap, "scattermapbox", MARKERS, Variant::Colored),
    kind("density_mapbox", Category::TileMap, "densitymapbox", None, Variant::Plain),
    kind("scatter_geo", Category::OutlineMap, "scattergeo", MARKERS, Variant::Plain),
    kind("line_geo", Category::OutlineMap, "scattergeo", LINES, Variant::Plain),
    kind("choropleth", Category::OutlineMap, "choropleth", None, Variant::Plain),
    kind("scatter_polar", Category::Polar, "scatterpolar", MARKERS, Variant::Plain),
    kind("line_polar", Category::Polar, "scatterpolar", LINES, Variant::Plain),
    kind("bar_polar", Category::Polar, "barpolar", None, Variant::Plain),
    kind("scatter_ternary", Category::Ternary, "scatterternary", MARKERS, Variant::Plain),
    kind("line_ternary", Category::Ternary, "scatterternary", LINES, Variant::Plain),
    kind("table", Category::Table, "table", None, Variant::Plain),
    kind("interactive_table", Category::Table, "table", None, Variant::Plain),
];

/// Find the descriptor for a (lower-cased) kind identifier
#[must_use]
pub fn lookup(name: &str) -> Option<&'static KindSpec> {
    KINDS.iter().find(|spec| spec.name == name)
}

/// Kinds grouped under their listing label, in catalogue order
#[must_use]
pub fn grouped() -> Vec<(&'static str, Vec<&'static KindSpec>)> {
    let mut groups: Vec<(&'static str, Vec<&'static KindSpec>)> = Vec::new();
    for spec in &KINDS {
        let label = spec.category.label();
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, kinds)) => kinds.push(spec),
            None => groups.push((label, vec![spec])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = KINDS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), KINDS.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("bar").map(|s| s.trace), Some("bar"));
        assert_eq!(
            lookup("interactive_table").map(|s| s.category),
            Some(Category::Table)
        );
        assert!(lookup("BAR").is_none());
        assert!(lookup("file").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_every_category_has_a_kind() {
        for category in Category::ALL {
            assert!(
                KINDS.iter().any(|spec| spec.category == category),
                "no kind for {category:?}"
            );
        }
    }

    #[test]
    fn test_grouped_merges_multidimensional() {
        let groups = grouped();
        assert_eq!(groups.len(), 12);
        let (label, kinds) = &groups[6];
        assert_eq!(*label, "Multidimensional");
        let names: Vec<_> = kinds.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            ["scatter_matrix", "parallel_coordinates", "parallel_categories"]
        );
    }
}
