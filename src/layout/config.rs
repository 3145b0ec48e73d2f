//! Configuration for the layout engines

use serde::Deserialize;

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Nominal component size (width, height) used to size headers and separators
    pub node_size: (f64, f64),

    /// Horizontal distance between neighbouring flow nodes
    pub flow_node_spacing: f64,

    /// Height of one flow band
    pub flow_band_height: f64,

    /// How far above its band a flow separator sits
    pub separator_offset: f64,

    /// Number of grid columns per metamodel layer
    pub grid_columns: usize,

    /// Horizontal distance between metamodel grid columns
    pub column_spacing: f64,

    /// Vertical distance between metamodel grid rows
    pub row_height: f64,

    /// Space reserved for the layer header at the top of a metamodel band
    pub header_height: f64,

    /// Height of the header node itself
    pub header_node_height: f64,

    /// Gap left below the last grid row of a metamodel band
    pub band_gap: f64,

    /// Floor for the metamodel band height, used by empty or single-row layers
    pub min_band_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_size: (180.0, 60.0),
            flow_node_spacing: 250.0,
            flow_band_height: 200.0,
            separator_offset: 40.0,
            grid_columns: 4,
            column_spacing: 240.0,
            row_height: 110.0,
            header_height: 60.0,
            header_node_height: 40.0,
            band_gap: 40.0,
            min_band_height: 170.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal spacing of flow nodes
    pub fn with_flow_spacing(mut self, spacing: f64) -> Self {
        self.flow_node_spacing = spacing;
        self
    }

    /// Set the metamodel grid shape
    pub fn with_grid(mut self, columns: usize, column_spacing: f64, row_height: f64) -> Self {
        self.grid_columns = columns.max(1);
        self.column_spacing = column_spacing;
        self.row_height = row_height;
        self
    }

    /// Grid columns, never less than one
    pub(crate) fn columns(&self) -> usize {
        self.grid_columns.max(1)
    }
}
