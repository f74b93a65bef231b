use crate::config::LayoutOptions;
use crate::ir::Project;

/// Vertical spacing between consecutive network nodes.
pub(crate) const NETWORK_ROW_SPACING: i64 = 120;
/// Horizontal offset of the network column from the column origin.
pub(crate) const NETWORK_COLUMN_OFFSET: i64 = 20;

/// Canvas geometry derived once per layout call. All values are integer
/// canvas units; they become `f64` only when stamped onto nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GraphDimensions {
    pub service_count: usize,
    pub network_count: usize,
    pub volume_count: usize,
    pub root_x: i64,
    pub root_y: i64,
    pub service_column_height: i64,
    pub network_column_height: i64,
    pub service_column_x: i64,
    pub service_column_start_y: i64,
    pub network_column_x: i64,
    pub network_column_start_y: i64,
    pub unused_volume_start_y: i64,
}

impl GraphDimensions {
    /// Caller-supplied options may be arbitrarily large, so every step
    /// saturates instead of overflowing.
    pub fn compute(project: &Project, options: &LayoutOptions) -> Self {
        let service_count = project.services.len();
        let network_count = project.networks.len();
        let volume_count = project.volumes.len();
        let services = service_count as i64;
        let networks = network_count as i64;

        let origin_x: i64 = 0;
        let root_y = (services.saturating_mul(options.node_height) / 2).saturating_sub(10);

        let service_column_height = services
            .saturating_mul(options.node_height)
            .max(options.node_width);
        let network_column_height = networks
            .saturating_mul(options.node_height)
            .max(options.node_height);

        // The shorter column is centred against the taller one.
        let service_base_y = options.padding;
        let network_column_start_y = if service_column_height >= network_column_height {
            service_base_y.saturating_add(service_column_height.saturating_sub(network_column_height) / 2)
        } else {
            service_base_y.saturating_sub(network_column_height.saturating_sub(service_column_height) / 2)
        };

        Self {
            service_count,
            network_count,
            volume_count,
            root_x: options.root_column_start_x,
            root_y,
            service_column_height,
            network_column_height,
            service_column_x: origin_x.saturating_add(options.column_gap),
            service_column_start_y: service_base_y,
            network_column_x: origin_x.saturating_add(NETWORK_COLUMN_OFFSET),
            network_column_start_y,
            unused_volume_start_y: root_y.saturating_add(options.volume_y_offset),
        }
    }
}
