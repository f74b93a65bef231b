use super::types::{Bounds, Node, VIEWPORT_ZOOM, Viewport};

/// Extent of all nodes, each grown by its rendered size, then padded on
/// every side. An empty node set has a zero extent and is not padded.
pub fn compute_bounds(nodes: &[Node], padding: f64) -> Bounds {
    let Some((first, rest)) = nodes.split_first() else {
        return Bounds::default();
    };

    let extent = |node: &Node| {
        (
            node.position.x,
            node.position.y,
            node.position.x + node.width.unwrap_or(0.0),
            node.position.y + node.height.unwrap_or(0.0),
        )
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = extent(first);
    for node in rest {
        let (x0, y0, x1, y1) = extent(node);
        min_x = min_x.min(x0);
        min_y = min_y.min(y0);
        max_x = max_x.max(x1);
        max_y = max_y.max(y1);
    }

    Bounds {
        min_x: min_x - padding,
        min_y: min_y - padding,
        max_x: max_x + padding,
        max_y: max_y + padding,
    }
}

pub fn compute_viewport(bounds: &Bounds) -> Viewport {
    Viewport {
        x: bounds.min_x,
        y: bounds.min_y,
        zoom: VIEWPORT_ZOOM,
    }
}
