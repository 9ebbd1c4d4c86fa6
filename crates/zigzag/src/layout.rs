use crate::config::ItemsPerRow;
use crate::event::{EventId, EventStore};
use crate::filter::VisibleSet;
use std::collections::HashMap;

/// Row parity. The first row (index 0) is "odd" and runs left to right,
/// "even" rows run right to left.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RowParity {
    Odd,
    Even,
}

impl RowParity {
    pub fn of_row(index: usize) -> Self {
        if index % 2 == 0 {
            RowParity::Odd
        } else {
            RowParity::Even
        }
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, RowParity::Even)
    }
}

/// Which side a connector hangs from, decided by the row above it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ConnectorDirection {
    /// Leaves an odd row on its right edge
    #[strum(serialize = "connector-odd-to-even")]
    OddToEven,
    /// Leaves an even row on its left edge
    #[strum(serialize = "connector-even-to-odd")]
    EvenToOdd,
}

impl ConnectorDirection {
    pub fn after(parity: RowParity) -> Self {
        match parity {
            RowParity::Odd => ConnectorDirection::OddToEven,
            RowParity::Even => ConnectorDirection::EvenToOdd,
        }
    }
}

/// Opaque handle of a rendered item.
///
/// Handles are only meaningful for the layout generation that produced them,
/// so a click on an item from an older layout never resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    generation: u32,
    slot: u32,
}

impl ItemHandle {
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItem {
    pub handle: ItemHandle,
    pub event_id: EventId,
    /// Position of the event in the store
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub parity: RowParity,
    /// Items in timeline order
    pub items: Vec<RowItem>,
}

impl Row {
    /// Items in the order they are drawn
    pub fn display_items(&self) -> Box<dyn Iterator<Item = &RowItem> + '_> {
        if self.parity.is_reversed() {
            Box::new(self.items.iter().rev())
        } else {
            Box::new(self.items.iter())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub direction: ConnectorDirection,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Row(Row),
    Connector(Connector),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    generation: u32,
    nodes: Vec<LayoutNode>,
    handles: HashMap<ItemHandle, EventId>,
}

impl Layout {
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.nodes.iter().filter_map(|node| match node {
            LayoutNode::Row(row) => Some(row),
            LayoutNode::Connector(_) => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.nodes.iter().filter_map(|node| match node {
            LayoutNode::Connector(c) => Some(c),
            LayoutNode::Row(_) => None,
        })
    }

    /// Which event a rendered item refers to
    pub fn resolve(&self, handle: ItemHandle) -> Option<EventId> {
        self.handles.get(&handle).copied()
    }
}

/// Lay the visible events out into zig-zag rows joined by connectors.
///
/// `generation` stamps every [`ItemHandle`] so that handles from different
/// layouts never collide.
#[profiling::function]
pub fn layout(
    store: &EventStore,
    visible: &VisibleSet,
    items_per_row: ItemsPerRow,
    connector_height: f32,
    generation: u32,
) -> Layout {
    let mut nodes = Vec::new();
    let mut handles = HashMap::with_capacity(visible.len());
    let mut slot = 0u32;

    let chunks = visible.positions().chunks(items_per_row.get());
    let num_rows = chunks.len();

    for (index, chunk) in chunks.enumerate() {
        let parity = RowParity::of_row(index);

        let mut items = Vec::with_capacity(chunk.len());
        for &position in chunk {
            let Some(event) = store.at(position) else {
                continue;
            };

            let handle = ItemHandle { generation, slot };
            slot += 1;
            handles.insert(handle, event.id);
            items.push(RowItem {
                handle,
                event_id: event.id,
                position,
            });
        }

        nodes.push(LayoutNode::Row(Row {
            index,
            parity,
            items,
        }));

        if index + 1 < num_rows {
            nodes.push(LayoutNode::Connector(Connector {
                direction: ConnectorDirection::after(parity),
                height: connector_height,
            }));
        }
    }

    Layout {
        generation,
        nodes,
        handles,
    }
}
