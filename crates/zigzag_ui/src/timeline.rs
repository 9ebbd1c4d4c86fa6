use crate::card::card_ui;
use crate::constants::{CARD_HEIGHT, CARD_SPACING, TIMELINE_STROKE};
use egui::{pos2, vec2, Rect, Sense, Stroke};
use zigzag::{
    ClickSignal, Connector, ConnectorDirection, RowItemView, RowParity, RowView, TimelineView,
};

/// Draw the zig-zag timeline. Returns the click on an item, if any.
#[profiling::function]
pub fn timeline_ui(
    ui: &mut egui::Ui,
    view: &TimelineView<'_>,
    items_per_row: usize,
) -> Option<ClickSignal> {
    let rows = match view {
        TimelineView::Empty { message } => {
            ui.add_space(32.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(*message).weak());
            });
            return None;
        }
        TimelineView::Rows(rows) => rows,
    };

    let mut clicked = None;
    for row in rows {
        match row {
            RowView::Row { parity, items } => {
                if let Some(signal) = row_ui(ui, *parity, items, items_per_row) {
                    clicked = Some(signal);
                }
            }
            RowView::Connector(connector) => connector_ui(ui, connector, items_per_row),
        }
    }

    clicked
}

fn row_ui(
    ui: &mut egui::Ui,
    parity: RowParity,
    items: &[RowItemView<'_>],
    items_per_row: usize,
) -> Option<ClickSignal> {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, CARD_HEIGHT), Sense::hover());

    let line_y = rect.center().y;
    ui.painter().line_segment(
        [pos2(rect.left(), line_y), pos2(rect.right(), line_y)],
        Stroke::new(TIMELINE_STROKE, ui.visuals().weak_text_color()),
    );

    let mut clicked = None;
    for (item, card_rect) in items
        .iter()
        .zip(card_rects(rect, items_per_row, items.len(), parity))
    {
        if card_ui(ui, card_rect, item).clicked() {
            clicked = Some(ClickSignal::clicked(item.handle));
        }
    }

    clicked
}

fn connector_ui(ui: &mut egui::Ui, connector: &Connector, items_per_row: usize) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, connector.height), Sense::hover());

    let x = connector_x(rect, items_per_row, connector.direction);
    ui.painter().line_segment(
        [pos2(x, rect.top()), pos2(x, rect.bottom())],
        Stroke::new(TIMELINE_STROKE, ui.visuals().weak_text_color()),
    );
}

fn slot_width(row: Rect, items_per_row: usize) -> f32 {
    row.width() / items_per_row.max(1) as f32
}

/// Where each item of a row is drawn, in drawing order. Even rows run right
/// to left, so a short even row hugs the right edge.
fn card_rects(row: Rect, items_per_row: usize, count: usize, parity: RowParity) -> Vec<Rect> {
    let slot = slot_width(row, items_per_row);
    let first_slot = if parity.is_reversed() {
        items_per_row.saturating_sub(count)
    } else {
        0
    };

    (first_slot..first_slot + count)
        .map(|i| {
            let left = row.left() + slot * i as f32;
            Rect::from_min_size(pos2(left, row.top()), vec2(slot, row.height()))
                .shrink(CARD_SPACING / 2.0)
        })
        .collect()
}

/// Connectors hang off the end of the row above: the right end after an odd
/// row, the left end after an even one.
fn connector_x(rect: Rect, items_per_row: usize, direction: ConnectorDirection) -> f32 {
    let half_slot = slot_width(rect, items_per_row) / 2.0;
    match direction {
        ConnectorDirection::OddToEven => rect.right() - half_slot,
        ConnectorDirection::EvenToOdd => rect.left() + half_slot,
    }
}
