use crate::constants::{CARD_PADDING, CARD_ROUNDING, HOVER_LIFT};
use egui::{vec2, CornerRadius, CursorIcon, FontId, Rect, Sense, StrokeKind};
use zigzag::RowItemView;

/// One event on the timeline: date, title and the shortened description.
/// Returns the card's click response.
pub fn card_ui(ui: &mut egui::Ui, rect: Rect, item: &RowItemView<'_>) -> egui::Response {
    let id = ui.id().with(("timeline_card", item.handle));
    let resp = ui
        .interact(rect, id, Sense::click())
        .on_hover_cursor(CursorIcon::PointingHand);

    let visuals = ui.visuals();
    let (fill, stroke) = if resp.hovered() {
        (visuals.widgets.hovered.weak_bg_fill, visuals.selection.stroke)
    } else {
        (
            visuals.widgets.inactive.weak_bg_fill,
            visuals.widgets.noninteractive.bg_stroke,
        )
    };
    let text_color = visuals.text_color();
    let weak_color = visuals.weak_text_color();

    let rect = if resp.hovered() {
        rect.translate(vec2(0.0, -HOVER_LIFT))
    } else {
        rect
    };

    let painter = ui.painter_at(rect);
    painter.rect(
        rect,
        CornerRadius::same(CARD_ROUNDING),
        fill,
        stroke,
        StrokeKind::Inside,
    );

    let inner = rect.shrink(CARD_PADDING);
    let mut pos = inner.left_top();

    let date = painter.layout_no_wrap(item.date.to_owned(), FontId::proportional(12.0), weak_color);
    let date_height = date.size().y;
    painter.galley(pos, date, weak_color);
    pos.y += date_height + 4.0;

    let title = painter.layout(
        item.title.to_owned(),
        FontId::proportional(16.0),
        text_color,
        inner.width(),
    );
    let title_height = title.size().y;
    painter.galley(pos, title, text_color);
    pos.y += title_height + 4.0;

    let summary = painter.layout(
        item.summary.to_string(),
        FontId::proportional(13.0),
        weak_color,
        inner.width(),
    );
    painter.galley(pos, summary, weak_color);

    resp
}
