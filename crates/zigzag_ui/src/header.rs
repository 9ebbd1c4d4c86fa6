use zigzag::TimelineInfo;

pub fn header_ui(ui: &mut egui::Ui, info: &TimelineInfo) {
    ui.vertical_centered(|ui| {
        ui.heading(&info.title);
        ui.label(egui::RichText::new(&info.description).weak());
    });
}
