use zigzag::{Density, ItemsPerRow, TimelineConfig, UserInput};

/// Items-per-row and density sliders plus the search box.
///
/// The widgets own their values between frames. Every change is reported as a
/// [`UserInput`] for the driver.
pub struct Controls {
    search: String,
    items_per_row: u8,
    density: u8,
}

impl Controls {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            search: String::new(),
            items_per_row: config.items_per_row.into(),
            density: config.density.into(),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Vec<UserInput> {
        let mut inputs = Vec::new();

        ui.horizontal_wrapped(|ui| {
            let resp = ui.add(
                egui::Slider::new(
                    &mut self.items_per_row,
                    ItemsPerRow::MIN..=ItemsPerRow::MAX,
                )
                .text("Items per row"),
            );
            if resp.changed() {
                inputs.push(UserInput::ItemsPerRow(self.items_per_row));
            }

            ui.add_space(16.0);

            let resp = ui.add(
                egui::Slider::new(&mut self.density, Density::MIN..=Density::MAX)
                    .text("Density")
                    .custom_formatter(|v, _| density_mark(v)),
            );
            if resp.changed() {
                inputs.push(UserInput::Density(self.density));
            }

            ui.add_space(16.0);

            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search events")
                    .desired_width(240.0),
            );
            if resp.changed() {
                inputs.push(UserInput::Search(self.search.clone()));
            }
        });

        inputs
    }
}

/// Slider text: the named marks, the plain level in between
fn density_mark(value: f64) -> String {
    let level = value.round() as u8;
    match Density::new(level).label() {
        Some(label) => label.to_string(),
        None => level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn density_marks() {
        assert_eq!(density_mark(1.0), "Few");
        assert_eq!(density_mark(2.0), "2");
        assert_eq!(density_mark(3.0), "Medium");
        assert_eq!(density_mark(4.0), "4");
        assert_eq!(density_mark(5.0), "All");
    }

    #[test]
    fn starts_from_config() {
        let config = TimelineConfig {
            items_per_row: ItemsPerRow::new(3),
            density: Density::new(2),
            ..Default::default()
        };
        let controls = Controls::new(&config);
        assert_eq!(controls.items_per_row, 3);
        assert_eq!(controls.density, 2);
        assert!(controls.search.is_empty());
    }
}
