use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;
use zigzag::{
    load_events, Args, ClickSignal, FolderImageResolver, ItemHandle, NavDirection, RowView,
    SelectionPhase, TimelineDriver, TimelineInfo, TimelineView, UserInput,
};

const TIMELINE: &str = "\
ID,NAME,EVENT,DATE
1,Founding,The town is founded on the river,1820
2,Railway,The railway reaches town,1871-05
3,Flood,A great flood,1903-04-12
4,Bridge,The new bridge opens,1931
5,Library,The public library opens its doors,1958-09
6,Festival,First summer festival,1972
7,Museum,Town museum opens,1999-10-01
";

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 120, 200, 255]));
    img.save(path).unwrap();
}

fn setup(dir: &Path) {
    std::fs::write(dir.join("timeline.csv"), TIMELINE).unwrap();
    std::fs::write(dir.join("title.txt"), "Our Town").unwrap();

    let bridge = dir.join("images").join("4");
    std::fs::create_dir_all(&bridge).unwrap();
    write_png(&bridge.join("01.png"), 8, 4);
    write_png(&bridge.join("02.png"), 4, 8);
}

fn handle_of(driver: &TimelineDriver, title: &str) -> ItemHandle {
    let TimelineView::Rows(rows) = driver.timeline_view() else {
        panic!("expected rows");
    };

    rows.iter()
        .find_map(|row| match row {
            RowView::Row { items, .. } => items.iter().find(|i| i.title == title),
            RowView::Connector(_) => None,
        })
        .map(|item| item.handle)
        .unwrap_or_else(|| panic!("{title} is not visible"))
}

fn row_titles(driver: &TimelineDriver) -> Vec<Vec<String>> {
    let TimelineView::Rows(rows) = driver.timeline_view() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| match row {
            RowView::Row { items, .. } => {
                Some(items.iter().map(|i| i.title.to_string()).collect())
            }
            RowView::Connector(_) => None,
        })
        .collect()
}

#[test]
fn full_session() {
    let dir = tempfile::TempDir::new().unwrap();
    setup(dir.path());

    let root = dir.path().to_string_lossy().to_string();
    let argv: Vec<String> = vec![
        "--csv".to_string(),
        format!("{root}/timeline.csv"),
        "--images".to_string(),
        format!("{root}/images"),
        "--title".to_string(),
        format!("{root}/title.txt"),
        "--description".to_string(),
        format!("{root}/description.txt"),
        "--items-per-row".to_string(),
        "3".to_string(),
    ];
    let (args, unknown) = Args::parse(&argv);
    assert!(unknown.is_empty());
    let config = args.config().unwrap();

    let info = TimelineInfo::load(&config.title_path, &config.description_path);
    assert_eq!(info.title, "Our Town");
    assert_eq!(info.description, "description");

    let store = Arc::new(load_events(&config.csv_path).unwrap());
    let resolver = Arc::new(FolderImageResolver::new(&config.images_dir));
    let mut driver = TimelineDriver::start(store, resolver, &config);

    // odd rows left to right, even rows right to left
    assert_eq!(
        row_titles(&driver),
        vec![
            vec!["Founding", "Railway", "Flood"],
            vec!["Festival", "Library", "Bridge"],
            vec!["Museum"],
        ]
    );

    driver.handle(UserInput::Search("OPEN".to_string()));
    assert_eq!(
        row_titles(&driver),
        vec![vec!["Bridge", "Library", "Museum"]]
    );

    driver.handle(UserInput::Search(String::new()));
    driver.handle(UserInput::Density(1));
    assert_eq!(
        row_titles(&driver),
        vec![vec!["Founding", "Festival", "Museum"]]
    );
    driver.handle(UserInput::Density(5));

    // bridge has two images
    let bridge = handle_of(&driver, "Bridge");
    driver.handle(UserInput::ItemClicked(ClickSignal::clicked(bridge)));
    driver.settle();

    let modal = driver.modal_view().unwrap();
    assert_eq!(modal.title, "Bridge");
    assert_eq!(modal.date_label, "Date: 1931");
    assert_eq!(modal.counter.as_deref(), Some("Image 1 of 2"));
    let first = image::load_from_memory(modal.image.unwrap().bytes()).unwrap();
    assert_eq!((first.width(), first.height()), (8, 4));

    driver.handle(UserInput::Nav(NavDirection::Next));
    driver.handle(UserInput::Nav(NavDirection::Next));
    assert_eq!(
        driver.modal_view().unwrap().counter.as_deref(),
        Some("Image 1 of 2")
    );

    driver.handle(UserInput::Close);
    assert!(driver.modal_view().is_none());

    // events without a folder still open, just without images
    let flood = handle_of(&driver, "Flood");
    driver.handle(UserInput::ItemClicked(ClickSignal::clicked(flood)));
    driver.settle();
    assert_eq!(
        driver.state().selection.phase(),
        SelectionPhase::Open(zigzag::EventId::new(3))
    );
    let modal = driver.modal_view().unwrap();
    assert!(modal.image.is_none());
    assert!(!modal.show_nav);
    assert_eq!(
        modal.empty_message,
        Some("No images available for this event.")
    );
}

#[test]
fn search_without_matches_shows_message() {
    let dir = tempfile::TempDir::new().unwrap();
    setup(dir.path());

    let config = zigzag::TimelineConfig {
        csv_path: dir.path().join("timeline.csv"),
        ..Default::default()
    };
    let store = Arc::new(load_events(&config.csv_path).unwrap());
    let mut driver = TimelineDriver::start(store, Arc::new(zigzag::NoImages), &config);

    driver.handle(UserInput::Search("spaceport".to_string()));
    assert_eq!(
        driver.timeline_view(),
        TimelineView::Empty {
            message: "No events match your search criteria."
        }
    );
}
