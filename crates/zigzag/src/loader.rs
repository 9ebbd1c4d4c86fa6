use crate::event::{Event, EventId, EventStore};
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const ID: &str = "ID";
const NAME: &str = "NAME";
const DESCRIPTION: &str = "EVENT";
const DATE: &str = "DATE";

struct Columns {
    id: usize,
    name: usize,
    description: usize,
    date: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| Error::missing_column(name))
        };

        Ok(Self {
            id: find(ID)?,
            name: find(NAME)?,
            description: find(DESCRIPTION)?,
            date: find(DATE)?,
        })
    }
}

/// Load the timeline csv at `path`
pub fn load_events(path: &Path) -> Result<EventStore> {
    let file = std::fs::File::open(path).map_err(|err| {
        Error::Generic(format!("could not open timeline {}: {err}", path.display()))
    })?;

    let store = read_events(file)?;
    info!("loaded {} events from {}", store.len(), path.display());
    Ok(store)
}

#[profiling::function]
pub fn read_events<R: Read>(reader: R) -> Result<EventStore> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut events = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = i + 2;

        let field = |idx: usize| record.get(idx).unwrap_or("");

        let Some(id) = EventId::parse(field(columns.id)) else {
            warn!("skipping line {line}: bad id '{}'", field(columns.id));
            continue;
        };

        events.push(Event::new(
            id,
            field(columns.name),
            field(columns.description),
            field(columns.date),
        ));
    }

    Ok(EventStore::from_events(events))
}
