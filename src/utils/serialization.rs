use crate::santa::{Assignment, Assignments};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub assignments: Assignments,
    pub gift_labels: Option<Vec<String>>,
    pub seed: Option<u64>,
}

impl DrawRecord {
    pub fn new(
        assignments: Assignments,
        gift_labels: Option<Vec<String>>,
        seed: Option<u64>,
    ) -> Self {
        DrawRecord {
            assignments,
            gift_labels,
            seed,
        }
    }

    pub fn assignment(&self, gifter: &str) -> Option<&Assignment> {
        self.assignments.get(gifter)
    }
}

pub fn save_draw_record<P: AsRef<Path>>(path: P, record: &DrawRecord) -> io::Result<()> {
    let bytes = bincode::serialize(record)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("serialize draw: {err}")))?;
    let mut file = fs::File::create(path)?;
    file.write_all(&bytes)
}

pub fn load_draw_record<P: AsRef<Path>>(path: P) -> io::Result<DrawRecord> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("deserialize draw: {err}")))
}
