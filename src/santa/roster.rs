use crate::error::SantaError;
use std::collections::HashMap;

/// Ordered, duplicate-free list of participants; position is the dense index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl Roster {
    pub fn new<I, S>(names: I) -> Result<Self, SantaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Roster {
            names: Vec::new(),
            indices: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(SantaError::EmptyName);
            }
            if roster.indices.contains_key(&name) {
                return Err(SantaError::DuplicateParticipant(name));
            }
            roster.indices.insert(name.clone(), roster.names.len());
            roster.names.push(name);
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn index_of(&self, name: &str) -> Result<usize, SantaError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| SantaError::UnknownParticipant(name.to_string()))
    }
}
