use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered participants; position encodes rotation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Participant>);

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self(participants)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Participant::new).collect())
    }

    /// Trims names and rejects blank or duplicated ones.
    pub fn normalized(&self) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        let mut participants = Vec::with_capacity(self.0.len());
        for p in &self.0 {
            let name = p.name.trim();
            if name.is_empty() {
                return Err(DomainError::EmptyParticipantName);
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::DuplicateParticipant(name.to_string()));
            }
            participants.push(Participant::new(name));
        }
        Ok(Self(participants))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.0.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Participant> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|p| p.name.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
