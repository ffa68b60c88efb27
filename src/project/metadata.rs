//! Typed view of one metadata source.
//!
//! Parsing the on-disk format is left to the host; a [`MetadataSource`] is
//! what the host hands over once a file has been read.

use crate::base::SourceId;
use crate::tree::{Deprecation, GroupData, PropertyData};
use crate::types::TypeRef;

/// A declared group entry (`server`, `spring.datasource`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub data: GroupData,
}

/// A declared property entry (`server.port`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub data: PropertyData,
}

impl PropertyEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: PropertyData::default(),
        }
    }

    pub fn with_type(mut self, type_ref: impl Into<TypeRef>) -> Self {
        self.data.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.data.description = Some(description.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.data.default_value = Some(value.into());
        self
    }

    pub fn with_deprecation(mut self, deprecation: Deprecation) -> Self {
        self.data.deprecation = Some(deprecation);
        self
    }
}

/// Everything one source declares. Groups are applied before properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataSource {
    id: SourceId,
    groups: Vec<GroupEntry>,
    properties: Vec<PropertyEntry>,
}

impl MetadataSource {
    pub fn new(id: impl Into<SourceId>) -> Self {
        Self {
            id: id.into(),
            groups: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_group(mut self, name: impl Into<String>, data: GroupData) -> Self {
        self.groups.push(GroupEntry {
            name: name.into(),
            data,
        });
        self
    }

    pub fn with_property(mut self, entry: PropertyEntry) -> Self {
        self.properties.push(entry);
        self
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    pub fn groups(&self) -> &[GroupEntry] {
        &self.groups
    }

    pub fn properties(&self) -> &[PropertyEntry] {
        &self.properties
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.groups.len() + self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.properties.is_empty()
    }
}
