use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Field names of a document record as stored in the tenant collection.
pub mod fields {
    pub const ID: &str = "_id";
    pub const DOC_NUM: &str = "YoozDocNum";
    pub const TYPE: &str = "Type";
    pub const STATUS: &str = "Status";
    pub const PAYLOAD: &str = "Payload";
    pub const LAST_UPDATED: &str = "Last_updated";

    /// Fields matched by the free-text search, in dotted path form.
    pub const SEARCHABLE: [&str; 3] = [DOC_NUM, "Payload.CardCode", "Payload.NumAtCard"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    PurchaseInvoices,
    PurchaseCreditNotes,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [Self::PurchaseInvoices, Self::PurchaseCreditNotes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseInvoices => "PurchaseInvoices",
            Self::PurchaseCreditNotes => "PurchaseCreditNotes",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        doc_type.as_str().to_string()
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown document type '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Loaded,
    Failed,
    Open,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [Self::Loaded, Self::Failed, Self::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "LOADED",
            Self::Failed => "FAILED",
            Self::Open => "OPEN",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DocumentStatus> for String {
    fn from(status: DocumentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown document status '{s}'")))
    }
}

/// One business record in a tenant collection.
///
/// Only the payload and the last-updated timestamp are ever written back; the
/// rest is owned by whatever process feeds the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "YoozDocNum")]
    pub doc_num: String,
    /// Free-form category; known values are listed in [`DocumentType`].
    #[serde(rename = "Type")]
    pub doc_type: String,
    #[serde(rename = "Status")]
    pub status: DocumentStatus,
    #[serde(rename = "Payload", default)]
    pub payload: serde_json::Value,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "RefDoc", default, skip_serializing_if = "Option::is_none")]
    pub ref_doc: Option<String>,
    #[serde(rename = "FileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(rename = "PDFContent", default, skip_serializing_if = "Option::is_none")]
    pub pdf_content: Option<String>,
    #[serde(rename = "Last_updated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Documents that passed shape validation plus the number that did not.
#[derive(Debug, Clone, Default)]
pub struct DocumentListing {
    pub documents: Vec<Document>,
    pub dropped: usize,
}

impl DocumentListing {
    /// Validates raw records, dropping any that do not fit the document shape.
    pub fn from_records(records: Vec<serde_json::Value>) -> Self {
        let total = records.len();
        let documents: Vec<Document> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Document>(record) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::debug!(error = %e, "record failed document validation");
                    None
                }
            })
            .collect();

        Self {
            dropped: total - documents.len(),
            documents,
        }
    }
}

/// Listing criteria. Every present criterion must hold; search matches any of
/// the searchable fields. Type and status values are kept verbatim, so an
/// unknown value simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub types: Vec<String>,
    pub statuses: Vec<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.types.push(doc_type.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.statuses.push(status.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_date_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.statuses.is_empty()
            && self.search.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}
