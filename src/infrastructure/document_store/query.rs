//! Translation of listing criteria and statistics requests into MongoDB
//! filter documents and pipelines.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

use crate::domain::{fields, DocumentFilter, DocumentStatus, DocumentType};

/// Builds the conjunction of every present criterion. An empty filter yields
/// an empty document, which matches everything.
pub fn build_filter(filter: &DocumentFilter) -> Document {
    let mut query = Document::new();

    if !filter.types.is_empty() {
        let types: Vec<&str> = filter.types.iter().map(String::as_str).collect();
        query.insert(fields::TYPE, doc! { "$in": types });
    }

    if !filter.statuses.is_empty() {
        let statuses: Vec<&str> = filter.statuses.iter().map(String::as_str).collect();
        query.insert(fields::STATUS, doc! { "$in": statuses });
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = regex::escape(search);
        let clauses: Vec<Document> = fields::SEARCHABLE
            .iter()
            .map(|field| {
                let mut clause = Document::new();
                clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                clause
            })
            .collect();
        query.insert("$or", clauses);
    }

    let mut range = Document::new();
    if let Some(from) = &filter.date_from {
        range.insert("$gte", from.as_str());
    }
    if let Some(to) = &filter.date_to {
        range.insert("$lte", to.as_str());
    }
    if !range.is_empty() {
        query.insert(fields::LAST_UPDATED, range);
    }

    query
}

pub fn status_filter(status: Option<DocumentStatus>) -> Document {
    let mut filter = Document::new();
    if let Some(status) = status {
        filter.insert(fields::STATUS, status.as_str());
    }
    filter
}

/// Matches on the ObjectId when `id` is one, on the raw string otherwise.
pub fn id_filter(id: &str) -> Document {
    let mut filter = Document::new();
    match ObjectId::parse_str(id) {
        Ok(oid) => filter.insert(fields::ID, oid),
        Err(_) => filter.insert(fields::ID, id),
    };
    filter
}

pub fn payload_update(payload: Bson, updated_at: &str) -> Document {
    let mut set = Document::new();
    set.insert(fields::PAYLOAD, payload);
    set.insert(fields::LAST_UPDATED, updated_at);
    doc! { "$set": set }
}

pub fn status_breakdown_pipeline(doc_type: DocumentType) -> Vec<Document> {
    let mut matched = Document::new();
    matched.insert(fields::TYPE, doc_type.as_str());
    vec![
        doc! { "$match": matched },
        doc! { "$group": { "_id": format!("${}", fields::STATUS), "count": { "$sum": 1 } } },
    ]
}

/// Reads `{_id: <status>, count: <n>}` group results, skipping groups whose
/// key is not a string.
pub fn read_group_counts(groups: Vec<Document>) -> Vec<(String, u64)> {
    groups
        .into_iter()
        .filter_map(|group| {
            let status = group.get_str("_id").ok()?.to_string();
            let count = match group.get("count")? {
                Bson::Int32(n) => u64::try_from(*n).ok()?,
                Bson::Int64(n) => u64::try_from(*n).ok()?,
                Bson::Double(n) => *n as u64,
                _ => return None,
            };
            Some((status, count))
        })
        .collect()
}
