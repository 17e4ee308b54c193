use crate::bm25::Bm25Index;
use crate::fusion::relative_score_fusion;
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use semstore_core::{
    cosine_similarity, BatchObject, CollectionSchema, Error, FailedObject, FilterCondition,
    Metadata, ObjectMetadata, Query, QueryKind, QueryObject, Result, Vector,
};
use serde_json::Value;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Partition key of a single-tenant collection
const DEFAULT_PARTITION: &str = "";

/// An object as the engine stores it
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub id: String,
    pub properties: Metadata,
    pub vector: Option<Vector>,
}

impl StoredObject {
    /// All string properties joined, as seen by keyword scoring
    fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for value in self.properties.values() {
            match value {
                Value::String(s) => parts.push(s),
                Value::Array(items) => parts.extend(items.iter().filter_map(Value::as_str)),
                _ => {}
            }
        }
        parts.join(" ")
    }
}

#[derive(Debug, Default)]
struct Partition {
    objects: AHashMap<String, StoredObject>,
    bm25: Bm25Index,
}

impl Partition {
    fn upsert(&mut self, object: StoredObject) {
        self.bm25.insert_doc(&object.id, &object.searchable_text());
        self.objects.insert(object.id.clone(), object);
    }

    fn remove(&mut self, id: &str) -> bool {
        self.bm25.delete_doc(id);
        self.objects.remove(id).is_some()
    }
}

/// A named collection, optionally split into tenants
pub struct Collection {
    schema: CollectionSchema,
    partitions: RwLock<AHashMap<String, Partition>>,
    vector_dim: RwLock<Option<usize>>,
}

impl Collection {
    pub fn new(schema: CollectionSchema) -> Self {
        let mut partitions = AHashMap::new();
        if !schema.multi_tenancy {
            partitions.insert(DEFAULT_PARTITION.to_string(), Partition::default());
        }
        Self {
            schema,
            partitions: RwLock::new(partitions),
            vector_dim: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Number of objects, across all tenants
    pub fn count(&self) -> usize {
        self.partitions.read().values().map(|p| p.objects.len()).sum()
    }

    pub fn tenants(&self) -> Result<Vec<String>> {
        self.require_multi_tenancy()?;
        let mut names: Vec<String> = self.partitions.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn create_tenants(&self, tenants: &[String]) -> Result<()> {
        self.require_multi_tenancy()?;
        let mut partitions = self.partitions.write();
        if let Some(existing) = tenants.iter().find(|t| partitions.contains_key(t.as_str())) {
            return Err(Error::TenantExists(existing.clone()));
        }
        for tenant in tenants {
            partitions.insert(tenant.clone(), Partition::default());
        }
        Ok(())
    }

    /// Write objects one by one, collecting rejections
    pub fn batch_write(&self, objects: Vec<BatchObject>) -> Vec<FailedObject> {
        let mut failed = Vec::new();
        let mut partitions = self.partitions.write();

        for object in objects {
            let result = self
                .partition_key(object.tenant.as_deref())
                .and_then(|key| {
                    let partition = partitions
                        .get_mut(key)
                        .ok_or_else(|| Error::TenantNotFound(key.to_string()))?;
                    let stored = self.validate(object.clone())?;
                    partition.upsert(stored);
                    Ok(())
                });

            if let Err(e) = result {
                failed.push(FailedObject {
                    original_id: object.id,
                    message: e.to_string(),
                });
            }
        }

        failed
    }

    pub fn get(&self, tenant: Option<&str>, id: &str) -> Result<Option<StoredObject>> {
        let key = self.partition_key(tenant)?;
        let partitions = self.partitions.read();
        let partition = partitions
            .get(key)
            .ok_or_else(|| Error::TenantNotFound(key.to_string()))?;
        Ok(partition.objects.get(id).cloned())
    }

    pub fn delete_many(&self, tenant: Option<&str>, filter: &FilterCondition) -> Result<usize> {
        let key = self.partition_key(tenant)?;
        let mut partitions = self.partitions.write();
        let partition = partitions
            .get_mut(key)
            .ok_or_else(|| Error::TenantNotFound(key.to_string()))?;

        let doomed: Vec<String> = partition
            .objects
            .values()
            .filter(|o| filter.matches(&o.id, &o.properties))
            .map(|o| o.id.clone())
            .collect();

        Ok(doomed.iter().filter(|id| partition.remove(id)).count())
    }

    /// Run a query whose text, for near-text, was already vectorized
    pub fn query(
        &self,
        tenant: Option<&str>,
        query: &Query,
        near_text_vector: Option<&[f32]>,
    ) -> Result<Vec<QueryObject>> {
        let key = self.partition_key(tenant)?;
        let partitions = self.partitions.read();
        let partition = partitions
            .get(key)
            .ok_or_else(|| Error::TenantNotFound(key.to_string()))?;

        let visible = |o: &&StoredObject| {
            query
                .filter
                .as_ref()
                .map_or(true, |f| f.matches(&o.id, &o.properties))
        };

        let mut hits: Vec<(&StoredObject, ObjectMetadata)> = match &query.kind {
            QueryKind::NearVector { vector } => {
                self.check_dim(vector.len())?;
                vector_hits(partition, vector, &visible)
            }
            QueryKind::NearText { .. } => {
                let vector = near_text_vector
                    .ok_or_else(|| Error::Query("near_text requires a vectorizer".to_string()))?;
                self.check_dim(vector.len())?;
                vector_hits(partition, vector, &visible)
            }
            QueryKind::Hybrid { query: text, vector, alpha } => {
                if let Some(v) = vector {
                    self.check_dim(v.len())?;
                }
                let keyword: Vec<(&str, f32)> = partition
                    .bm25
                    .score_all(text)
                    .into_iter()
                    .filter_map(|(id, score)| {
                        partition.objects.get_key_value(&id).map(|(k, _)| (k.as_str(), score))
                    })
                    .collect();
                let semantic: Vec<(&str, f32)> = match vector {
                    Some(v) => partition
                        .objects
                        .values()
                        .filter_map(|o| {
                            o.vector
                                .as_ref()
                                .map(|stored| (o.id.as_str(), cosine_similarity(v, stored.as_slice())))
                        })
                        .collect(),
                    None => Vec::new(),
                };
                let alpha = if vector.is_some() { *alpha } else { 0.0 };

                relative_score_fusion(&keyword, &semantic, alpha)
                    .into_iter()
                    .filter_map(|hit| {
                        let object = partition.objects.get(hit.id)?;
                        visible(&object).then(|| {
                            let metadata = ObjectMetadata {
                                score: Some(hit.score),
                                explain_score: Some(hit.explain),
                                ..ObjectMetadata::default()
                            };
                            (object, metadata)
                        })
                    })
                    .collect()
            }
        };

        hits.sort_by(|(a, ma), (b, mb)| {
            OrderedFloat(mb.score.unwrap_or(f32::MIN))
                .cmp(&OrderedFloat(ma.score.unwrap_or(f32::MIN)))
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(query.limit);

        Ok(hits
            .into_iter()
            .map(|(object, metadata)| QueryObject {
                id: object.id.clone(),
                properties: project(&object.properties, query.return_properties.as_deref()),
                metadata,
                vector: if query.include_vector {
                    object.vector.as_ref().map(|v| v.as_slice().to_vec())
                } else {
                    None
                },
            })
            .collect())
    }

    fn require_multi_tenancy(&self) -> Result<()> {
        if self.schema.multi_tenancy {
            Ok(())
        } else {
            Err(Error::MultiTenancy(format!(
                "collection {} does not have multi-tenancy enabled",
                self.schema.name
            )))
        }
    }

    fn partition_key<'a>(&self, tenant: Option<&'a str>) -> Result<&'a str> {
        match (self.schema.multi_tenancy, tenant) {
            (true, Some(t)) => Ok(t),
            (false, None) => Ok(DEFAULT_PARTITION),
            (true, None) => Err(Error::MultiTenancy(format!(
                "collection {} requires a tenant",
                self.schema.name
            ))),
            (false, Some(t)) => Err(Error::MultiTenancy(format!(
                "collection {} is not multi-tenant, got tenant {}",
                self.schema.name, t
            ))),
        }
    }

    fn validate(&self, object: BatchObject) -> Result<StoredObject> {
        Uuid::parse_str(&object.id).map_err(|_| Error::InvalidId(object.id.clone()))?;

        let vector = match object.vector {
            Some(v) => {
                let mut dim = self.vector_dim.write();
                match *dim {
                    Some(expected) if expected != v.len() => {
                        return Err(Error::InvalidDimension { expected, actual: v.len() });
                    }
                    Some(_) => {}
                    None => *dim = Some(v.len()),
                }
                Some(Vector::new(v))
            }
            None => None,
        };

        Ok(StoredObject {
            id: object.id,
            properties: object.properties,
            vector,
        })
    }

    fn check_dim(&self, actual: usize) -> Result<()> {
        match *self.vector_dim.read() {
            Some(expected) if expected != actual => Err(Error::Query(
                Error::InvalidDimension { expected, actual }.to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn vector_hits<'a>(
    partition: &'a Partition,
    query: &[f32],
    visible: &dyn Fn(&&'a StoredObject) -> bool,
) -> Vec<(&'a StoredObject, ObjectMetadata)> {
    partition
        .objects
        .values()
        .filter(|o| visible(o))
        .filter_map(|o| {
            let stored = o.vector.as_ref()?;
            let cos = cosine_similarity(query, stored.as_slice());
            let metadata = ObjectMetadata {
                score: Some(cos),
                distance: Some(1.0 - cos),
                certainty: Some((1.0 + cos) / 2.0),
                ..ObjectMetadata::default()
            };
            Some((o, metadata))
        })
        .collect()
}

fn project(properties: &Metadata, keep: Option<&[String]>) -> Metadata {
    match keep {
        None => properties.clone(),
        Some(keys) => {
            let keys: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
            properties
                .iter()
                .filter(|(k, _)| keys.contains(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        }
    }
}
