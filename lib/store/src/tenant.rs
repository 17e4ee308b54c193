//! Tenant scoping
//!
//! Every engine call goes through a [`CollectionHandle`] obtained from
//! [`VectorStore::with_tenant`], which enforces that a tenant is given
//! exactly when the collection is multi-tenant.

use crate::error::{Result, StoreError};
use crate::store::VectorStore;
use semstore_core::{BatchObject, Error, FailedObject, FilterCondition, Query, QueryObject, SearchEngine};
use tracing::{info, trace};

/// A collection bound to one tenant (or none) for the span of one operation.
///
/// Released when dropped, on every exit path.
pub struct CollectionHandle<'a> {
    engine: &'a dyn SearchEngine,
    collection: &'a str,
    tenant: Option<&'a str>,
}

impl<'a> CollectionHandle<'a> {
    pub fn collection(&self) -> &str {
        self.collection
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant
    }

    pub fn query(&self, query: &Query) -> semstore_core::Result<Vec<QueryObject>> {
        self.engine.query(self.collection, self.tenant, query)
    }

    /// Stamp every object with this scope's tenant and write them
    pub fn batch_write(&self, mut objects: Vec<BatchObject>) -> semstore_core::Result<Vec<FailedObject>> {
        for object in &mut objects {
            object.tenant = self.tenant.map(str::to_string);
        }
        self.engine.batch_write(self.collection, objects)
    }

    pub fn delete_many(&self, filter: &FilterCondition) -> semstore_core::Result<usize> {
        self.engine.delete_many(self.collection, self.tenant, filter)
    }
}

impl Drop for CollectionHandle<'_> {
    fn drop(&mut self) {
        trace!(collection = self.collection, tenant = ?self.tenant, "tenant scope released");
    }
}

impl VectorStore {
    /// Scope the collection to `tenant`.
    ///
    /// Fails with [`StoreError::Configuration`] when a tenant is given to a
    /// single-tenant collection or omitted on a multi-tenant one.
    pub fn with_tenant<'a>(&'a self, tenant: Option<&'a str>) -> Result<CollectionHandle<'a>> {
        self.check_tenant(tenant)?;
        trace!(collection = %self.index_name, tenant = ?tenant, "tenant scope acquired");
        Ok(CollectionHandle {
            engine: self.engine.as_ref(),
            collection: &self.index_name,
            tenant,
        })
    }

    /// The tenant precondition of [`VectorStore::with_tenant`], without
    /// acquiring a scope
    pub(crate) fn check_tenant(&self, tenant: Option<&str>) -> Result<()> {
        match (self.multi_tenancy_enabled, tenant) {
            (false, Some(_)) => Err(StoreError::config(
                "Cannot use tenant context when multi-tenancy is not enabled",
            )),
            (true, None) => Err(StoreError::config(
                "Must use tenant context when multi-tenancy is enabled",
            )),
            _ => Ok(()),
        }
    }

    /// Whether `tenant` exists in the collection.
    ///
    /// # Panics
    ///
    /// When multi-tenancy is not enabled; asking is a caller bug.
    pub fn tenant_exists(&self, tenant: &str) -> Result<bool> {
        assert!(
            self.multi_tenancy_enabled,
            "Cannot check for tenant existence when multi-tenancy is not enabled"
        );
        let tenants = self.engine.list_tenants(&self.index_name)?;
        Ok(tenants.iter().any(|t| t == tenant))
    }

    /// Create `tenant` unless it already exists.
    ///
    /// A concurrent creation of the same name is treated as success.
    pub(crate) fn ensure_tenant(&self, tenant: &str) -> Result<()> {
        if self.tenant_exists(tenant)? {
            return Ok(());
        }

        info!(
            collection = %self.index_name,
            tenant,
            "tenant does not exist, creating it"
        );
        match self.engine.create_tenants(&self.index_name, &[tenant.to_string()]) {
            Ok(()) | Err(Error::TenantExists(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
