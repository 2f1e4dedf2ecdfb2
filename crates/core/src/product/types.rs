/// A stored product: an identifier and the opaque document saved with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_id: String,
    /// Request body stored verbatim. `None` when the request carried no body.
    pub document: Option<String>,
}

impl ProductRecord {
    /// Creates a record for the given id and document.
    pub fn new(product_id: impl Into<String>, document: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            document,
        }
    }
}

/// Per-invocation request data extracted from the inbound event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The `resourceId` path parameter. Empty when the parameter is missing.
    pub resource_id: String,
    pub body: Option<String>,
    /// Invocation id used to correlate logs and metrics.
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Creates a context for the given resource id.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            body: None,
            request_id: None,
        }
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the invocation id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Builds the record an upsert of this request stores.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord::new(self.resource_id.clone(), self.body.clone())
    }
}
