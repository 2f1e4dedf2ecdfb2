use std::fmt;

/// Source tag attached to every log entry and metric event.
pub const SOURCE: &str = "ProductManager";

/// The operations the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Operation {
    /// Metric name for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetProduct => "GetProduct",
            Operation::UpdateProduct => "UpdateProduct",
            Operation::DeleteProduct => "DeleteProduct",
        }
    }

    /// Message logged before the storage call.
    pub fn log_message(&self) -> &'static str {
        match self {
            Operation::GetProduct => "GetProduct() called.",
            Operation::UpdateProduct => "UpdateProduct() called.",
            Operation::DeleteProduct => "DeleteProduct() called.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
