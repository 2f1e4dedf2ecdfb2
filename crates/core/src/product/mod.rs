mod operation;
mod response;
mod types;

pub use operation::{Operation, SOURCE};
pub use response::{ErrorBody, ResponseEnvelope};
pub use types::{ProductRecord, RequestContext};
