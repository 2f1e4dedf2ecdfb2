//! API Gateway proxy event routing.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use aws_lambda_events::http::header::CONTENT_TYPE;
use aws_lambda_events::http::{HeaderMap, HeaderValue, Method};
use lambda_runtime::{Error, LambdaEvent};
use product_manager_core::product::{RequestContext, ResponseEnvelope};

use crate::gateway::ProductRecordGateway;

/// Path parameter holding the product id.
pub const RESOURCE_ID_PARAM: &str = "resourceId";

/// Extracts the per-invocation context from a proxy request.
///
/// A missing `resourceId` becomes an empty id; the gateway does not validate it.
pub fn request_context(
    request: &ApiGatewayProxyRequest,
    request_id: Option<&str>,
) -> RequestContext {
    RequestContext {
        resource_id: request
            .path_parameters
            .get(RESOURCE_ID_PARAM)
            .cloned()
            .unwrap_or_default(),
        body: request.body.clone(),
        request_id: request_id
            .map(str::to_string)
            .or_else(|| request.request_context.request_id.clone()),
    }
}

/// Routes a proxy request to the gateway operation matching its method.
pub async fn handle_request(
    gateway: &ProductRecordGateway,
    request: &ApiGatewayProxyRequest,
    request_id: Option<&str>,
) -> ResponseEnvelope {
    let context = request_context(request, request_id);

    match request.http_method {
        Method::GET => gateway.fetch(&context).await,
        Method::PUT | Method::POST => gateway.upsert(&context).await,
        Method::DELETE => gateway.delete(&context).await,
        ref method => {
            tracing::warn!(method = %method, "Unsupported method");
            ResponseEnvelope::new(405, None)
        }
    }
}

/// Converts an envelope into the proxy response returned to API Gateway.
pub fn to_proxy_response(envelope: ResponseEnvelope) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    if !envelope.is_success() && !envelope.body.is_empty() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    ApiGatewayProxyResponse {
        status_code: i64::from(envelope.status_code),
        headers,
        multi_value_headers: Default::default(),
        body: Some(Body::Text(envelope.body)),
        is_base64_encoded: false,
    }
}

/// Lambda entry point for product requests.
pub async fn function_handler(
    gateway: &ProductRecordGateway,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, context) = event.into_parts();

    tracing::info!(
        method = %request.http_method,
        path = ?request.path,
        request_id = %context.request_id,
        "Processing product request"
    );

    let envelope = handle_request(gateway, &request, Some(&context.request_id)).await;

    tracing::info!(
        status_code = envelope.status_code,
        request_id = %context.request_id,
        "Product request processed"
    );

    Ok(to_proxy_response(envelope))
}
