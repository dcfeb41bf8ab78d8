use axum::RequestExt;
use axum::extract::{Extension, RawPathParams, Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;
use dealerdesk_application::GateRequest;
use dealerdesk_core::AppError;
use dealerdesk_domain::{PermissionAction, ResourceType};

use crate::error::ApiResult;
use crate::state::AppState;

const TARGET_USER_PARAM: &str = "user_id";

/// Runs the full request gate for the resource attached to the route group.
///
/// On success the handler finds the `AccessContext` in request extensions.
pub async fn require_gate(
    State(state): State<AppState>,
    Extension(resource): Extension<ResourceType>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let action = action_for(request.method());
    let tenant_param = state.tenant_kind.path_param();

    let (target_user_id, target_tenant_id) = match request.extract_parts::<RawPathParams>().await
    {
        Ok(params) => (
            path_param(&params, TARGET_USER_PARAM),
            path_param(&params, tenant_param),
        ),
        Err(_) => (None, None),
    };

    let authorization = authorization_header(&request);
    let outcome = state
        .access_gate_service
        .authorize(GateRequest {
            authorization: authorization.as_deref(),
            target_user_id: target_user_id.as_deref(),
            target_tenant_id: target_tenant_id.as_deref(),
            resource,
            action,
        })
        .await;

    match outcome {
        Ok(context) => {
            request.extensions_mut().insert(context);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::warn!(
                resource = resource.as_str(),
                action = action.as_str(),
                path = %request.uri().path(),
                %error,
                "request rejected by gate"
            );
            Err(AppError::from(error).into())
        }
    }
}

/// Reduced gate for identity endpoints: valid credential and active account.
pub async fn require_authenticated(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let authorization = authorization_header(&request);
    let outcome = state
        .access_gate_service
        .authenticate(authorization.as_deref())
        .await;

    match outcome {
        Ok((principal, _)) => {
            request.extensions_mut().insert(principal);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::warn!(path = %request.uri().path(), %error, "request rejected by gate");
            Err(AppError::from(error).into())
        }
    }
}

fn authorization_header(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn action_for(method: &Method) -> PermissionAction {
    match *method {
        Method::POST => PermissionAction::Create,
        Method::PUT | Method::PATCH => PermissionAction::Update,
        Method::DELETE => PermissionAction::Delete,
        _ => PermissionAction::Read,
    }
}

fn path_param(params: &RawPathParams, name: &str) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use dealerdesk_domain::PermissionAction;

    use super::action_for;

    #[test]
    fn http_method_selects_the_grant_flag() {
        assert_eq!(action_for(&Method::GET), PermissionAction::Read);
        assert_eq!(action_for(&Method::POST), PermissionAction::Create);
        assert_eq!(action_for(&Method::PUT), PermissionAction::Update);
        assert_eq!(action_for(&Method::PATCH), PermissionAction::Update);
        assert_eq!(action_for(&Method::DELETE), PermissionAction::Delete);
    }
}
