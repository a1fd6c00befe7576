use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use meta_client::{ActivationClient, SystemCredentialSource};
use meta_core::{Annotations, AnnotationValue, AuthKey, Identity, Package, Parameters};
use meta_router::{meta_router, MetaRouterState};
use meta_store::{AuthStore, EntityStore, InMemoryStore};
use tower::ServiceExt;

const MOUNT: &str = "/api/v1/meta";

fn heavymeta() -> Package {
    let mut annotations = Annotations::new();
    annotations.set("meta", AnnotationValue::Bool(true));
    annotations.set("get", AnnotationValue::Str("getApi".into()));
    Package {
        namespace: "whisk.system".into(),
        name: "heavymeta".into(),
        parameters: Parameters::new(),
        annotations,
        publish: false,
    }
}

async fn build_app() -> axum::Router {
    let store = Arc::new(InMemoryStore::new());
    store.put_package(heavymeta()).await;
    store
        .put_action(
            meta_core::Action {
                namespace: "whisk.system".into(),
                name: "getApi".into(),
                parameters: Parameters::new(),
            },
            Some("heavymeta"),
        )
        .await;
    store
        .put_authkey("whisk.system", AuthKey { uuid: "sys-uuid".into(), key: "sys-key".into() })
        .await;
    let caller_key = AuthKey { uuid: "caller-uuid".into(), key: "caller-key".into() };
    store
        .put_identity(caller_key.clone(), Identity::new("guest", "guest", caller_key))
        .await;

    let credential_source = Arc::new(SystemCredentialSource::new("whisk.system", store.clone() as Arc<dyn AuthStore>));
    let activation_client = ActivationClient::new(reqwest::Client::new(), "http://127.0.0.1:1", "v1");

    let state = MetaRouterState {
        entity_store: store.clone(),
        auth_store: store.clone(),
        activation_client,
        credential_source,
        system_namespace: "whisk.system".into(),
        mount_path: MOUNT.into(),
    };
    meta_router(state)
}

fn authorized_request(method: &str, path: &str) -> Request<Body> {
    let basic = base64::engine::general_purpose::STANDARD.encode("caller-uuid:caller-key");
    Request::builder()
        .method(method)
        .uri(format!("{MOUNT}{path}"))
        .header("authorization", format!("Basic {basic}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn bare_root_is_not_found() {
    let app = build_app().await;
    let req = authorized_request("GET", "");
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unmapped_verb_is_method_not_allowed() {
    let app = build_app().await;
    let req = authorized_request("DELETE", "/heavymeta");
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn unknown_package_is_method_not_allowed() {
    let app = build_app().await;
    let req = authorized_request("GET", "/notapackage");
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn non_object_body_is_unsupported_media_type() {
    let app = build_app().await;
    let basic = base64::engine::general_purpose::STANDARD.encode("caller-uuid:caller-key");
    let req = Request::builder()
        .method("GET")
        .uri(format!("{MOUNT}/heavymeta"))
        .header("authorization", format!("Basic {basic}"))
        .header("content-type", "application/json")
        .body(Body::from("1,2,3"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn missing_auth_header_is_unauthorized() {
    let app = build_app().await;
    let req = Request::builder()
        .method("GET")
        .uri(format!("{MOUNT}/heavymeta"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
