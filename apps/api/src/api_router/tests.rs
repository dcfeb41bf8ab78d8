use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use dealerdesk_application::{
    CredentialCodec, PermissionGrantRepository, TenantRecord, TenantRepository, UserRecord,
    UserRepository,
};
use dealerdesk_core::{Principal, TenantId, UserId};
use dealerdesk_domain::{
    EmailAddress, PermissionGrant, ResourceType, TaxId, TenantKind, TenantScopePolicy, UserGroup,
};
use dealerdesk_infrastructure::{InMemoryBackOfficeRepository, JwtCredentialCodec};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api_config::{ApiConfig, DatabasePoolSettings};
use crate::api_services::{RepositorySet, build_app_state};

use super::build_router;

const SECRET: &str = "router-tests-signing-secret-0123456789";
const BOOTSTRAP_TOKEN: &str = "install-once";

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_number() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

fn config(tenant_kind: TenantKind) -> ApiConfig {
    ApiConfig {
        migrate_only: false,
        database_url: "postgres://unused".to_owned(),
        database_pool: DatabasePoolSettings::default(),
        api_host: "127.0.0.1".to_owned(),
        api_port: 0,
        jwt_secret: SECRET.to_owned(),
        token_ttl_minutes: 60,
        tenant_kind,
        scope_policy: TenantScopePolicy::AllowUnscoped,
        cors_allowed_origin: None,
        bootstrap_token: Some(BOOTSTRAP_TOKEN.to_owned()),
    }
}

struct Harness {
    store: Arc<InMemoryBackOfficeRepository>,
    router: Router,
    kind: TenantKind,
}

impl Harness {
    fn new(kind: TenantKind) -> Self {
        Self::configured(config(kind))
    }

    fn configured(config: ApiConfig) -> Self {
        let kind = config.tenant_kind;
        let store = Arc::new(InMemoryBackOfficeRepository::new());
        let app_state = build_app_state(RepositorySet::in_memory(&store), &config)
            .unwrap_or_else(|error| panic!("state build failed: {error}"));
        let router = build_router(app_state, None)
            .unwrap_or_else(|error| panic!("router build failed: {error}"));

        Self {
            store,
            router,
            kind,
        }
    }

    async fn tenant(&self) -> TenantId {
        let now = Utc::now();
        let tenant = TenantRecord {
            id: TenantId::new(),
            kind: self.kind,
            name: "Veículos Sul Ltda".to_owned(),
            trade_name: "Veículos Sul".to_owned(),
            address: "Rua XV, 10".to_owned(),
            phone: None,
            email: None,
            tax_id: TaxId::new(format!("{:014}", next_number()))
                .unwrap_or_else(|error| panic!("cnpj rejected: {error}")),
            image_path: None,
            created_at: now,
            updated_at: now,
        };
        let tenant_id = tenant.id;
        TenantRepository::create(self.store.as_ref(), tenant)
            .await
            .unwrap_or_else(|error| panic!("tenant create failed: {error}"));

        tenant_id
    }

    async fn user(&self, tenant_id: TenantId, group: UserGroup, active: bool) -> UserId {
        let now = Utc::now();
        let number = next_number();
        let user = UserRecord {
            id: UserId::new(),
            tenant_id,
            name: format!("Vendedor {number}"),
            tax_id: TaxId::new(format!("{number:011}"))
                .unwrap_or_else(|error| panic!("cpf rejected: {error}")),
            email: EmailAddress::new(format!("vendedor{number}@dealer.com.br"))
                .unwrap_or_else(|error| panic!("email rejected: {error}")),
            password_hash: "seeded-without-password".to_owned(),
            phone: None,
            job_title: None,
            group,
            active,
            created_at: now,
            updated_at: now,
        };
        let user_id = user.id;
        UserRepository::create(self.store.as_ref(), user)
            .await
            .unwrap_or_else(|error| panic!("user create failed: {error}"));

        user_id
    }

    async fn staff(&self, tenant_id: TenantId) -> UserId {
        self.user(tenant_id, UserGroup::staff(), true).await
    }

    async fn grant(&self, grant: PermissionGrant) {
        PermissionGrantRepository::save(self.store.as_ref(), grant)
            .await
            .unwrap_or_else(|error| panic!("grant save failed: {error}"));
    }

    async fn grant_full(&self, user_id: UserId, resource: ResourceType) {
        self.grant(PermissionGrant::full(user_id, resource)).await;
    }

    fn token(&self, user_id: UserId, tenant_id: TenantId) -> String {
        self.token_with_ttl(user_id, tenant_id, Duration::hours(1))
    }

    fn token_with_ttl(&self, user_id: UserId, tenant_id: TenantId, ttl: Duration) -> String {
        JwtCredentialCodec::new(SECRET, self.kind, ttl)
            .and_then(|codec| codec.issue(&Principal::new(user_id, tenant_id, Vec::new())))
            .map(|credential| credential.token)
            .unwrap_or_else(|error| panic!("token issue failed: {error}"))
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .unwrap_or_else(|error| panic!("request build failed: {error}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|error| match error {});
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .unwrap_or_else(|error| panic!("body read failed: {error}"))
            .to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|error| panic!("response is not json: {error}"))
        };

        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }
}

fn client_payload(name: &str, tax_id: &str, email: &str) -> Value {
    json!({ "name": name, "tax_id": tax_id, "email": email })
}

fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .unwrap_or_else(|| panic!("payload has no id: {value}"))
        .to_owned()
}

#[tokio::test]
async fn health_needs_no_credential() {
    let harness = Harness::new(TenantKind::Company);

    let (status, body) = harness.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "in_memory" }));
}

#[tokio::test]
async fn missing_authorization_is_unauthenticated() {
    let harness = Harness::new(TenantKind::Company);

    let (status, body) = harness.send(Method::GET, "/api/clients", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized: authentication required");
}

#[tokio::test]
async fn malformed_or_expired_credential_is_a_bad_request() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness.grant_full(user_id, ResourceType::Clients).await;

    let (garbage, _) = harness.get("/api/clients", "not-a-token").await;
    let expired = harness.token_with_ttl(user_id, tenant_id, Duration::minutes(-5));
    let (expired, body) = harness.get("/api/clients", &expired).await;

    assert_eq!(garbage, StatusCode::BAD_REQUEST);
    assert_eq!(expired, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("invalid credential"))
    );
}

#[tokio::test]
async fn credential_of_the_other_tenant_kind_is_rejected() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness.grant_full(user_id, ResourceType::Clients).await;

    let store_token = JwtCredentialCodec::new(SECRET, TenantKind::Store, Duration::hours(1))
        .and_then(|codec| codec.issue(&Principal::new(user_id, tenant_id, Vec::new())))
        .map(|credential| credential.token)
        .unwrap_or_else(|error| panic!("token issue failed: {error}"));

    let (status, _) = harness.get("/api/clients", &store_token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inactive_account_is_forbidden_regardless_of_grants() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.user(tenant_id, UserGroup::staff(), false).await;
    harness.grant_full(user_id, ResourceType::Clients).await;

    let (status, body) = harness
        .get("/api/clients", &harness.token(user_id, tenant_id))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden: account is inactive");
}

#[tokio::test]
async fn grant_flag_must_allow_the_method() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness
        .grant(PermissionGrant {
            can_read: true,
            can_create: false,
            can_update: false,
            can_delete: false,
            ..PermissionGrant::full(user_id, ResourceType::Clients)
        })
        .await;
    let token = harness.token(user_id, tenant_id);

    let (read, _) = harness.get("/api/clients", &token).await;
    let (create, body) = harness
        .post(
            "/api/clients",
            &token,
            client_payload("Ana Souza", "123.456.789-09", "ana@cliente.com.br"),
        )
        .await;
    let (vehicles, _) = harness.get("/api/vehicles", &token).await;

    assert_eq!(read, StatusCode::OK);
    assert_eq!(create, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden: missing 'create' permission on 'clients'");
    assert_eq!(vehicles, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn lists_are_tenant_isolated_and_stable() {
    let harness = Harness::new(TenantKind::Company);
    let first_tenant = harness.tenant().await;
    let second_tenant = harness.tenant().await;
    let first_user = harness.staff(first_tenant).await;
    let second_user = harness.staff(second_tenant).await;
    harness.grant_full(first_user, ResourceType::Clients).await;
    harness.grant_full(second_user, ResourceType::Clients).await;
    let first_token = harness.token(first_user, first_tenant);
    let second_token = harness.token(second_user, second_tenant);

    for (name, tax_id) in [("Carla Dias", "111.111.111-11"), ("Bruno Lima", "222.222.222-22")] {
        let email = format!("{}@cliente.com.br", tax_id.replace(['.', '-'], ""));
        let (status, _) = harness
            .post("/api/clients", &first_token, client_payload(name, tax_id, &email))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, foreign) = harness
        .post(
            "/api/clients",
            &second_token,
            client_payload("Outro Tenant", "333.333.333-33", "outro@cliente.com.br"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, first_list) = harness.get("/api/clients", &first_token).await;
    let (_, repeated) = harness.get("/api/clients", &first_token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first_list, repeated);
    let names: Vec<&str> = first_list
        .as_array()
        .map(|clients| {
            clients
                .iter()
                .filter_map(|client| client["name"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names, vec!["Bruno Lima", "Carla Dias"]);

    let (status, _) = harness
        .get(&format!("/api/clients/{}", id_of(&foreign)), &first_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_list_is_ok() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness.grant_full(user_id, ResourceType::Inventories).await;

    let (status, body) = harness
        .get("/api/inventories", &harness.token(user_id, tenant_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn path_addressing_another_tenant_is_forbidden_for_staff() {
    let harness = Harness::new(TenantKind::Company);
    let own_tenant = harness.tenant().await;
    let other_tenant = harness.tenant().await;
    let caller = harness.staff(own_tenant).await;
    let stranger = harness.staff(other_tenant).await;
    harness.grant_full(caller, ResourceType::Users).await;
    harness.grant_full(caller, ResourceType::Clients).await;
    harness.grant_full(caller, ResourceType::Permissions).await;
    let token = harness.token(caller, own_tenant);

    let (by_user, _) = harness.get(&format!("/api/users/{stranger}"), &token).await;
    let (by_grants, _) = harness
        .get(&format!("/api/users/{stranger}/permissions"), &token)
        .await;
    let (by_tenant, body) = harness
        .get(&format!("/api/companies/{other_tenant}/clients"), &token)
        .await;
    let (own_scope, _) = harness
        .get(&format!("/api/companies/{own_tenant}/clients"), &token)
        .await;

    assert_eq!(by_user, StatusCode::FORBIDDEN);
    assert_eq!(by_grants, StatusCode::FORBIDDEN);
    assert_eq!(by_tenant, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden: access to another tenant is not allowed");
    assert_eq!(own_scope, StatusCode::OK);
}

#[tokio::test]
async fn administrator_acts_inside_the_addressed_tenant() {
    let harness = Harness::new(TenantKind::Company);
    let own_tenant = harness.tenant().await;
    let other_tenant = harness.tenant().await;
    let administrator = harness
        .user(own_tenant, UserGroup::administrator(), true)
        .await;
    let other_staff = harness.staff(other_tenant).await;
    harness.grant_full(administrator, ResourceType::Users).await;
    harness.grant_full(administrator, ResourceType::Clients).await;
    harness.grant_full(administrator, ResourceType::Tenants).await;
    harness.grant_full(other_staff, ResourceType::Clients).await;

    let (status, _) = harness
        .post(
            "/api/clients",
            &harness.token(other_staff, other_tenant),
            client_payload("Cliente Filial", "444.444.444-44", "filial@cliente.com.br"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let token = harness.token(administrator, own_tenant);
    let (user_status, user) = harness
        .get(&format!("/api/users/{other_staff}"), &token)
        .await;
    let (clients_status, clients) = harness
        .get(&format!("/api/companies/{other_tenant}/clients"), &token)
        .await;
    let (tenant_status, tenant) = harness
        .get(&format!("/api/companies/{other_tenant}"), &token)
        .await;
    let (missing_status, _) = harness
        .get(&format!("/api/companies/{}/clients", TenantId::new()), &token)
        .await;

    assert_eq!(user_status, StatusCode::OK);
    assert_eq!(user["tenant_id"], other_tenant.to_string());
    assert_eq!(clients_status, StatusCode::OK);
    assert_eq!(clients.as_array().map(Vec::len), Some(1));
    assert_eq!(tenant_status, StatusCode::OK);
    assert_eq!(tenant["id"], other_tenant.to_string());
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tax_id_is_unique_per_tenant_only() {
    let harness = Harness::new(TenantKind::Company);
    let first_tenant = harness.tenant().await;
    let second_tenant = harness.tenant().await;
    let first_user = harness.staff(first_tenant).await;
    let second_user = harness.staff(second_tenant).await;
    harness.grant_full(first_user, ResourceType::Clients).await;
    harness.grant_full(second_user, ResourceType::Clients).await;
    let first_token = harness.token(first_user, first_tenant);

    let (created, _) = harness
        .post(
            "/api/clients",
            &first_token,
            client_payload("Ana Souza", "123.456.789-09", "ana@cliente.com.br"),
        )
        .await;
    let (duplicate, body) = harness
        .post(
            "/api/clients",
            &first_token,
            client_payload("Ana S.", "12345678909", "ana.s@cliente.com.br"),
        )
        .await;
    let (elsewhere, _) = harness
        .post(
            "/api/clients",
            &harness.token(second_user, second_tenant),
            client_payload("Ana Souza", "123.456.789-09", "ana@cliente.com.br"),
        )
        .await;

    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(duplicate, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.contains("already in use"))
    );
    assert_eq!(elsewhere, StatusCode::CREATED);
}

#[tokio::test]
async fn inventory_and_vehicle_lifecycle() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness.grant_full(user_id, ResourceType::Inventories).await;
    harness.grant_full(user_id, ResourceType::Vehicles).await;
    let token = harness.token(user_id, tenant_id);

    let (status, inventory) = harness
        .post(
            "/api/inventories",
            &token,
            json!({ "name": "Pátio Central", "opened_on": "2024-03-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(inventory["opened_on"], "2024-03-01");
    let inventory_id = id_of(&inventory);

    let (status, vehicle) = harness
        .post(
            "/api/vehicles",
            &token,
            json!({
                "inventory_id": inventory_id,
                "plate": "abc-1d23",
                "chassis": "9BWZZZ377VT004251",
                "brand": "Volkswagen",
                "model": "Gol",
                "mileage": 42000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let vehicle_id = id_of(&vehicle);

    let (status, by_plate) = harness.get("/api/vehicles/plate/ABC1D23", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_plate["id"], vehicle_id.as_str());

    let inventory_uri = format!("/api/inventories/{inventory_id}");
    let (occupied, _) = harness
        .send(Method::DELETE, &inventory_uri, Some(&token), None)
        .await;
    assert_eq!(occupied, StatusCode::BAD_REQUEST);

    let (removed, body) = harness
        .send(
            Method::DELETE,
            &format!("/api/vehicles/{vehicle_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(removed, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (emptied, _) = harness
        .send(Method::DELETE, &inventory_uri, Some(&token), None)
        .await;
    let (gone, _) = harness.get(&inventory_uri, &token).await;
    assert_eq!(emptied, StatusCode::NO_CONTENT);
    assert_eq!(gone, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn permission_grants_are_managed_per_user() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let manager = harness.staff(tenant_id).await;
    let seller = harness.staff(tenant_id).await;
    harness.grant_full(manager, ResourceType::Permissions).await;
    let manager_token = harness.token(manager, tenant_id);
    let seller_token = harness.token(seller, tenant_id);
    let grant_uri = format!("/api/users/{seller}/permissions/vehicles");

    let (before, _) = harness.get("/api/vehicles", &seller_token).await;
    let (saved, grant) = harness
        .send(
            Method::PUT,
            &grant_uri,
            Some(&manager_token),
            Some(json!({ "can_read": true })),
        )
        .await;
    let (after, _) = harness.get("/api/vehicles", &seller_token).await;
    let (listed, grants) = harness
        .get(&format!("/api/users/{seller}/permissions"), &manager_token)
        .await;
    let (unknown, _) = harness
        .send(
            Method::PUT,
            &format!("/api/users/{seller}/permissions/boats"),
            Some(&manager_token),
            Some(json!({ "can_read": true })),
        )
        .await;
    let (revoked, _) = harness
        .send(Method::DELETE, &grant_uri, Some(&manager_token), None)
        .await;
    let (final_status, _) = harness.get("/api/vehicles", &seller_token).await;

    assert_eq!(before, StatusCode::FORBIDDEN);
    assert_eq!(saved, StatusCode::OK);
    assert_eq!(grant["resource_type"], "vehicles");
    assert_eq!(grant["can_create"], false);
    assert_eq!(after, StatusCode::OK);
    assert_eq!(listed, StatusCode::OK);
    assert_eq!(grants.as_array().map(Vec::len), Some(1));
    assert_eq!(unknown, StatusCode::BAD_REQUEST);
    assert_eq!(revoked, StatusCode::NO_CONTENT);
    assert_eq!(final_status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bootstrap_then_login_then_profile() {
    let harness = Harness::new(TenantKind::Company);
    let payload = |token: &str| {
        json!({
            "token": token,
            "tenant": {
                "name": "Auto Center Ltda",
                "trade_name": "Auto Center",
                "address": "Av. Brasil, 500",
                "tax_id": "11.222.333/0001-81"
            },
            "administrator": {
                "name": "Administradora",
                "tax_id": "529.982.247-25",
                "email": "admin@autocenter.com.br",
                "password": "senha-forte-2026"
            }
        })
    };

    let (wrong, _) = harness
        .send(Method::POST, "/auth/bootstrap", None, Some(payload("guess")))
        .await;
    let (created, installed) = harness
        .send(
            Method::POST,
            "/auth/bootstrap",
            None,
            Some(payload(BOOTSTRAP_TOKEN)),
        )
        .await;
    let (again, _) = harness
        .send(
            Method::POST,
            "/auth/bootstrap",
            None,
            Some(payload(BOOTSTRAP_TOKEN)),
        )
        .await;

    assert_eq!(wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(installed["administrator"]["group"], UserGroup::ADMINISTRATOR);
    assert!(installed["administrator"].get("password_hash").is_none());
    assert_eq!(again, StatusCode::CONFLICT);

    let (rejected, body) = harness
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "admin@autocenter.com.br", "password": "errada" })),
        )
        .await;
    assert_eq!(rejected, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized: invalid email or password");

    let (logged_in, session) = harness
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "ADMIN@autocenter.com.br", "password": "senha-forte-2026" })),
        )
        .await;
    assert_eq!(logged_in, StatusCode::OK);
    let token = session["token"]
        .as_str()
        .unwrap_or_else(|| panic!("login returned no token: {session}"))
        .to_owned();

    let (status, profile) = harness.get("/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["tenant"]["trade_name"], "Auto Center");
    assert_eq!(
        profile["permissions"].as_array().map(Vec::len),
        Some(ResourceType::all().len())
    );

    let (status, tenant) = harness.get("/api/tenant", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tenant["kind"], "company");
}

#[tokio::test]
async fn profile_requires_a_credential() {
    let harness = Harness::new(TenantKind::Company);

    let (status, _) = harness.send(Method::GET, "/auth/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn store_deployments_scope_routes_by_store() {
    let harness = Harness::new(TenantKind::Store);
    let store_id = harness.tenant().await;
    let user_id = harness.staff(store_id).await;
    harness.grant_full(user_id, ResourceType::Vehicles).await;
    let token = harness.token(user_id, store_id);

    let (scoped, _) = harness
        .get(&format!("/api/stores/{store_id}/vehicles"), &token)
        .await;
    let (company_route, _) = harness
        .get(&format!("/api/companies/{store_id}/vehicles"), &token)
        .await;

    assert_eq!(scoped, StatusCode::OK);
    assert_eq!(company_route, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deny_policy_requires_an_explicit_tenant_path() {
    let harness = Harness::configured(ApiConfig {
        scope_policy: TenantScopePolicy::DenyUnscoped,
        ..config(TenantKind::Company)
    });
    let tenant_id = harness.tenant().await;
    let user_id = harness.staff(tenant_id).await;
    harness.grant_full(user_id, ResourceType::Clients).await;
    let token = harness.token(user_id, tenant_id);

    let (unscoped, _) = harness.get("/api/clients", &token).await;
    let (scoped, _) = harness
        .get(&format!("/api/companies/{tenant_id}/clients"), &token)
        .await;

    assert_eq!(unscoped, StatusCode::FORBIDDEN);
    assert_eq!(scoped, StatusCode::OK);
}

#[tokio::test]
async fn staff_with_user_grant_cannot_edit_an_administrator() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let manager = harness.staff(tenant_id).await;
    harness.grant_full(manager, ResourceType::Users).await;
    let administrator = harness
        .user(tenant_id, UserGroup::administrator(), true)
        .await;
    let stored = UserRepository::find_by_id(harness.store.as_ref(), administrator)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| panic!("administrator not stored"));
    let token = harness.token(manager, tenant_id);

    let (status, body) = harness
        .send(
            Method::PUT,
            &format!("/api/users/{administrator}"),
            Some(&token),
            Some(json!({
                "name": stored.name,
                "tax_id": stored.tax_id.as_str(),
                "email": stored.email.as_str(),
                "password": "hijacked-password-1",
                "group": "Staff",
                "active": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, _) = harness
        .send(
            Method::DELETE,
            &format!("/api/users/{administrator}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let after = UserRepository::find_by_id(harness.store.as_ref(), administrator)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| panic!("administrator removed"));
    assert!(after.is_administrator());
    assert!(after.active);
    assert_eq!(after.password_hash, stored.password_hash);
}

async fn seeded_stock(harness: &Harness, token: &str, plate: &str) -> (String, String) {
    let (status, client) = harness
        .post(
            "/api/clients",
            token,
            client_payload(
                "Paulo Mendes",
                &format!("{:011}", next_number()),
                &format!("paulo{}@cliente.com.br", next_number()),
            ),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{client}");

    let (status, inventory) = harness
        .post("/api/inventories", token, json!({ "name": "Showroom" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{inventory}");

    let (status, vehicle) = harness
        .post(
            "/api/vehicles",
            token,
            json!({
                "inventory_id": id_of(&inventory),
                "plate": plate,
                "chassis": format!("9BD{:014}", next_number()),
                "brand": "Jeep",
                "model": "Compass"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{vehicle}");

    (id_of(&client), id_of(&vehicle))
}

async fn ledger_clerk(harness: &Harness, tenant_id: TenantId) -> String {
    let clerk = harness.staff(tenant_id).await;
    for resource in [
        ResourceType::Clients,
        ResourceType::Inventories,
        ResourceType::Vehicles,
        ResourceType::Sales,
        ResourceType::Financings,
        ResourceType::Receipts,
        ResourceType::BankAccounts,
    ] {
        harness.grant_full(clerk, resource).await;
    }

    harness.token(clerk, tenant_id)
}

#[tokio::test]
async fn sale_is_financed_and_paid_inside_the_tenant() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let token = ledger_clerk(&harness, tenant_id).await;
    let (client_id, vehicle_id) = seeded_stock(&harness, &token, "JEE1P23").await;

    let (status, account) = harness
        .post(
            "/api/bank-accounts",
            &token,
            json!({ "bank_code": "341", "account_number": "99812", "bank_name": "Itaú" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{account}");

    let (status, sale) = harness
        .post(
            &format!("/api/companies/{tenant_id}/sales"),
            &token,
            json!({
                "client_id": client_id,
                "vehicle_id": vehicle_id,
                "sold_on": "2026-08-03",
                "sale_price": 61_000.0,
                "discount": 1_000.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{sale}");
    assert_eq!(sale["net_price"], 60_000.0);
    let sale_id = id_of(&sale);

    let (status, resold) = harness
        .post(
            "/api/sales",
            &token,
            json!({ "client_id": client_id, "vehicle_id": vehicle_id, "sale_price": 59_000.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resold["message"], "vehicle has already been sold");

    let (status, financing) = harness
        .post(
            "/api/financings",
            &token,
            json!({
                "sale_id": sale_id,
                "total_amount": 60_000.0,
                "down_payment": 20_000.0,
                "installments": 10
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{financing}");
    assert_eq!(financing["client_id"], client_id.as_str());
    assert_eq!(financing["installment_amount"], 4_000.0);

    let (status, receipt) = harness
        .post(
            "/api/receipts",
            &token,
            json!({
                "sale_id": sale_id,
                "amount": 20_000.0,
                "credited_account_id": id_of(&account),
                "received_on": "2026-08-03"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["client_id"], client_id.as_str());

    let (status, listed) = harness
        .get(&format!("/api/receipts?sale_id={sale_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, body) = harness
        .send(
            Method::DELETE,
            &format!("/api/sales/{sale_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "cannot delete sale: related records still reference it"
    );

    let (status, _) = harness
        .send(
            Method::DELETE,
            &format!("/api/vehicles/{vehicle_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ledger_records_of_another_tenant_stay_invisible() {
    let harness = Harness::new(TenantKind::Company);
    let own_tenant = harness.tenant().await;
    let other_tenant = harness.tenant().await;
    let own_token = ledger_clerk(&harness, own_tenant).await;
    let other_token = ledger_clerk(&harness, other_tenant).await;
    let (client_id, vehicle_id) = seeded_stock(&harness, &other_token, "OUT2R34").await;

    let (status, sale) = harness
        .post(
            "/api/sales",
            &other_token,
            json!({ "client_id": client_id, "vehicle_id": vehicle_id, "sale_price": 45_000.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{sale}");
    let sale_id = id_of(&sale);

    let (by_id, _) = harness.get(&format!("/api/sales/{sale_id}"), &own_token).await;
    assert_eq!(by_id, StatusCode::NOT_FOUND);

    let (status, listed) = harness.get("/api/sales", &own_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, borrowed) = harness
        .post(
            "/api/financings",
            &own_token,
            json!({ "sale_id": sale_id, "total_amount": 45_000.0, "installments": 12 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(borrowed["message"], "sale does not belong to this tenant");

    let (status, foreign_client) = harness
        .post(
            "/api/sales",
            &own_token,
            json!({ "client_id": client_id, "vehicle_id": vehicle_id, "sale_price": 1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(foreign_client["message"], "client does not belong to this tenant");
}

#[tokio::test]
async fn ledger_routes_require_their_own_grant() {
    let harness = Harness::new(TenantKind::Company);
    let tenant_id = harness.tenant().await;
    let clerk = harness.staff(tenant_id).await;
    harness.grant_full(clerk, ResourceType::Sales).await;
    let token = harness.token(clerk, tenant_id);

    let (sales, _) = harness.get("/api/sales", &token).await;
    let (contracts, _) = harness.get("/api/contracts", &token).await;
    let (payments, _) = harness.get("/api/payments", &token).await;

    assert_eq!(sales, StatusCode::OK);
    assert_eq!(contracts, StatusCode::FORBIDDEN);
    assert_eq!(payments, StatusCode::FORBIDDEN);
}
