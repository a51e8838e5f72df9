mod common;

use chrono::{Duration, TimeZone, Utc};
use urban_echo_api::models::{RECENTLY_VIEWED_LIMIT, RecentlyViewed, Wishlist};
use uuid::Uuid;

#[test]
fn recently_viewed_is_most_recent_first_without_duplicates() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let mut viewed = RecentlyViewed::default();
    viewed.record(a, start);
    viewed.record(b, start + Duration::minutes(1));
    viewed.record(c, start + Duration::minutes(2));
    viewed.record(a, start + Duration::minutes(3));

    assert_eq!(viewed.product_ids(), vec![a, c, b]);
    assert_eq!(viewed.0[0].viewed_at, start + Duration::minutes(3));
}

#[test]
fn recently_viewed_keeps_only_the_latest_entries() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let ids: Vec<Uuid> = (0..RECENTLY_VIEWED_LIMIT + 3).map(|_| Uuid::new_v4()).collect();

    let mut viewed = RecentlyViewed::default();
    for (minute, id) in ids.iter().enumerate() {
        viewed.record(*id, start + Duration::minutes(minute as i64));
    }

    assert_eq!(viewed.0.len(), RECENTLY_VIEWED_LIMIT);
    assert_eq!(viewed.product_ids()[0], *ids.last().unwrap());
    assert!(!viewed.product_ids().contains(&ids[0]));
    assert!(!viewed.product_ids().contains(&ids[2]));
    assert!(viewed.product_ids().contains(&ids[3]));
}

#[test]
fn wishlist_add_and_remove() {
    let now = Utc::now();
    let (hoodie, cap) = (Uuid::new_v4(), Uuid::new_v4());

    let mut wishlist = Wishlist::default();
    assert!(wishlist.add(hoodie, now));
    assert!(!wishlist.add(hoodie, now), "duplicate add is a no-op");
    assert!(wishlist.add(cap, now));
    assert_eq!(wishlist.0.len(), 2);

    assert!(wishlist.remove(hoodie));
    assert!(!wishlist.remove(hoodie));
    assert!(!wishlist.contains(hoodie));
    assert!(wishlist.contains(cap));
}

#[test]
fn lists_serialize_as_plain_arrays() {
    let mut wishlist = Wishlist::default();
    let id = Uuid::new_v4();
    wishlist.add(id, Utc::now());

    let json = serde_json::to_value(&wishlist).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["productId"], id.to_string());
}

mod api {
    use std::{collections::BTreeMap, sync::Arc};

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use jsonwebtoken::{EncodingKey, Header, encode};
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, Value as DbValue};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use urban_echo_api::{
        dto::users::ProductRef,
        entity::users::{Model as UserModel, Role},
        error::AppError,
        middleware::auth::{AuthUser, Claims},
        models::{Addresses, Preferences, RecentlyViewed, Wishlist},
        routes::app,
        services::user_service,
        state::AppState,
    };
    use uuid::Uuid;

    use crate::common;

    fn user(recently_viewed: RecentlyViewed) -> UserModel {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap().fixed_offset();
        UserModel {
            id: Uuid::new_v4(),
            auth0_id: "auth0|shopper".into(),
            email: "shopper@example.com".into(),
            first_name: Some("Sam".into()),
            last_name: None,
            role: Role::User,
            preferences: Preferences::default(),
            wishlist: Wishlist::default(),
            recently_viewed,
            addresses: Addresses::default(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn shopper() -> AuthUser {
        AuthUser {
            auth0_id: "auth0|shopper".into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, DbValue> {
        BTreeMap::from([("num_items", DbValue::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn recording_a_view_persists_the_updated_list() {
        let product_id = Uuid::new_v4();
        let stored = user(RecentlyViewed::default());
        let mut saved = stored.clone();
        saved.recently_viewed.record(product_id, Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .append_query_results([vec![stored]])
            .append_query_results([vec![saved]])
            .into_connection();

        let response = user_service::record_view(&db, &shopper(), ProductRef { product_id })
            .await
            .expect("record view");

        let items = response.data.expect("list").items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, product_id);
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2, "existence check, then one transaction");
        let locked = format!("{:?}", log[1]);
        assert!(locked.contains("FOR UPDATE"), "{locked}");
        assert!(locked.contains("UPDATE \"users\""), "{locked}");
    }

    #[tokio::test]
    async fn removing_an_absent_wishlist_item_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(RecentlyViewed::default())]])
            .into_connection();

        let result = user_service::remove_from_wishlist(&db, &shopper(), Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(AppError::NotFound {
                resource: "Wishlist item",
                ..
            })
        ));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("UPDATE \"users\""), "{log}");
    }

    #[tokio::test]
    async fn viewing_an_unknown_product_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(0)]])
            .into_connection();

        let result = user_service::record_view(
            &db,
            &shopper(),
            ProductRef {
                product_id: Uuid::new_v4(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound { resource: "Product", .. })));
    }

    const SECRET: &str = "test-secret";

    fn auth_state(db: MockDatabase) -> AppState {
        let mut state = common::test_state(db.into_connection());
        let mut config = (*state.config).clone();
        config.enable_auth = true;
        config.jwt_secret = Some(SecretString::from(SECRET.to_string()));
        state.config = Arc::new(config);
        state
    }

    fn sign(claims: &impl serde::Serialize) -> String {
        let token = encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn bearer_token() -> String {
        sign(&Claims {
            sub: "auth0|shopper".into(),
            exp: (Utc::now().timestamp() + 600) as usize,
        })
    }

    #[tokio::test]
    async fn profile_comes_from_the_user_row_not_token_claims() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(RecentlyViewed::default())]]);
        let token = sign(&serde_json::json!({
            "sub": "auth0|shopper",
            "email": "stale@example.com",
            "exp": Utc::now().timestamp() + 600,
        }));

        let response = app(auth_state(db))
            .oneshot(
                Request::builder()
                    .uri("/api/users/me")
                    .header(header::AUTHORIZATION, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["email"], "shopper@example.com");
    }

    #[tokio::test]
    async fn malformed_product_id_returns_validation_envelope() {
        let response = app(auth_state(MockDatabase::new(DatabaseBackend::Postgres)))
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/users/me/wishlist/not-a-uuid")
                    .header(header::AUTHORIZATION, bearer_token())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["data"]["details"]["field"], "path");
    }

    #[tokio::test]
    async fn user_routes_require_a_bearer_token() {
        let response = app(auth_state(MockDatabase::new(DatabaseBackend::Postgres)))
            .oneshot(
                Request::builder()
                    .uri("/api/users/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["code"], "AUTH_ERROR");
    }
}
