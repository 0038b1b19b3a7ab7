use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use axum_extra::extract::cookie::Cookie;
use serde_json::{Value, json};
use tower::ServiceExt;

use spa_auth::app::{build_router, build_state};
use spa_auth::config::{AppEnv, Config, CookieSettings, HttpSettings};
use spa_auth::services::spa_auth::{
    AccessTokenOptions, ActivationPeriod, RefreshTokenOptions, SpaAuthOptions,
};

fn config(refresh_secret: Option<&str>) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        spa_auth: SpaAuthOptions {
            use_access_token: AccessTokenOptions {
                secret_key: "access-secret".to_string(),
                activation_period: ActivationPeriod::parse("15m").unwrap(),
            },
            use_refresh_token: refresh_secret.map(|s| RefreshTokenOptions {
                secret_key: s.to_string(),
                activation_period: None,
            }),
        },
        cookies: CookieSettings {
            expiration_seconds: 900,
            domain: None,
            secure: false,
        },
        http: HttpSettings {
            body_limit_bytes: 64 * 1024,
            request_timeout: std::time::Duration::from_secs(30),
        },
    }
}

fn app(refresh_secret: Option<&str>) -> Router {
    let config = config(refresh_secret);
    build_router(build_state(&config), &config)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: Response<Body>) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(res: &Response<Body>) -> Vec<Cookie<'static>> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| Cookie::parse(v.to_str().unwrap().to_string()).unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok_and_carries_request_id() {
    let res = app(None)
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body = body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "spa-auth");
}

#[tokio::test]
async fn issued_access_token_authenticates_via_bearer() {
    let app = app(Some("refresh-secret"));

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/tokens", json!({ "id": 1, "role": "admin" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let tokens = body_json(res).await;
    let access = tokens["accessToken"].as_str().unwrap();
    assert!(tokens["refreshToken"].is_string());

    let res = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let claims = body_json(res).await;
    assert_eq!(claims["id"], 1);
    assert_eq!(claims["role"], "admin");
    assert!(claims["exp"].is_i64());
}

#[tokio::test]
async fn split_cookies_authenticate_when_rejoined() {
    let app = app(None);

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/cookies", json!({ "id": 9 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let cookies = set_cookies(&res);
    let first = cookies.iter().find(|c| c.name() == "access_hp").unwrap();
    let second = cookies.iter().find(|c| c.name() == "access_sig").unwrap();
    assert_ne!(first.http_only(), Some(true));
    assert_eq!(second.http_only(), Some(true));

    let token = body_json(res).await["accessToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(format!("{}.{}", first.value(), second.value()), token);

    let res = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(
                    header::COOKIE,
                    format!("access_hp={}; access_sig={}", first.value(), second.value()),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["id"], 9);
}

#[tokio::test]
async fn header_payload_cookie_alone_is_rejected() {
    let app = app(None);

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/cookies", json!({ "id": 9 })))
        .await
        .unwrap();
    let cookies = set_cookies(&res);
    let first = cookies.iter().find(|c| c.name() == "access_hp").unwrap();

    let res = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::COOKIE, format!("access_hp={}", first.value()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_a_token() {
    let res = app(None)
        .oneshot(Request::get("/api/v1/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let app = app(Some("refresh-secret"));

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/tokens", json!({ "id": 1 })))
        .await
        .unwrap();
    let tokens = body_json(res).await;
    let refresh = tokens["refreshToken"].as_str().unwrap();

    let res = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", refresh))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_reissues_pair_with_same_claims() {
    let app = app(Some("refresh-secret"));

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/tokens", json!({ "id": 5 })))
        .await
        .unwrap();
    let tokens = body_json(res).await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            json!({ "refreshToken": tokens["refreshToken"] }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let renewed = body_json(res).await;
    let access = renewed["accessToken"].as_str().unwrap();

    let res = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await["id"], 5);
}

#[tokio::test]
async fn refresh_rejects_access_tokens_and_blank_input() {
    let app = app(Some("refresh-secret"));

    let res = app
        .clone()
        .oneshot(post_json("/api/v1/auth/tokens", json!({ "id": 5 })))
        .await
        .unwrap();
    let tokens = body_json(res).await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            json!({ "refreshToken": tokens["accessToken"] }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .oneshot(post_json("/api/v1/auth/refresh", json!({ "refreshToken": " " })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn token_pair_without_refresh_secret_is_bad_request() {
    let res = app(None)
        .oneshot(post_json("/api/v1/auth/tokens", json!({ "id": 1 })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(res).await["error"]["message"],
        "(jwtRefreshSecretKey) field is required"
    );
}

#[tokio::test]
async fn logout_expires_both_cookies() {
    let res = app(None)
        .oneshot(
            Request::post("/api/v1/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let cookies = set_cookies(&res);
    assert_eq!(cookies.len(), 2);
    for cookie in cookies {
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
