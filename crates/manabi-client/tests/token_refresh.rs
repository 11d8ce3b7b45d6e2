//! Request lifecycle: bearer attachment, single refresh, session expiry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use manabi_auth::{MemoryStore, Session};
use manabi_client::testing::ScriptedTransport;
use manabi_client::{
    ApiClient, ApiError, ApiRequest, Backends, ErrorKind, RefreshedTokens, SessionExpiredHook,
    Transport, refresh_fn,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};

struct Harness {
    transport: Arc<ScriptedTransport>,
    client: ApiClient,
    refreshes: Arc<AtomicUsize>,
    expired: Arc<AtomicUsize>,
}

impl Harness {
    /// Client whose refresher answers with `outcome` and counts calls.
    fn new(outcome: Result<RefreshedTokens, ApiError>) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let refreshes = Arc::new(AtomicUsize::new(0));
        let expired = Arc::new(AtomicUsize::new(0));

        let counter = refreshes.clone();
        let refresher = refresh_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let outcome = outcome.clone();
            async move { outcome }
        });
        let hook_counter = expired.clone();
        let hook: SessionExpiredHook = Arc::new(move || {
            hook_counter.fetch_add(1, Ordering::SeqCst);
        });

        let client = ApiClient::builder("https://api.manabi.jp/api")
            .transport(transport.clone())
            .refresher(Arc::new(refresher))
            .on_session_expired(hook)
            .build()
            .unwrap();
        Self {
            transport,
            client,
            refreshes,
            expired,
        }
    }

    fn refreshing_to(token: &str) -> Self {
        Self::new(Ok(RefreshedTokens::new(token)))
    }

    fn failing_refresh() -> Self {
        Self::new(Err(ApiError::Unauthorized {
            message: "Refresh token is invalid".into(),
        }))
    }

    fn session(&self) -> &Session {
        self.client.session()
    }

    fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn expired_count(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }

    fn bearer_tokens(&self) -> Vec<Option<String>> {
        self.transport
            .requests()
            .iter()
            .map(|r| r.bearer_token().map(str::to_string))
            .collect()
    }
}

fn course_42() -> Value {
    json!({"id": 42, "title": "JLPT N3 読解"})
}

#[tokio::test]
async fn header_carries_the_token_stored_at_dispatch_time() {
    let h = Harness::refreshing_to("unused");
    h.session().set_token("first").unwrap();
    h.transport.push_json(StatusCode::OK, course_42());
    h.client.execute(ApiRequest::get("/courses/42")).await.unwrap();

    h.session().set_token("second").unwrap();
    h.transport.push_json(StatusCode::OK, course_42());
    h.client.execute(ApiRequest::get("/courses/42")).await.unwrap();

    assert_eq!(
        h.bearer_tokens(),
        vec![Some("first".to_string()), Some("second".to_string())]
    );
}

#[tokio::test]
async fn no_token_means_no_header() {
    let h = Harness::refreshing_to("unused");
    h.transport.push_json(StatusCode::OK, json!([]));
    h.client.execute(ApiRequest::get("/topics")).await.unwrap();
    assert_eq!(h.bearer_tokens(), vec![None]);
}

#[tokio::test]
async fn public_paths_never_carry_a_header() {
    let h = Harness::refreshing_to("unused");
    h.session().set_tokens("access", Some("refresh")).unwrap();

    for path in [
        "/auth/register",
        "/auth/login",
        "/auth/verify-email",
        "/auth/resend-otp",
        "/auth/forgot-password",
        "/auth/reset-password",
        "/auth/refresh-token",
        "/auth/login?next=%2Fcourses",
    ] {
        h.transport.push_json(StatusCode::OK, json!({}));
        h.client.execute(ApiRequest::post(path)).await.unwrap();
    }

    assert!(h.bearer_tokens().iter().all(Option::is_none));
}

#[tokio::test]
async fn public_match_is_exact_not_substring() {
    let h = Harness::refreshing_to("unused");
    h.session().set_token("access").unwrap();
    h.transport.push_json(StatusCode::OK, json!({}));

    h.client
        .execute(ApiRequest::get("/admin/audit/auth/login"))
        .await
        .unwrap();
    assert_eq!(h.bearer_tokens(), vec![Some("access".to_string())]);
}

#[tokio::test]
async fn expired_token_refreshes_once_and_retries_with_new_token() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("stale", Some("refresh")).unwrap();
    h.transport.push_status(StatusCode::UNAUTHORIZED);
    h.transport.push_json(StatusCode::OK, course_42());

    let response = h
        .client
        .execute(ApiRequest::get("/courses/42"))
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().unwrap(), course_42());

    assert_eq!(h.refresh_count(), 1);
    assert_eq!(h.transport.count_for("/courses/42"), 2);
    assert_eq!(
        h.bearer_tokens(),
        vec![Some("stale".to_string()), Some("fresh".to_string())]
    );
    assert_eq!(h.session().token().as_deref(), Some("fresh"));
    // refresher returned no rotated refresh token
    assert_eq!(h.session().refresh_token().as_deref(), Some("refresh"));
    assert_eq!(h.expired_count(), 0);
}

#[tokio::test]
async fn second_401_after_refresh_is_terminal() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("stale", Some("refresh")).unwrap();
    h.transport.push_status(StatusCode::UNAUTHORIZED);
    h.transport
        .push_json(StatusCode::UNAUTHORIZED, json!({"message": "Token revoked"}));

    let err = h
        .client
        .execute(ApiRequest::get("/courses/42"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), "Token revoked");
    assert_eq!(h.refresh_count(), 1);
    assert_eq!(h.transport.request_count(), 2);
    assert_eq!(h.transport.remaining(), 0);
}

#[tokio::test]
async fn failed_refresh_clears_credentials_and_runs_hook() {
    let h = Harness::failing_refresh();
    h.session().set_tokens("stale", Some("bad-refresh")).unwrap();
    h.transport.push_status(StatusCode::UNAUTHORIZED);

    let err = h
        .client
        .execute(ApiRequest::get("/courses/42"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired { .. }));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(h.refresh_count(), 1);
    assert_eq!(h.expired_count(), 1);
    assert_eq!(h.transport.request_count(), 1, "request must not be re-sent");
    assert!(h.session().token().is_none());
    assert!(h.session().refresh_token().is_none());
    assert!(h.session().user().unwrap().is_none());
}

#[tokio::test]
async fn non_401_failures_never_refresh() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("access", Some("refresh")).unwrap();

    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        h.transport.push_status(status);
        let err = h
            .client
            .execute(ApiRequest::get("/courses/42"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.status(), Some(status.as_u16()));
    }

    h.transport.push_unreachable("connection refused");
    let err = h
        .client
        .execute(ApiRequest::get("/courses/42"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);

    assert_eq!(h.refresh_count(), 0);
    assert_eq!(h.session().token().as_deref(), Some("access"));
}

#[tokio::test]
async fn login_401_surfaces_immediately() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("old", Some("refresh")).unwrap();
    h.transport.push_json(
        StatusCode::UNAUTHORIZED,
        json!({"message": "メールアドレスまたはパスワードが正しくありません"}),
    );

    let err = h
        .client
        .execute(ApiRequest::post("/auth/login"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.message(), "メールアドレスまたはパスワードが正しくありません");
    assert_eq!(h.refresh_count(), 0);
    assert_eq!(h.expired_count(), 0);
    assert_eq!(h.session().token().as_deref(), Some("old"));
}

#[tokio::test]
async fn protected_auth_endpoint_401_does_not_refresh() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("old", Some("refresh")).unwrap();
    h.transport.push_status(StatusCode::UNAUTHORIZED);

    let err = h
        .client
        .execute(ApiRequest::post("/auth/logout"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(h.bearer_tokens(), vec![Some("old".to_string())]);
    assert_eq!(h.refresh_count(), 0);
}

#[tokio::test]
async fn refresh_budget_is_per_request() {
    let h = Harness::refreshing_to("fresh");
    h.session().set_tokens("stale", Some("refresh")).unwrap();
    for _ in 0..2 {
        h.transport.push_status(StatusCode::UNAUTHORIZED);
        h.transport.push_json(StatusCode::OK, course_42());
    }

    let (a, b) = tokio::join!(
        h.client.execute(ApiRequest::get("/courses/42")),
        h.client.execute(ApiRequest::get("/courses/42")),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(h.refresh_count(), 2);
    assert_eq!(h.transport.request_count(), 4);
}

/// Both backends share the session and refresh against the main API.
mod backends {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backends() -> (Arc<ScriptedTransport>, Arc<ScriptedTransport>, Backends) {
        let main = Arc::new(ScriptedTransport::new());
        let ai = Arc::new(ScriptedTransport::new());
        let session = Session::new(Arc::new(MemoryStore::new()));
        let main_transport: Arc<dyn Transport> = main.clone();
        let ai_transport: Arc<dyn Transport> = ai.clone();
        let backends = Backends::with_transports(
            ("https://api.manabi.jp/api".into(), main_transport),
            ("https://ai.manabi.jp/api".into(), ai_transport),
            session,
            None,
        )
        .unwrap();
        (main, ai, backends)
    }

    #[tokio::test]
    async fn tutor_401_refreshes_through_main_backend() {
        let (main, ai, backends) = backends();
        backends
            .session()
            .set_tokens("stale", Some("refresh-1"))
            .unwrap();

        ai.push_status(StatusCode::UNAUTHORIZED);
        main.push_json(
            StatusCode::OK,
            json!({"accessToken": "fresh", "refreshToken": "refresh-2"}),
        );
        ai.push_json(StatusCode::OK, json!({"reply": "はい、どうぞ。"}));

        let reply = backends
            .tutor()
            .send_message(&manabi_client::services::ChatRequest {
                message: "質問があります".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(reply.reply, "はい、どうぞ。");

        let refresh = &main.requests()[0];
        assert_eq!(refresh.path, "/auth/refresh-token");
        assert!(refresh.bearer_token().is_none());
        assert_eq!(refresh.body, Some(json!({"refreshToken": "refresh-1"})));

        assert_eq!(ai.requests()[1].bearer_token(), Some("fresh"));
        assert_eq!(backends.api.session().token().as_deref(), Some("fresh"));
        assert_eq!(
            backends.session().refresh_token().as_deref(),
            Some("refresh-2")
        );
    }

    #[tokio::test]
    async fn invalid_refresh_token_ends_the_shared_session() {
        let (main, ai, backends) = backends();
        backends
            .session()
            .set_tokens("stale", Some("revoked"))
            .unwrap();

        main.push_status(StatusCode::UNAUTHORIZED);
        main.push_json(StatusCode::FORBIDDEN, json!({"message": "Invalid refresh token"}));

        let err = backends.courses().get(42).await.unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired { .. }));
        assert!(!backends.session().is_authenticated());
        assert!(!backends.tutor.session().is_authenticated());
        assert_eq!(main.count_for("/courses/42"), 1);
        assert_eq!(ai.request_count(), 0);
    }

    #[tokio::test]
    async fn stored_token_round_trips_to_the_wire() {
        let (main, _ai, backends) = backends();
        backends.session().set_token("abc.def.ghi").unwrap();
        main.push_json(StatusCode::OK, course_42());

        backends.courses().get(42).await.unwrap();
        assert_eq!(
            backends.session().token().as_deref(),
            main.requests()[0].bearer_token()
        );
    }
}
