#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use services::ActorType;
    use tower::ServiceExt;

    use crate::helpers::app::TEST_JWT_SECRET;
    use crate::helpers::fixtures::{json_request, seed_desk, token};
    use crate::helpers::{body_json, make_test_app};

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let (app, _state, _tmp) = make_test_app().await;

        let res = app
            .oneshot(json_request("GET", "/api/traders/support-tickets", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let (app, _state, _tmp) = make_test_app().await;

        let res = app
            .oneshot(json_request("GET", "/api/admin/offer-support-tickets", Some("not-a-jwt"), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_actor_kind_is_forbidden() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;

        let employee = token(desk.employee.id, ActorType::Employee);
        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/traders/support-tickets", Some(&employee), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let trader = token(desk.trader.id, ActorType::Trader);
        let res = app
            .oneshot(json_request("GET", "/api/admin/offer-update-requests", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn token_without_user_type_acts_as_admin() {
        let (app, _state, _tmp) = make_test_app().await;

        let exp = (chrono::Utc::now() + chrono::Duration::minutes(5)).timestamp() as usize;
        let legacy = encode(
            &Header::default(),
            &json!({ "sub": 1, "exp": exp }),
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap();

        let res = app
            .oneshot(json_request("GET", "/api/admin/offer-support-tickets/stats", Some(&legacy), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
