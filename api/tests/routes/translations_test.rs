#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use services::ActorType;
    use tower::ServiceExt;

    use crate::helpers::fixtures::{json_request, token};
    use crate::helpers::{body_json, make_test_app};

    #[tokio::test]
    async fn admin_writes_are_readable_publicly() {
        let (app, _state, _tmp) = make_test_app().await;
        let admin = token(1, ActorType::Admin);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/translations/en/tickets/status.open",
                Some(&admin),
                Some(json!({ "value": "Open", "description": "Ticket status label" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["namespace"], "tickets");
        assert_eq!(json["data"]["key"], "status.open");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/translations/en/tickets", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"], json!({ "status": { "open": "Open" } }));

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/translations/en/tickets/status.open", None, None))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["data"], "Open");

        let res = app
            .oneshot(json_request("GET", "/api/translations", None, None))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["data"], json!(["en"]));
    }

    #[tokio::test]
    async fn writes_require_admin_and_a_value() {
        let (app, _state, _tmp) = make_test_app().await;
        let employee = token(7, ActorType::Employee);
        let admin = token(1, ActorType::Admin);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/translations/en/common/hello",
                Some(&employee),
                Some(json!({ "value": "Hello" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .clone()
            .oneshot(json_request("PUT", "/api/translations/en/common/hello", None, Some(json!({ "value": "Hello" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = app
            .clone()
            .oneshot(json_request("PUT", "/api/translations/en/common/hello", Some(&admin), Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Value is required");

        let res = app
            .oneshot(json_request(
                "PUT",
                "/api/translations/..%2Fetc/common/hello",
                Some(&admin),
                Some(json!({ "value": "x" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn import_fills_gaps_unless_overwriting() {
        let (app, _state, _tmp) = make_test_app().await;
        let admin = token(1, ActorType::Admin);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/translations/ar/common/greeting",
                Some(&admin),
                Some(json!({ "value": "مرحبا" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/translations/ar/common/import",
                Some(&admin),
                Some(json!({ "data": { "greeting": "اهلا", "farewell": "مع السلامة" } })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["imported"], 1);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/translations/ar/common/greeting", None, None))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["data"], "مرحبا");

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/translations/ar/common/import",
                Some(&admin),
                Some(json!({ "data": { "greeting": "اهلا" }, "overwrite": true })),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["data"]["imported"], 1);

        let res = app
            .oneshot(json_request("GET", "/api/translations/ar/export", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"]["common"]["greeting"], "اهلا");
        assert_eq!(json["data"]["common"]["farewell"], "مع السلامة");
    }

    #[tokio::test]
    async fn status_and_missing_compare_against_reference() {
        let (app, _state, _tmp) = make_test_app().await;
        let admin = token(1, ActorType::Admin);

        for (language, data) in [
            ("en", json!({ "yes": "Yes", "no": "No" })),
            ("ar", json!({ "yes": "نعم" })),
        ] {
            let res = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    &format!("/api/translations/{language}/common/import"),
                    Some(&admin),
                    Some(json!({ "data": data })),
                ))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/translations/status", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        let report = json["data"].as_array().unwrap();
        let arabic = report.iter().find(|row| row["language"] == "ar").unwrap();
        assert_eq!(arabic["translatedKeys"], 1);
        assert_eq!(arabic["completion"], 50.0);

        let res = app
            .oneshot(json_request("GET", "/api/translations/ar/missing", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"], json!([{ "namespace": "common", "key": "no" }]));
    }

    #[tokio::test]
    async fn deleting_unknown_key_is_not_found() {
        let (app, _state, _tmp) = make_test_app().await;
        let admin = token(1, ActorType::Admin);

        let res = app
            .clone()
            .oneshot(json_request("DELETE", "/api/translations/en/common/ghost", Some(&admin), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/translations/en/common/ghost",
                Some(&admin),
                Some(json!({ "value": "Boo" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(json_request("DELETE", "/api/translations/en/common/ghost", Some(&admin), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(json_request("GET", "/api/translations/en/common/ghost", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
