#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::offer::{Model as OfferModel, OfferStatus};
    use serde_json::{Value, json};
    use services::ActorType;
    use tower::ServiceExt;

    use crate::helpers::app::TestApp;
    use crate::helpers::fixtures::{Desk, json_request, seed_desk, token};
    use crate::helpers::{body_json, make_test_app};

    async fn submit(app: &TestApp, desk: &Desk, body: Value) -> (StatusCode, Value) {
        let trader = token(desk.trader.id, ActorType::Trader);
        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/offers/{}/update-request", desk.offer.id),
                Some(&trader),
                Some(body),
            ))
            .await
            .unwrap();
        let status = res.status();
        (status, body_json(res).await)
    }

    #[tokio::test]
    async fn second_pending_request_is_rejected() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;

        let (status, json) = submit(&app, &desk, json!({ "title": "Sukkari dates", "unknown": 1 })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Update request submitted successfully");
        assert_eq!(json["data"]["status"], "PENDING");
        assert_eq!(json["data"]["requestedData"], json!({ "title": "Sukkari dates" }));

        let (status, json) = submit(&app, &desk, json!({ "city": "Riyadh" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "You already have a pending update request for this offer");
    }

    #[tokio::test]
    async fn submission_needs_active_offer_and_known_fields() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;

        let (status, json) = submit(&app, &desk, json!({ "colour": "red" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "No changes provided");

        let (status, json) = submit(&app, &desk, json!(["title"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Request body must be a JSON object");

        let (status, json) = submit(&app, &desk, json!({ "categoryId": "abc" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "categoryId must be an integer");

        let (status, _) = submit(&app, &desk, json!({ "title": "Still free to submit" })).await;
        assert_eq!(status, StatusCode::CREATED);

        let draft = OfferModel::create(state.db(), desk.trader.id, "Draft", "Not live yet", OfferStatus::Pending)
            .await
            .unwrap();
        let trader = token(desk.trader.id, ActorType::Trader);
        let res = app
            .oneshot(json_request(
                "POST",
                &format!("/api/offers/{}/update-request", draft.id),
                Some(&trader),
                Some(json!({ "title": "Live" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approval_applies_changes_to_offer() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let (_, json) = submit(
            &app,
            &desk,
            json!({ "title": "Sukkari dates", "acceptsNegotiation": "true", "images": ["a.jpg", "b.jpg"] }),
        )
        .await;
        let request_id = json["data"]["id"].clone();

        let employee = token(desk.employee.id, ActorType::Employee);
        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/admin/offer-update-requests/{request_id}/approve"),
                Some(&employee),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["request"]["status"], "APPROVED");
        assert_eq!(json["data"]["request"]["reviewedBy"], desk.employee.id);
        assert_eq!(json["data"]["request"]["reviewedByType"], "EMPLOYEE");
        assert_eq!(json["data"]["offer"]["title"], "Sukkari dates");
        assert_eq!(json["data"]["offer"]["acceptsNegotiation"], true);
        assert_eq!(json["data"]["offer"]["images"], "[\"a.jpg\",\"b.jpg\"]");

        let res = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/admin/offer-update-requests/{request_id}/approve"),
                Some(&employee),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejection_requires_notes_and_keeps_offer() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let (_, json) = submit(&app, &desk, json!({ "title": "Renamed" })).await;
        let request_id = json["data"]["id"].clone();
        let admin = token(1, ActorType::Admin);
        let uri = format!("/api/admin/offer-update-requests/{request_id}/reject");

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&admin), Some(json!({ "reviewNotes": "  " }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&admin), Some(json!({ "reviewNotes": "Title too vague" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["status"], "REJECTED");
        assert_eq!(json["data"]["reviewNotes"], "Title too vague");

        let trader = token(desk.trader.id, ActorType::Trader);
        let res = app
            .oneshot(json_request(
                "GET",
                &format!("/api/traders/offers/update-requests/{request_id}"),
                Some(&trader),
                None,
            ))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"]["offer"]["title"], "Medjool dates");
    }

    #[tokio::test]
    async fn outsider_employee_cannot_review() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let (_, json) = submit(&app, &desk, json!({ "description": "New copy" })).await;
        let request_id = json["data"]["id"].clone();

        let outsider = token(desk.outsider.id, ActorType::Employee);
        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/admin/offer-update-requests/{request_id}/approve"),
                Some(&outsider),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .oneshot(json_request("PUT", "/api/admin/offer-update-requests/9999/approve", Some(&outsider), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancel_frees_the_offer_for_a_new_request() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let (_, json) = submit(&app, &desk, json!({ "country": "SA" })).await;
        let request_id = json["data"]["id"].clone();
        let trader = token(desk.trader.id, ActorType::Trader);
        let uri = format!("/api/traders/offers/update-requests/{request_id}/cancel");

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["status"], "CANCELLED");

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let (status, _) = submit(&app, &desk, json!({ "country": "AE" })).await;
        assert_eq!(status, StatusCode::CREATED);

        let res = app
            .oneshot(json_request("GET", "/api/traders/offers/update-requests?status=PENDING", Some(&trader), None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["requestedData"]["country"], "AE");
    }
}
