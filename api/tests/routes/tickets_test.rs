#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use services::ActorType;
    use tower::ServiceExt;

    use crate::helpers::fixtures::{Desk, json_request, seed_desk, token};
    use crate::helpers::{body_json, make_test_app};
    use crate::helpers::app::TestApp;

    async fn open_ticket(app: &TestApp, desk: &Desk, subject: &str) -> Value {
        let trader = token(desk.trader.id, ActorType::Trader);
        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/offers/{}/support-tickets", desk.offer.id),
                Some(&trader),
                Some(json!({ "subject": subject, "message": "Is the price negotiable?" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        body_json(res).await["data"]["ticket"].clone()
    }

    #[tokio::test]
    async fn trader_opens_ticket_on_own_offer() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let trader = token(desk.trader.id, ActorType::Trader);

        let res = app
            .oneshot(json_request(
                "POST",
                &format!("/api/offers/{}/support-tickets", desk.offer.id),
                Some(&trader),
                Some(json!({ "subject": "Shipping", "message": "Ships to Jeddah?", "priority": "high" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let json = body_json(res).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Support ticket created successfully");
        assert_eq!(json["data"]["ticket"]["status"], "OPEN");
        assert_eq!(json["data"]["ticket"]["priority"], "HIGH");
        assert_eq!(json["data"]["ticket"]["employeeId"], desk.employee.id);
        assert_eq!(json["data"]["message"]["senderType"], "TRADER");
        assert_eq!(json["data"]["message"]["message"], "Ships to Jeddah?");
    }

    #[tokio::test]
    async fn ticket_creation_checks_offer_and_body() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let stranger = db::models::trader::Model::create(state.db(), "Lina Saleh", "Saleh Co", "TR-404", "lina@saleh.test", None)
            .await
            .unwrap();
        let stranger = token(stranger.id, ActorType::Trader);
        let owner = token(desk.trader.id, ActorType::Trader);
        let uri = format!("/api/offers/{}/support-tickets", desk.offer.id);

        let res = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&stranger), Some(json!({ "subject": "Hi", "message": "Hi" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/offers/9999/support-tickets",
                Some(&owner),
                Some(json!({ "subject": "Hi", "message": "Hi" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&owner), Some(json!({ "subject": "   ", "message": "Hi" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&owner),
                Some(json!({ "subject": "Hi", "message": "Hi", "priority": "CRITICAL" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["message"], "Invalid priority: CRITICAL");
    }

    #[tokio::test]
    async fn employee_opens_ticket_for_own_trader_only() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let uri = format!("/api/employees/offers/{}/support-tickets", desk.offer.id);
        let body = json!({ "subject": "Photos", "message": "Please add photos" });

        let outsider = token(desk.outsider.id, ActorType::Employee);
        let res = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&outsider), Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let employee = token(desk.employee.id, ActorType::Employee);
        let res = app
            .oneshot(json_request("POST", &uri, Some(&employee), Some(body)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let json = body_json(res).await;
        assert_eq!(json["data"]["ticket"]["employeeId"], desk.employee.id);
        assert_eq!(json["data"]["message"]["senderType"], "EMPLOYEE");
    }

    #[tokio::test]
    async fn outsider_employee_cannot_reply() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Delivery").await;

        let outsider = token(desk.outsider.id, ActorType::Employee);
        let res = app
            .oneshot(json_request(
                "POST",
                &format!("/api/employees/support-tickets/{}/messages", ticket["id"]),
                Some(&outsider),
                Some(json!({ "message": "Hello" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn trader_reply_reopens_resolved_ticket() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Invoice").await;
        let employee = token(desk.employee.id, ActorType::Employee);
        let trader = token(desk.trader.id, ActorType::Trader);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/employees/support-tickets/{}/status", ticket["id"]),
                Some(&employee),
                Some(json!({ "status": "RESOLVED" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["status"], "RESOLVED");
        assert!(json["data"]["resolvedAt"].is_string());

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/traders/support-tickets/{}/messages", ticket["id"]),
                Some(&trader),
                Some(json!({ "message": "Still missing page two", "attachments": ["invoice.pdf"] })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .oneshot(json_request(
                "GET",
                &format!("/api/traders/support-tickets/{}", ticket["id"]),
                Some(&trader),
                None,
            ))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"]["status"], "OPEN");
    }

    #[tokio::test]
    async fn closed_ticket_rejects_messages_and_status_changes() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Refund").await;
        let employee = token(desk.employee.id, ActorType::Employee);
        let trader = token(desk.trader.id, ActorType::Trader);
        let status_uri = format!("/api/employees/support-tickets/{}/status", ticket["id"]);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &status_uri, Some(&employee), Some(json!({ "status": "CLOSED" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/traders/support-tickets/{}/messages", ticket["id"]),
                Some(&trader),
                Some(json!({ "message": "Hello?" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(json_request("PUT", &status_uri, Some(&employee), Some(json!({ "status": "OPEN" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_is_required_and_must_be_known() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Colours").await;
        let employee = token(desk.employee.id, ActorType::Employee);
        let uri = format!("/api/employees/support-tickets/{}/status", ticket["id"]);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&employee), Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Status is required");

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&employee), Some(json!({ "status": "PARKED" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(json_request("PUT", &uri, Some(&employee), Some(json!({ "status": "resolved" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["status"], "RESOLVED");
    }

    #[tokio::test]
    async fn employee_assigns_only_to_self() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Packaging").await;
        let employee = token(desk.employee.id, ActorType::Employee);
        let uri = format!("/api/employees/support-tickets/{}/assign", ticket["id"]);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&employee), Some(json!({ "employeeId": desk.outsider.id }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .oneshot(json_request("PUT", &uri, Some(&employee), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["employeeId"], desk.employee.id);
        assert_eq!(json["data"]["status"], "IN_PROGRESS");
    }

    #[tokio::test]
    async fn admin_assignment_needs_an_existing_employee() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Warranty").await;
        let admin = token(1, ActorType::Admin);
        let uri = format!("/api/admin/offer-support-tickets/{}/assign", ticket["id"]);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&admin), Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .clone()
            .oneshot(json_request("PUT", &uri, Some(&admin), Some(json!({ "employeeId": 9999 }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .oneshot(json_request("PUT", &uri, Some(&admin), Some(json!({ "employeeId": desk.outsider.id }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["employeeId"], desk.outsider.id);
    }

    #[tokio::test]
    async fn listing_is_paginated_with_latest_message() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        open_ticket(&app, &desk, "First").await;
        open_ticket(&app, &desk, "Second").await;
        open_ticket(&app, &desk, "Third").await;
        let trader = token(desk.trader.id, ActorType::Trader);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/traders/support-tickets?page=1&limit=2", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["pagination"]["pages"], 2);
        assert_eq!(json["data"][0]["subject"], "Third");
        assert_eq!(json["data"][0]["latestMessage"]["message"], "Is the price negotiable?");

        let outsider = token(desk.outsider.id, ActorType::Employee);
        let res = app
            .oneshot(json_request("GET", "/api/employees/support-tickets", Some(&outsider), None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn detail_thread_is_oldest_first() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let ticket = open_ticket(&app, &desk, "Thread").await;
        let employee = token(desk.employee.id, ActorType::Employee);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/employees/support-tickets/{}/messages", ticket["id"]),
                Some(&employee),
                Some(json!({ "message": "Yes, within ten percent" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .oneshot(json_request(
                "GET",
                &format!("/api/admin/offer-support-tickets/{}", ticket["id"]),
                Some(&employee),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let messages = json["data"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["senderType"], "TRADER");
        assert_eq!(messages[1]["senderType"], "EMPLOYEE");
        assert_eq!(json["data"]["offer"]["id"], desk.offer.id);
        assert_eq!(json["data"]["employee"]["id"], desk.employee.id);
    }

    #[tokio::test]
    async fn stats_count_per_status() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let first = open_ticket(&app, &desk, "One").await;
        open_ticket(&app, &desk, "Two").await;
        let admin = token(1, ActorType::Admin);

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/admin/offer-support-tickets/{}/status", first["id"]),
                Some(&admin),
                Some(json!({ "status": "RESOLVED" })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(json_request("GET", "/api/admin/offer-support-tickets/stats", Some(&admin), None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["open"], 1);
        assert_eq!(json["data"]["resolved"], 1);
        assert_eq!(json["data"]["closed"], 0);
    }

    #[tokio::test]
    async fn malformed_input_gets_the_error_envelope() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let trader = token(desk.trader.id, ActorType::Trader);
        let uri = format!("/api/offers/{}/support-tickets", desk.offer.id);

        let res = app
            .clone()
            .oneshot(json_request("POST", &uri, Some(&trader), Some(json!({ "subject": 5, "message": "hi" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("subject"));

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(&uri)
                    .header("Authorization", format!("Bearer {trader}"))
                    .body(Body::from(r#"{"subject":"Hi","message":"Hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/traders/support-tickets/abc", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);

        let res = app
            .oneshot(json_request("GET", "/api/traders/support-tickets?page=abc", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);
    }

    #[tokio::test]
    async fn huge_page_numbers_return_an_empty_page() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        open_ticket(&app, &desk, "Only one").await;
        let trader = token(desk.trader.id, ActorType::Trader);

        let res = app
            .oneshot(json_request(
                "GET",
                &format!("/api/traders/support-tickets?page={}", u64::MAX),
                Some(&trader),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }
}
