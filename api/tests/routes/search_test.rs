#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::{
        category::Model as CategoryModel,
        order::{Model as OrderModel, OrderStatus},
        product::Model as ProductModel,
        vendor::Model as VendorModel,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use services::ActorType;
    use tower::ServiceExt;

    use crate::helpers::fixtures::{json_request, seed_desk, token};
    use crate::helpers::{body_json, make_test_app};

    async fn seed_catalogue(db: &DatabaseConnection) {
        let tools = CategoryModel::create(db, "Tools", Some("Hand and power tools")).await.unwrap();
        let food = CategoryModel::create(db, "Food", None).await.unwrap();
        let acme = VendorModel::create(db, "Acme", Some("Acme Industrial"), "sales@acme.test", Some("SA"), Some("Riyadh"))
            .await
            .unwrap();
        let oasis = VendorModel::create(db, "Oasis Farms", None, "hello@oasis.test", Some("AE"), Some("Dubai"))
            .await
            .unwrap();

        ProductModel::create(db, acme.id, Some(tools.id), "Cordless Drill", None, 120.0, 4).await.unwrap();
        ProductModel::create(db, acme.id, Some(tools.id), "Drill Bits", Some("Set of 12"), 15.0, 0).await.unwrap();
        ProductModel::create(db, oasis.id, Some(food.id), "Medjool Dates", Some("5kg box"), 60.0, 30).await.unwrap();

        OrderModel::create(db, "ORD-1001", None, Some(acme.id), OrderStatus::Pending, 240.0).await.unwrap();
        OrderModel::create(db, "ORD-1002", None, Some(oasis.id), OrderStatus::Delivered, 60.0).await.unwrap();
    }

    #[tokio::test]
    async fn product_search_filters_and_sorts() {
        let (app, state, _tmp) = make_test_app().await;
        seed_catalogue(state.db()).await;

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/products?q=drill&sortBy=price&sortOrder=asc", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 2);
        assert_eq!(json["data"][0]["name"], "Drill Bits");
        assert_eq!(json["data"][1]["name"], "Cordless Drill");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/products?q=drill&inStock=true", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["name"], "Cordless Drill");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/products?minPrice=50&maxPrice=100", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["name"], "Medjool Dates");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/products?sortBy=rating", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(json_request("GET", &format!("/api/search/products?page={}", u64::MAX), None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn categories_and_vendors_are_searchable() {
        let (app, state, _tmp) = make_test_app().await;
        seed_catalogue(state.db()).await;

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/categories?q=power", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["name"], "Tools");

        let res = app
            .oneshot(json_request("GET", "/api/search/vendors?country=AE", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["name"], "Oasis Farms");
    }

    #[tokio::test]
    async fn global_search_requires_query() {
        let (app, state, _tmp) = make_test_app().await;
        seed_catalogue(state.db()).await;

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/global?q=%20", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Search query is required");

        let res = app
            .oneshot(json_request("GET", "/api/search/global?q=acme", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["data"]["query"], "acme");
        assert_eq!(json["data"]["vendors"][0]["name"], "Acme");
        assert_eq!(json["data"]["products"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn searches_feed_popular_and_personal_history() {
        let (app, state, _tmp) = make_test_app().await;
        seed_catalogue(state.db()).await;
        let desk = seed_desk(state.db()).await;
        let trader = token(desk.trader.id, ActorType::Trader);

        for _ in 0..2 {
            let res = app
                .clone()
                .oneshot(json_request("GET", "/api/search/products?q=dates", Some(&trader), None))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/products?q=drill", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/popular?limit=5", None, None))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["data"][0]["query"], "dates");
        assert_eq!(json["data"][0]["count"], 2);
        assert_eq!(json["data"][1]["query"], "drill");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/popular?days=9223372036854775", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/history", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let history = json["data"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|row| row["query"] == "dates"));
        assert_eq!(history[0]["resultsCount"], 1);

        let res = app
            .oneshot(json_request("GET", "/api/search/history", None, None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn order_search_is_staff_only() {
        let (app, state, _tmp) = make_test_app().await;
        seed_catalogue(state.db()).await;
        let desk = seed_desk(state.db()).await;
        let trader = token(desk.trader.id, ActorType::Trader);
        let employee = token(desk.employee.id, ActorType::Employee);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/orders", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/orders?status=delivered", Some(&employee), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["orderNumber"], "ORD-1002");

        let res = app
            .clone()
            .oneshot(json_request("GET", "/api/search/orders?dateFrom=2999-01-01", Some(&employee), None))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["pagination"]["total"], 0);

        let res = app
            .oneshot(json_request("GET", "/api/search/orders?dateTo=yesterday", Some(&employee), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Invalid dateTo: yesterday");
    }

    #[tokio::test]
    async fn saved_searches_belong_to_their_owner() {
        let (app, state, _tmp) = make_test_app().await;
        let desk = seed_desk(state.db()).await;
        let trader = token(desk.trader.id, ActorType::Trader);
        let employee = token(desk.employee.id, ActorType::Employee);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/search/saved",
                Some(&trader),
                Some(json!({ "name": "Cheap dates", "query": "dates", "filters": { "maxPrice": 70 } })),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let saved = body_json(res).await["data"].clone();
        assert_eq!(saved["filters"]["maxPrice"], 70);

        let res = app
            .clone()
            .oneshot(json_request("POST", "/api/search/saved", Some(&trader), Some(json!({ "name": "No query" }))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/search/saved/{}", saved["id"]),
                Some(&employee),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/search/saved/{}", saved["id"]),
                Some(&trader),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(json_request("GET", "/api/search/saved", Some(&trader), None))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["data"].as_array().unwrap().len(), 0);
    }
}
