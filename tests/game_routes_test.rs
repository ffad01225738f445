mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_guess_without_game_is_not_found() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/games/101/guess")
        .set_json(&json!({ "guess": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/games/101").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[serial]
async fn test_start_with_default_and_custom_range() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/games/1/start")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["game"]["min"], 1);
    assert_eq!(body["game"]["max"], 100);
    assert_eq!(body["game"]["active"], true);

    let req = test::TestRequest::post()
        .uri("/api/games/2/start")
        .set_json(&json!({ "min": 10, "max": 20 }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["game"]["min"], 10);
    assert_eq!(body["game"]["max"], 20);

    let req = test::TestRequest::post()
        .uri("/api/games/3/start")
        .set_json(&json!({ "min": 50, "max": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
#[serial]
async fn test_binary_search_finds_number() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/games/7/start")
        .set_json(&json!({ "min": 1, "max": 1000 }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/games/7/guess")
        .set_json(&json!({ "guess": "not a number" }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["result"]["outcome"], "invalid");

    let req = test::TestRequest::post()
        .uri("/api/games/7/guess")
        .set_json(&json!({ "guess": 5000 }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["result"]["outcome"], "out_of_range");
    assert_eq!(body["game"]["attempts"], 0);

    let (mut low, mut high) = (1i64, 1000i64);
    let mut attempts = 0;
    loop {
        let mid = (low + high) / 2;
        attempts += 1;
        let req = test::TestRequest::post()
            .uri("/api/games/7/guess")
            .set_json(&json!({ "guess": mid }))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

        match body["result"]["outcome"].as_str().unwrap() {
            "higher" => low = mid + 1,
            "lower" => high = mid - 1,
            "correct" => {
                assert_eq!(body["result"]["attempts"], attempts);
                assert_eq!(body["game"]["active"], false);
                break;
            }
            other => panic!("unexpected outcome {}", other),
        }
        assert!(attempts <= 10, "binary search over 1000 needs at most 10 guesses");
    }

    let req = test::TestRequest::post()
        .uri("/api/games/7/guess")
        .set_json(&json!({ "guess": 1 }))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["result"]["outcome"], "game_over");

    let req = test::TestRequest::get().uri("/api/games/7").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["game"]["attempts"], attempts);
}
