//! 端到端预订流程测试
//!
//! 内存 SQLite + 真实路由树，覆盖公共创建 → 付款核实 → 完成的
//! 主链路，以及哨兵错误码和导出范围。

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use dockslot_server::core::{Config, ServerState};
use dockslot_server::db::DbService;
use dockslot_server::db::repository::{profile, trip_type};
use shared::models::{Profile, TripTypeCreate};

const CAPTAIN_ID: i64 = 1;
const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;

async fn setup_with_trip(price_cents: i64, deposit_cents: i64) -> (Router, i64) {
    setup_with_trip_using(Config::from_env(), price_cents, deposit_cents).await
}

async fn setup_with_trip_using(config: Config, price_cents: i64, deposit_cents: i64) -> (Router, i64) {
    let db = DbService::in_memory().await.unwrap();
    let now = shared::util::now_millis();

    let prof = Profile {
        id: CAPTAIN_ID,
        business_name: "Reel Deal Charters".into(),
        contact_email: "cap@example.com".into(),
        contact_phone: None,
        show_email: true,
        show_phone: false,
        brand_color: None,
        timezone: "UTC".into(),
        cancellation_policy: None,
        day_start: "06:00".into(),
        day_end: "20:00".into(),
        slot_step_min: 60,
        stripe_enabled: false,
        venmo_handle: Some("@reeldeal".into()),
        zelle_address: None,
        hibernating: false,
        hibernate_until: None,
        created_at: now,
        updated_at: now,
    };
    profile::create(&db.pool, &prof).await.unwrap();

    let trip = trip_type::create(
        &db.pool,
        TripTypeCreate {
            captain_id: CAPTAIN_ID,
            title: "Half Day Inshore".into(),
            description: None,
            duration_min: 240,
            price_cents,
            deposit_cents,
        },
    )
    .await
    .unwrap();

    let state = ServerState::with_pool(config, db.pool.clone());
    (dockslot_server::api::create_router(state), trip.id)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_booking(app: &Router, trip_id: i64, start: i64) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            json!({
                "captain_id": CAPTAIN_ID,
                "trip_type_id": trip_id,
                "guest_name": "Sam Fisher",
                "guest_email": "sam@example.com",
                "guest_phone": "+15550100",
                "scheduled_start": start,
                "party_size": 4,
            }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn create_verify_complete_flow() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    // 公共创建 → pending_deposit / unpaid
    let response = create_booking(&app, trip_id, start).await;
    assert_eq!(response.status(), StatusCode::OK);
    let booking = body_json(response).await;
    assert_eq!(booking["status"], "pending_deposit");
    assert_eq!(booking["payment_status"], "unpaid");
    assert_eq!(booking["total_price_cents"], 50_000);
    assert_eq!(booking["balance_due_cents"], 50_000);
    let id = booking["id"].as_i64().unwrap();

    // 付款核实 → 定金入账，余额 30000
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "confirm" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmed = body_json(response).await;
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["payment_status"], "deposit_paid");
    assert_eq!(confirmed["deposit_paid_cents"], 20_000);
    assert_eq!(confirmed["balance_due_cents"], 30_000);

    // 完成
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "complete" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "completed");

    // 时间线记录了创建、付款、状态变更
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/bookings/{id}/logs")))
        .await
        .unwrap();
    let logs = body_json(response).await;
    let events: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["event"].as_str().unwrap())
        .collect();
    assert_eq!(
        events,
        vec!["booking_created", "payment_confirmed", "status_changed"]
    );
}

#[tokio::test]
async fn deposit_covering_total_settles_in_full() {
    let (app, trip_id) = setup_with_trip(30_000, 30_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "confirm" }),
        ))
        .await
        .unwrap();
    let confirmed = body_json(response).await;
    assert_eq!(confirmed["payment_status"], "fully_paid");
    assert_eq!(confirmed["deposit_paid_cents"], 30_000);
    assert_eq!(confirmed["balance_due_cents"], 0);
}

#[tokio::test]
async fn third_payment_reminder_is_rejected() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    for expected_count in 1..=2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/bookings/verify-payment",
                json!({ "booking_id": id, "action": "remind" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let b = body_json(response).await;
        assert_eq!(b["payment_reminder_count"], expected_count);
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "remind" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "E0002");
}

#[tokio::test]
async fn terminal_booking_rejects_further_actions() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    // pending_deposit → cancelled
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "cancel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 终态拒绝任何动作
    for action in ["cancel", "confirm_deposit", "reschedule"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/bookings/{id}/status"),
                json!({ "action": action, "new_start": start + DAY }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "E0005");
    }

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/bookings/{id}")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "cancelled");
}

#[tokio::test]
async fn overlapping_create_returns_slot_unavailable() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    assert_eq!(
        create_booking(&app, trip_id, start).await.status(),
        StatusCode::OK
    );

    // 与现有 pending_deposit 预订重叠（提前 1h，行程 4h）
    let response = create_booking(&app, trip_id, start + HOUR).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "SLOT_UNAVAILABLE");
}

#[tokio::test]
async fn hibernating_captain_rejects_public_create() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/profile/{CAPTAIN_ID}"),
            json!({ "hibernating": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_booking(&app, trip_id, start).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "HIBERNATING");

    // 休眠也清空可用时段
    let date = chrono::DateTime::from_timestamp_millis(start)
        .unwrap()
        .format("%Y-%m-%d")
        .to_string();
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/availability/{CAPTAIN_ID}/{trip_id}?date={date}"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn export_covers_inclusive_date_range() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let now = shared::util::now_millis();

    // UTC 正午，避免日期边界歧义
    let in_range = (now / DAY + 10) * DAY + 12 * HOUR;
    let out_of_range = (now / DAY + 40) * DAY + 12 * HOUR;
    assert_eq!(
        create_booking(&app, trip_id, in_range).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        create_booking(&app, trip_id, out_of_range).await.status(),
        StatusCode::OK
    );

    let day = |millis: i64| {
        chrono::DateTime::from_timestamp_millis(millis)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    };
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/bookings/export?captain_id={CAPTAIN_ID}&start_date={}&end_date={}",
            day(in_range),
            day(in_range)
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    // 表头 + 范围内的一行
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Sam Fisher"));
}

#[tokio::test]
async fn failing_email_provider_does_not_block_confirmation() {
    // 邮件服务已配置但不可达（本地 discard 端口，连接立即被拒）
    let mut config = Config::from_env();
    config.email_api_key = Some("re_test_key".into());
    config.email_api_base = "http://127.0.0.1:9".into();
    let (app, trip_id) = setup_with_trip_using(config, 50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    // 收款核实成功返回，不因邮件失败报 500
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "confirm" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmed = body_json(response).await;
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["payment_status"], "deposit_paid");

    // 时间线仍然记录了付款核实
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/bookings/{id}/logs")))
        .await
        .unwrap();
    let logs = body_json(response).await;
    let events: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["event"].as_str().unwrap())
        .collect();
    assert!(events.contains(&"payment_confirmed"));
}

#[tokio::test]
async fn reminder_is_rejected_once_booking_leaves_pending_deposit() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "cancel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "remind" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "E0005");
}

#[tokio::test]
async fn weather_hold_reschedule_keeps_history() {
    let (app, trip_id) = setup_with_trip(50_000, 20_000).await;
    let start = shared::util::now_millis() + 7 * DAY;

    let booking = body_json(create_booking(&app, trip_id, start).await).await;
    let id = booking["id"].as_i64().unwrap();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings/verify-payment",
            json!({ "booking_id": id, "action": "confirm" }),
        ))
        .await
        .unwrap();

    // 天气待定需要原因
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "set_weather_hold" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "set_weather_hold", "reason": "Small craft advisory" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let held = body_json(response).await;
    assert_eq!(held["status"], "weather_hold");
    assert_eq!(held["weather_hold_reason"], "Small craft advisory");

    // 改期：original_start 记录，weather_hold_reason 保留为历史
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/bookings/{id}/status"),
            json!({ "action": "reschedule", "new_start": start + 2 * DAY }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rescheduled = body_json(response).await;
    assert_eq!(rescheduled["status"], "rescheduled");
    assert_eq!(rescheduled["scheduled_start"], start + 2 * DAY);
    assert_eq!(rescheduled["original_start"], start);
    assert_eq!(rescheduled["weather_hold_reason"], "Small craft advisory");
}
