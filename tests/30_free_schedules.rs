mod common;

use std::collections::HashSet;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{assert_problem, TestApp};
use serde_json::{json, Value};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

async fn book(app: &TestApp, user: &str, day: &str, start: i32, end: i32) -> Result<()> {
    let res = app
        .as_user(
            user,
            Method::POST,
            &format!("/users/{}/routines", user),
            Some(json!({ "name": "Busy", "day": day, "start_hour": start, "end_hour": end })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "booking failed: {}", res.body);
    Ok(())
}

fn schedules(body: &Value) -> HashSet<(String, i64, i64)> {
    body["data"]["schedules"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|s| {
            (
                s["day"].as_str().unwrap_or_default().to_string(),
                s["start_hour"].as_i64().unwrap_or(-1),
                s["end_hour"].as_i64().unwrap_or(-1),
            )
        })
        .collect()
}

fn whole_days_except(skip: &str) -> impl Iterator<Item = (String, i64, i64)> + '_ {
    DAYS.iter()
        .filter(move |d| **d != skip)
        .map(|d| (d.to_string(), 0, 24))
}

#[tokio::test]
async fn no_users_means_empty_schedules() -> Result<()> {
    let app = TestApp::new();
    let res = app
        .as_user("1", Method::GET, "/users/freeSchedules", None)
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["schedules"], json!([]));
    Ok(())
}

#[tokio::test]
async fn single_user_monday_morning() -> Result<()> {
    let app = TestApp::new();
    book(&app, "u1", "Monday", 8, 10).await?;

    let res = app
        .as_user("u1", Method::GET, "/users/freeSchedules?users=u1", None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let mut expected: HashSet<_> = whole_days_except("Monday").collect();
    expected.insert(("Monday".into(), 0, 8));
    expected.insert(("Monday".into(), 10, 24));
    assert_eq!(schedules(&res.body), expected);
    Ok(())
}

#[tokio::test]
async fn two_users_are_merged() -> Result<()> {
    let app = TestApp::new();
    book(&app, "a", "Monday", 8, 10).await?;
    book(&app, "b", "Monday", 9, 11).await?;

    // any authenticated user may ask about others
    let res = app
        .as_user("c", Method::GET, "/users/freeSchedules?users=a&users=b", None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let mut expected: HashSet<_> = whole_days_except("Monday").collect();
    expected.insert(("Monday".into(), 0, 8));
    expected.insert(("Monday".into(), 11, 24));
    assert_eq!(schedules(&res.body), expected);
    Ok(())
}

#[tokio::test]
async fn fully_booked_user_has_no_free_schedules() -> Result<()> {
    let app = TestApp::new();
    for day in DAYS {
        book(&app, "busy", day, 0, 24).await?;
    }

    let res = app
        .as_user("busy", Method::GET, "/users/freeSchedules?users=busy", None)
        .await?;
    assert_problem(
        &res,
        StatusCode::NOT_FOUND,
        "No free schedules found",
        "/users/freeSchedules",
    );
    assert_eq!(res.body["detail"], "No free schedules found for the provided users");
    Ok(())
}

#[tokio::test]
async fn split_bookings_leave_single_hours() -> Result<()> {
    let app = TestApp::new();
    book(&app, "x", "Wednesday", 0, 5).await?;
    book(&app, "x", "Wednesday", 6, 24).await?;

    let res = app
        .as_user("x", Method::GET, "/users/freeSchedules?users=x", None)
        .await?;
    let free = schedules(&res.body);
    assert!(free.contains(&("Wednesday".to_string(), 5, 6)));
    assert_eq!(free.len(), 7);
    Ok(())
}

#[tokio::test]
async fn empty_user_id_is_still_a_user() -> Result<()> {
    let app = TestApp::new();
    let res = app
        .as_user("1", Method::GET, "/users/freeSchedules?users=", None)
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    let expected: HashSet<_> = DAYS.iter().map(|d| (d.to_string(), 0, 24)).collect();
    assert_eq!(schedules(&res.body), expected);
    Ok(())
}
