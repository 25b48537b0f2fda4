mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{assert_problem, TestApp};
use serde_json::json;

async fn add(app: &TestApp, user: &str, name: &str, calories: f64) -> Result<i64> {
    let res = app
        .as_user(
            user,
            Method::POST,
            &format!("/users/{}/exercises", user),
            Some(json!({ "exerciseName": name, "caloriesBurned": calories })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.body);
    assert_eq!(res.data()["userId"], user);
    res.data()["id"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("missing id in {}", res.body))
}

#[tokio::test]
async fn todays_exercises_are_summed() -> Result<()> {
    let app = TestApp::new();
    add(&app, "1", "Running", 300.0).await?;
    add(&app, "1", "Cycling", 200.5).await?;
    add(&app, "2", "Rowing", 999.0).await?;

    let res = app.as_user("1", Method::GET, "/users/1/exercises", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["totalBurned"], 500.5);
    let names: Vec<_> = res.data()["exercises"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|e| e["exerciseName"].clone())
        .collect();
    assert_eq!(names, vec![json!("Running"), json!("Cycling")]);
    Ok(())
}

#[tokio::test]
async fn past_day_is_empty_and_bad_dates_are_rejected() -> Result<()> {
    let app = TestApp::new();
    add(&app, "1", "Running", 300.0).await?;

    let res = app
        .as_user("1", Method::GET, "/users/1/exercises?date=2000-01-01", None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["totalBurned"], 0.0);
    assert_eq!(res.data()["exercises"], json!([]));

    let res = app
        .as_user("1", Method::GET, "/users/1/exercises?date=01-01-2000", None)
        .await?;
    assert_problem(&res, StatusCode::BAD_REQUEST, "Invalid date format", "/users/1/exercises");
    assert_eq!(res.body["detail"], "Date must be in YYYY-MM-DD format");
    Ok(())
}

#[tokio::test]
async fn invalid_exercise_payloads() -> Result<()> {
    let app = TestApp::new();

    for body in [
        json!({ "exerciseName": "Running", "caloriesBurned": 0 }),
        json!({ "exerciseName": "Running", "caloriesBurned": -5 }),
        json!({ "exerciseName": "Running" }),
    ] {
        let res = app
            .as_user("1", Method::POST, "/users/1/exercises", Some(body))
            .await?;
        assert_problem(&res, StatusCode::BAD_REQUEST, "Invalid exercise data", "/users/1/exercises");
    }
    Ok(())
}

#[tokio::test]
async fn update_and_delete_check_ownership() -> Result<()> {
    let app = TestApp::new();
    let id = add(&app, "1", "Running", 300.0).await?;
    let body = json!({ "exerciseName": "Walking", "caloriesBurned": 120 });

    let uri = format!("/users/2/exercises/{}", id);
    let res = app
        .as_user("2", Method::PUT, &uri, Some(body.clone()))
        .await?;
    assert_problem(&res, StatusCode::UNAUTHORIZED, "Unauthorized", &uri);
    assert_eq!(res.body["detail"], "You are not authorized to update this exercise");

    let res = app.as_user("2", Method::DELETE, &uri, None).await?;
    assert_eq!(res.body["detail"], "You are not authorized to delete this exercise");

    let uri = format!("/users/1/exercises/{}", id);
    let res = app.as_user("1", Method::PUT, &uri, Some(body)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["exerciseName"], "Walking");

    let res = app.as_user("1", Method::DELETE, &uri, None).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.as_user("1", Method::DELETE, &uri, None).await?;
    assert_problem(&res, StatusCode::NOT_FOUND, "Exercise not found", &uri);
    Ok(())
}

#[tokio::test]
async fn exercise_ids_must_be_positive_integers() -> Result<()> {
    let app = TestApp::new();

    for id in ["abc", "0", "-1"] {
        let uri = format!("/users/1/exercises/{}", id);
        let res = app.as_user("1", Method::DELETE, &uri, None).await?;
        assert_problem(&res, StatusCode::BAD_REQUEST, "Invalid exercise ID", &uri);
    }
    Ok(())
}

#[tokio::test]
async fn empty_date_means_today() -> Result<()> {
    let app = TestApp::new();
    add(&app, "1", "Running", 300.0).await?;

    let res = app
        .as_user("1", Method::GET, "/users/1/exercises?date=", None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["totalBurned"], 300.0);
    assert_eq!(res.data()["exercises"].as_array().map(Vec::len), Some(1));
    Ok(())
}
