use whodunit_core::{GenerateRequest, Message};
use whodunit_interface::{CompletionDriver, HealthStatus, ScriptedDriver, ScriptedReply};

#[tokio::test]
async fn plays_back_replies_in_order() {
    let driver = ScriptedDriver::new(vec![
        ScriptedReply::text("first"),
        ScriptedReply::failure("boom"),
        ScriptedReply::text("third"),
    ]);
    let request = GenerateRequest::default();

    assert_eq!(
        driver.generate(&request).await.unwrap().text(),
        Some("first".to_string())
    );
    let err = driver.generate(&request).await.unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert_eq!(
        driver.generate(&request).await.unwrap().text(),
        Some("third".to_string())
    );
}

#[tokio::test]
async fn records_requests() {
    let driver = ScriptedDriver::repeating("ok");
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hello")])
        .build()
        .unwrap();

    driver.generate(&request).await.unwrap();
    driver.generate(&request).await.unwrap();

    let seen = driver.requests();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].messages()[0].content, "hello");
    assert_eq!(driver.call_count(), 2);
}

#[tokio::test]
async fn unavailable_driver_always_fails() {
    let driver = ScriptedDriver::unavailable("connection refused");
    for _ in 0..3 {
        assert!(driver.generate(&GenerateRequest::default()).await.is_err());
    }
}

#[tokio::test]
async fn pushed_replies_are_used_before_fallback() {
    let driver = ScriptedDriver::repeating("fallback");
    driver.push(ScriptedReply::text("queued"));

    let request = GenerateRequest::default();
    assert_eq!(
        driver.generate(&request).await.unwrap().text(),
        Some("queued".to_string())
    );
    assert_eq!(
        driver.generate(&request).await.unwrap().text(),
        Some("fallback".to_string())
    );
}

#[test]
fn degraded_backend_is_still_usable() {
    assert!(HealthStatus::Healthy.is_usable());
    assert!(
        HealthStatus::Degraded {
            message: "slow".to_string()
        }
        .is_usable()
    );
    assert!(
        !HealthStatus::Unhealthy {
            message: "down".to_string()
        }
        .is_usable()
    );
}
