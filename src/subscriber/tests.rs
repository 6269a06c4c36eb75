use super::{listen, on_message};
use crate::bus::{Bus, MemoryBus, Subscription};
use crate::joke::Joke;
use crate::utils::JokeError;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn payload(setup: &str, punchline: &str) -> Vec<u8> {
    Joke::new(setup, punchline).to_json().unwrap()
}

#[test]
fn test_on_message_prints_rendering() {
    let mut out = Vec::new();
    on_message(&payload("Why?", "Because."), &mut out);
    assert_eq!(String::from_utf8(out).unwrap(), "Q: Why? \nA: Because.\n");
}

#[test]
fn test_on_message_drops_malformed_payload() {
    let mut out = Vec::new();
    on_message(b"{not json", &mut out);
    on_message(br#"{"setup":"only half"}"#, &mut out);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_listen_survives_malformed_payload() {
    let stream = futures::stream::iter(vec![
        b"garbage".to_vec(),
        payload("A", "B"),
        b"{}".to_vec(),
        payload("C", "D"),
    ]);
    let subscription = Subscription::new("jokes", stream);

    let mut out = Vec::new();
    let result = listen(subscription, |p| on_message(p, &mut out)).await;
    assert!(matches!(result, Err(JokeError::Closed(topic)) if topic == "jokes"));

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Q: A \nA: B\nQ: C \nA: D\n"
    );
}

#[tokio::test]
async fn test_listen_over_memory_bus() {
    let bus = MemoryBus::new();
    let subscription = bus.subscribe("jokes").await.unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(listen(subscription, move |p| {
        let mut out = Vec::new();
        on_message(p, &mut out);
        if !out.is_empty() {
            let _ = tx.send(String::from_utf8(out).unwrap());
        }
    }));

    bus.publish("jokes", b"not a joke".to_vec()).await.unwrap();
    bus.publish("jokes", payload("Why?", "Because.")).await.unwrap();

    let printed = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("listener produced no output")
        .unwrap();
    assert_eq!(printed, "Q: Why? \nA: Because.\n");
}

#[tokio::test]
async fn test_listen_reports_closed_subscription_as_error() {
    let subscription = Subscription::new("jokes", futures::stream::empty());
    let result = listen(subscription, |_| {}).await;
    assert!(matches!(result, Err(JokeError::Closed(topic)) if topic == "jokes"));
}
