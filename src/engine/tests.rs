use super::{DomainHistory, RecentItemsEngine, Recommender};
use crate::config::EngineSettings;
use crate::envelope::{
    parse_event_notification, parse_item_update, parse_recommendation_request,
};
use crate::utils::error::EngineError;
use serde_json::json;

fn engine() -> RecentItemsEngine {
    RecentItemsEngine::new(EngineSettings {
        max_items_per_domain: 5,
        default_limit: 3,
    })
}

fn publish(engine: &RecentItemsEngine, item: i64, domain: i64) {
    let body = json!({ "id": item, "domainid": domain }).to_string();
    engine
        .update(&parse_item_update(Some(&body)))
        .expect("update should succeed");
}

fn request(domain: i64, current: Option<i64>, limit: Option<i64>) -> crate::envelope::Message {
    let mut simple = json!({ "27": domain });
    if let Some(item) = current {
        simple["25"] = json!(item);
    }
    let mut body = json!({ "context": { "simple": simple } });
    if let Some(limit) = limit {
        body["limit"] = json!(limit);
    }
    parse_recommendation_request(Some(&body.to_string()))
}

#[test]
fn test_domain_history_new() {
    let history = DomainHistory::new(7, 3);
    assert_eq!(history.domain_id, 7);
    assert!(history.is_empty());
}

#[test]
fn test_domain_history_moves_repeated_item_to_front() {
    let mut history = DomainHistory::new(7, 3);
    history.record(1);
    history.record(2);
    history.record(1);
    assert_eq!(history.iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_domain_history_is_bounded() {
    let mut history = DomainHistory::new(7, 2);
    history.record(1);
    history.record(2);
    history.record(3);
    assert_eq!(history.len(), 2);
    assert!(!history.contains(1));
}

#[test]
fn test_update_requires_item_and_domain() {
    let engine = engine();
    let no_domain = parse_item_update(Some(r#"{"id":"1"}"#));
    assert_eq!(
        engine.update(&no_domain),
        Err(EngineError::MissingField("domain_id"))
    );

    let no_item = parse_item_update(Some(r#"{"domainid":"1"}"#));
    assert_eq!(
        engine.update(&no_item),
        Err(EngineError::MissingField("item_id"))
    );
}

#[test]
fn test_recommend_newest_first_within_domain() {
    let engine = engine();
    publish(&engine, 1, 10);
    publish(&engine, 2, 10);
    publish(&engine, 3, 20);

    assert_eq!(engine.recommend(&request(10, None, None)), Ok(vec![2, 1]));
    assert_eq!(engine.recommend(&request(20, None, None)), Ok(vec![3]));
    assert_eq!(engine.recommend(&request(99, None, None)), Ok(vec![]));
}

#[test]
fn test_recommend_excludes_current_item_and_honors_limit() {
    let engine = engine();
    for item in 1..=5 {
        publish(&engine, item, 10);
    }

    assert_eq!(engine.recommend(&request(10, Some(5), Some(2))), Ok(vec![4, 3]));
    assert_eq!(
        engine.recommend(&request(10, Some(4), None)),
        Ok(vec![5, 3, 2])
    );
    assert_eq!(engine.known_items(10), 5);
}

#[test]
fn test_recommend_without_domain_fails() {
    let engine = engine();
    let msg = parse_recommendation_request(Some(r#"{"limit":2}"#));
    assert_eq!(
        engine.recommend(&msg),
        Err(EngineError::MissingField("domain_id"))
    );
}

#[test]
fn test_clicked_items_rank_first() {
    let engine = engine();
    publish(&engine, 1, 10);
    publish(&engine, 2, 10);
    publish(&engine, 3, 10);

    let click = json!({
        "type": "click",
        "context": { "simple": { "25": 3, "27": 10 } },
        "recs": { "ints": { "3": [1] } }
    })
    .to_string();
    engine
        .click(&parse_event_notification(Some(&click)))
        .expect("click should succeed");

    assert_eq!(engine.clicks(1), 1);
    assert_eq!(engine.clicks(3), 0);
    assert_eq!(engine.recommend(&request(10, None, None)), Ok(vec![1, 3, 2]));
}

#[test]
fn test_click_without_items_fails() {
    let engine = engine();
    let click = parse_event_notification(Some(r#"{"type":"click"}"#));
    assert_eq!(
        engine.click(&click),
        Err(EngineError::MissingField("item_id"))
    );
}

#[test]
fn test_impression_records_viewed_item() {
    let engine = engine();
    let impression = json!({
        "type": "impression",
        "context": { "simple": { "25": 8, "27": 10 } }
    })
    .to_string();
    engine
        .impression(&parse_event_notification(Some(&impression)))
        .expect("impression should succeed");

    assert_eq!(engine.known_items(10), 1);
    assert_eq!(engine.recommend(&request(10, None, None)), Ok(vec![8]));
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(engine());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let engine = engine.clone();
            std::thread::spawn(move || publish(&engine, n, 10))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(engine.known_items(10), 4);
}
