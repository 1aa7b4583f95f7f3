use std::time::Duration;

use fetchstate_core::Pageable;
use fetchstate_engine::{ApiError, ApiSettings, DemoApi, Post, User};

fn instant_api() -> DemoApi {
    DemoApi::new(ApiSettings {
        latency: Duration::ZERO,
        page_size: 5,
    })
}

#[tokio::test]
async fn posts_are_consecutive_from_min_id() {
    let api = instant_api();
    let page = api.get_posts(31, 3).await.unwrap();

    let ids: Vec<_> = page.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![31, 32, 33]);
    assert_eq!(page[0].title, "post 31");
    assert_eq!(page.last().map(Pageable::cursor_after), Some(34));
}

#[tokio::test]
async fn failure_switch_applies_to_every_call() {
    let api = instant_api();
    assert_eq!(api.get_user().await.unwrap().name, "kntk");

    api.set_throw_error(true);
    assert!(api.throw_error());
    assert_eq!(api.get_user().await, Err(ApiError::Network));
    assert_eq!(api.get_posts(0, 1).await, Err(ApiError::Network));
    assert_eq!(api.request_count(), 3);
}

#[test]
fn stubs_look_like_real_data() {
    let stubs = Post::stubs();
    assert_eq!(stubs.len(), 10);
    assert_eq!(stubs[0].title, "stub1");
    assert_eq!(stubs[9].id, 100_009);
    assert_ne!(User::stub().id, "kntkymt");
    assert_eq!(ApiError::Network.to_string(), "network error");
}
