use std::sync::Arc;
use std::time::Duration;

use fetchstate_core::{Effect, Msg, PagedEffect, PagedMsg};
use fetchstate_engine::{
    DemoApi, EngineError, EngineHandle, Fetcher, PageFetcher, PostsFetcher, UserFetcher,
};
use loader_logging::loader_info;

use crate::app::AppMsg;

/// Executes fetch effects on the engine and turns the outcomes back into
/// messages for the app loop.
pub struct EffectRunner {
    engine: EngineHandle<AppMsg>,
    user: UserFetcher,
    posts: PostsFetcher,
}

impl EffectRunner {
    pub fn new(api: Arc<DemoApi>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new()?,
            user: UserFetcher::new(Arc::clone(&api)),
            posts: PostsFetcher::new(api),
        })
    }

    pub fn run_user(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch => {
                    loader_info!("Fetch user");
                    let fetcher = self.user.clone();
                    self.engine.spawn(async move {
                        AppMsg::User(match fetcher.fetch().await {
                            Ok(user) => Msg::LoadSucceeded(user),
                            Err(error) => Msg::LoadFailed(error),
                        })
                    });
                }
            }
        }
    }

    pub fn run_posts(&self, effects: Vec<PagedEffect<u64>>) {
        for effect in effects {
            let fetcher = self.posts.clone();
            match effect {
                PagedEffect::FetchInitial => {
                    loader_info!("Fetch first page of posts");
                    self.engine.spawn(async move {
                        AppMsg::Posts(match fetcher.fetch_initial().await {
                            Ok(posts) => PagedMsg::LoadSucceeded(posts),
                            Err(error) => PagedMsg::LoadFailed(error),
                        })
                    });
                }
                PagedEffect::FetchMore { cursor } => {
                    loader_info!("Fetch posts from id {}", cursor);
                    self.engine.spawn(async move {
                        AppMsg::Posts(match fetcher.fetch_more(cursor).await {
                            Ok(posts) => PagedMsg::MoreSucceeded(posts),
                            Err(error) => PagedMsg::MoreFailed(error),
                        })
                    });
                }
            }
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<AppMsg> {
        self.engine.recv_timeout(timeout)
    }
}
