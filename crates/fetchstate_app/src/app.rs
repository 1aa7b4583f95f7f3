use std::mem;
use std::sync::Arc;
use std::time::Duration;

use fetchstate_core::{
    update, update_paged, Msg, PagedMsg, PagedResourceState, Phase, ResourceState,
};
use fetchstate_engine::{ApiError, DemoApi, EngineError, Post, User};
use loader_logging::{loader_debug, loader_info, loader_warn};

use crate::config::{Case, DemoConfig, Step};
use crate::render;
use crate::runner::EffectRunner;

#[derive(Debug)]
pub enum AppMsg {
    User(Msg<User, ApiError>),
    Posts(PagedMsg<Post, ApiError>),
}

/// Owns both demo screens and applies every message on the calling thread.
pub struct App {
    api: Arc<DemoApi>,
    effects: EffectRunner,
    user: ResourceState<User, ApiError>,
    posts: PagedResourceState<Post, ApiError>,
    user_stub: Option<User>,
    post_stubs: Option<Vec<Post>>,
    settle_timeout: Duration,
}

impl App {
    pub fn new(config: &DemoConfig) -> Result<Self, EngineError> {
        let api = Arc::new(DemoApi::new(config.api_settings()));
        let effects = EffectRunner::new(Arc::clone(&api))?;
        let (user_stub, post_stubs) = if config.placeholder {
            (Some(User::stub()), Some(Post::stubs()))
        } else {
            (None, None)
        };

        Ok(Self {
            api,
            effects,
            user: ResourceState::Idle,
            posts: PagedResourceState::Idle,
            user_stub,
            post_stubs,
            settle_timeout: Duration::from_millis(config.latency_ms) + Duration::from_secs(5),
        })
    }

    /// Plays `script` against one screen, waiting for each step to settle.
    pub fn run_case(&mut self, case: Case, script: &[Step]) {
        loader_info!("Case {:?}: {} steps", case, script.len());
        self.render(case);

        for step in script {
            match *step {
                Step::SetFailure(on) => {
                    self.api.set_throw_error(on);
                    loader_info!("Backend failure switch {}", if on { "on" } else { "off" });
                    continue;
                }
                Step::Load => self.request_load(case),
                Step::LoadBurst(count) => {
                    for _ in 0..count {
                        self.request_load(case);
                    }
                }
                Step::LoadMore => match case {
                    Case::Posts => self.dispatch(AppMsg::Posts(PagedMsg::MoreRequested)),
                    Case::User => {
                        loader_debug!("LoadMore skipped: the user screen has no pages");
                        continue;
                    }
                },
            }
            self.wait_until_settled(case);
        }
    }

    fn request_load(&mut self, case: Case) {
        let msg = match case {
            Case::User => AppMsg::User(Msg::LoadRequested),
            Case::Posts => AppMsg::Posts(PagedMsg::LoadRequested),
        };
        self.dispatch(msg);
    }

    fn phase(&self, case: Case) -> Phase {
        match case {
            Case::User => self.user.phase(),
            Case::Posts => self.posts.phase(),
        }
    }

    fn wait_until_settled(&mut self, case: Case) {
        while self.phase(case).is_in_flight() {
            match self.effects.recv_timeout(self.settle_timeout) {
                Some(msg) => self.dispatch(msg),
                None => {
                    loader_warn!("Case {:?}: no result after {:?}", case, self.settle_timeout);
                    return;
                }
            }
        }
    }

    fn dispatch(&mut self, msg: AppMsg) {
        let (case, before, was_failure) = match msg {
            AppMsg::User(msg) => {
                let before = self.user.phase();
                let was_failure = self.user.is_failure();
                let (state, effects) = update(mem::take(&mut self.user), msg);
                self.user = state;
                self.effects.run_user(effects);
                (Case::User, before, was_failure)
            }
            AppMsg::Posts(msg) => {
                let before = self.posts.phase();
                let was_failure = self.posts.is_failure();
                let (state, effects) = update_paged(mem::take(&mut self.posts), msg);
                self.posts = state;
                self.effects.run_posts(effects);
                (Case::Posts, before, was_failure)
            }
        };

        let after = self.phase(case);
        if after == before {
            loader_debug!("Case {:?}: request ignored in {:?}", case, before);
            return;
        }
        loader_info!("Case {:?}: {:?} -> {:?}", case, before, after);
        if !was_failure {
            if let Some(error) = self.failure(case) {
                loader_warn!("Case {:?}: showing error banner: {}", case, error);
            }
        }
        self.render(case);
    }

    fn failure(&self, case: Case) -> Option<&ApiError> {
        match case {
            Case::User => self.user.error().filter(|_| self.user.is_failure()),
            Case::Posts => self.posts.error().filter(|_| self.posts.is_failure()),
        }
    }

    fn render(&self, case: Case) {
        let lines = match case {
            Case::User => render::render_user(&self.user.view(self.user_stub.as_ref())),
            Case::Posts => render::render_posts(&self.posts.view(self.post_stubs.as_deref())),
        };
        println!("-- {:?} [{:?}]", case, self.phase(case));
        for line in lines {
            println!("   {line}");
        }
    }
}
