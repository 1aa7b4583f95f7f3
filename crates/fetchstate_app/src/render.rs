use fetchstate_core::{Body, Footer, PagedResourceView, ResourceView};
use fetchstate_engine::{Post, User};

/// Text rendering of the user screen, one line per visible element.
pub fn render_user(view: &ResourceView<'_, User>) -> Vec<String> {
    let mut lines = Vec::new();
    match view.body {
        Body::Blank | Body::Empty => {}
        Body::Placeholder(user) => lines.push(format!("[redacted] {}", user_line(user))),
        Body::Content(user) => lines.push(user_line(user)),
        Body::ErrorScreen => lines.push("[error screen]".to_string()),
    }
    push_overlays(&mut lines, view.show_progress_overlay, view.banner_error.as_deref());
    lines
}

/// Text rendering of the posts list. Long lists are summarized by their ends.
pub fn render_posts(view: &PagedResourceView<'_, Post>) -> Vec<String> {
    let mut lines = Vec::new();
    match view.body {
        Body::Blank => {}
        Body::Placeholder(posts) => lines.push(format!("[redacted] {}", posts_line(posts))),
        Body::Content(posts) => lines.push(posts_line(posts)),
        Body::Empty => lines.push("no posts".to_string()),
        Body::ErrorScreen => lines.push("[error screen]".to_string()),
    }
    match view.footer {
        Footer::None => {}
        Footer::Spinner => lines.push("[load more spinner]".to_string()),
        Footer::Retry => lines.push("[load more failed, tap to retry]".to_string()),
    }
    push_overlays(&mut lines, view.show_progress_overlay, view.banner_error.as_deref());
    lines
}

fn push_overlays(lines: &mut Vec<String>, progress: bool, banner: Option<&str>) {
    if progress {
        lines.push("[progress overlay]".to_string());
    }
    if let Some(error) = banner {
        lines.push(format!("[banner] error: {error}"));
    }
}

fn user_line(user: &User) -> String {
    format!(
        "id={} name={} email={} location={}",
        user.id, user.name, user.email, user.location
    )
}

fn posts_line(posts: &[Post]) -> String {
    match (posts.first(), posts.last()) {
        (Some(first), Some(last)) => {
            format!("{} posts: {} .. {}", posts.len(), first.title, last.title)
        }
        _ => "0 posts".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchstate_core::{PagedResourceState, ResourceState};
    use fetchstate_engine::ApiError;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_initial_loading_draws_redacted_stub() {
        let state = ResourceState::<User, ApiError>::InitialLoading;
        let stub = User::stub();

        let lines = render_user(&state.view(Some(&stub)));

        assert_eq!(
            lines,
            vec![
                "[redacted] id=user id name=user name email=email address location=location"
                    .to_string(),
                "[progress overlay]".to_string(),
            ]
        );
    }

    #[test]
    fn paging_failure_shows_items_retry_and_banner() {
        let state = PagedResourceState::<Post, ApiError>::PagingFailure {
            items: (0..30).map(Post::new).collect(),
            error: ApiError::Network,
        };

        let lines = render_posts(&state.view(None));

        assert_eq!(
            lines,
            vec![
                "30 posts: post 0 .. post 29".to_string(),
                "[load more failed, tap to retry]".to_string(),
                "[banner] error: network error".to_string(),
            ]
        );
    }
}
