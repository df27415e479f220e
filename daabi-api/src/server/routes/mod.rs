use crate::server::ServerRouter;

mod issues;
mod posts;
mod users;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(posts::routes())
        .merge(issues::routes())
        .merge(users::routes())
}
