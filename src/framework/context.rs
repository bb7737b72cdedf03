//! Per-request host context slot.
//!
//! The dispatch entry point scopes the host's context around the
//! framework's dispatch; handlers read it back with [`current`].
//! The slot is task-local: work spawned onto other tasks does not see it.

use std::future::Future;

use crate::host::HostContext;

tokio::task_local! {
    static HOST_CONTEXT: HostContext;
}

/// Run `fut` with `ctx` installed as the current host context.
pub async fn scope<F>(ctx: HostContext, fut: F) -> F::Output
where
    F: Future,
{
    HOST_CONTEXT.scope(ctx, fut).await
}

/// The host context of the request being processed, if any.
pub fn current() -> Option<HostContext> {
    HOST_CONTEXT.try_with(|ctx| ctx.clone()).ok()
}
