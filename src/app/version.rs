//! `--version` flow.

use super::AppContext;
use crate::build_info::version_text;
use crate::exitcode;

/// Print the version, plus the revision when one can be found. Always exits 0.
pub(super) async fn run_version(ctx: &AppContext<'_>) -> i32 {
    let revision = ctx.revision.revision_id().await;
    if revision.is_none() {
        tracing::debug!("no source revision available");
    }
    ctx.renderer
        .version(&version_text(ctx.version, revision.as_deref()));
    exitcode::OK
}
