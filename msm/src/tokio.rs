//! Small helper to drive the async transport from the blocking public API.

use std::future::Future;


/// Run the given future to completion on a fresh current-thread runtime with
/// time and I/O enabled.
pub fn sync<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(future)
}
