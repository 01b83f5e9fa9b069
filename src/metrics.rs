use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide count of requests served from the static file tree.
///
/// Clones share the same counter. Nothing is persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct HitCounter {
    hits: Arc<AtomicU64>,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Set the counter back to zero and return the new value
    pub fn reset(&self) -> u64 {
        self.hits.store(0, Ordering::Relaxed);
        0
    }
}

/// Admin page showing how often the static site was visited
pub fn render_admin_page(hits: u64) -> String {
    format!(
        "
<html>

<body>
\t<h1>Welcome, Chirpy Admin</h1>
\t<p>Chirpy has been visited {} times!</p>
</body>

</html>
",
        hits
    )
}
