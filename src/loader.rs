//! Fetches SVG markup and attaches it under a container element.
//!
//! [`load_svg`] is the awaitable form and reports failure as an error.
//! [`spawn_load_svg`] is fire-and-forget: failures are logged once and the
//! returned [`LoadHandle`] only resolves to a value on success. Overlapping
//! loads into one container are not coordinated; whichever finishes last
//! replaces the content.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use kurbo::{Point, Size};
use tokio::{
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

use crate::{
    dom::{Document, NodeId},
    error::{ChoreoError, ChoreoResult},
};

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Returns the response body as text.
    async fn fetch_text(&self, url: &str) -> ChoreoResult<String>;
}

#[derive(Clone, Debug)]
pub struct FetchSettings {
    /// No timeout unless set; callers opt in.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("svg-choreo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> ChoreoResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChoreoError::fetch(format!("build http client: {e}")))?;
        Ok(Self { client })
    }
}

fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime.contains("xml") || mime.contains("svg")
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> ChoreoResult<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChoreoError::fetch(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChoreoError::fetch(format!("GET {url}: HTTP {status}")));
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if let Some(ct) = content_type
            && !is_textual(ct)
        {
            return Err(ChoreoError::fetch(format!(
                "GET {url}: unexpected content type '{ct}'"
            )));
        }

        resp.text()
            .await
            .map_err(|e| ChoreoError::fetch(format!("GET {url}: read body: {e}")))
    }
}

/// Reads `file://` URLs or plain paths from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

#[async_trait]
impl Fetch for FileFetcher {
    async fn fetch_text(&self, url: &str) -> ChoreoResult<String> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ChoreoError::fetch(format!("read '{path}': {e}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadedSvg {
    /// Root element of the inserted markup.
    pub root: NodeId,
    pub position: Point,
    /// Intrinsic size as resolved by `usvg`; `None` when it has none, as
    /// with zero-sized sprite sheets.
    pub size: Option<Size>,
}

fn svg_size(markup: &str) -> Option<Size> {
    match usvg::Tree::from_str(markup, &usvg::Options::default()) {
        Ok(tree) => {
            let size = tree.size();
            Some(Size::new(f64::from(size.width()), f64::from(size.height())))
        }
        Err(err) => {
            tracing::debug!(%err, "no intrinsic svg size");
            None
        }
    }
}

/// Replaces the content of `target_id` with `markup` and positions its root
/// at `at`. Nothing is modified when the markup is not well-formed XML or the
/// target is missing.
pub fn attach_svg(
    doc: &mut Document,
    markup: &str,
    target_id: &str,
    at: Point,
) -> ChoreoResult<LoadedSvg> {
    let id = target_id.trim_start_matches('#');
    let container = doc
        .get_element_by_id(id)
        .ok_or_else(|| ChoreoError::missing_element(format!("#{id}")))?;
    let root = doc.set_inner_markup(container, markup)?;
    doc.set_attr(root, "transform", format!("translate({} {})", at.x, at.y))?;
    Ok(LoadedSvg {
        root,
        position: at,
        size: svg_size(markup),
    })
}

#[tracing::instrument(skip(fetcher, doc))]
pub async fn load_svg<F: Fetch + ?Sized>(
    fetcher: &F,
    doc: &mut Document,
    url: &str,
    target_id: &str,
    x: f64,
    y: f64,
) -> ChoreoResult<LoadedSvg> {
    let markup = fetcher.fetch_text(url).await?;
    let loaded = attach_svg(doc, &markup, target_id, Point::new(x, y))?;
    tracing::debug!(size = ?loaded.size, "svg attached");
    Ok(loaded)
}

pub type SharedDocument = Arc<Mutex<Document>>;

/// Completion side of a detached load.
#[derive(Debug)]
pub struct LoadHandle {
    done: oneshot::Receiver<LoadedSvg>,
    task: JoinHandle<()>,
}

impl LoadHandle {
    /// `Some` once the markup is attached and positioned; `None` if the load
    /// failed or was aborted.
    pub async fn done(self) -> Option<LoadedSvg> {
        self.done.await.ok()
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Detached form of [`load_svg`], spawned on the current Tokio runtime. The
/// document is only locked once the fetch has finished.
pub fn spawn_load_svg<F>(
    fetcher: Arc<F>,
    doc: SharedDocument,
    url: impl Into<String>,
    target_id: impl Into<String>,
    x: f64,
    y: f64,
) -> LoadHandle
where
    F: Fetch + ?Sized + 'static,
{
    let url = url.into();
    let target_id = target_id.into();
    let (tx, rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        let result = match fetcher.fetch_text(&url).await {
            Ok(markup) => {
                let mut doc = doc.lock().await;
                attach_svg(&mut doc, &markup, &target_id, Point::new(x, y))
            }
            Err(err) => Err(err),
        };
        match result {
            Ok(loaded) => {
                // Receiver may be gone; the load still counts.
                let _ = tx.send(loaded);
            }
            Err(err) => tracing::error!(%url, target = %target_id, %err, "svg load failed"),
        }
    });

    LoadHandle { done: rx, task }
}
