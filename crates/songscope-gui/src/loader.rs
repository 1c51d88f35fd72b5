//! Background dataset loading.
//!
//! The dataset is read once at startup off the UI thread: a worker thread on
//! native, a `fetch` future on wasm. The result comes back over a channel
//! that the app polls each frame.

use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender, bounded};
use songscope_core::{Dataset, DatasetError};

/// Outcome of a load, sent exactly once.
pub type LoadResult = Result<Dataset, DatasetError>;

/// Receiving end of a load in flight.
pub struct DatasetLoader {
    rx: Receiver<LoadResult>,
    source: PathBuf,
}

impl DatasetLoader {
    /// Start loading `source`: a file path natively, a URL on wasm.
    pub fn spawn(source: PathBuf, ctx: egui::Context) -> Self {
        let (tx, rx) = bounded(1);
        tracing::info!(source = %source.display(), "loading dataset");
        start(source.clone(), tx, ctx);
        Self { rx, source }
    }

    /// Where the dataset comes from.
    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    /// The result, once it has arrived.
    pub fn poll(&self) -> Option<LoadResult> {
        self.rx.try_recv().ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn start(source: PathBuf, tx: Sender<LoadResult>, ctx: egui::Context) {
    let spawned = std::thread::Builder::new()
        .name("dataset-loader".into())
        .spawn({
            let tx = tx.clone();
            let ctx = ctx.clone();
            move || {
                let _ = tx.send(Dataset::load(&source));
                ctx.request_repaint();
            }
        });
    if let Err(e) = spawned {
        let _ = tx.send(Err(DatasetError::fetch(format!(
            "could not start loader thread: {e}"
        ))));
        ctx.request_repaint();
    }
}

#[cfg(target_arch = "wasm32")]
fn start(source: PathBuf, tx: Sender<LoadResult>, ctx: egui::Context) {
    let url = source.to_string_lossy().into_owned();
    wasm_bindgen_futures::spawn_local(async move {
        let result = match fetch_text(&url).await {
            Ok(text) => Dataset::from_json_str(&text),
            Err(message) => Err(DatasetError::fetch(message)),
        };
        let _ = tx.send(result);
        ctx.request_repaint();
    });
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| format!("bad request: {e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_val = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    let resp: Response = resp_val
        .dyn_into()
        .map_err(|_| "not a Response".to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {} for {url}", resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "not a string".to_string())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait(loader: &DatasetLoader) -> LoadResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = loader.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "loader never reported");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn missing_file_reports_read_error() {
        let loader = DatasetLoader::spawn(
            PathBuf::from("/definitely/not/here.json"),
            egui::Context::default(),
        );
        assert!(matches!(wait(&loader), Err(DatasetError::ReadFile { .. })));
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"track_name": "A", "artist(s)_name": "X", "energy_%": 50}]"#,
        )
        .unwrap();

        let loader = DatasetLoader::spawn(path.clone(), egui::Context::default());
        let dataset = wait(&loader).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(loader.source(), &path);
    }
}
