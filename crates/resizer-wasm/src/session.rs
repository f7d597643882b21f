//! Resize session bindings.
//!
//! The page owns one `JsResizeSession` and forwards user input to it.
//!
//! ```typescript
//! import { JsResizeSession } from '@resizer/wasm';
//!
//! const session = new JsResizeSession(undefined);
//! session.select(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! session.set_width(1200);
//! session.resize();
//!
//! const download = session.download();
//! saveAs(new Blob([download.bytes()], { type: download.mime }), download.filename);
//! ```
//!
//! To keep the page responsive, split the resize:
//!
//! ```typescript
//! const job = session.begin_resize();
//! await nextFrame();
//! job.run();
//! const applied = session.complete_resize(job); // false if the session moved on
//! ```

use resizer_core::{
    ConfigAction, EngineConfig, ExportFormat, FitMode, ImageFile, JobTicket, RenderJob,
    ResizeCompletion, ResizeError, ResizeMode, ResizeOutput, ResizeSession, SizeUnit,
    TargetFileSize,
};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// A resize session for JavaScript.
#[wasm_bindgen]
pub struct JsResizeSession {
    inner: ResizeSession,
}

#[wasm_bindgen]
impl JsResizeSession {
    /// Create a session. `config` is an optional partial `EngineConfig`
    /// object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsResizeSession, JsValue> {
        let engine = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self::with_engine(engine))
    }

    /// Load an image file.
    pub fn select(&mut self, name: String, media_type: String, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.inner
            .select(ImageFile::new(name, media_type, bytes))
            .map_err(to_js_error)
    }

    /// Set the target width. With the aspect lock on, the height follows.
    pub fn set_width(&mut self, width: u32) -> Result<(), JsValue> {
        self.apply(ConfigAction::SetWidth(width))
    }

    /// Set the target height. With the aspect lock on, the width follows.
    pub fn set_height(&mut self, height: u32) -> Result<(), JsValue> {
        self.apply(ConfigAction::SetHeight(height))
    }

    /// Turn the aspect lock on or off. Ignored in preset mode.
    pub fn set_maintain_aspect_ratio(&mut self, lock: bool) -> Result<(), JsValue> {
        self.apply(ConfigAction::SetMaintainAspectRatio(lock))
    }

    /// Quality in `[0.1, 1.0]`; out-of-range values are clamped.
    pub fn set_quality(&mut self, quality: f32) -> Result<(), JsValue> {
        self.apply(ConfigAction::SetQuality(quality))
    }

    /// Percentage in `[10, 200]`; out-of-range values are clamped.
    pub fn set_percentage(&mut self, percentage: u32) -> Result<(), JsValue> {
        self.apply(ConfigAction::SetPercentage(percentage))
    }

    /// `bySize`, `asPercentage` or `socialMedia`.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = ResizeMode::from_name(mode).ok_or_else(|| unknown("resize mode", mode))?;
        self.apply(ConfigAction::SetMode(mode))
    }

    /// Select a platform by name and its first preset.
    pub fn select_platform(&mut self, platform: &str) -> Result<(), JsValue> {
        self.apply(ConfigAction::SelectPlatform(platform.to_string()))
    }

    /// Select a preset label; unknown labels fall back to the platform's first preset.
    pub fn select_preset(&mut self, label: &str) -> Result<(), JsValue> {
        self.apply(ConfigAction::SelectPreset(label.to_string()))
    }

    /// `original`, `jpg`, `png` or `webp`.
    pub fn set_format(&mut self, format: &str) -> Result<(), JsValue> {
        let format = ExportFormat::from_name(format).ok_or_else(|| unknown("format", format))?;
        self.apply(ConfigAction::SetFormat(format))
    }

    /// Advisory output budget. Pass `undefined` to clear it.
    pub fn set_target_file_size(&mut self, amount: Option<f64>, unit: &str) -> Result<(), JsValue> {
        let target = match amount {
            Some(amount) => {
                let unit = SizeUnit::from_name(unit).ok_or_else(|| unknown("size unit", unit))?;
                Some(TargetFileSize { amount, unit })
            }
            None => None,
        };
        self.apply(ConfigAction::SetTargetFileSize(target))
    }

    /// `stretch` or `letterbox`.
    pub fn set_fit(&mut self, fit: &str) -> Result<(), JsValue> {
        let fit = FitMode::from_name(fit).ok_or_else(|| unknown("fit mode", fit))?;
        self.apply(ConfigAction::SetFit(fit))
    }

    /// Resize synchronously.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.inner.resize().map_err(to_js_error)
    }

    /// Start a resize; run the returned job, then pass it to `complete_resize`.
    pub fn begin_resize(&mut self) -> Result<JsRenderJob, JsValue> {
        self.inner
            .begin_resize()
            .map(JsRenderJob::new)
            .map_err(to_js_error)
    }

    /// Apply a finished job. Returns `false` when the result was discarded
    /// because the image or configuration changed meanwhile.
    pub fn complete_resize(&mut self, job: JsRenderJob) -> Result<bool, JsValue> {
        let (ticket, result) = job.finish();
        self.inner
            .complete_resize(ticket, result)
            .map(|completion| completion == ResizeCompletion::Applied)
            .map_err(to_js_error)
    }

    /// The current output. Throws if there is none.
    pub fn download(&mut self) -> Result<JsDownload, JsValue> {
        self.inner
            .download()
            .map(|d| JsDownload {
                filename: d.filename.to_string(),
                mime: d.media_type.mime().to_string(),
                bytes: d.bytes.to_vec(),
            })
            .map_err(to_js_error)
    }

    /// Drop the image, configuration and output.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// `empty`, `loaded`, `configuring` or `resized`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().name().to_string()
    }

    /// Get the target width
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.config().width
    }

    /// Get the target height
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.config().height
    }

    /// Get the loaded image's width, if any
    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> Option<u32> {
        self.inner.original_dimensions().map(|d| d.width)
    }

    /// Get the loaded image's height, if any
    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> Option<u32> {
        self.inner.original_dimensions().map(|d| d.height)
    }

    /// Get whether the aspect lock is on
    #[wasm_bindgen(getter)]
    pub fn maintain_aspect_ratio(&self) -> bool {
        self.inner.config().maintain_aspect_ratio
    }

    /// Get the output quality (0.1 to 1.0)
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.config().quality
    }

    /// Get the scale percentage (10 to 200)
    #[wasm_bindgen(getter)]
    pub fn percentage(&self) -> u32 {
        self.inner.config().percentage
    }

    /// Get the resize mode: `bySize`, `asPercentage` or `socialMedia`
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.config().mode.name().to_string()
    }

    /// Get the selected platform name
    #[wasm_bindgen(getter)]
    pub fn platform(&self) -> String {
        self.inner.config().platform.name().to_string()
    }

    /// Get the selected preset label
    #[wasm_bindgen(getter)]
    pub fn preset(&self) -> String {
        self.inner.config().preset.clone()
    }

    /// Get the export format: `original`, `jpg`, `png` or `webp`
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.config().format.name().to_string()
    }

    /// Get the fit mode: `stretch` or `letterbox`
    #[wasm_bindgen(getter)]
    pub fn fit(&self) -> String {
        self.inner.config().fit.name().to_string()
    }

    /// Message from the last failed operation, if any.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.inner.message().map(str::to_string)
    }

    /// Get whether a render job for the current settings is outstanding
    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.inner.is_busy()
    }

    /// The whole configuration as a plain object.
    pub fn configuration(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(JsValue::from)
    }
}

impl JsResizeSession {
    pub(crate) fn with_engine(engine: EngineConfig) -> Self {
        Self {
            inner: ResizeSession::with_config(engine),
        }
    }

    fn apply(&mut self, action: ConfigAction) -> Result<(), JsValue> {
        self.inner.update(action).map_err(to_js_error)
    }
}

fn unknown(what: &str, value: &str) -> JsValue {
    JsValue::from_str(&format!("Unknown {what}: {value}"))
}

/// A render job handed out by `begin_resize`.
#[wasm_bindgen]
pub struct JsRenderJob {
    job: RenderJob,
    result: Option<Result<ResizeOutput, ResizeError>>,
}

#[wasm_bindgen]
impl JsRenderJob {
    /// Run the render. Calling it again is a no-op.
    pub fn run(&mut self) {
        if self.result.is_none() {
            self.result = Some(self.job.run());
        }
    }

    /// Get the width the job renders at
    #[wasm_bindgen(getter)]
    pub fn target_width(&self) -> u32 {
        self.job.target().width
    }

    /// Get the height the job renders at
    #[wasm_bindgen(getter)]
    pub fn target_height(&self) -> u32 {
        self.job.target().height
    }
}

impl JsRenderJob {
    fn new(job: RenderJob) -> Self {
        Self { job, result: None }
    }

    /// Consume the job, running it first if the page has not.
    fn finish(self) -> (JobTicket, Result<ResizeOutput, ResizeError>) {
        let result = match self.result {
            Some(result) => result,
            None => self.job.run(),
        };
        (self.job.ticket(), result)
    }
}

/// A finished image ready to be saved.
#[wasm_bindgen]
pub struct JsDownload {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsDownload {
    /// Get the suggested download name
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// Get the MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.clone()
    }

    /// Get the encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Encoded bytes as a `Uint8Array` (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 200, 255]));
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    fn loaded(width: u32, height: u32) -> JsResizeSession {
        let mut session = JsResizeSession::with_engine(EngineConfig::default());
        session
            .select("shot.png".into(), "image/png".into(), png(width, height))
            .unwrap();
        session
    }

    #[test]
    fn test_select_seeds_dimensions() {
        let session = loaded(1600, 1200);
        assert_eq!(session.state(), "loaded");
        assert_eq!(session.original_width(), Some(1600));
        assert_eq!(session.original_height(), Some(1200));
        assert_eq!((session.width(), session.height()), (800, 600));
        assert_eq!(session.mode(), "bySize");
        assert!(session.maintain_aspect_ratio());
    }

    #[test]
    fn test_resize_and_download() {
        let mut session = loaded(200, 100);
        session.set_width(50).unwrap();
        assert_eq!(session.state(), "configuring");
        session.resize().unwrap();
        assert_eq!(session.state(), "resized");

        let download = session.download().unwrap();
        assert_eq!(download.filename(), "resized_shot.png");
        assert_eq!(download.mime(), "image/png");
        assert_eq!(download.byte_length(), download.bytes().len());
        assert!(download.byte_length() > 0);
    }

    #[test]
    fn test_preset_mode() {
        let mut session = loaded(300, 300);
        session.set_mode("socialMedia").unwrap();
        session.select_platform("LinkedIn").unwrap();
        assert_eq!(session.platform(), "LinkedIn");
        assert!(!session.maintain_aspect_ratio());
        assert_eq!(session.preset(), "Post (1200 X 627)");
        assert_eq!((session.width(), session.height()), (1200, 627));
    }

    #[test]
    fn test_advisory_settings() {
        let mut session = loaded(40, 40);
        session.set_target_file_size(Some(250.0), "KB").unwrap();
        session.set_fit("letterbox").unwrap();
        session.set_format("webp").unwrap();
        assert_eq!(session.fit(), "letterbox");
        assert_eq!(session.format(), "webp");
        session.set_target_file_size(None, "").unwrap();

        session.resize().unwrap();
        assert_eq!(session.download().unwrap().filename(), "resized_shot.webp");
    }

    #[test]
    fn test_split_resize() {
        let mut session = loaded(64, 32);
        let mut job = session.begin_resize().unwrap();
        assert!(session.busy());
        assert_eq!((job.target_width(), job.target_height()), (64, 32));

        job.run();
        assert!(session.complete_resize(job).unwrap());
        assert!(!session.busy());
        assert_eq!(session.state(), "resized");
    }

    #[test]
    fn test_split_resize_discarded_after_reset() {
        let mut session = loaded(64, 32);
        let job = session.begin_resize().unwrap();
        session.reset();
        assert!(!session.complete_resize(job).unwrap());
        assert_eq!(session.state(), "empty");
        assert_eq!(session.message(), None);
    }

    #[test]
    fn test_freed_job_does_not_block_after_reconfigure() {
        let mut session = loaded(64, 32);
        drop(session.begin_resize().unwrap());
        session.set_width(16).unwrap();
        assert!(!session.busy());

        session.resize().unwrap();
        assert_eq!(session.state(), "resized");
        assert_eq!(session.width(), 16);
    }

    #[test]
    fn test_quality_and_percentage_clamped() {
        let mut session = loaded(100, 100);
        session.set_quality(5.0).unwrap();
        session.set_percentage(1).unwrap();
        assert_eq!(session.quality(), 1.0);
        assert_eq!(session.percentage(), 10);
    }
}
