//! The resize session: one image through select, configure, resize and
//! download.
//!
//! # States
//!
//! ```text
//! Empty --select--> Loaded --update--> Configuring --resize--> Resized
//!                     ^                    ^                      |
//!                     |                    +-------update---------+
//!   any state --reset--> Empty, any state --select--> Loaded
//! ```
//!
//! # Resizing off the session
//!
//! Rendering can be slow, so it is split in three steps. [`ResizeSession::begin_resize`]
//! resolves the target size and hands out a [`RenderJob`]; the job runs
//! anywhere (a worker, another task) since it owns everything it needs;
//! [`ResizeSession::complete_resize`] applies the result. Only one job for
//! the current generation may be in flight. Every select, update and reset
//! bumps a generation counter, and a result whose generation no longer
//! matches is discarded instead of being applied to a session that has
//! moved on. A job that never comes back (dropped, or its caller threw)
//! blocks nothing once the generation moves; the next `begin_resize`
//! replaces it. Jobs carry their session's id, so a job handed to another
//! session is discarded too.
//!
//! Every error is also stored as the session's user-visible message;
//! none of them leave the session unusable.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::EngineConfig;
use crate::decode;
use crate::dimensions::{self, Dimensions};
use crate::render::{self, RenderOptions, ResizeOutput, SourceImage};
use crate::settings::{self, ConfigAction, ResizeConfiguration};
use crate::validate::{self, MediaType};
use crate::ResizeError;

/// Where the session is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Loaded,
    Configuring,
    Resized,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Loaded => "loaded",
            SessionState::Configuring => "configuring",
            SessionState::Resized => "resized",
        }
    }
}

/// A file handed over by the page (picker or drag-and-drop).
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    /// MIME type as declared by the environment.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies which session and generation a render job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTicket {
    session: u64,
    generation: u64,
}

/// A self-contained render request produced by `begin_resize`.
#[derive(Debug, Clone)]
pub struct RenderJob {
    ticket: JobTicket,
    source: SourceImage,
    target: Dimensions,
    options: RenderOptions,
}

impl RenderJob {
    /// Run the render. Pure: touches nothing but the job itself.
    pub fn run(&self) -> Result<ResizeOutput, ResizeError> {
        render::render(&self.source, self.target, &self.options)
    }

    /// Hand this back to `complete_resize` with the result.
    pub fn ticket(&self) -> JobTicket {
        self.ticket
    }

    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    pub fn target(&self) -> Dimensions {
        self.target
    }
}

/// What `complete_resize` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCompletion {
    /// Stored as the current output.
    Applied,
    /// Dropped because the session moved on.
    Discarded,
}

/// The current output, ready for download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Download<'a> {
    pub filename: &'a str,
    pub media_type: MediaType,
    pub bytes: &'a [u8],
}

/// Stateful workflow for one image.
#[derive(Debug)]
pub struct ResizeSession {
    id: u64,
    engine: EngineConfig,
    state: SessionState,
    source: Option<SourceImage>,
    config: ResizeConfiguration,
    output: Option<ResizeOutput>,
    generation: u64,
    in_flight: Option<u64>,
    message: Option<String>,
}

impl Default for ResizeSession {
    fn default() -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            engine: EngineConfig::default(),
            state: SessionState::Empty,
            source: None,
            config: ResizeConfiguration::default(),
            output: None,
            generation: 0,
            in_flight: None,
            message: None,
        }
    }
}

impl ResizeSession {
    /// A new empty session with default engine settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new empty session with custom engine settings.
    pub fn with_config(engine: EngineConfig) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn original_dimensions(&self) -> Option<Dimensions> {
        self.source.as_ref().map(|s| s.dimensions)
    }

    pub fn config(&self) -> &ResizeConfiguration {
        &self.config
    }

    pub fn output(&self) -> Option<&ResizeOutput> {
        self.output.as_ref()
    }

    /// The single user-visible message, set by the last failed operation.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a render job for the current generation is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight == Some(self.generation)
    }

    /// Load a new image, replacing any current one.
    ///
    /// On failure the session keeps its previous state.
    pub fn select(&mut self, file: ImageFile) -> Result<(), ResizeError> {
        let ImageFile {
            name,
            media_type,
            bytes,
        } = file;

        let loaded = validate::validate_with_limit(&media_type, bytes.len() as u64, self.engine.max_file_bytes)
            .and_then(|media| {
                let dims = decode::probe_dimensions(&bytes, media)?.ensure_valid()?;
                let config = ResizeConfiguration::seeded(dims, &self.engine)?;
                Ok((media, dims, config))
            });

        let (media, dims, config) = loaded.map_err(|e| self.fail(e))?;

        log::info!("selected {name} ({media_type}, {} bytes, {dims})", bytes.len());

        self.generation += 1;
        self.in_flight = None;
        self.output = None;
        self.message = None;
        self.source = Some(SourceImage::new(name, media, dims, bytes.into()));
        self.config = config;
        self.state = SessionState::Loaded;
        Ok(())
    }

    /// Apply one configuration change.
    ///
    /// Any previous output becomes stale and is dropped.
    pub fn update(&mut self, action: ConfigAction) -> Result<(), ResizeError> {
        let original = match self.original_dimensions() {
            Some(dims) => dims,
            None => return Err(self.fail(ResizeError::NoImageSelected)),
        };

        let next = settings::reduce(&self.config, action, original, &self.engine)
            .map_err(|e| self.fail(e))?;

        self.config = next;
        self.output = None;
        self.generation += 1;
        self.state = SessionState::Configuring;
        Ok(())
    }

    /// Resolve the target size and hand out a render job.
    ///
    /// Fails with `OperationBusy` while a job for the current generation is
    /// outstanding. An outstanding job from an older generation would be
    /// discarded anyway and is replaced.
    pub fn begin_resize(&mut self) -> Result<RenderJob, ResizeError> {
        if self.is_busy() {
            return Err(self.fail(ResizeError::OperationBusy));
        }
        if let Some(stale) = self.in_flight {
            log::debug!("replacing unfinished render job {stale}");
        }
        let source = match &self.source {
            Some(source) => source.clone(),
            None => return Err(self.fail(ResizeError::NoImageSelected)),
        };

        let target = dimensions::resolve_with_limit(source.dimensions, &self.config, self.engine.max_dimension)
            .map_err(|e| self.fail(e))?;

        let job = RenderJob {
            ticket: JobTicket {
                session: self.id,
                generation: self.generation,
            },
            source,
            target,
            options: RenderOptions {
                quality: self.config.quality,
                format: self.config.format,
                filter: self.engine.filter,
                fit: self.config.fit,
                target_file_size: self.config.target_file_size,
            },
        };

        log::debug!("render job {} started for {target}", self.generation);
        self.in_flight = Some(self.generation);
        Ok(job)
    }

    /// Apply the result of a job started with `begin_resize`.
    ///
    /// Results from another session or an outdated generation are
    /// discarded. A failed render keeps the previous output and state.
    pub fn complete_resize(
        &mut self,
        ticket: JobTicket,
        result: Result<ResizeOutput, ResizeError>,
    ) -> Result<ResizeCompletion, ResizeError> {
        if ticket.session != self.id {
            log::warn!("discarding render job from session {}", ticket.session);
            return Ok(ResizeCompletion::Discarded);
        }

        let generation = ticket.generation;
        let was_in_flight = self.in_flight == Some(generation);
        if was_in_flight {
            self.in_flight = None;
        }

        if !was_in_flight || generation != self.generation {
            log::warn!(
                "discarding render job {generation}; session is at generation {}",
                self.generation
            );
            return Ok(ResizeCompletion::Discarded);
        }

        let output = result.map_err(|e| self.fail(e))?;
        self.output = Some(output);
        self.message = None;
        self.state = SessionState::Resized;
        Ok(ResizeCompletion::Applied)
    }

    /// Resize synchronously.
    pub fn resize(&mut self) -> Result<(), ResizeError> {
        let job = self.begin_resize()?;
        let result = job.run();
        self.complete_resize(job.ticket(), result)?;
        Ok(())
    }

    /// The current output, available only after a successful resize.
    pub fn download(&mut self) -> Result<Download<'_>, ResizeError> {
        if self.state != SessionState::Resized || self.output.is_none() {
            return Err(self.fail(ResizeError::NoOutputAvailable));
        }
        let output = self.output.as_ref().ok_or(ResizeError::NoOutputAvailable)?;
        Ok(Download {
            filename: &output.filename,
            media_type: output.media_type,
            bytes: &output.bytes,
        })
    }

    /// Drop the image, configuration and output.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.source = None;
        self.config = ResizeConfiguration::default();
        self.output = None;
        self.in_flight = None;
        self.message = None;
        self.state = SessionState::Empty;
    }

    fn fail(&mut self, err: ResizeError) -> ResizeError {
        log::debug!("session error: {err}");
        self.message = Some(err.user_message());
        err
    }
}
