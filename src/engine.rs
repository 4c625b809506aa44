//! Atomic execution of one operation list against a backend.

use std::marker::PhantomData;

use crate::backend::Backend;
use crate::foundation::core::{ImageDescriptor, PixelFormat};
use crate::foundation::error::{DrawError, DrawResult, OpSite};
use crate::foundation::settings::EngineSettings;
use crate::ops::{self, OpKind, args::Args, handlers};
use crate::resolve::Resolver;
use crate::tags::{TagOutput, TagStore};
use crate::value::{Operation, TagKey};

/// Input of one call. Nothing here is mutated by the engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawRequest<'a> {
    /// Surface to draw on. When present the call starts initialized on a copy of it.
    pub image: Option<&'a ImageDescriptor>,
    /// Initial scalar tags.
    pub tags: &'a [(TagKey, f64)],
    pub ops: &'a [Operation],
}

/// Result of a successful call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOutput {
    /// Every tag of the call, in key order.
    pub tags: Vec<(TagKey, TagOutput)>,
    /// The drawn surface, or `None` when no surface was ever bound.
    pub image: Option<ImageDescriptor>,
}

impl DrawOutput {
    pub fn tag(&self, key: &str) -> Option<&TagOutput> {
        self.tags.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallState {
    Uninitialized,
    Initialized,
    Completed,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SurfaceInfo {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) format: PixelFormat,
}

/// Per-call drawing context: the live backend, if any, and the tag store.
pub(crate) struct Session<'e, B: Backend> {
    pub(crate) backend: Option<B>,
    pub(crate) surface: Option<SurfaceInfo>,
    pub(crate) tags: TagStore<TagKey, B>,
    pub(crate) opts: &'e B::Opts,
    pub(crate) max_dimension: u32,
    state: CallState,
}

impl<'e, B: Backend> Session<'e, B> {
    fn new(opts: &'e B::Opts, max_dimension: u32) -> Self {
        Self {
            backend: None,
            surface: None,
            tags: TagStore::new(),
            opts,
            max_dimension,
            state: CallState::Uninitialized,
        }
    }

    /// Attach a freshly created backend. The caller has checked that none is live.
    pub(crate) fn bind(&mut self, backend: B, surface: SurfaceInfo) {
        debug_assert!(self.backend.is_none());
        self.backend = Some(backend);
        self.surface = Some(surface);
        self.state = CallState::Initialized;
    }

    fn run_op(
        &mut self,
        resolver: &Resolver<OpKind>,
        index: usize,
        op: &Operation,
    ) -> DrawResult<()> {
        let site = || OpSite::new(index, op.name.as_str());

        let kind = resolver
            .resolve(&op.name)
            .ok_or_else(|| DrawError::UnknownOperation { site: site() })?;
        if kind.needs_surface() && self.backend.is_none() {
            return Err(DrawError::NotInitialized { site: site() });
        }
        if op.args.len() != kind.arity() {
            return Err(DrawError::MalformedOperation {
                site: site(),
                reason: format!(
                    "{} takes {} argument(s), got {}",
                    kind.name(),
                    kind.arity(),
                    op.args.len()
                ),
            });
        }

        tracing::debug!(index, op = kind.name(), "dispatch");
        handlers::apply(kind, self, Args::new(&op.args)).map_err(|fault| fault.at(site()))?;

        if let Some(backend) = &self.backend {
            backend
                .status()
                .map_err(|status| DrawError::BackendStatus {
                    site: site(),
                    status,
                })?;
        }
        Ok(())
    }

    fn complete(mut self) -> DrawOutput {
        let image = match (self.backend.take(), self.surface) {
            (Some(backend), Some(surface)) => Some(ImageDescriptor {
                width: i64::from(surface.width),
                height: i64::from(surface.height),
                format: surface.format,
                data: backend.finish(),
            }),
            _ => None,
        };
        let tags = self.tags.drain();
        self.state = CallState::Completed;
        DrawOutput { tags, image }
    }

    fn abort(mut self) {
        drop(self.backend.take());
        self.tags.destroy();
        self.state = CallState::Failed;
    }
}

/// Runs operation lists with all-or-nothing semantics.
///
/// Each [`Engine::draw`] call owns its own buffer copy, backend and tag store; calls share
/// nothing mutable.
pub struct Engine<B: Backend> {
    settings: EngineSettings,
    opts: B::Opts,
    _backend: PhantomData<fn() -> B>,
}

impl<B: Backend> Default for Engine<B> {
    fn default() -> Self {
        Self::new(EngineSettings::default(), B::Opts::default())
    }
}

impl<B: Backend> Engine<B> {
    pub fn new(settings: EngineSettings, opts: B::Opts) -> Self {
        Self {
            settings,
            opts,
            _backend: PhantomData,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn backend_opts(&self) -> &B::Opts {
        &self.opts
    }

    /// Execute `req.ops` in order. On success returns the drawn copy and every tag; on the
    /// first failure releases everything the call created and returns the error.
    #[tracing::instrument(skip_all, fields(ops = req.ops.len(), tags = req.tags.len()))]
    pub fn draw(&self, req: DrawRequest<'_>) -> DrawResult<DrawOutput> {
        let mut session = Session::<B>::new(&self.opts, self.settings.max_dimension);
        match self.run(&mut session, &req) {
            Ok(()) => Ok(session.complete()),
            Err(err) => {
                tracing::warn!(error = %err, state = ?session.state, "draw aborted");
                session.abort();
                Err(err)
            }
        }
    }

    fn run(&self, session: &mut Session<'_, B>, req: &DrawRequest<'_>) -> DrawResult<()> {
        if let Some(image) = req.image {
            let (width, height, data) = image.padded_copy(self.settings.max_dimension)?;
            let backend = B::create(width, height, image.format, data, &self.opts)
                .map_err(DrawError::BadSurfaceStatus)?;
            backend.status().map_err(DrawError::BadSurfaceStatus)?;
            session.bind(
                backend,
                SurfaceInfo {
                    width,
                    height,
                    format: image.format,
                },
            );
        }

        for (key, value) in req.tags {
            session
                .tags
                .set_scalar(key.clone(), *value)
                .map_err(|_| DrawError::DuplicateTag { key: key.clone() })?;
        }

        let resolver = ops::resolver(self.settings.match_mode);
        for (index, op) in req.ops.iter().enumerate() {
            session.run_op(&resolver, index, op)?;
        }
        Ok(())
    }
}
