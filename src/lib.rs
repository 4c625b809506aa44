#![forbid(unsafe_code)]

//! Tagged 2-D drawing command interpreter.
//!
//! A call takes a surface (or creates one), a list of initial scalar tags and an operation
//! list, and runs the operations against a rendering backend. Either every operation
//! succeeds and the call returns the drawn copy plus every tag, or nothing is returned and
//! all resources the call created are released.

pub mod backend;
pub mod codec;
pub mod composite_cpu;
pub mod engine;
pub mod foundation;
pub mod ops;
pub mod pixel;
pub mod render;
pub mod resolve;
pub mod script;
pub mod tags;
pub mod value;

pub use backend::{Antialias, Backend, FontSlant, FontWeight, PatternKind, Resources, Status};
pub use engine::{CallState, DrawOutput, DrawRequest, Engine};
pub use foundation::core::{ImageDescriptor, MAX_DIMENSION, PixelFormat};
pub use foundation::error::{DrawError, DrawResult, OpSite};
pub use foundation::settings::EngineSettings;
pub use ops::OpKind;
pub use render::{CpuBackend, CpuBackendOpts, CpuPath, CpuPattern};
pub use resolve::{MatchMode, Resolver};
pub use script::Script;
pub use tags::{TagOutput, TagStore};
pub use value::{Operation, TagKey, Value};

/// The engine over the built-in raster backend.
pub type CpuEngine = Engine<CpuBackend>;
