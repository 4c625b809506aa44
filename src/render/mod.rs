pub mod cpu;
pub(crate) mod pattern;
pub(crate) mod text;

pub use cpu::{CpuBackend, CpuBackendOpts, CpuPath};
pub use pattern::CpuPattern;
