//! Public library API for compiling abstract schemas into runtime types.

/// Descriptor model, structural type checker, runtime object model, and schema compiler.
pub mod model;
