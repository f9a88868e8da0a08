pub mod sample;
pub mod traits;

// Re-export
pub use sample::SampleHierarchyRepository;
pub use traits::HierarchyRepository;
