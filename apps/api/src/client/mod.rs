//! Headless client flows: staging an uploaded resume and driving the three
//! analysis pages. Rendering stays with the UI layer; these modules only
//! produce the typed view models it consumes.

pub mod pages;
pub mod staging;
