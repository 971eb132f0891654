pub mod gesture_detector;
pub mod language_classifier;
pub mod pipeline;
pub mod retry;
pub mod selection_capture;
pub mod translate;
