pub mod use_cases;

pub use use_cases::gesture_detector::GestureDetector;
pub use use_cases::pipeline::{PipelineCoordinator, ResultSink};
pub use use_cases::retry::RetryPolicy;
pub use use_cases::selection_capture::{SelectionCapture, SelectionSource};
pub use use_cases::translate::{TranslateUseCase, Translator};
